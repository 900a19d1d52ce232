// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registration link encryption key.

use dash_common_config::SecretString;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkConfigLayer {
	#[serde(default)]
	pub key: Option<SecretString>,
}

impl LinkConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.key.is_some() {
			self.key = other.key;
		}
	}

	pub fn finalize(self) -> LinkConfig {
		LinkConfig {
			key: self.key.filter(|k| !k.is_blank()),
		}
	}
}

/// Base64 encoded 32 byte key. `None` means an ephemeral key is generated at start.
#[derive(Debug, Clone, Default)]
pub struct LinkConfig {
	pub key: Option<SecretString>,
}
