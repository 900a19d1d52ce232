// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics (Amplitude segmentation API) configuration section.

use std::time::Duration;

use dash_common_config::SecretString;
use serde::Deserialize;

pub const DEFAULT_AMPLITUDE_BASE_URL: &str = "https://amplitude.com/api/2/segmentation";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmplitudeConfigLayer {
	#[serde(default)]
	pub api_key: Option<SecretString>,
	#[serde(default)]
	pub secret_key: Option<SecretString>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	#[serde(default)]
	pub max_concurrent_queries: Option<usize>,
}

impl AmplitudeConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.secret_key.is_some() {
			self.secret_key = other.secret_key;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
		if other.max_concurrent_queries.is_some() {
			self.max_concurrent_queries = other.max_concurrent_queries;
		}
	}

	pub fn finalize(self) -> AmplitudeConfig {
		AmplitudeConfig {
			api_key: self.api_key.filter(|k| !k.is_blank()),
			secret_key: self.secret_key.filter(|k| !k.is_blank()),
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_AMPLITUDE_BASE_URL.to_string()),
			timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
			max_concurrent_queries: self
				.max_concurrent_queries
				.unwrap_or(DEFAULT_MAX_CONCURRENT_QUERIES)
				.max(1),
		}
	}
}

/// Resolved analytics configuration.
///
/// Credentials stay optional here; the client refuses to start without both.
#[derive(Debug, Clone)]
pub struct AmplitudeConfig {
	pub api_key: Option<SecretString>,
	pub secret_key: Option<SecretString>,
	pub base_url: String,
	pub timeout: Duration,
	pub max_concurrent_queries: usize,
}

impl Default for AmplitudeConfig {
	fn default() -> Self {
		AmplitudeConfigLayer::default().finalize()
	}
}

impl AmplitudeConfig {
	pub fn is_configured(&self) -> bool {
		self.api_key.is_some() && self.secret_key.is_some()
	}
}
