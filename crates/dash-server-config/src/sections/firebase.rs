// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity provider (Firebase Authentication) configuration.

use serde::Deserialize;

pub const DEFAULT_FIREBASE_JWKS_URL: &str =
	"https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Resolved identity configuration.
///
/// Without a project id every token is rejected.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
	pub project_id: Option<String>,
	pub jwks_url: String,
}

impl Default for FirebaseConfig {
	fn default() -> Self {
		FirebaseConfigLayer::default().finalize()
	}
}

impl FirebaseConfig {
	pub fn is_configured(&self) -> bool {
		self.project_id.is_some()
	}

	/// Expected `iss` claim for ID tokens of this project.
	pub fn issuer(&self) -> Option<String> {
		self
			.project_id
			.as_ref()
			.map(|id| format!("https://securetoken.google.com/{id}"))
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirebaseConfigLayer {
	#[serde(default)]
	pub project_id: Option<String>,
	#[serde(default)]
	pub jwks_url: Option<String>,
}

impl FirebaseConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.project_id.is_some() {
			self.project_id = other.project_id;
		}
		if other.jwks_url.is_some() {
			self.jwks_url = other.jwks_url;
		}
	}

	pub fn finalize(self) -> FirebaseConfig {
		FirebaseConfig {
			project_id: self.project_id.filter(|id| !id.trim().is_empty()),
			jwks_url: self
				.jwks_url
				.unwrap_or_else(|| DEFAULT_FIREBASE_JWKS_URL.to_string()),
		}
	}
}
