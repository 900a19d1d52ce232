// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server configuration.

use serde::Deserialize;

/// HTTP server configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
	pub base_url: String,
	/// Allowed CORS origins. Empty means any origin.
	pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
	fn default() -> Self {
		HttpConfigLayer::default().finalize()
	}
}

impl HttpConfig {
	pub fn allows_any_origin(&self) -> bool {
		self.cors_origins.is_empty()
	}
}

/// HTTP configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfigLayer {
	#[serde(default)]
	pub host: Option<String>,
	#[serde(default)]
	pub port: Option<u16>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub cors_origins: Option<Vec<String>>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: HttpConfigLayer) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.cors_origins.is_some() {
			self.cors_origins = other.cors_origins;
		}
	}

	pub fn finalize(self) -> HttpConfig {
		let port = self.port.unwrap_or(8080);
		let cors_origins = self
			.cors_origins
			.unwrap_or_default()
			.into_iter()
			.map(|o| o.trim().to_string())
			.filter(|o| !o.is_empty() && o != "*")
			.collect();

		HttpConfig {
			host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
			port,
			base_url: self
				.base_url
				.unwrap_or_else(|| format!("http://localhost:{port}")),
			cors_origins,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = HttpConfigLayer::default().finalize();
		assert_eq!(config.host, "0.0.0.0");
		assert_eq!(config.port, 8080);
		assert_eq!(config.base_url, "http://localhost:8080");
		assert!(config.allows_any_origin());
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = HttpConfigLayer {
			host: Some("127.0.0.1".to_string()),
			port: Some(3000),
			..Default::default()
		};
		base.merge(HttpConfigLayer {
			port: Some(9000),
			..Default::default()
		});
		assert_eq!(base.host, Some("127.0.0.1".to_string()));
		assert_eq!(base.port, Some(9000));
	}

	#[test]
	fn test_wildcard_origin_means_any() {
		let config = HttpConfigLayer {
			cors_origins: Some(vec!["*".to_string()]),
			..Default::default()
		}
		.finalize();
		assert!(config.allows_any_origin());
	}

	#[test]
	fn test_explicit_origins_are_kept() {
		let config = HttpConfigLayer {
			cors_origins: Some(vec![
				" https://partners.example.com ".to_string(),
				String::new(),
			]),
			..Default::default()
		}
		.finalize();
		assert_eq!(config.cors_origins, vec!["https://partners.example.com"]);
	}
}
