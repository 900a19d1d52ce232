// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	AmplitudeConfigLayer, DatabaseConfigLayer, FirebaseConfigLayer, HttpConfigLayer,
	LinkConfigLayer, LoggingConfigLayer,
};

/// Server configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub firebase: Option<FirebaseConfigLayer>,
	#[serde(default)]
	pub amplitude: Option<AmplitudeConfigLayer>,
	#[serde(default)]
	pub link: Option<LinkConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_option(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_option(
			&mut self.database,
			other.database,
			DatabaseConfigLayer::merge,
		);
		merge_option(
			&mut self.firebase,
			other.firebase,
			FirebaseConfigLayer::merge,
		);
		merge_option(
			&mut self.amplitude,
			other.amplitude,
			AmplitudeConfigLayer::merge,
		);
		merge_option(&mut self.link, other.link, LinkConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_empty_layers() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer::default());
		assert!(base.http.is_none());
		assert!(base.amplitude.is_none());
	}

	#[test]
	fn test_merge_other_overwrites() {
		let mut base = ServerConfigLayer {
			http: Some(HttpConfigLayer {
				port: Some(9000),
				host: Some("127.0.0.1".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(ServerConfigLayer {
			http: Some(HttpConfigLayer {
				port: Some(8080),
				..Default::default()
			}),
			..Default::default()
		});
		let http = base.http.unwrap();
		assert_eq!(http.port, Some(8080));
		assert_eq!(http.host, Some("127.0.0.1".to_string()));
	}

	#[test]
	fn test_merge_adds_missing_sections() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer {
			firebase: Some(FirebaseConfigLayer {
				project_id: Some("partners".to_string()),
				jwks_url: None,
			}),
			..Default::default()
		});
		assert_eq!(
			base.firebase.unwrap().project_id,
			Some("partners".to_string())
		);
	}

	#[test]
	fn test_parse_full_toml() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
[http]
port = 9090

[amplitude]
base_url = "http://localhost:7777/segmentation"
timeout_secs = 5

[logging]
level = "debug"
"#,
		)
		.unwrap();
		assert_eq!(layer.http.unwrap().port, Some(9090));
		let amplitude = layer.amplitude.unwrap();
		assert_eq!(amplitude.timeout_secs, Some(5));
		assert!(amplitude.api_key.is_none());
	}
}
