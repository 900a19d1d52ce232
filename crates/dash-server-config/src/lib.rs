// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the partner dashboard server.
//!
//! Layers are merged from built-in defaults, an optional TOML file and
//! `DASH_SERVER_*` environment variables, in that order of precedence.
//!
//! ```ignore
//! let config = dash_server_config::load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info, warn};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub firebase: FirebaseConfig,
	pub amplitude: AmplitudeConfig,
	pub link: LinkConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from defaults, `/etc/partner-dashboard/server.toml` and the environment.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Resolve a merged layer, applying defaults and validation.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let firebase = layer.firebase.unwrap_or_default().finalize();
	let amplitude = layer.amplitude.unwrap_or_default().finalize();
	let link = layer.link.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_amplitude(&amplitude)?;

	if !firebase.is_configured() {
		warn!("DASH_SERVER_FIREBASE_PROJECT_ID is not set; all bearer tokens will be rejected");
	}

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		firebase_configured = firebase.is_configured(),
		amplitude_configured = amplitude.is_configured(),
		amplitude_base_url = %amplitude.base_url,
		link_key_configured = link.key.is_some(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		firebase,
		amplitude,
		link,
		logging,
	})
}

fn validate_amplitude(config: &AmplitudeConfig) -> Result<(), ConfigError> {
	if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
		return Err(ConfigError::InvalidValue {
			key: "amplitude.base_url".to_string(),
			message: format!("'{}' is not an http(s) url", config.base_url),
		});
	}
	if config.timeout.is_zero() {
		return Err(ConfigError::Validation(
			"amplitude.timeout_secs must be greater than zero".to_string(),
		));
	}
	Ok(())
}
