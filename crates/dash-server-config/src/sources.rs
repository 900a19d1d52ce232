// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use dash_common_config::load_secret_env;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AmplitudeConfigLayer, DatabaseConfigLayer, FirebaseConfigLayer, HttpConfigLayer,
	LinkConfigLayer, LoggingConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is skipped.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/partner-dashboard/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: DASH_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			database: Some(DatabaseConfigLayer {
				url: env_var("DASH_SERVER_DATABASE_URL"),
			}),
			firebase: Some(FirebaseConfigLayer {
				project_id: env_var("DASH_SERVER_FIREBASE_PROJECT_ID"),
				jwks_url: env_var("DASH_SERVER_FIREBASE_JWKS_URL"),
			}),
			amplitude: Some(load_amplitude_from_env()?),
			link: Some(LinkConfigLayer {
				key: load_secret_env("DASH_SERVER_LINK_KEY")?,
			}),
			logging: Some(LoggingConfigLayer {
				level: env_var("DASH_SERVER_LOG_LEVEL"),
			}),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, kind: &str) -> Result<Option<T>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid {kind} value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	let cors_origins = env_var("DASH_SERVER_CORS_ORIGINS").map(|s| {
		s.split(',')
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect()
	});

	Ok(HttpConfigLayer {
		host: env_var("DASH_SERVER_HOST"),
		port: env_parse("DASH_SERVER_PORT", "u16")?,
		base_url: env_var("DASH_SERVER_BASE_URL"),
		cors_origins,
	})
}

fn load_amplitude_from_env() -> Result<AmplitudeConfigLayer, ConfigError> {
	Ok(AmplitudeConfigLayer {
		api_key: load_secret_env("DASH_SERVER_AMPLITUDE_API_KEY")?,
		secret_key: load_secret_env("DASH_SERVER_AMPLITUDE_SECRET_KEY")?,
		base_url: env_var("DASH_SERVER_AMPLITUDE_BASE_URL"),
		timeout_secs: env_parse("DASH_SERVER_AMPLITUDE_TIMEOUT_SECS", "u64")?,
		max_concurrent_queries: env_parse("DASH_SERVER_AMPLITUDE_MAX_CONCURRENT_QUERIES", "usize")?,
	})
}
