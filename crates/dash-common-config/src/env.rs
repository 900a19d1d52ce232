// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret loading with the `VAR` / `VAR_FILE` convention.
//!
//! `VAR_FILE` wins over `VAR` so Docker and Kubernetes secret mounts can be
//! used without exporting credentials into the process environment.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::Secret;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load an optional secret.
///
/// Reads `{var}_FILE` first (one trailing newline stripped), then `{var}`.
/// Empty values are treated as unset.
pub fn load_secret_env(var: &str) -> Result<Option<Secret<String>>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(Secret::new(value)));
	}

	match env::var(var) {
		Ok(value) if !value.is_empty() => Ok(Some(Secret::new(value))),
		_ => Ok(None),
	}
}

/// Load a secret that must be present.
pub fn require_secret_env(var: &str) -> Result<Secret<String>, RequiredSecretError> {
	load_secret_env(var)?.ok_or_else(|| RequiredSecretError::Missing {
		var: var.to_string(),
		file_var: format!("{var}_FILE"),
	})
}

#[derive(Debug, Error)]
pub enum RequiredSecretError {
	#[error("required secret not found: set either {var} or {file_var}")]
	Missing { var: String, file_var: String },

	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	// Each test uses its own variable names; the process environment is shared.

	#[test]
	fn unset_returns_none() {
		env::remove_var("DASH_TEST_UNSET_SECRET");
		env::remove_var("DASH_TEST_UNSET_SECRET_FILE");
		assert!(load_secret_env("DASH_TEST_UNSET_SECRET").unwrap().is_none());
	}

	#[test]
	fn direct_value_is_loaded() {
		env::set_var("DASH_TEST_DIRECT_SECRET", "direct-value");
		let secret = load_secret_env("DASH_TEST_DIRECT_SECRET").unwrap().unwrap();
		assert_eq!(secret.expose(), "direct-value");
		env::remove_var("DASH_TEST_DIRECT_SECRET");
	}

	#[test]
	fn empty_value_is_unset() {
		env::set_var("DASH_TEST_EMPTY_SECRET", "");
		assert!(load_secret_env("DASH_TEST_EMPTY_SECRET").unwrap().is_none());
		env::remove_var("DASH_TEST_EMPTY_SECRET");
	}

	#[test]
	fn file_takes_precedence_and_strips_newline() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "from-file").unwrap();

		env::set_var("DASH_TEST_FILE_SECRET", "from-env");
		env::set_var("DASH_TEST_FILE_SECRET_FILE", file.path());
		let secret = load_secret_env("DASH_TEST_FILE_SECRET").unwrap().unwrap();
		assert_eq!(secret.expose(), "from-file");

		env::remove_var("DASH_TEST_FILE_SECRET");
		env::remove_var("DASH_TEST_FILE_SECRET_FILE");
	}

	#[test]
	fn missing_file_is_an_error() {
		env::set_var("DASH_TEST_BADFILE_SECRET_FILE", "/nonexistent/dash/secret");
		let err = load_secret_env("DASH_TEST_BADFILE_SECRET").unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));
		env::remove_var("DASH_TEST_BADFILE_SECRET_FILE");
	}

	#[test]
	fn empty_file_path_is_an_error() {
		env::set_var("DASH_TEST_EMPTYPATH_SECRET_FILE", "");
		let err = load_secret_env("DASH_TEST_EMPTYPATH_SECRET").unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));
		env::remove_var("DASH_TEST_EMPTYPATH_SECRET_FILE");
	}

	#[test]
	fn require_reports_both_names() {
		env::remove_var("DASH_TEST_REQUIRED_SECRET");
		env::remove_var("DASH_TEST_REQUIRED_SECRET_FILE");
		let err = require_secret_env("DASH_TEST_REQUIRED_SECRET").unwrap_err();
		let message = err.to_string();
		assert!(message.contains("DASH_TEST_REQUIRED_SECRET"));
		assert!(message.contains("DASH_TEST_REQUIRED_SECRET_FILE"));
	}
}
