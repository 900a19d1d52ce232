// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Per-call timeout used when a caller has no configured value.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client builder preloaded with the dashboard User-Agent.
///
/// ```ignore
/// let client = dash_common_http::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Build a client whose every request is bounded by `timeout`.
pub fn client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	builder().timeout(timeout).build()
}

/// Format: `partner-dashboard/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"partner-dashboard/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_product_and_platform() {
		let ua = user_agent();
		assert!(ua.starts_with("partner-dashboard/"));
		assert!(ua.contains(std::env::consts::OS));
	}

	#[test]
	fn client_with_timeout_builds() {
		assert!(client_with_timeout(Duration::from_secs(1)).is_ok());
	}
}
