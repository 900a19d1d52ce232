// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Amplitude segmentation client implementation.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use dash_analytics_core::{
	DateRange, EventCount, EventCountSource, ResolvedWindow, SpaceId, TrackedEvent,
};
use dash_common_config::{Secret, SecretString};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, error, instrument, trace, warn};

use crate::error::AmplitudeError;
use crate::types::{EventFilter, SegmentationResponse, SpaceFilter};

pub const DEFAULT_BASE_URL: &str = "https://amplitude.com/api/2/segmentation";

/// Client for the Amplitude segmentation endpoint.
///
/// Holds only immutable state and is shared across requests.
#[derive(Debug, Clone)]
pub struct AmplitudeClient {
	http_client: Client,
	authorization: SecretString,
	base_url: String,
}

impl AmplitudeClient {
	/// Creates a client with the default base URL and a 30 second timeout.
	///
	/// Fails with [`AmplitudeError::MissingCredentials`] when either half of
	/// the key pair is missing or blank.
	pub fn new(
		api_key: Option<&SecretString>,
		secret_key: Option<&SecretString>,
	) -> Result<Self, AmplitudeError> {
		let (api_key, secret_key) = match (api_key, secret_key) {
			(Some(k), Some(s)) if !k.is_blank() && !s.is_blank() => (k, s),
			_ => return Err(AmplitudeError::MissingCredentials),
		};

		let encoded = STANDARD.encode(format!("{}:{}", api_key.expose(), secret_key.expose()));

		Ok(Self {
			http_client: dash_common_http::client_with_timeout(dash_common_http::DEFAULT_TIMEOUT)?,
			authorization: Secret::new(format!("Basic {encoded}")),
			base_url: DEFAULT_BASE_URL.to_string(),
		})
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Replaces the per-call timeout. A timed out call is a transport failure.
	pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AmplitudeError> {
		self.http_client = dash_common_http::client_with_timeout(timeout)?;
		Ok(self)
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Sum of occurrences of `event` over `window`, optionally scoped to one space.
	#[instrument(skip(self), fields(event = %event, space_id = space_id.map(SpaceId::as_str)))]
	pub async fn fetch_event_total(
		&self,
		space_id: Option<&SpaceId>,
		event: TrackedEvent,
		window: ResolvedWindow,
	) -> Result<u64, AmplitudeError> {
		let filter = EventFilter {
			event_type: event.event_name(),
			user_properties: space_id.map(|id| SpaceFilter {
				partner_space_id: id.as_str(),
			}),
		};
		let filter = serde_json::to_string(&filter)
			.map_err(|e| AmplitudeError::InvalidResponse(format!("filter encoding: {e}")))?;
		let start = window.start_compact();
		let end = window.end_compact();

		debug!(url = %self.base_url, %start, %end, "Sending segmentation query to Amplitude");
		trace!(filter = %filter, "Segmentation filter");

		let response = self
			.http_client
			.get(&self.base_url)
			.header(AUTHORIZATION, self.authorization.expose())
			.query(&[
				("e", filter.as_str()),
				("start", start.as_str()),
				("end", end.as_str()),
				("i", "1"),
				("m", "totals"),
			])
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					error!("Amplitude request timed out");
					return AmplitudeError::Timeout;
				}
				error!(error = %e, "Network error during Amplitude request");
				AmplitudeError::Network(e)
			})?;

		let status = response.status();
		debug!(status = %status, "Received response from Amplitude");

		if !status.is_success() {
			let status_code = status.as_u16();
			let body = response.text().await.unwrap_or_default();

			if status_code == 401 || status_code == 403 {
				error!(status = status_code, "Amplitude rejected credentials");
				return Err(AmplitudeError::Unauthorized);
			}

			error!(status = status_code, body = %body, "Amplitude API error");
			return Err(AmplitudeError::ApiError {
				status: status_code,
				message: body,
			});
		}

		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read Amplitude response body");
			AmplitudeError::Network(e)
		})?;

		trace!(body = %body, "Response body");

		let parsed: SegmentationResponse = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse Amplitude response");
			AmplitudeError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;

		let total = parsed.first_series_total();
		debug!(total, "Segmentation query completed");
		Ok(total)
	}
}

#[async_trait]
impl EventCountSource for AmplitudeClient {
	async fn query_event_count(
		&self,
		space_id: Option<&SpaceId>,
		event: TrackedEvent,
		range: &DateRange,
	) -> EventCount {
		// Missing bounds resolve against the time of this call.
		let window = range.resolve_at(Utc::now().date_naive());

		match self.fetch_event_total(space_id, event, window).await {
			Ok(total) => EventCount::Counted(total),
			Err(e) => {
				warn!(
					event = %event,
					space_id = space_id.map(SpaceId::as_str),
					error = %e,
					"Amplitude query failed, reporting zero"
				);
				EventCount::zero_filled(e.to_string())
			}
		}
	}
}
