// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Deserializer};

#[cfg(feature = "openapi")]
use utoipa::IntoParams;

/// Query string of `GET /dashboard-metrics/`.
///
/// `space_ids` may be repeated: `?space_ids=a&space_ids=b`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DashboardMetricsQuery {
	/// Inclusive start, `YYYY-MM-DD`. Defaults to 30 days before today.
	#[serde(default, deserialize_with = "present")]
	pub start_date: Option<String>,
	/// Inclusive end, `YYYY-MM-DD`. Defaults to today.
	#[serde(default, deserialize_with = "present")]
	pub end_date: Option<String>,
	/// Spaces to report on instead of the caller's profile spaces.
	#[serde(default)]
	pub space_ids: Vec<String>,
}

/// A sent parameter is kept even when empty, so `?start_date=` is rejected
/// by the date parser instead of silently meaning "default".
fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	String::deserialize(deserializer).map(Some)
}

impl DashboardMetricsQuery {
	/// `None` when the parameter was not sent at all.
	pub fn explicit_space_ids(&self) -> Option<Vec<String>> {
		(!self.space_ids.is_empty()).then(|| self.space_ids.clone())
	}
}

/// Query string of `GET /features/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct FeaturesQuery {
	/// `workspace_features` or `coliving_features`.
	pub feature_type: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_absent_space_ids_is_none() {
		let query: DashboardMetricsQuery =
			serde_json::from_str(r#"{"start_date": "2024-01-01"}"#).unwrap();
		assert_eq!(query.explicit_space_ids(), None);
		assert_eq!(query.start_date.as_deref(), Some("2024-01-01"));
	}

	#[test]
	fn test_empty_date_is_present() {
		let query: DashboardMetricsQuery = serde_json::from_str(r#"{"end_date": ""}"#).unwrap();
		assert_eq!(query.end_date.as_deref(), Some(""));
		assert_eq!(query.start_date, None);
	}

	#[test]
	fn test_blank_space_ids_are_kept_for_validation() {
		let query: DashboardMetricsQuery =
			serde_json::from_str(r#"{"space_ids": [""]}"#).unwrap();
		assert_eq!(query.explicit_space_ids(), Some(vec![String::new()]));
	}
}
