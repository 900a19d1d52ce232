// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire shapes of the segmentation endpoint.

use serde::{Deserialize, Serialize};

/// Value of the `e` query parameter.
#[derive(Debug, Serialize)]
pub(crate) struct EventFilter<'a> {
	pub event_type: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_properties: Option<SpaceFilter<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpaceFilter<'a> {
	pub partner_space_id: &'a str,
}

/// Segmentation response. Everything outside `data.series` is ignored and
/// every level is optional; a missing level means no data.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SegmentationResponse {
	#[serde(default)]
	pub data: Option<SegmentationData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SegmentationData {
	#[serde(default)]
	pub series: Option<Vec<Vec<u64>>>,
}

impl SegmentationResponse {
	/// Sum of the first series, or 0 when there is none.
	pub fn first_series_total(&self) -> u64 {
		self.data
			.as_ref()
			.and_then(|d| d.series.as_ref())
			.and_then(|s| s.first())
			.map(|points| points.iter().fold(0u64, |acc, n| acc.saturating_add(*n)))
			.unwrap_or(0)
	}
}
