// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::event::TrackedEvent;

/// The dashboard metrics vector.
///
/// Serializes to exactly eight camelCase keys. The key names are a public
/// contract with the dashboard frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
	pub profile_views: u64,
	pub favorites_added: u64,
	pub favorites_removed: u64,
	pub marker_taps: u64,
	pub list_view_taps: u64,
	pub reviews_browsed: u64,
	pub reviews_added: u64,
	pub external_links: u64,
}

impl DashboardMetrics {
	fn slot(&mut self, event: TrackedEvent) -> &mut u64 {
		match event {
			TrackedEvent::PartnerProfileNavigation => &mut self.profile_views,
			TrackedEvent::AddFavorite => &mut self.favorites_added,
			TrackedEvent::RemoveFavorite => &mut self.favorites_removed,
			TrackedEvent::MarkerTap => &mut self.marker_taps,
			TrackedEvent::HomeListviewItemTap => &mut self.list_view_taps,
			TrackedEvent::BrowseReviews => &mut self.reviews_browsed,
			TrackedEvent::AddReview => &mut self.reviews_added,
			TrackedEvent::ExternalLinkNavigation => &mut self.external_links,
		}
	}

	pub fn get(&self, event: TrackedEvent) -> u64 {
		match event {
			TrackedEvent::PartnerProfileNavigation => self.profile_views,
			TrackedEvent::AddFavorite => self.favorites_added,
			TrackedEvent::RemoveFavorite => self.favorites_removed,
			TrackedEvent::MarkerTap => self.marker_taps,
			TrackedEvent::HomeListviewItemTap => self.list_view_taps,
			TrackedEvent::BrowseReviews => self.reviews_browsed,
			TrackedEvent::AddReview => self.reviews_added,
			TrackedEvent::ExternalLinkNavigation => self.external_links,
		}
	}

	/// Add `count` to the metric for `event`, saturating at `u64::MAX`.
	pub fn add(&mut self, event: TrackedEvent, count: u64) {
		let slot = self.slot(event);
		*slot = slot.saturating_add(count);
	}

	/// `(metric_key, value)` pairs in the order of [`TrackedEvent::ALL`].
	pub fn entries(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
		TrackedEvent::ALL
			.into_iter()
			.map(|e| (e.metric_key(), self.get(e)))
	}
}
