// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracked analytics events and their public metric names.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An analytics event surfaced on the partner dashboard.
///
/// The set is closed: every variant maps to exactly one public metric key and
/// no other event name can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedEvent {
	PartnerProfileNavigation,
	AddFavorite,
	RemoveFavorite,
	MarkerTap,
	HomeListviewItemTap,
	BrowseReviews,
	AddReview,
	ExternalLinkNavigation,
}

impl TrackedEvent {
	pub const ALL: [TrackedEvent; 8] = [
		TrackedEvent::PartnerProfileNavigation,
		TrackedEvent::AddFavorite,
		TrackedEvent::RemoveFavorite,
		TrackedEvent::MarkerTap,
		TrackedEvent::HomeListviewItemTap,
		TrackedEvent::BrowseReviews,
		TrackedEvent::AddReview,
		TrackedEvent::ExternalLinkNavigation,
	];

	/// Event type as recorded by the mobile apps.
	pub fn event_name(self) -> &'static str {
		match self {
			TrackedEvent::PartnerProfileNavigation => "partner_profile_navigation",
			TrackedEvent::AddFavorite => "add_favorite",
			TrackedEvent::RemoveFavorite => "remove_favorite",
			TrackedEvent::MarkerTap => "marker_tap",
			TrackedEvent::HomeListviewItemTap => "home_listview_item_tap",
			TrackedEvent::BrowseReviews => "browse_reviews",
			TrackedEvent::AddReview => "add_review",
			TrackedEvent::ExternalLinkNavigation => "external_link_navigation",
		}
	}

	/// Key under which the count is published in the metrics response.
	pub fn metric_key(self) -> &'static str {
		match self {
			TrackedEvent::PartnerProfileNavigation => "profileViews",
			TrackedEvent::AddFavorite => "favoritesAdded",
			TrackedEvent::RemoveFavorite => "favoritesRemoved",
			TrackedEvent::MarkerTap => "markerTaps",
			TrackedEvent::HomeListviewItemTap => "listViewTaps",
			TrackedEvent::BrowseReviews => "reviewsBrowsed",
			TrackedEvent::AddReview => "reviewsAdded",
			TrackedEvent::ExternalLinkNavigation => "externalLinks",
		}
	}
}

impl fmt::Display for TrackedEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.event_name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tracked event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for TrackedEvent {
	type Err = UnknownEvent;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		TrackedEvent::ALL
			.into_iter()
			.find(|e| e.event_name() == s)
			.ok_or_else(|| UnknownEvent(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn mapping_matches_public_contract() {
		let pairs: Vec<(&str, &str)> = TrackedEvent::ALL
			.iter()
			.map(|e| (e.event_name(), e.metric_key()))
			.collect();
		assert_eq!(
			pairs,
			vec![
				("partner_profile_navigation", "profileViews"),
				("add_favorite", "favoritesAdded"),
				("remove_favorite", "favoritesRemoved"),
				("marker_tap", "markerTaps"),
				("home_listview_item_tap", "listViewTaps"),
				("browse_reviews", "reviewsBrowsed"),
				("add_review", "reviewsAdded"),
				("external_link_navigation", "externalLinks"),
			]
		);
	}

	#[test]
	fn mapping_is_a_bijection() {
		let names: HashSet<_> = TrackedEvent::ALL.iter().map(|e| e.event_name()).collect();
		let keys: HashSet<_> = TrackedEvent::ALL.iter().map(|e| e.metric_key()).collect();
		assert_eq!(names.len(), 8);
		assert_eq!(keys.len(), 8);
	}

	#[test]
	fn parses_known_names_only() {
		for event in TrackedEvent::ALL {
			assert_eq!(event.event_name().parse::<TrackedEvent>(), Ok(event));
		}
		assert_eq!(
			"page_view".parse::<TrackedEvent>(),
			Err(UnknownEvent("page_view".to_string()))
		);
		assert!("profileViews".parse::<TrackedEvent>().is_err());
	}
}
