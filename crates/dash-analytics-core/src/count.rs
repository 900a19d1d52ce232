// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::date_range::DateRange;
use crate::event::TrackedEvent;
use crate::scope::SpaceId;

/// Outcome of a single per-event analytics query.
///
/// A failed query never fails the dashboard. It is recorded as `ZeroFilled`
/// and contributes nothing to the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventCount {
	Counted(u64),
	ZeroFilled { reason: String },
}

impl EventCount {
	pub fn zero_filled(reason: impl Into<String>) -> Self {
		EventCount::ZeroFilled {
			reason: reason.into(),
		}
	}

	pub fn value(&self) -> u64 {
		match self {
			EventCount::Counted(n) => *n,
			EventCount::ZeroFilled { .. } => 0,
		}
	}

	pub fn is_zero_filled(&self) -> bool {
		matches!(self, EventCount::ZeroFilled { .. })
	}
}

/// A backend able to count occurrences of a tracked event.
///
/// Implementations must not fail outward; any upstream error becomes
/// [`EventCount::ZeroFilled`].
#[async_trait]
pub trait EventCountSource: Send + Sync {
	async fn query_event_count(
		&self,
		space_id: Option<&SpaceId>,
		event: TrackedEvent,
		range: &DateRange,
	) -> EventCount;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_filled_counts_as_zero() {
		let count = EventCount::zero_filled("HTTP 500");
		assert_eq!(count.value(), 0);
		assert!(count.is_zero_filled());
	}

	#[test]
	fn counted_reports_value() {
		let count = EventCount::Counted(25);
		assert_eq!(count.value(), 25);
		assert!(!count.is_zero_filled());
	}
}
