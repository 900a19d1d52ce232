// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Counting fakes for the store and analytics seams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dash_analytics_core::{DateRange, EventCount, EventCountSource, SpaceId, TrackedEvent};
use dash_server_db::{DbError, NewPartnerProfile, PartnerProfile, PartnerProfileStore};

#[derive(Default)]
pub struct FakeProfiles {
	profiles: HashMap<String, PartnerProfile>,
	lookups: AtomicUsize,
}

impl FakeProfiles {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn with_profile(uid: &str, space_ids: &[&str]) -> Self {
		let mut fake = Self::default();
		fake.profiles.insert(
			uid.to_string(),
			PartnerProfile {
				id: uid.to_string(),
				email: format!("{uid}@example.com"),
				space_ids: space_ids.iter().map(|s| s.to_string()).collect(),
				status: "active".to_string(),
				created_at: None,
				updated_at: None,
			},
		);
		fake
	}

	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PartnerProfileStore for FakeProfiles {
	async fn get_profile(&self, uid: &str) -> Result<Option<PartnerProfile>, DbError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		Ok(self.profiles.get(uid).cloned())
	}

	async fn find_profile_by_space_id(
		&self,
		space_id: &str,
	) -> Result<Option<PartnerProfile>, DbError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		Ok(self
			.profiles
			.values()
			.find(|p| p.space_ids.iter().any(|id| id == space_id))
			.cloned())
	}

	async fn create_profile(
		&self,
		_uid: &str,
		_profile: &NewPartnerProfile,
	) -> Result<PartnerProfile, DbError> {
		Err(DbError::Internal("read-only fake".to_string()))
	}
}

enum Answer {
	Series(Vec<u64>),
	PerSpace(HashMap<String, u64>),
}

pub struct FakeSource {
	answer: Answer,
	failing: Option<TrackedEvent>,
	calls: AtomicUsize,
	seen: Mutex<Vec<(SpaceId, DateRange)>>,
}

impl FakeSource {
	/// Every query sums `series`.
	pub fn series(series: Vec<u64>) -> Self {
		Self::with_answer(Answer::Series(series))
	}

	/// Each space answers its own fixed count.
	pub fn per_space(counts: &[(&str, u64)]) -> Self {
		Self::with_answer(Answer::PerSpace(
			counts.iter().map(|(id, n)| (id.to_string(), *n)).collect(),
		))
	}

	fn with_answer(answer: Answer) -> Self {
		Self {
			answer,
			failing: None,
			calls: AtomicUsize::new(0),
			seen: Mutex::new(Vec::new()),
		}
	}

	pub fn failing_on(mut self, event: TrackedEvent) -> Self {
		self.failing = Some(event);
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn seen_spaces(&self) -> Vec<SpaceId> {
		self.seen.lock().unwrap().iter().map(|(s, _)| s.clone()).collect()
	}

	pub fn seen_ranges(&self) -> Vec<DateRange> {
		self.seen.lock().unwrap().iter().map(|(_, r)| *r).collect()
	}
}

#[async_trait]
impl EventCountSource for FakeSource {
	async fn query_event_count(
		&self,
		space_id: Option<&SpaceId>,
		event: TrackedEvent,
		range: &DateRange,
	) -> EventCount {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(space) = space_id {
			self.seen.lock().unwrap().push((space.clone(), *range));
		}

		if self.failing == Some(event) {
			return EventCount::zero_filled("HTTP 500");
		}

		match &self.answer {
			Answer::Series(series) => EventCount::Counted(series.iter().sum()),
			Answer::PerSpace(counts) => EventCount::Counted(
				space_id
					.and_then(|s| counts.get(s.as_str()))
					.copied()
					.unwrap_or(0),
			),
		}
	}
}
