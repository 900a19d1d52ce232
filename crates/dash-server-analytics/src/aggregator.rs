// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fan-out of per-event, per-space analytics queries into one metrics vector.

use std::sync::Arc;

use dash_analytics_core::{
	DashboardMetrics, DateRange, EventCount, EventCountSource, TenantScope, TrackedEvent,
};
use futures::stream::{self, StreamExt};

pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 8;

pub struct MetricsAggregator {
	source: Arc<dyn EventCountSource>,
	max_concurrency: usize,
}

impl MetricsAggregator {
	pub fn new(source: Arc<dyn EventCountSource>) -> Self {
		Self {
			source,
			max_concurrency: DEFAULT_MAX_CONCURRENT_QUERIES,
		}
	}

	pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
		self.max_concurrency = max_concurrency.max(1);
		self
	}

	/// One query per tracked event per space. Counts for the same event are
	/// summed across spaces and a failed query only zeroes its own share.
	#[tracing::instrument(skip(self, scope, range), fields(spaces = scope.len()))]
	pub async fn get_dashboard_metrics(&self, scope: &TenantScope, range: &DateRange) -> DashboardMetrics {
		// Each query owns its inputs so the combined future stays Send.
		let range = *range;
		let queries: Vec<_> = TrackedEvent::ALL
			.into_iter()
			.flat_map(|event| scope.iter().map(move |space| (event, space.clone())))
			.map(|(event, space)| {
				let source = Arc::clone(&self.source);
				async move {
					let count = source.query_event_count(Some(&space), event, &range).await;
					(event, count)
				}
			})
			.collect();

		let results: Vec<(TrackedEvent, EventCount)> = stream::iter(queries)
			.buffer_unordered(self.max_concurrency)
			.collect()
			.await;

		let mut metrics = DashboardMetrics::default();
		let mut zero_filled = 0usize;
		for (event, count) in &results {
			if count.is_zero_filled() {
				zero_filled += 1;
			}
			metrics.add(*event, count.value());
		}

		if zero_filled > 0 {
			tracing::warn!(zero_filled, total = results.len(), "some metric queries were zero-filled");
		} else {
			tracing::debug!(total = results.len(), "dashboard metrics aggregated");
		}
		metrics
	}
}
