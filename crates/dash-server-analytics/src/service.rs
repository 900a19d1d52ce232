// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use dash_analytics_core::{DashboardMetrics, DateRange};
use dash_server_db::PartnerProfileStore;

use crate::aggregator::MetricsAggregator;
use crate::error::MetricsError;
use crate::tenant::resolve_tenant_scope;

/// Validates a metrics request, resolves its scope and runs the aggregator.
#[derive(Clone)]
pub struct DashboardMetricsService {
	profiles: Arc<dyn PartnerProfileStore>,
	aggregator: Option<Arc<MetricsAggregator>>,
}

impl DashboardMetricsService {
	pub fn new(
		profiles: Arc<dyn PartnerProfileStore>,
		aggregator: Option<Arc<MetricsAggregator>>,
	) -> Self {
		Self {
			profiles,
			aggregator,
		}
	}

	pub fn is_configured(&self) -> bool {
		self.aggregator.is_some()
	}

	/// Dates are validated before anything else is touched, so a malformed
	/// range never reaches the store or the analytics API.
	#[tracing::instrument(skip(self, space_ids), fields(uid = %uid))]
	pub async fn dashboard_metrics(
		&self,
		uid: &str,
		start_date: Option<&str>,
		end_date: Option<&str>,
		space_ids: Option<Vec<String>>,
	) -> Result<DashboardMetrics, MetricsError> {
		let range = DateRange::parse(start_date, end_date)?;
		let scope = resolve_tenant_scope(self.profiles.as_ref(), uid, space_ids).await?;
		let aggregator = self.aggregator.as_ref().ok_or(MetricsError::NotConfigured)?;

		Ok(aggregator.get_dashboard_metrics(&scope, &range).await)
	}
}
