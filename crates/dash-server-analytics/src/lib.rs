// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard metrics for partner spaces.
//!
//! - `tenant` - which spaces a request covers
//! - `aggregator` - concurrent per-event queries folded into the eight-key vector
//! - `service` - request-level validation and orchestration

pub mod aggregator;
pub mod error;
pub mod service;
pub mod tenant;
#[cfg(test)]
mod testing;

pub use aggregator::{MetricsAggregator, DEFAULT_MAX_CONCURRENT_QUERIES};
pub use error::{MetricsError, Result};
pub use service::DashboardMetricsService;
pub use tenant::resolve_tenant_scope;
