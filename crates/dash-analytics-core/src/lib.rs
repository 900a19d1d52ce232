// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for partner dashboard metrics.
//!
//! - [`TrackedEvent`]: the closed set of analytics events the dashboard reports on
//! - [`DashboardMetrics`]: the eight-key public metrics vector
//! - [`DateRange`]: parsed, validated `YYYY-MM-DD` bounds
//! - [`TenantScope`]: the non-empty list of spaces a query is scoped to
//! - [`EventCount`] / [`EventCountSource`]: per-query result and the seam analytics backends plug into

pub mod count;
pub mod date_range;
pub mod event;
pub mod metrics;
pub mod scope;

pub use count::{EventCount, EventCountSource};
pub use date_range::{DateField, DateRange, DateRangeError, ResolvedWindow, DEFAULT_WINDOW_DAYS};
pub use event::{TrackedEvent, UnknownEvent};
pub use metrics::DashboardMetrics;
pub use scope::{SpaceId, TenantScope};
