// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod errors;
pub mod health;
pub mod metrics;
pub mod partner_profiles;

pub use dash_analytics_core::DashboardMetrics;
pub use errors::{ErrorResponse, MessageResponse};
pub use health::{ComponentStatus, DatabaseHealth, HealthComponents, HealthResponse, HealthStatus};
pub use metrics::{DashboardMetricsQuery, FeaturesQuery};
pub use partner_profiles::PartnerProfileCreate;
