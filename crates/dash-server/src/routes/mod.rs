// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod dashboard_metrics;
pub mod features;
pub mod health;
pub mod partner_profiles;
pub mod posts;
pub mod spaces;
