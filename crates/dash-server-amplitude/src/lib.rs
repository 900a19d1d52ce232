// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Amplitude segmentation API client.
//!
//! Counts occurrences of one [`TrackedEvent`](dash_analytics_core::TrackedEvent)
//! over a date window, optionally restricted to a partner space. Used through
//! the [`EventCountSource`](dash_analytics_core::EventCountSource) trait, where
//! every upstream failure is reported as a zero-filled count.

mod client;
mod error;
mod types;

pub use client::{AmplitudeClient, DEFAULT_BASE_URL};
pub use error::AmplitudeError;
