// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with a consistent User-Agent header.
//!
//! Outbound calls (analytics queries, identity key sets) make one attempt
//! each, bounded by a per-call timeout.

mod client;

pub use client::{builder, client_with_timeout, user_agent, DEFAULT_TIMEOUT};
