// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod amplitude;
mod database;
mod firebase;
mod http;
mod link;
mod logging;

pub use amplitude::{AmplitudeConfig, AmplitudeConfigLayer, DEFAULT_AMPLITUDE_BASE_URL};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use firebase::{FirebaseConfig, FirebaseConfigLayer, DEFAULT_FIREBASE_JWKS_URL};
pub use http::{HttpConfig, HttpConfigLayer};
pub use link::{LinkConfig, LinkConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
