// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partner dashboard HTTP server.
//!
//! Serves dashboard event counts from the analytics API and the partner
//! content routes (spaces, posts, features, registration) over the document
//! store.

pub mod api;
pub mod api_docs;
pub mod auth;
pub mod error;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use dash_server_config::ServerConfig;
pub use error::ServerError;
