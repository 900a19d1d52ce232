// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller authentication for the partner dashboard server.

pub mod bearer;
pub mod error;
pub mod firebase;
pub mod verifier;

pub use bearer::extract_bearer_token;
pub use error::AuthError;
pub use firebase::{FirebaseTokenVerifier, DEFAULT_JWKS_URL, JWKS_CACHE_TTL};
pub use verifier::{TokenVerifier, VerifiedIdentity};
