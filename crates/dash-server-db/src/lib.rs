// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence for the partner dashboard server.
//!
//! A JSON document table in SQLite plus typed repositories for partner
//! profiles, spaces, community posts and the feature taxonomy.

pub mod document;
pub mod error;
pub mod feature;
pub mod pool;
pub mod post;
pub mod profile;
pub mod space;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use document::{Document, DocumentStore, Filter, JsonObject, SortOrder};
pub use error::{DbError, Result};
pub use feature::{features_collection, FeatureRepository, FeatureStore};
pub use pool::{create_pool, ping, run_migrations};
pub use post::{PostRepository, PostStore, POSTS_COLLECTION};
pub use profile::{PartnerProfileRepository, PartnerProfileStore, PROFILES_COLLECTION};
pub use space::{SpaceRepository, SpaceStore, SPACES_COLLECTION};
pub use types::{
	BusinessHours, CommunityPost, Feature, FeatureTranslations, FeatureType, NewPartnerProfile,
	PartnerProfile, PostAuthor, PostUpdate, Space, SpaceBusinessHours, SpaceContact, SpaceDetails,
	SpaceUpdate, PROFILE_STATUS_ACTIVE,
};
