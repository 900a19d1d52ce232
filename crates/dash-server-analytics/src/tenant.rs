// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolve which spaces a metrics request covers.

use dash_analytics_core::TenantScope;
use dash_server_db::PartnerProfileStore;

use crate::error::MetricsError;

/// Explicit ids win and skip the profile lookup entirely. Otherwise the
/// caller's profile supplies the ids.
#[tracing::instrument(skip(profiles, explicit), fields(explicit = explicit.as_ref().map(Vec::len)))]
pub async fn resolve_tenant_scope(
	profiles: &dyn PartnerProfileStore,
	uid: &str,
	explicit: Option<Vec<String>>,
) -> Result<TenantScope, MetricsError> {
	if let Some(ids) = explicit {
		return TenantScope::from_raw(ids).ok_or(MetricsError::EmptySpaceIds);
	}

	let profile = profiles
		.get_profile(uid)
		.await?
		.ok_or(MetricsError::ProfileNotFound)?;

	let scope = TenantScope::from_raw(&profile.space_ids).ok_or(MetricsError::MissingSpaceIds)?;
	tracing::debug!(spaces = scope.len(), "tenant scope resolved from profile");
	Ok(scope)
}
