// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for the partner dashboard server.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Partner Dashboard API",
        version = "1.0.0",
        description = "Analytics and content management for coworking and coliving partners.",
        license(name = "Proprietary")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health checks"),
        (name = "metrics", description = "Dashboard event counts"),
        (name = "spaces", description = "Partner spaces"),
        (name = "posts", description = "Community posts"),
        (name = "features", description = "Workspace and coliving feature taxonomy"),
        (name = "partner-profiles", description = "Partner registration")
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::dashboard_metrics::get_dashboard_metrics,
        crate::routes::spaces::get_space,
        crate::routes::spaces::update_space,
        crate::routes::posts::create_post,
        crate::routes::posts::get_post,
        crate::routes::posts::update_post,
        crate::routes::posts::delete_post,
        crate::routes::posts::list_posts_for_space,
        crate::routes::features::list_features,
        crate::routes::partner_profiles::create_partner_profile,
    ),
    components(
        schemas(
            dash_server_api::DashboardMetrics,
            dash_server_api::ErrorResponse,
            dash_server_api::MessageResponse,
            dash_server_api::HealthResponse,
            dash_server_api::HealthComponents,
            dash_server_api::HealthStatus,
            dash_server_api::ComponentStatus,
            dash_server_api::DatabaseHealth,
            dash_server_api::PartnerProfileCreate,
            dash_server_db::PartnerProfile,
            dash_server_db::Space,
            dash_server_db::SpaceUpdate,
            dash_server_db::SpaceDetails,
            dash_server_db::SpaceContact,
            dash_server_db::SpaceBusinessHours,
            dash_server_db::BusinessHours,
            dash_server_db::CommunityPost,
            dash_server_db::PostAuthor,
            dash_server_db::PostUpdate,
            dash_server_db::Feature,
            dash_server_db::FeatureTranslations,
            dash_server_db::FeatureType,
        )
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json - The OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
	Json(ApiDoc::openapi())
}
