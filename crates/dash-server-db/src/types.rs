// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Records held in the document store.
//!
//! Wire and storage names are camelCase. The snake_case spellings written by
//! older clients are accepted on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const PROFILE_STATUS_ACTIVE: &str = "active";

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_space_status() -> String {
	"active".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerProfile {
	pub id: String,
	pub email: String,
	pub space_ids: Vec<String>,
	pub status: String,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
}

impl PartnerProfile {
	pub fn is_active(&self) -> bool {
		self.status == PROFILE_STATUS_ACTIVE
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPartnerProfile {
	pub email: String,
	pub space_ids: Vec<String>,
	pub status: String,
}

impl NewPartnerProfile {
	/// An active profile claiming a single space.
	pub fn active(email: impl Into<String>, space_id: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			space_ids: vec![space_id.into()],
			status: PROFILE_STATUS_ACTIVE.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BusinessHours {
	#[serde(default)]
	pub open: String,
	#[serde(default)]
	pub close: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SpaceBusinessHours {
	pub monday: BusinessHours,
	pub tuesday: BusinessHours,
	pub wednesday: BusinessHours,
	pub thursday: BusinessHours,
	pub friday: BusinessHours,
	pub saturday: BusinessHours,
	pub sunday: BusinessHours,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceContact {
	#[serde(default, deserialize_with = "null_as_empty")]
	pub phone: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub website: String,
	#[serde(default, alias = "email", deserialize_with = "null_as_empty")]
	pub email_address: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub facebook: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub instagram: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub twitter: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub tiktok: String,
	#[serde(rename = "linkedIn", alias = "linkedin", default, deserialize_with = "null_as_empty")]
	pub linked_in: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDetails {
	#[serde(default, deserialize_with = "null_as_empty")]
	pub bio: String,
	#[serde(default)]
	pub gallery: Vec<String>,
	#[serde(default)]
	pub contact: SpaceContact,
	#[serde(default, alias = "business_hours")]
	pub business_hours: SpaceBusinessHours,
	#[serde(default)]
	pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Space {
	pub id: String,
	pub name: String,
	#[serde(default)]
	#[schema(value_type = Object)]
	pub geolocation: Map<String, Value>,
	#[serde(default, alias = "full_address")]
	pub full_address: String,
	#[serde(default, alias = "main_photo", deserialize_with = "null_as_empty")]
	pub main_photo: String,
	#[serde(rename = "type", default)]
	pub space_type: String,
	#[serde(default)]
	pub rating: f64,
	#[serde(default = "default_space_status")]
	pub status: String,
	#[serde(default, alias = "thumbnail_photo", deserialize_with = "null_as_empty")]
	pub thumbnail_photo: String,
	#[serde(default, alias = "external_url", deserialize_with = "null_as_empty")]
	pub external_url: String,
	#[serde(default)]
	pub details: SpaceDetails,
}

impl Space {
	pub fn contact_email(&self) -> &str {
		&self.details.contact.email_address
	}
}

/// Partial space update. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceUpdate {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	#[schema(value_type = Option<Object>)]
	pub geolocation: Option<Map<String, Value>>,
	#[serde(default, alias = "full_address", skip_serializing_if = "Option::is_none")]
	pub full_address: Option<String>,
	#[serde(default, alias = "main_photo", skip_serializing_if = "Option::is_none")]
	pub main_photo: Option<String>,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub space_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rating: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<SpaceDetails>,
}

impl SpaceUpdate {
	pub fn is_empty(&self) -> bool {
		self.name.is_none()
			&& self.geolocation.is_none()
			&& self.full_address.is_none()
			&& self.main_photo.is_none()
			&& self.space_type.is_none()
			&& self.rating.is_none()
			&& self.status.is_none()
			&& self.details.is_none()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostAuthor {
	pub id: String,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
	#[serde(default)]
	pub id: Option<String>,
	pub author: PostAuthor,
	pub content: String,
	#[serde(default, alias = "space_id")]
	pub space_id: Option<String>,
	#[serde(default, alias = "created_at")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default, alias = "image_urls")]
	pub image_urls: Vec<String>,
	#[serde(default, alias = "external_links")]
	pub external_links: Vec<String>,
	#[serde(default, alias = "likes_count")]
	pub likes_count: i64,
	#[serde(default, alias = "comments_count")]
	pub comments_count: i64,
	#[serde(default, alias = "is_liked_by_user")]
	pub is_liked_by_user: bool,
}

impl CommunityPost {
	/// Reason the post cannot be stored, if any.
	pub fn validation_error(&self) -> Option<&'static str> {
		if self.author.id.trim().is_empty() || self.author.name.trim().is_empty() {
			return Some("author must contain id and name fields");
		}
		if self.content.trim().is_empty() {
			return Some("Content cannot be empty");
		}
		None
	}
}

/// Partial post update. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(default, alias = "image_urls", skip_serializing_if = "Option::is_none")]
	pub image_urls: Option<Vec<String>>,
	#[serde(default, alias = "external_links", skip_serializing_if = "Option::is_none")]
	pub external_links: Option<Vec<String>>,
	#[serde(default, alias = "likes_count", skip_serializing_if = "Option::is_none")]
	pub likes_count: Option<i64>,
	#[serde(default, alias = "comments_count", skip_serializing_if = "Option::is_none")]
	pub comments_count: Option<i64>,
	#[serde(default, alias = "is_liked_by_user", skip_serializing_if = "Option::is_none")]
	pub is_liked_by_user: Option<bool>,
}

impl PostUpdate {
	pub fn is_empty(&self) -> bool {
		self.content.is_none()
			&& self.image_urls.is_none()
			&& self.external_links.is_none()
			&& self.likes_count.is_none()
			&& self.comments_count.is_none()
			&& self.is_liked_by_user.is_none()
	}

	pub fn validation_error(&self) -> Option<&'static str> {
		match &self.content {
			Some(content) if content.trim().is_empty() => Some("Content cannot be empty"),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeatureTranslations {
	pub en: String,
	pub es: String,
	pub fr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Feature {
	pub id: String,
	pub translations: FeatureTranslations,
}

/// Root of a feature taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
	WorkspaceFeatures,
	ColivingFeatures,
}

impl FeatureType {
	pub fn collection(self) -> &'static str {
		match self {
			FeatureType::WorkspaceFeatures => "workspace_features",
			FeatureType::ColivingFeatures => "coliving_features",
		}
	}
}

impl std::str::FromStr for FeatureType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"workspace_features" => Ok(FeatureType::WorkspaceFeatures),
			"coliving_features" => Ok(FeatureType::ColivingFeatures),
			other => Err(format!(
				"Invalid feature_type '{other}'. Use workspace_features or coliving_features"
			)),
		}
	}
}

/// Serialize a partial update into the top-level fields it replaces.
pub(crate) fn to_patch<T: Serialize>(update: &T) -> Result<Map<String, Value>, serde_json::Error> {
	match serde_json::to_value(update)? {
		Value::Object(map) => Ok(map),
		_ => Ok(Map::new()),
	}
}
