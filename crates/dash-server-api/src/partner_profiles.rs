// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of `POST /partner-profiles/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PartnerProfileCreate {
	/// Encrypted space id, the `a` parameter of the registration link.
	#[serde(alias = "hashed_space_id")]
	pub hashed_space_id: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_accepts_both_spellings() {
		let a: PartnerProfileCreate = serde_json::from_str(r#"{"hashedSpaceId": "x"}"#).unwrap();
		let b: PartnerProfileCreate = serde_json::from_str(r#"{"hashed_space_id": "x"}"#).unwrap();
		assert_eq!(a, b);
	}
}
