// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a partner space (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
	/// Returns `None` for blank input. Surrounding whitespace is trimmed.
	pub fn new(raw: impl AsRef<str>) -> Option<Self> {
		let trimmed = raw.as_ref().trim();
		(!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SpaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for SpaceId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Non-empty, duplicate-free, ordered list of spaces a metrics query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope(Vec<SpaceId>);

impl TenantScope {
	/// Builds a scope from raw ids, dropping blanks and repeats while keeping
	/// first-occurrence order. `None` if nothing usable remains.
	pub fn from_raw<I, S>(ids: I) -> Option<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut spaces: Vec<SpaceId> = Vec::new();
		for id in ids.into_iter().filter_map(SpaceId::new) {
			if !spaces.contains(&id) {
				spaces.push(id);
			}
		}
		(!spaces.is_empty()).then_some(Self(spaces))
	}

	pub fn single(id: SpaceId) -> Self {
		Self(vec![id])
	}

	pub fn spaces(&self) -> &[SpaceId] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &SpaceId> {
		self.0.iter()
	}
}
