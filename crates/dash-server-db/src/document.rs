// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key-document store over a single SQLite table.
//!
//! Documents are JSON objects addressed by `(collection, id)`. Sub-collections
//! are plain collection names such as `workspace_features/desks/features`.
//! Creation and update timestamps are assigned by the store.

use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;

pub type JsonObject = Map<String, Value>;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	pub collection: String,
	pub id: String,
	pub data: JsonObject,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Document {
	/// Decode the document body together with its metadata.
	///
	/// `id`, `createdAt` and `updatedAt` are injected into the body first, so
	/// typed models can declare them as ordinary fields.
	pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DbError> {
		let mut body = self.data.clone();
		body.insert("id".to_string(), Value::String(self.id.clone()));
		body.insert(
			"createdAt".to_string(),
			Value::String(format_timestamp(self.created_at)),
		);
		body.insert(
			"updatedAt".to_string(),
			Value::String(format_timestamp(self.updated_at)),
		);
		serde_json::from_value(Value::Object(body)).map_err(|source| DbError::Malformed {
			path: format!("{}/{}", self.collection, self.id),
			source,
		})
	}

	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.data.get(field).and_then(Value::as_str)
	}
}

/// Single-field predicate on a top-level JSON field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
	/// Field equals the string value.
	Eq { field: String, value: String },
	/// Field is an array containing the string value.
	ArrayContains { field: String, value: String },
}

impl Filter {
	pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
		Filter::Eq {
			field: field.into(),
			value: value.into(),
		}
	}

	pub fn array_contains(field: impl Into<String>, value: impl Into<String>) -> Self {
		Filter::ArrayContains {
			field: field.into(),
			value: value.into(),
		}
	}

	fn field(&self) -> &str {
		match self {
			Filter::Eq { field, .. } | Filter::ArrayContains { field, .. } => field,
		}
	}

	fn value(&self) -> &str {
		match self {
			Filter::Eq { value, .. } | Filter::ArrayContains { value, .. } => value,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
	#[default]
	OldestFirst,
	NewestFirst,
}

macro_rules! select_documents {
	($where:literal, $order:literal) => {
		concat!(
			"SELECT collection, id, data, created_at, updated_at FROM documents WHERE collection = ?",
			$where,
			" ORDER BY created_at ",
			$order,
			", rowid ",
			$order
		)
	};
}

fn select_sql(filter: Option<&Filter>, order: SortOrder) -> &'static str {
	match (filter, order) {
		(None, SortOrder::OldestFirst) => select_documents!("", "ASC"),
		(None, SortOrder::NewestFirst) => select_documents!("", "DESC"),
		(Some(Filter::Eq { .. }), SortOrder::OldestFirst) => {
			select_documents!(" AND json_extract(data, ?) = ?", "ASC")
		}
		(Some(Filter::Eq { .. }), SortOrder::NewestFirst) => {
			select_documents!(" AND json_extract(data, ?) = ?", "DESC")
		}
		(Some(Filter::ArrayContains { .. }), SortOrder::OldestFirst) => select_documents!(
			" AND EXISTS (SELECT 1 FROM json_each(documents.data, ?) WHERE json_each.value = ?)",
			"ASC"
		),
		(Some(Filter::ArrayContains { .. }), SortOrder::NewestFirst) => select_documents!(
			" AND EXISTS (SELECT 1 FROM json_each(documents.data, ?) WHERE json_each.value = ?)",
			"DESC"
		),
	}
}

/// Document store handle. Cheap to clone.
#[derive(Clone)]
pub struct DocumentStore {
	pool: SqlitePool,
}

impl DocumentStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT collection, id, data, created_at, updated_at
			FROM documents
			WHERE collection = ? AND id = ?
			"#,
		)
		.bind(collection)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_document_row).transpose()
	}

	/// Insert a document under a store-assigned id.
	#[tracing::instrument(skip(self, data))]
	pub async fn add(&self, collection: &str, data: JsonObject) -> Result<Document, DbError> {
		let id = Uuid::new_v4().to_string();
		self.create(collection, &id, data).await
	}

	/// Insert a document under `id`. Fails with `Conflict` if it already exists.
	#[tracing::instrument(skip(self, data))]
	pub async fn create(
		&self,
		collection: &str,
		id: &str,
		data: JsonObject,
	) -> Result<Document, DbError> {
		let now = Utc::now();
		let body = serde_json::to_string(&data)?;

		let result = sqlx::query(
			r#"
			INSERT INTO documents (collection, id, data, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?)
			ON CONFLICT (collection, id) DO NOTHING
			"#,
		)
		.bind(collection)
		.bind(id)
		.bind(&body)
		.bind(format_timestamp(now))
		.bind(format_timestamp(now))
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::Conflict(format!("{collection}/{id} already exists")));
		}

		tracing::debug!(collection, id, "document created");
		Ok(Document {
			collection: collection.to_string(),
			id: id.to_string(),
			data,
			created_at: parse_timestamp(&format_timestamp(now))?,
			updated_at: parse_timestamp(&format_timestamp(now))?,
		})
	}

	/// Insert or replace the whole body of `id`. `created_at` survives a replace.
	#[tracing::instrument(skip(self, data))]
	pub async fn set(&self, collection: &str, id: &str, data: JsonObject) -> Result<Document, DbError> {
		let now = format_timestamp(Utc::now());
		let body = serde_json::to_string(&data)?;

		sqlx::query(
			r#"
			INSERT INTO documents (collection, id, data, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?)
			ON CONFLICT (collection, id) DO UPDATE SET
				data = excluded.data,
				updated_at = excluded.updated_at
			"#,
		)
		.bind(collection)
		.bind(id)
		.bind(&body)
		.bind(&now)
		.bind(&now)
		.execute(&self.pool)
		.await?;

		self
			.get(collection, id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("{collection}/{id} vanished after write")))
	}

	/// Replace the given top-level fields of an existing document.
	#[tracing::instrument(skip(self, patch), fields(fields = patch.len()))]
	pub async fn update(&self, collection: &str, id: &str, patch: JsonObject) -> Result<Document, DbError> {
		let mut tx = self.pool.begin().await?;

		let row = sqlx::query("SELECT data FROM documents WHERE collection = ? AND id = ?")
			.bind(collection)
			.bind(id)
			.fetch_optional(&mut *tx)
			.await?;
		let Some(row) = row else {
			return Err(DbError::NotFound(format!("{collection}/{id}")));
		};

		let mut data: JsonObject = serde_json::from_str(&row.try_get::<String, _>("data")?)?;
		data.extend(patch);

		sqlx::query(
			"UPDATE documents SET data = ?, updated_at = ? WHERE collection = ? AND id = ?",
		)
		.bind(serde_json::to_string(&data)?)
		.bind(format_timestamp(Utc::now()))
		.bind(collection)
		.bind(id)
		.execute(&mut *tx)
		.await?;

		tx.commit().await?;

		self
			.get(collection, id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("{collection}/{id}")))
	}

	/// Returns whether a document was removed.
	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
			.bind(collection)
			.bind(id)
			.execute(&self.pool)
			.await?;
		Ok(result.rows_affected() > 0)
	}

	/// Stream the documents of a collection, optionally filtered.
	pub fn stream(
		&self,
		collection: &str,
		filter: Option<Filter>,
		order: SortOrder,
	) -> BoxStream<'_, Result<Document, DbError>> {
		if let Some(f) = &filter {
			if !is_valid_field(f.field()) {
				let err = DbError::InvalidField(f.field().to_string());
				return stream::once(async move { Err(err) }).boxed();
			}
		}

		let mut query = sqlx::query(select_sql(filter.as_ref(), order)).bind(collection.to_string());
		if let Some(f) = filter {
			query = query
				.bind(format!("$.{}", f.field()))
				.bind(f.value().to_string());
		}

		query
			.fetch(&self.pool)
			.map(|row| row.map_err(DbError::from).and_then(|r| parse_document_row(&r)))
			.boxed()
	}

	#[tracing::instrument(skip(self))]
	pub async fn query(
		&self,
		collection: &str,
		filter: Option<Filter>,
		order: SortOrder,
	) -> Result<Vec<Document>, DbError> {
		self.stream(collection, filter, order).try_collect().await
	}

	/// All documents of a collection, oldest first.
	pub async fn list(&self, collection: &str) -> Result<Vec<Document>, DbError> {
		self.query(collection, None, SortOrder::OldestFirst).await
	}
}

fn is_valid_field(field: &str) -> bool {
	!field.is_empty() && field.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
	// Fixed width so lexical order in SQL matches time order.
	ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("invalid timestamp '{raw}': {e}")))
}

fn parse_document_row(row: &SqliteRow) -> Result<Document, DbError> {
	let data: String = row.try_get("data")?;
	let created_at: String = row.try_get("created_at")?;
	let updated_at: String = row.try_get("updated_at")?;

	Ok(Document {
		collection: row.try_get("collection")?,
		id: row.try_get("id")?,
		data: serde_json::from_str(&data)?,
		created_at: parse_timestamp(&created_at)?,
		updated_at: parse_timestamp(&updated_at)?,
	})
}
