// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Optional `YYYY-MM-DD` bounds for a metrics query.
//!
//! Parsing never substitutes defaults. Missing bounds are filled in by
//! [`DateRange::resolve_at`] when an individual analytics query is built.

use std::fmt;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Length of the trailing window used for a missing bound.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
	Start,
	End,
}

impl DateField {
	pub fn param_name(self) -> &'static str {
		match self {
			DateField::Start => "start_date",
			DateField::End => "end_date",
		}
	}
}

impl fmt::Display for DateField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.param_name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
	#[error("Invalid {field} format. Use YYYY-MM-DD")]
	Malformed { field: DateField },

	#[error("start_date cannot be after end_date")]
	Inverted,
}

/// Parsed date bounds. `None` on a side means unbounded there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
	pub start: Option<NaiveDate>,
	pub end: Option<NaiveDate>,
}

/// Concrete window handed to an analytics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
	pub start: NaiveDate,
	pub end: NaiveDate,
}

impl ResolvedWindow {
	/// `YYYYMMDD` form of the start date.
	pub fn start_compact(&self) -> String {
		self.start.format("%Y%m%d").to_string()
	}

	/// `YYYYMMDD` form of the end date.
	pub fn end_compact(&self) -> String {
		self.end.format("%Y%m%d").to_string()
	}
}

impl DateRange {
	pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, DateRangeError> {
		if let (Some(s), Some(e)) = (start, end) {
			if s > e {
				return Err(DateRangeError::Inverted);
			}
		}
		Ok(Self { start, end })
	}

	/// Parse raw query values. A present value must be exactly `YYYY-MM-DD`,
	/// so an empty string is rejected rather than treated as absent.
	pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DateRangeError> {
		let start = start
			.map(|s| parse_date(s, DateField::Start))
			.transpose()?;
		let end = end.map(|s| parse_date(s, DateField::End)).transpose()?;
		Self::new(start, end)
	}

	/// Fill missing bounds with the trailing window ending `today`.
	pub fn resolve_at(&self, today: NaiveDate) -> ResolvedWindow {
		ResolvedWindow {
			start: self
				.start
				.unwrap_or_else(|| today - Duration::days(DEFAULT_WINDOW_DAYS)),
			end: self.end.unwrap_or(today),
		}
	}

	pub fn is_unbounded(&self) -> bool {
		self.start.is_none() && self.end.is_none()
	}
}

fn parse_date(raw: &str, field: DateField) -> Result<NaiveDate, DateRangeError> {
	// chrono accepts single-digit months and days; the wire format does not.
	let bytes = raw.as_bytes();
	let shape_ok = bytes.len() == 10
		&& bytes.iter().enumerate().all(|(i, b)| match i {
			4 | 7 => *b == b'-',
			_ => b.is_ascii_digit(),
		});
	if !shape_ok {
		return Err(DateRangeError::Malformed { field });
	}

	NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DateRangeError::Malformed { field })
}
