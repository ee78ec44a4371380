// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a visit timestamp for popup display (`DD-MM-YYYY HH:MM`).
pub fn format_visit_timestamp(date: DateTime<Utc>) -> String {
    date.format("%d-%m-%Y %H:%M").to_string()
}

/// Format a campaign date for popup display (`DD-MM-YYYY`).
pub fn format_campaign_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
