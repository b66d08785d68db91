//! Chrome profile databases
//!
//! - `History`: `urls`, `visits`, `downloads`, `downloads_url_chains`
//! - `Cookies`: `cookies`
//! - `Login Data`: `logins`
//!
//! All Chrome time columns are read as ticks, 10,000,000 to the second.

use crate::codes::{translate, CodeTable};
use crate::db::ArtifactQuery;
use crate::error::Result;
use crate::extract::extractor::{col, map_rows, within, ArtifactExtractor};
use crate::timestamp::{end_time_cell, time_cell, Epoch};
use crate::types::{ArtifactKind, ArtifactRecord, ExtractRequest};
use crate::value::{self, cell};
use rusqlite::types::Value;

/// Percent-complete cell when the total size is zero or missing.
pub const SIZE_UNKNOWN: &str = "size unknown";

/// Browsing history, optionally restricted to Google pages.
pub struct ChromeHistoryExtractor {
    google_only: bool,
}

impl ChromeHistoryExtractor {
    pub fn new() -> Self {
        Self { google_only: false }
    }

    /// Only visits whose page title mentions Google (searches, mostly).
    pub fn google_searches() -> Self {
        Self { google_only: true }
    }
}

impl Default for ChromeHistoryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactExtractor for ChromeHistoryExtractor {
    fn kind(&self) -> ArtifactKind {
        if self.google_only {
            ArtifactKind::ChromeGoogleSearches
        } else {
            ArtifactKind::ChromeHistory
        }
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Visit Time", "Last Visit Time", "Title", "URL", "Visit Count"]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT visits.visit_time, urls.last_visit_time, urls.title, urls.url, urls.visit_count \
             FROM urls JOIN visits ON visits.url = urls.id WHERE 1=1",
        );
        let query = within(query, "visits.visit_time", &request.time_range, Epoch::CHROME);
        let query = if self.google_only {
            query.and_contains("urls.title", Some("Google"))
        } else {
            query
        };
        query.then("ORDER BY visits.visit_time, visits.id")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                time_cell(col(row, 0), Epoch::CHROME),
                time_cell(col(row, 1), Epoch::CHROME),
                cell(col(row, 2)),
                cell(col(row, 3)),
                cell(col(row, 4)),
            ]))
        })
    }
}

/// File downloads from the `History` database.
#[derive(Default)]
pub struct ChromeDownloadsExtractor;

impl ChromeDownloadsExtractor {
    pub fn new() -> Self {
        Self
    }
}

/// `received / total` as a percentage, or [`SIZE_UNKNOWN`] without a usable total.
pub fn percent_complete(received: &Value, total: &Value) -> String {
    match value::real(total) {
        Some(total) if total > 0.0 => {
            let received = value::real(received).unwrap_or(0.0);
            format!("{:.2} %", 100.0 * received / total)
        }
        _ => SIZE_UNKNOWN.to_string(),
    }
}

impl ArtifactExtractor for ChromeDownloadsExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ChromeDownloads
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Start Time",
            "End Time",
            "URL",
            "MIME Type",
            "Referrer",
            "Saved Path",
            "Total Size",
            "Percent Complete",
            "Opened",
            "Last Modified",
        ]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT downloads.start_time, downloads.end_time, downloads_url_chains.url, \
             downloads.mime_type, downloads.referrer, downloads.current_path, \
             downloads.received_bytes, downloads.total_bytes, downloads.opened, \
             downloads.last_modified \
             FROM downloads JOIN downloads_url_chains ON downloads_url_chains.id = downloads.id \
             WHERE 1=1",
        );
        within(query, "downloads.start_time", &request.time_range, Epoch::CHROME)
            .then("ORDER BY downloads.start_time, downloads.id")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                time_cell(col(row, 0), Epoch::CHROME),
                end_time_cell(col(row, 1), Epoch::CHROME),
                cell(col(row, 2)),
                cell(col(row, 3)),
                cell(col(row, 4)),
                cell(col(row, 5)),
                cell(col(row, 7)),
                percent_complete(col(row, 6), col(row, 7)),
                translate(CodeTable::YesNo, col(row, 8)).to_string(),
                cell(col(row, 9)),
            ]))
        })
    }
}

/// Cookies, filterable by host.
#[derive(Default)]
pub struct ChromeCookiesExtractor;

impl ChromeCookiesExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for ChromeCookiesExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ChromeCookies
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Host",
            "Name",
            "Value",
            "Created",
            "Expires",
            "Last Accessed",
            "Has Expiry",
        ]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT host_key, name, value, creation_utc, expires_utc, last_access_utc, has_expires \
             FROM cookies WHERE 1=1",
        );
        within(query, "creation_utc", &request.time_range, Epoch::CHROME)
            .and_contains("host_key", request.filter.substring())
            .then("ORDER BY creation_utc, host_key, name")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                cell(col(row, 0)),
                cell(col(row, 1)),
                cell(col(row, 2)),
                time_cell(col(row, 3), Epoch::CHROME),
                time_cell(col(row, 4), Epoch::CHROME),
                time_cell(col(row, 5), Epoch::CHROME),
                translate(CodeTable::YesNo, col(row, 6)).to_string(),
            ]))
        })
    }
}

/// Saved logins, filterable by signon realm.
///
/// Password and form data are stored as blobs; they are decoded as ISO-8859-1.
#[derive(Default)]
pub struct ChromeLoginsExtractor;

impl ChromeLoginsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for ChromeLoginsExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ChromeLogins
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Created",
            "Realm",
            "Action URL",
            "Username",
            "Password",
            "Times Used",
            "Form Data",
        ]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT date_created, signon_realm, action_url, username_value, password_value, \
             times_used, form_data FROM logins WHERE 1=1",
        );
        within(query, "date_created", &request.time_range, Epoch::CHROME)
            .and_contains("signon_realm", request.filter.substring())
            .then("ORDER BY date_created, signon_realm")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                time_cell(col(row, 0), Epoch::CHROME),
                cell(col(row, 1)),
                cell(col(row, 2)),
                cell(col(row, 3)),
                cell(col(row, 4)),
                cell(col(row, 5)),
                cell(col(row, 6)),
            ]))
        })
    }
}
