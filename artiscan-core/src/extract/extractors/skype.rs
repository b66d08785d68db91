//! Skype profile database (`main.db`)
//!
//! Tables read: `Accounts`, `Contacts`, `Calls`, `Conversations`, `Messages`.
//! Skype stores plain Unix seconds.

use crate::codes::{skype_message_status, translate, CodeTable};
use crate::db::{ArtifactQuery, SourceDb};
use crate::error::Result;
use crate::extract::extractor::{col, map_rows, within, ArtifactExtractor};
use crate::timestamp::{time_cell, Epoch};
use crate::types::{ArtifactKind, ArtifactRecord, ExtractRequest, OWNER_LABEL};
use crate::value::{cell, text};
use rusqlite::types::Value;

/// Marker found in the body of participant-list system messages.
const PARTLIST_MARKER: &str = "partlist";

/// `"<country>, <city>"`, spelling out whichever part is missing.
pub fn location(city: &Value, country: &Value) -> String {
    let country = text(country).unwrap_or_else(|| "unspecified country".to_string());
    match text(city) {
        Some(city) => format!("{}, {}", country, city),
        None => format!("{}, unspecified city/town", country),
    }
}

/// Whether a message body is a system marker rather than user content.
pub fn is_system_message(body: &Value) -> bool {
    text(body).is_some_and(|b| b.contains(PARTLIST_MARKER))
}

/// Account profile of the database owner.
#[derive(Default)]
pub struct SkypeAccountsExtractor;

impl SkypeAccountsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for SkypeAccountsExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::SkypeAccounts
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Full Name", "Skype Name", "Location", "Profile Timestamp"]
    }

    fn query(&self, _request: &ExtractRequest) -> ArtifactQuery {
        ArtifactQuery::new(
            "SELECT fullname, skypename, city, country, profile_timestamp FROM Accounts",
        )
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                cell(col(row, 0)),
                cell(col(row, 1)),
                location(col(row, 2), col(row, 3)),
                time_cell(col(row, 4), Epoch::UnixSeconds),
            ]))
        })
    }
}

/// The owner's contact list.
#[derive(Default)]
pub struct SkypeContactsExtractor;

impl SkypeContactsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for SkypeContactsExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::SkypeContacts
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Display Name",
            "Skype Name",
            "Location",
            "Mobile Phone",
            "Birthday",
        ]
    }

    fn query(&self, _request: &ExtractRequest) -> ArtifactQuery {
        ArtifactQuery::new(
            "SELECT displayname, skypename, city, country, phone_mobile, birthday FROM Contacts \
             ORDER BY rowid",
        )
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                cell(col(row, 0)),
                cell(col(row, 1)),
                location(col(row, 2), col(row, 3)),
                cell(col(row, 4)),
                cell(col(row, 5)),
            ]))
        })
    }
}

/// Call log, filterable by the conversation identity.
#[derive(Default)]
pub struct SkypeCallsExtractor;

impl SkypeCallsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for SkypeCallsExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::SkypeCalls
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Timestamp", "Counterpart", "Duration", "Direction"]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT Calls.begin_timestamp, Conversations.identity, Calls.duration, Calls.is_incoming \
             FROM Calls JOIN Conversations ON Calls.conv_dbid = Conversations.id WHERE 1=1",
        );
        within(query, "Calls.begin_timestamp", &request.time_range, Epoch::UnixSeconds)
            .and_contains("Conversations.identity", request.filter.substring())
            .then("ORDER BY Calls.begin_timestamp, Calls.id")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                time_cell(col(row, 0), Epoch::UnixSeconds),
                cell(col(row, 1)),
                cell(col(row, 2)),
                translate(CodeTable::CallDirection, col(row, 3)).to_string(),
            ]))
        })
    }
}

/// Chat messages, filterable by chat name.
#[derive(Default)]
pub struct SkypeMessagesExtractor;

impl SkypeMessagesExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Skype name of the account that owns the database, if any.
    fn owner(db: &SourceDb) -> Result<Option<String>> {
        let rows = db.query(&ArtifactQuery::new(
            "SELECT skypename FROM Accounts ORDER BY rowid LIMIT 1",
        ))?;
        Ok(rows.first().and_then(|row| text(col(row, 0))))
    }
}

impl ArtifactExtractor for SkypeMessagesExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::SkypeMessages
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Timestamp", "Counterpart", "From", "To", "Body", "Status"]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT timestamp, chatname, author, dialog_partner, body_xml, chatmsg_status, \
             sending_status FROM Messages WHERE 1=1",
        );
        within(query, "timestamp", &request.time_range, Epoch::UnixSeconds)
            .and_contains("chatname", request.filter.substring())
            .then("ORDER BY timestamp, id")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        let db = SourceDb::open(&request.db_path)?;
        let owner = Self::owner(&db)?;
        let rows = db.query(&self.query(request))?;
        drop(db);

        let is_owner = |v: &Value| text(v).is_some_and(|name| Some(&name) == owner.as_ref());

        let records: Vec<_> = rows
            .iter()
            .filter(|row| !is_system_message(col(row, 4)))
            .map(|row| {
                let author = col(row, 2);
                let from = if is_owner(author) {
                    OWNER_LABEL.to_string()
                } else {
                    cell(author)
                };
                let to = match text(col(row, 3)) {
                    Some(partner) if !is_owner(col(row, 3)) => partner,
                    _ => OWNER_LABEL.to_string(),
                };

                ArtifactRecord::new(vec![
                    time_cell(col(row, 0), Epoch::UnixSeconds),
                    cell(col(row, 1)),
                    from,
                    to,
                    cell(col(row, 4)),
                    skype_message_status(col(row, 5), col(row, 6)).to_string(),
                ])
            })
            .collect();

        let skipped = rows.len() - records.len();
        if skipped > 0 {
            tracing::debug!(skipped, "Excluded system messages");
        }
        Ok(records)
    }
}
