//! WhatsApp Android databases
//!
//! - `msgstore.db`: `messages`
//! - `wa.db`: `wa_contacts`
//!
//! WhatsApp stores Unix milliseconds. Counterparts are JIDs such as
//! `15551234@s.whatsapp.net`; reports show the part before the `@`.

use crate::codes::{translate, CodeTable};
use crate::db::{ArtifactQuery, SourceDb};
use crate::error::Result;
use crate::extract::extractor::{col, map_rows, within, ArtifactExtractor};
use crate::timestamp::{time_cell, Epoch};
use crate::types::{ArtifactKind, ArtifactRecord, ExtractRequest, OWNER_LABEL};
use crate::value::{cell, text, NOT_APPLICABLE};
use rusqlite::types::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Separator between several contact names sharing one number.
pub const NAME_SEPARATOR: &str = "--";

/// Phone number / handle part of a JID, the whole value when there is no `@`.
pub fn jid_handle(jid: &Value) -> Option<String> {
    text(jid)
        .map(|jid| match jid.split_once('@') {
            Some((handle, _)) => handle.to_string(),
            None => jid,
        })
        .filter(|handle| !handle.is_empty())
}

/// `"long: <lon>, lat: <lat>"`, or not applicable when neither is stored.
pub fn coordinates(latitude: &Value, longitude: &Value) -> String {
    if text(latitude).is_none() && text(longitude).is_none() {
        return NOT_APPLICABLE.to_string();
    }
    format!("long: {}, lat: {}", cell(longitude), cell(latitude))
}

/// Looks up contact names in `wa.db`, caching per handle.
pub struct ContactNames {
    db: SourceDb,
    cache: HashMap<String, String>,
}

impl ContactNames {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: SourceDb::open(path)?,
            cache: HashMap::new(),
        })
    }

    /// Every `sort_name` whose JID contains `handle`, joined; the handle itself if none match.
    ///
    /// An empty handle resolves to nothing; it would otherwise match every contact.
    pub fn resolve(&mut self, handle: &str) -> Result<String> {
        if handle.is_empty() {
            return Ok(NOT_APPLICABLE.to_string());
        }
        if let Some(name) = self.cache.get(handle) {
            return Ok(name.clone());
        }

        let query = ArtifactQuery::new("SELECT sort_name FROM wa_contacts WHERE 1=1")
            .and_contains("jid", Some(handle))
            .then("ORDER BY rowid");
        let names: Vec<String> = self
            .db
            .query(&query)?
            .iter()
            .filter_map(|row| text(col(row, 0)))
            .collect();

        let resolved = if names.is_empty() {
            handle.to_string()
        } else {
            names.join(NAME_SEPARATOR)
        };
        self.cache.insert(handle.to_string(), resolved.clone());
        Ok(resolved)
    }
}

/// Messages from `msgstore.db`, filterable by remote JID.
#[derive(Default)]
pub struct WhatsAppMessagesExtractor;

impl WhatsAppMessagesExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for WhatsAppMessagesExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::WhatsAppMessages
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Timestamp",
            "Counterpart",
            "From",
            "To",
            "Type",
            "Body",
            "Status",
            "Server Receipt",
            "Device Receipt",
            "Read",
            "Played",
            "Broadcast",
            "Recipients",
            "Media URL",
            "Media Caption",
            "Media Duration",
            "Coordinates",
        ]
    }

    fn query(&self, request: &ExtractRequest) -> ArtifactQuery {
        let query = ArtifactQuery::new(
            "SELECT key_from_me, key_remote_jid, status, data, timestamp, \
             receipt_server_timestamp, receipt_device_timestamp, read_device_timestamp, \
             played_device_timestamp, media_url, media_caption, media_duration, latitude, \
             longitude, media_wa_type, needs_push, recipient_count FROM messages WHERE 1=1",
        );
        within(query, "timestamp", &request.time_range, Epoch::UnixMillis)
            .and_contains("key_remote_jid", request.filter.substring())
            .then("ORDER BY timestamp, _id")
    }

    fn source_paths(&self, request: &ExtractRequest) -> Vec<PathBuf> {
        let mut paths = vec![request.db_path.clone()];
        if request.resolve_names {
            paths.push(request.contacts_db_path());
        }
        paths
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        let rows = SourceDb::open(&request.db_path)?.query(&self.query(request))?;

        let mut names = if request.resolve_names {
            let contacts_db = request.contacts_db_path();
            tracing::debug!(contacts_db = %contacts_db.display(), "Resolving contact names");
            Some(ContactNames::open(&contacts_db)?)
        } else {
            None
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let handle = jid_handle(col(row, 1));
            let party = match (&handle, names.as_mut()) {
                (Some(handle), Some(names)) => names.resolve(handle)?,
                (Some(handle), None) => handle.clone(),
                (None, _) => NOT_APPLICABLE.to_string(),
            };
            let (from, to) = match crate::value::integer(col(row, 0)) {
                Some(1) => (OWNER_LABEL.to_string(), party),
                _ => (party, OWNER_LABEL.to_string()),
            };

            records.push(ArtifactRecord::new(vec![
                time_cell(col(row, 4), Epoch::UnixMillis),
                handle.unwrap_or_else(|| NOT_APPLICABLE.to_string()),
                from,
                to,
                translate(CodeTable::WhatsAppMediaType, col(row, 14)).to_string(),
                cell(col(row, 3)),
                translate(CodeTable::WhatsAppStatus, col(row, 2)).to_string(),
                time_cell(col(row, 5), Epoch::UnixMillis),
                time_cell(col(row, 6), Epoch::UnixMillis),
                time_cell(col(row, 7), Epoch::UnixMillis),
                time_cell(col(row, 8), Epoch::UnixMillis),
                translate(CodeTable::WhatsAppBroadcast, col(row, 15)).to_string(),
                cell(col(row, 16)),
                cell(col(row, 9)),
                cell(col(row, 10)),
                cell(col(row, 11)),
                coordinates(col(row, 12), col(row, 13)),
            ]));
        }
        Ok(records)
    }
}

/// Contacts from `wa.db`.
#[derive(Default)]
pub struct WhatsAppContactsExtractor;

impl WhatsAppContactsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactExtractor for WhatsAppContactsExtractor {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::WhatsAppContacts
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Display Name",
            "Handle",
            "WhatsApp User",
            "Status",
            "Last Status Update",
            "Unseen Messages",
            "Sort Name",
        ]
    }

    fn query(&self, _request: &ExtractRequest) -> ArtifactQuery {
        ArtifactQuery::new(
            "SELECT display_name, jid, is_whatsapp_user, status, status_timestamp, \
             unseen_msg_count, sort_name FROM wa_contacts",
        )
        .then("ORDER BY rowid")
    }

    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>> {
        map_rows(request, &self.query(request), |row| {
            Some(ArtifactRecord::new(vec![
                cell(col(row, 0)),
                jid_handle(col(row, 1)).unwrap_or_else(|| NOT_APPLICABLE.to_string()),
                translate(CodeTable::YesNo, col(row, 2)).to_string(),
                cell(col(row, 3)),
                time_cell(col(row, 4), Epoch::UnixMillis),
                cell(col(row, 5)),
                cell(col(row, 6)),
            ]))
        })
    }
}
