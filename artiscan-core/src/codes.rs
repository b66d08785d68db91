//! Code translation tables
//!
//! Small integer codes stored by the source applications, mapped to labels.
//! The tables are plain data so each one can be read and tested on its own;
//! anything not listed translates to [`UNKNOWN`].

use crate::value;
use rusqlite::types::Value;

/// Label for codes missing from a table.
pub const UNKNOWN: &str = "Unknown";

const YES_NO: &[(i64, &str)] = &[(0, "No"), (1, "Yes")];

const CALL_DIRECTION: &[(i64, &str)] = &[(0, "outgoing"), (1, "incoming")];

const SKYPE_MESSAGE_STATUS: &[(i64, &str)] = &[(1, "pending"), (2, "delivered")];

const WHATSAPP_STATUS: &[(i64, &str)] = &[
    (0, "received"),
    (1, "uploading"),
    (2, "uploaded"),
    (3, "sent by client"),
    (4, "received by server"),
    (5, "received by destination"),
    (6, "control message"),
];

const WHATSAPP_MEDIA_TYPE: &[(i64, &str)] = &[
    (0, "text"),
    (1, "image"),
    (2, "audio"),
    (3, "video"),
    (4, "contact card"),
    (5, "geo position"),
    (8, "call"),
];

const WHATSAPP_BROADCAST: &[(i64, &str)] = &[(0, "No"), (2, "Yes")];

/// Which mapping to translate with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTable {
    /// Boolean flags: download opened, cookie has expiry, registered WhatsApp user
    YesNo,
    /// Skype `is_incoming`
    CallDirection,
    /// Skype `chatmsg_status` for messages we sent
    SkypeMessageStatus,
    /// WhatsApp `messages.status`
    WhatsAppStatus,
    /// WhatsApp `messages.media_wa_type`
    WhatsAppMediaType,
    /// WhatsApp `messages.needs_push`
    WhatsAppBroadcast,
}

impl CodeTable {
    pub fn entries(&self) -> &'static [(i64, &'static str)] {
        match self {
            CodeTable::YesNo => YES_NO,
            CodeTable::CallDirection => CALL_DIRECTION,
            CodeTable::SkypeMessageStatus => SKYPE_MESSAGE_STATUS,
            CodeTable::WhatsAppStatus => WHATSAPP_STATUS,
            CodeTable::WhatsAppMediaType => WHATSAPP_MEDIA_TYPE,
            CodeTable::WhatsAppBroadcast => WHATSAPP_BROADCAST,
        }
    }

    /// Look up an integer code
    pub fn label(&self, code: i64) -> &'static str {
        self.entries()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
            .unwrap_or(UNKNOWN)
    }
}

/// Translate a raw column value with the given table.
pub fn translate(table: CodeTable, raw: &Value) -> &'static str {
    match value::integer(raw) {
        Some(code) => table.label(code),
        None => UNKNOWN,
    }
}

/// Skype delivery status.
///
/// Only messages with `sending_status` 1 or 2 were sent from this account;
/// everything else is labelled "incoming", including rows whose status
/// codes are simply unrecognized.
pub fn skype_message_status(chatmsg_status: &Value, sending_status: &Value) -> &'static str {
    match value::integer(sending_status) {
        Some(1) | Some(2) => translate(CodeTable::SkypeMessageStatus, chatmsg_status),
        _ => "incoming",
    }
}
