//! Application-specific extractors
//!
//! Each supported artifact type has an extractor implementing
//! [`ArtifactExtractor`](super::ArtifactExtractor).
//!
//! | Application | Module | Artifacts |
//! |-------------|--------|-----------|
//! | Chrome | [`chrome`] | history, Google searches, downloads, cookies, logins |
//! | Skype | [`skype`] | accounts, contacts, calls, messages |
//! | WhatsApp | [`whatsapp`] | messages, contacts |

pub mod chrome;
pub mod skype;
pub mod whatsapp;

pub use chrome::{
    ChromeCookiesExtractor, ChromeDownloadsExtractor, ChromeHistoryExtractor,
    ChromeLoginsExtractor,
};
pub use skype::{
    SkypeAccountsExtractor, SkypeCallsExtractor, SkypeContactsExtractor, SkypeMessagesExtractor,
};
pub use whatsapp::{WhatsAppContactsExtractor, WhatsAppMessagesExtractor};

use super::ArtifactExtractor;
use crate::types::ArtifactKind;

/// Get the extractor for an artifact type.
pub fn extractor_for(kind: ArtifactKind) -> Box<dyn ArtifactExtractor> {
    match kind {
        ArtifactKind::ChromeHistory => Box::new(ChromeHistoryExtractor::new()),
        ArtifactKind::ChromeGoogleSearches => Box::new(ChromeHistoryExtractor::google_searches()),
        ArtifactKind::ChromeDownloads => Box::new(ChromeDownloadsExtractor::new()),
        ArtifactKind::ChromeCookies => Box::new(ChromeCookiesExtractor::new()),
        ArtifactKind::ChromeLogins => Box::new(ChromeLoginsExtractor::new()),
        ArtifactKind::SkypeAccounts => Box::new(SkypeAccountsExtractor::new()),
        ArtifactKind::SkypeContacts => Box::new(SkypeContactsExtractor::new()),
        ArtifactKind::SkypeCalls => Box::new(SkypeCallsExtractor::new()),
        ArtifactKind::SkypeMessages => Box::new(SkypeMessagesExtractor::new()),
        ArtifactKind::WhatsAppMessages => Box::new(WhatsAppMessagesExtractor::new()),
        ArtifactKind::WhatsAppContacts => Box::new(WhatsAppContactsExtractor::new()),
    }
}

/// Create all available extractors.
pub fn all_extractors() -> Vec<Box<dyn ArtifactExtractor>> {
    ArtifactKind::ALL.iter().map(|&kind| extractor_for(kind)).collect()
}
