//! Core domain types for artiscan
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Artifact** | One kind of evidence pulled from one application database (history, cookies, ...) |
//! | **Record** | One normalized report row; every cell is already a display string |
//! | **Counterpart** | The other party of a call or chat, or the host/realm of a browser artifact |
//! | **Owner** | Whoever the database belongs to, always labelled [`OWNER_LABEL`] |

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Label used for the device/database owner in from/to columns.
pub const OWNER_LABEL: &str = "db owner";

// ============================================
// Artifact kinds
// ============================================

/// Application a source database belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Application {
    Chrome,
    Skype,
    WhatsApp,
}

impl Application {
    pub fn display_name(&self) -> &'static str {
        match self {
            Application::Chrome => "Chrome",
            Application::Skype => "Skype",
            Application::WhatsApp => "WhatsApp",
        }
    }
}

/// Every artifact type artiscan knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    ChromeHistory,
    ChromeGoogleSearches,
    ChromeDownloads,
    ChromeCookies,
    ChromeLogins,
    SkypeAccounts,
    SkypeContacts,
    SkypeCalls,
    SkypeMessages,
    WhatsAppMessages,
    WhatsAppContacts,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 11] = [
        ArtifactKind::ChromeHistory,
        ArtifactKind::ChromeGoogleSearches,
        ArtifactKind::ChromeDownloads,
        ArtifactKind::ChromeCookies,
        ArtifactKind::ChromeLogins,
        ArtifactKind::SkypeAccounts,
        ArtifactKind::SkypeContacts,
        ArtifactKind::SkypeCalls,
        ArtifactKind::SkypeMessages,
        ArtifactKind::WhatsAppMessages,
        ArtifactKind::WhatsAppContacts,
    ];

    /// Selector used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::ChromeHistory => "chrome-history",
            ArtifactKind::ChromeGoogleSearches => "chrome-google-searches",
            ArtifactKind::ChromeDownloads => "chrome-downloads",
            ArtifactKind::ChromeCookies => "chrome-cookies",
            ArtifactKind::ChromeLogins => "chrome-logins",
            ArtifactKind::SkypeAccounts => "skype-accounts",
            ArtifactKind::SkypeContacts => "skype-contacts",
            ArtifactKind::SkypeCalls => "skype-calls",
            ArtifactKind::SkypeMessages => "skype-messages",
            ArtifactKind::WhatsAppMessages => "whatsapp-messages",
            ArtifactKind::WhatsAppContacts => "whatsapp-contacts",
        }
    }

    pub fn application(&self) -> Application {
        match self {
            ArtifactKind::ChromeHistory
            | ArtifactKind::ChromeGoogleSearches
            | ArtifactKind::ChromeDownloads
            | ArtifactKind::ChromeCookies
            | ArtifactKind::ChromeLogins => Application::Chrome,
            ArtifactKind::SkypeAccounts
            | ArtifactKind::SkypeContacts
            | ArtifactKind::SkypeCalls
            | ArtifactKind::SkypeMessages => Application::Skype,
            ArtifactKind::WhatsAppMessages | ArtifactKind::WhatsAppContacts => {
                Application::WhatsApp
            }
        }
    }

    /// Title shown at the top of the report
    pub fn report_title(&self) -> &'static str {
        match self {
            ArtifactKind::ChromeHistory => "chrome_scanner History",
            ArtifactKind::ChromeGoogleSearches => "chrome_scanner Google Searches",
            ArtifactKind::ChromeDownloads => "chrome_scanner Downloads",
            ArtifactKind::ChromeCookies => "chrome_scanner Cookies",
            ArtifactKind::ChromeLogins => "chrome_scanner Logins",
            ArtifactKind::SkypeAccounts => "skype_scanner Account",
            ArtifactKind::SkypeContacts => "skype_scanner Contacts",
            ArtifactKind::SkypeCalls => "skype_scanner Call Log",
            ArtifactKind::SkypeMessages => "skype_scanner Messages",
            ArtifactKind::WhatsAppMessages => "whatsapp_scanner Messages",
            ArtifactKind::WhatsAppContacts => "whatsapp_scanner Contacts",
        }
    }

    /// Report file name, fixed per artifact type
    pub fn output_file_name(&self) -> &'static str {
        match self {
            ArtifactKind::ChromeHistory => "chrome_history.html",
            ArtifactKind::ChromeGoogleSearches => "chrome_google_searches.html",
            ArtifactKind::ChromeDownloads => "chrome_downloads.html",
            ArtifactKind::ChromeCookies => "chrome_cookies.html",
            ArtifactKind::ChromeLogins => "chrome_logins.html",
            ArtifactKind::SkypeAccounts => "skype_scanner_accounts.html",
            ArtifactKind::SkypeContacts => "skype_scanner_contacts.html",
            ArtifactKind::SkypeCalls => "skype_scanner_calls.html",
            ArtifactKind::SkypeMessages => "skype_scanner_msgs.html",
            ArtifactKind::WhatsAppMessages => "whatsapp_scanner_msgs.html",
            ArtifactKind::WhatsAppContacts => "whatsapp_scanner_contacts.html",
        }
    }

    /// Well-known database file name inside an application profile directory
    pub fn default_db_file_name(&self) -> &'static str {
        match self {
            ArtifactKind::ChromeHistory
            | ArtifactKind::ChromeGoogleSearches
            | ArtifactKind::ChromeDownloads => "History",
            ArtifactKind::ChromeCookies => "Cookies",
            ArtifactKind::ChromeLogins => "Login Data",
            ArtifactKind::SkypeAccounts
            | ArtifactKind::SkypeContacts
            | ArtifactKind::SkypeCalls
            | ArtifactKind::SkypeMessages => "main.db",
            ArtifactKind::WhatsAppMessages => "msgstore.db",
            ArtifactKind::WhatsAppContacts => "wa.db",
        }
    }

    /// Whether the time range applies to this artifact type
    pub fn supports_time_range(&self) -> bool {
        !matches!(
            self,
            ArtifactKind::SkypeAccounts
                | ArtifactKind::SkypeContacts
                | ArtifactKind::WhatsAppContacts
        )
    }

    /// Whether the counterpart/domain substring filter applies to this artifact type
    pub fn supports_filter(&self) -> bool {
        matches!(
            self,
            ArtifactKind::ChromeCookies
                | ArtifactKind::ChromeLogins
                | ArtifactKind::SkypeCalls
                | ArtifactKind::SkypeMessages
                | ArtifactKind::WhatsAppMessages
        )
    }

    /// Resolve a user-supplied path: a directory means "the default file inside it".
    pub fn resolve_db_path(&self, path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(self.default_db_file_name())
        } else {
            path.to_path_buf()
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ArtifactKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| crate::error::Error::UnknownArtifact(s.to_string()))
    }
}

// ============================================
// Filters
// ============================================

/// Default upper bound of an unbounded range, in Unix seconds.
pub const FAR_FUTURE_SECS: i64 = 10_000_000_000_000;

/// Inclusive time window in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub min: i64,
    pub max: i64,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl TimeRange {
    pub fn unbounded() -> Self {
        Self {
            min: 0,
            max: FAR_FUTURE_SECS,
        }
    }

    /// Build from optional bounds, each falling back to the unbounded default.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        let default = Self::unbounded();
        Self {
            min: min.unwrap_or(default.min),
            max: max.unwrap_or(default.max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::unbounded()
    }
}

/// Optional counterpart/host/realm substring filter.
///
/// An empty substring is the same as no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    substring: Option<String>,
}

impl FilterCriteria {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(substring: Option<impl Into<String>>) -> Self {
        let substring = substring.map(Into::into).filter(|s| !s.is_empty());
        Self { substring }
    }

    pub fn substring(&self) -> Option<&str> {
        self.substring.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.substring.is_none()
    }
}

// ============================================
// Records
// ============================================

/// One normalized report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub cells: Vec<String>,
}

impl ArtifactRecord {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Everything one extraction run needs to know.
#[derive(Debug, Clone, Default)]
pub struct ExtractRequest {
    /// Primary database for the artifact type
    pub db_path: PathBuf,
    /// Time window applied to the artifact's filter column
    pub time_range: TimeRange,
    /// Counterpart/host/realm substring filter
    pub filter: FilterCriteria,
    /// WhatsApp contacts database (defaults to `wa.db` next to `db_path`)
    pub contacts_db: Option<PathBuf>,
    /// Show contact names instead of phone numbers in WhatsApp from/to columns
    pub resolve_names: bool,
}

impl ExtractRequest {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Default::default()
        }
    }

    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_filter(mut self, filter: FilterCriteria) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_contacts_db(mut self, contacts_db: impl Into<PathBuf>) -> Self {
        self.contacts_db = Some(contacts_db.into());
        self
    }

    pub fn resolving_names(mut self, resolve: bool) -> Self {
        self.resolve_names = resolve;
        self
    }

    /// Contacts database, explicit or next to the primary database.
    pub fn contacts_db_path(&self) -> PathBuf {
        self.contacts_db.clone().unwrap_or_else(|| {
            self.db_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(ArtifactKind::WhatsAppContacts.default_db_file_name())
        })
    }
}
