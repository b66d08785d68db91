//! Integration tests for the extraction and reporting pipeline
//!
//! Each test builds small Chrome, Skype or WhatsApp databases in a temp
//! directory, then runs extractors and the report writer against them.

use artiscan_core::extract::{extract, extractor_for};
use artiscan_core::timestamp::IN_PROGRESS;
use artiscan_core::{
    scan, ArtifactKind, Error, ExtractRequest, FilterCriteria, ReportWriter, TemplateEngine,
    TimeRange,
};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 2024-05-01 12:00:00 UTC
const BASE_SECS: i64 = 1_714_564_800;
const CHROME_TICKS: i64 = 10_000_000;

/// Create a database file from a SQL batch
fn create_db(dir: &Path, name: &str, sql: &str) -> PathBuf {
    artiscan_core::logging::init_test();
    let path = dir.join(name);
    let conn = Connection::open(&path).expect("failed to create fixture db");
    conn.execute_batch(sql).expect("failed to seed fixture db");
    path
}

fn chrome_history_db(dir: &Path) -> PathBuf {
    let t = |offset: i64| (BASE_SECS + offset) * CHROME_TICKS;
    create_db(
        dir,
        "History",
        &format!(
            "CREATE TABLE urls (id INTEGER PRIMARY KEY, url TEXT, title TEXT, visit_count INTEGER, last_visit_time INTEGER);
             CREATE TABLE visits (id INTEGER PRIMARY KEY, url INTEGER, visit_time INTEGER);
             INSERT INTO urls VALUES (1, 'https://example.com/', 'Example Domain', 2, {a});
             INSERT INTO urls VALUES (2, 'https://www.google.com/search?q=rust', 'rust - Google Search', 1, {b});
             INSERT INTO urls VALUES (3, 'https://blank.example/', NULL, 1, {c});
             INSERT INTO visits VALUES (10, 1, {a});
             INSERT INTO visits VALUES (11, 2, {b});
             INSERT INTO visits VALUES (12, 3, {c});",
            a = t(0),
            b = t(60),
            c = t(120),
        ),
    )
}

fn chrome_cookies_db(dir: &Path) -> PathBuf {
    let t = BASE_SECS * CHROME_TICKS;
    create_db(
        dir,
        "Cookies",
        &format!(
            "CREATE TABLE cookies (host_key TEXT, name TEXT, value TEXT, creation_utc INTEGER, expires_utc INTEGER, last_access_utc INTEGER, has_expires INTEGER);
             INSERT INTO cookies VALUES ('.example.com', 'sid', 'abc123', {t}, {t}, {t}, 1);
             INSERT INTO cookies VALUES ('.other.org', 'pref', 'dark', {t}, 0, {t}, 0);
             INSERT INTO cookies VALUES ('.tracker.net', 'uid', '', {t}, 0, {t}, 0);"
        ),
    )
}

fn skype_db(dir: &Path) -> PathBuf {
    create_db(
        dir,
        "main.db",
        &format!(
            "CREATE TABLE Accounts (skypename TEXT, fullname TEXT, city TEXT, country TEXT, profile_timestamp INTEGER);
             CREATE TABLE Messages (id INTEGER PRIMARY KEY, timestamp INTEGER, chatname TEXT, author TEXT, dialog_partner TEXT, body_xml TEXT, chatmsg_status INTEGER, sending_status INTEGER);
             CREATE TABLE Conversations (id INTEGER PRIMARY KEY, identity TEXT);
             CREATE TABLE Calls (id INTEGER PRIMARY KEY, begin_timestamp INTEGER, conv_dbid INTEGER, duration INTEGER, is_incoming INTEGER);
             CREATE TABLE Contacts (id INTEGER PRIMARY KEY, skypename TEXT, displayname TEXT, city TEXT, country TEXT, phone_mobile TEXT, birthday INTEGER);
             INSERT INTO Contacts VALUES (1, 'bob.k', 'Bob K', '', 'se', '+46701234567', 19850214);
             INSERT INTO Contacts VALUES (2, 'carol.m', 'Carol M', 'Bergen', NULL, NULL, NULL);
             INSERT INTO Accounts VALUES ('alice.w', 'Alice W', 'Oslo', 'no', {base});
             INSERT INTO Messages VALUES (1, {base}, '#alice.w/$bob.k;1', 'alice.w', 'bob.k', 'hi bob', 2, 2);
             INSERT INTO Messages VALUES (2, {m2}, '#alice.w/$bob.k;1', 'bob.k', '', 'hi alice', 4, NULL);
             INSERT INTO Messages VALUES (3, {m3}, '#alice.w/$bob.k;1', 'bob.k', NULL, '<partlist alt=\"\"><part identity=\"bob.k\"/></partlist>', 4, NULL);
             INSERT INTO Conversations VALUES (1, 'bob.k');
             INSERT INTO Conversations VALUES (2, 'carol.m');
             INSERT INTO Calls VALUES (1, {base}, 1, 42, 1);
             INSERT INTO Calls VALUES (2, {m2}, 2, 7, 0);",
            base = BASE_SECS,
            m2 = BASE_SECS + 60,
            m3 = BASE_SECS + 120,
        ),
    )
}

fn whatsapp_dbs(dir: &Path) -> (PathBuf, PathBuf) {
    let ms = BASE_SECS * 1000;
    let msgstore = create_db(
        dir,
        "msgstore.db",
        &format!(
            "CREATE TABLE messages (_id INTEGER PRIMARY KEY, key_remote_jid TEXT, key_from_me INTEGER, status INTEGER, data TEXT, timestamp INTEGER,
                 media_url TEXT, media_wa_type INTEGER, media_duration INTEGER, media_caption TEXT, latitude REAL, longitude REAL,
                 receipt_server_timestamp INTEGER, receipt_device_timestamp INTEGER, read_device_timestamp INTEGER,
                 played_device_timestamp INTEGER, needs_push INTEGER, recipient_count INTEGER);
             INSERT INTO messages VALUES (1, '15551234@s.whatsapp.net', 1, 5, 'see you at 6', {ms}, NULL, 0, 0, NULL, NULL, NULL, {ms}, {ms}, NULL, NULL, 0, 0);
             INSERT INTO messages VALUES (2, '15559999@s.whatsapp.net', 0, 0, NULL, {later}, NULL, 5, 0, NULL, 59.91, 10.75, NULL, NULL, NULL, NULL, 0, 0);",
            later = ms + 60_000,
        ),
    );
    let wa = create_db(
        dir,
        "wa.db",
        "CREATE TABLE wa_contacts (jid TEXT, display_name TEXT, is_whatsapp_user INTEGER, status TEXT, status_timestamp INTEGER, unseen_msg_count INTEGER, sort_name TEXT);
         INSERT INTO wa_contacts VALUES ('15551234@s.whatsapp.net', 'Bob', 1, 'Hey there', 0, 0, 'Bob');
         INSERT INTO wa_contacts VALUES ('15551234@g.us', 'Bob work', 1, NULL, NULL, 2, 'Bob work');
         INSERT INTO wa_contacts VALUES ('4799999999@s.whatsapp.net', NULL, 0, NULL, NULL, NULL, NULL);",
    );
    (msgstore, wa)
}

fn cells(report: &artiscan_core::Report) -> Vec<Vec<String>> {
    report.records.iter().map(|r| r.cells.clone()).collect()
}

// ============================================
// Chrome
// ============================================

#[test]
fn test_cookie_host_filter() {
    let dir = TempDir::new().unwrap();
    let db = chrome_cookies_db(dir.path());

    let request = ExtractRequest::new(&db).with_filter(FilterCriteria::new(Some("example")));
    let report = extract(ArtifactKind::ChromeCookies, &request).unwrap();

    assert_eq!(report.title, "chrome_scanner Cookies");
    assert_eq!(report.record_count, 1);
    let row = &report.records[0].cells;
    assert_eq!(row[0], ".example.com");
    assert_eq!(row[3], "2024-05-01 12:00:00");
    assert_eq!(row[6], "Yes");
}

#[test]
fn test_cookie_far_future_creation_time() {
    let dir = TempDir::new().unwrap();
    let db = create_db(
        dir.path(),
        "Cookies",
        "CREATE TABLE cookies (host_key TEXT, name TEXT, value TEXT, creation_utc INTEGER, expires_utc INTEGER, last_access_utc INTEGER, has_expires INTEGER);
         INSERT INTO cookies VALUES ('.example.com', 'sid', 'abc', 130000000000000000, 130000000000000000, 130000000000000000, 1);
         INSERT INTO cookies VALUES ('.other.org', 'pref', 'dark', 130000000000000000, 0, 130000000000000000, 0);
         INSERT INTO cookies VALUES ('.tracker.net', 'uid', 'x', 130000000000000000, 0, 130000000000000000, 0);",
    );

    // Default range: the upper bound saturates instead of overflowing
    let request = ExtractRequest::new(&db).with_filter(FilterCriteria::new(Some("example")));
    let report = extract(ArtifactKind::ChromeCookies, &request).unwrap();

    assert_eq!(report.record_count, 1);
    let row = &report.records[0].cells;
    assert_eq!(row[0], ".example.com");
    assert_eq!(row[3], "2381-12-14 23:06:40");
    assert_eq!(row[6], "Yes");
}

#[test]
fn test_empty_filter_matches_no_filter() {
    let dir = TempDir::new().unwrap();
    let db = chrome_cookies_db(dir.path());

    let unfiltered = extract(ArtifactKind::ChromeCookies, &ExtractRequest::new(&db)).unwrap();
    let empty = extract(
        ArtifactKind::ChromeCookies,
        &ExtractRequest::new(&db).with_filter(FilterCriteria::new(Some(""))),
    )
    .unwrap();

    assert_eq!(unfiltered.record_count, 3);
    assert_eq!(cells(&unfiltered), cells(&empty));
    // Blank value renders as not applicable
    assert_eq!(unfiltered.records[2].cells[2], "Not Applicable");
}

#[test]
fn test_filter_wildcards_are_literal() {
    let dir = TempDir::new().unwrap();
    let db = chrome_cookies_db(dir.path());

    for needle in ["%", "_", "example' OR '1'='1"] {
        let request = ExtractRequest::new(&db).with_filter(FilterCriteria::new(Some(needle)));
        let report = extract(ArtifactKind::ChromeCookies, &request).unwrap();
        assert_eq!(report.record_count, 0, "filter {needle:?} matched rows");
    }
}

#[test]
fn test_history_time_range_is_inclusive() {
    let dir = TempDir::new().unwrap();
    let db = chrome_history_db(dir.path());

    let all = extract(ArtifactKind::ChromeHistory, &ExtractRequest::new(&db)).unwrap();
    assert_eq!(all.record_count, 3);
    assert_eq!(all.records[0].cells[2], "Example Domain");
    assert_eq!(all.records[2].cells[2], "Not Applicable");

    let request = ExtractRequest::new(&db)
        .with_time_range(TimeRange::new(Some(BASE_SECS + 60), Some(BASE_SECS + 60)));
    let one = extract(ArtifactKind::ChromeHistory, &request).unwrap();
    assert_eq!(one.record_count, 1);
    assert_eq!(one.records[0].cells[0], "2024-05-01 12:01:00");
}

#[test]
fn test_google_searches_only() {
    let dir = TempDir::new().unwrap();
    let db = chrome_history_db(dir.path());

    let report = extract(ArtifactKind::ChromeGoogleSearches, &ExtractRequest::new(&db)).unwrap();
    assert_eq!(report.record_count, 1);
    assert_eq!(report.records[0].cells[2], "rust - Google Search");
}

#[test]
fn test_downloads_unknown_size_and_in_progress() {
    let dir = TempDir::new().unwrap();
    let t = BASE_SECS * CHROME_TICKS;
    let db = create_db(
        dir.path(),
        "History",
        &format!(
            "CREATE TABLE downloads (id INTEGER PRIMARY KEY, current_path TEXT, start_time INTEGER, end_time INTEGER, received_bytes INTEGER, total_bytes INTEGER, opened INTEGER, referrer TEXT, mime_type TEXT, last_modified TEXT);
             CREATE TABLE downloads_url_chains (id INTEGER, chain_index INTEGER, url TEXT);
             INSERT INTO downloads VALUES (1, '/tmp/a.zip', {t}, {t}, 50, 200, 1, 'https://ref/', 'application/zip', 'Wed, 01 May 2024');
             INSERT INTO downloads VALUES (2, '/tmp/b.iso', {t2}, 0, 10, 0, 0, NULL, NULL, NULL);
             INSERT INTO downloads_url_chains VALUES (1, 0, 'https://host/a.zip');
             INSERT INTO downloads_url_chains VALUES (2, 0, 'https://host/b.iso');",
            t2 = t + CHROME_TICKS,
        ),
    );

    let report = extract(ArtifactKind::ChromeDownloads, &ExtractRequest::new(&db)).unwrap();
    assert_eq!(report.record_count, 2);

    let done = &report.records[0].cells;
    assert_eq!(done[2], "https://host/a.zip");
    assert_eq!(done[7], "25.00 %");
    assert_eq!(done[8], "Yes");

    let partial = &report.records[1].cells;
    assert_eq!(partial[1], IN_PROGRESS);
    assert_eq!(partial[7], "size unknown");
    assert_eq!(partial[4], "Not Applicable");
}

#[test]
fn test_logins_decode_blob_fields() {
    let dir = TempDir::new().unwrap();
    let db = create_db(
        dir.path(),
        "Login Data",
        &format!(
            "CREATE TABLE logins (signon_realm TEXT, action_url TEXT, username_value TEXT, password_value BLOB, date_created INTEGER, times_used INTEGER, form_data BLOB);
             INSERT INTO logins VALUES ('https://mail.example/', 'https://mail.example/login', 'alice', X'70E9', {t}, 3, NULL);",
            t = BASE_SECS * CHROME_TICKS,
        ),
    );

    let report = extract(ArtifactKind::ChromeLogins, &ExtractRequest::new(&db)).unwrap();
    let row = &report.records[0].cells;
    assert_eq!(row[1], "https://mail.example/");
    assert_eq!(row[4], "p\u{e9}");
    assert_eq!(row[5], "3");
    assert_eq!(row[6], "Not Applicable");
}

// ============================================
// Skype
// ============================================

#[test]
fn test_skype_messages_owner_and_system_rows() {
    let dir = TempDir::new().unwrap();
    let db = skype_db(dir.path());

    let report = extract(ArtifactKind::SkypeMessages, &ExtractRequest::new(&db)).unwrap();
    assert_eq!(report.record_count, 2, "partlist row must be excluded");

    let sent = &report.records[0].cells;
    assert_eq!(sent[2], "db owner");
    assert_eq!(sent[3], "bob.k");
    assert_eq!(sent[5], "delivered");

    let received = &report.records[1].cells;
    assert_eq!(received[2], "bob.k");
    assert_eq!(received[3], "db owner");
    assert_eq!(received[5], "incoming");
}

#[test]
fn test_skype_calls_filter_by_counterpart() {
    let dir = TempDir::new().unwrap();
    let db = skype_db(dir.path());

    let request = ExtractRequest::new(&db).with_filter(FilterCriteria::new(Some("carol")));
    let report = extract(ArtifactKind::SkypeCalls, &request).unwrap();
    assert_eq!(cells(&report), vec![vec![
        "2024-05-01 12:01:00".to_string(),
        "carol.m".to_string(),
        "7".to_string(),
        "outgoing".to_string(),
    ]]);
}

#[test]
fn test_skype_accounts_location() {
    let dir = TempDir::new().unwrap();
    let db = skype_db(dir.path());

    let report = extract(ArtifactKind::SkypeAccounts, &ExtractRequest::new(&db)).unwrap();
    assert_eq!(report.records[0].cells[2], "no, Oslo");
}

#[test]
fn test_skype_contacts() {
    let dir = TempDir::new().unwrap();
    let db = skype_db(dir.path());

    let report = extract(ArtifactKind::SkypeContacts, &ExtractRequest::new(&db)).unwrap();
    assert_eq!(report.title, "skype_scanner Contacts");
    assert_eq!(
        cells(&report),
        vec![
            vec![
                "Bob K".to_string(),
                "bob.k".to_string(),
                "se, unspecified city/town".to_string(),
                "+46701234567".to_string(),
                "19850214".to_string(),
            ],
            vec![
                "Carol M".to_string(),
                "carol.m".to_string(),
                "unspecified country, Bergen".to_string(),
                "Not Applicable".to_string(),
                "Not Applicable".to_string(),
            ],
        ]
    );
}

// ============================================
// WhatsApp
// ============================================

#[test]
fn test_whatsapp_outgoing_message() {
    let dir = TempDir::new().unwrap();
    let (msgstore, _) = whatsapp_dbs(dir.path());

    let report = extract(ArtifactKind::WhatsAppMessages, &ExtractRequest::new(&msgstore)).unwrap();
    assert_eq!(report.record_count, 2);

    let sent = &report.records[0].cells;
    assert_eq!(sent[0], "2024-05-01 12:00:00");
    assert_eq!(sent[1], "15551234");
    assert_eq!(sent[2], "db owner");
    assert_eq!(sent[3], "15551234");
    assert_eq!(sent[4], "text");
    assert_eq!(sent[6], "received by destination");
    assert_eq!(sent[16], "Not Applicable");

    let geo = &report.records[1].cells;
    assert_eq!(geo[2], "15559999");
    assert_eq!(geo[3], "db owner");
    assert_eq!(geo[4], "geo position");
    assert_eq!(geo[5], "Not Applicable");
    assert_eq!(geo[16], "long: 10.75, lat: 59.91");
}

#[test]
fn test_whatsapp_name_resolution() {
    let dir = TempDir::new().unwrap();
    let (msgstore, _) = whatsapp_dbs(dir.path());

    // wa.db next to msgstore.db is picked up by default
    let request = ExtractRequest::new(&msgstore).resolving_names(true);
    let report = extract(ArtifactKind::WhatsAppMessages, &request).unwrap();

    assert_eq!(report.records[0].cells[3], "Bob--Bob work");
    assert_eq!(report.records[0].cells[1], "15551234");
    // No contact entry falls back to the handle
    assert_eq!(report.records[1].cells[2], "15559999");

    // Both databases are evidence and carry a digest
    assert_eq!(report.sources.len(), 2);
    assert!(report.sources[0].path.ends_with("msgstore.db"));
    assert!(report.sources[1].path.ends_with("wa.db"));
    assert_eq!(report.sources[1].sha256.len(), 64);

    let plain = extract(ArtifactKind::WhatsAppMessages, &ExtractRequest::new(&msgstore)).unwrap();
    assert_eq!(plain.sources.len(), 1);
}

#[test]
fn test_whatsapp_missing_contacts_db() {
    let dir = TempDir::new().unwrap();
    let (msgstore, _) = whatsapp_dbs(dir.path());

    let request = ExtractRequest::new(&msgstore)
        .with_contacts_db(dir.path().join("nope.db"))
        .resolving_names(true);
    let err = extract(ArtifactKind::WhatsAppMessages, &request).unwrap_err();
    assert!(matches!(err, Error::DatabaseNotFound(_)));
}

#[test]
fn test_whatsapp_time_range_in_millis() {
    let dir = TempDir::new().unwrap();
    let (msgstore, _) = whatsapp_dbs(dir.path());

    let request = ExtractRequest::new(&msgstore)
        .with_time_range(TimeRange::new(Some(BASE_SECS + 1), None));
    let report = extract(ArtifactKind::WhatsAppMessages, &request).unwrap();
    assert_eq!(report.record_count, 1);
    assert_eq!(report.records[0].cells[1], "15559999");
}

#[test]
fn test_whatsapp_contacts() {
    let dir = TempDir::new().unwrap();
    let (_, wa) = whatsapp_dbs(dir.path());

    let report = extract(ArtifactKind::WhatsAppContacts, &ExtractRequest::new(&wa)).unwrap();
    assert_eq!(report.title, "whatsapp_scanner Contacts");
    assert_eq!(report.record_count, 3);
    assert_eq!(report.records[0].cells[0], "Bob");
    assert_eq!(report.records[2].cells[0], "Not Applicable");
}

#[test]
fn test_whatsapp_jid_without_number() {
    let dir = TempDir::new().unwrap();
    let (_, wa) = whatsapp_dbs(dir.path());
    let msgstore = create_db(
        dir.path(),
        "broken_msgstore.db",
        &format!(
            "CREATE TABLE messages (_id INTEGER PRIMARY KEY, key_remote_jid TEXT, key_from_me INTEGER, status INTEGER, data TEXT, timestamp INTEGER,
                 media_url TEXT, media_wa_type INTEGER, media_duration INTEGER, media_caption TEXT, latitude REAL, longitude REAL,
                 receipt_server_timestamp INTEGER, receipt_device_timestamp INTEGER, read_device_timestamp INTEGER,
                 played_device_timestamp INTEGER, needs_push INTEGER, recipient_count INTEGER);
             INSERT INTO messages VALUES (1, '@s.whatsapp.net', 0, 0, 'who?', {ms}, NULL, 0, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, 0, 0);",
            ms = BASE_SECS * 1000,
        ),
    );

    for resolve in [false, true] {
        let request = ExtractRequest::new(&msgstore)
            .with_contacts_db(&wa)
            .resolving_names(resolve);
        let report = extract(ArtifactKind::WhatsAppMessages, &request).unwrap();

        let row = &report.records[0].cells;
        assert_eq!(row[1], "Not Applicable", "resolve_names={resolve}");
        assert_eq!(row[2], "Not Applicable", "resolve_names={resolve}");
        assert_eq!(row[3], "db owner");
    }
}

// ============================================
// Failures
// ============================================

#[test]
fn test_missing_database() {
    let dir = TempDir::new().unwrap();
    let request = ExtractRequest::new(dir.path().join("History"));

    for kind in ArtifactKind::ALL {
        let err = extractor_for(kind).extract(&request).unwrap_err();
        assert!(matches!(err, Error::DatabaseNotFound(_)), "{kind}: {err}");
    }
}

#[test]
fn test_corrupt_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Cookies");
    std::fs::write(&path, vec![0x5a_u8; 4096]).unwrap();

    let err = extract(ArtifactKind::ChromeCookies, &ExtractRequest::new(&path)).unwrap_err();
    assert!(matches!(err, Error::DatabaseAccess { .. }), "{err}");
}

#[test]
fn test_wrong_schema_is_access_error() {
    let dir = TempDir::new().unwrap();
    let db = chrome_cookies_db(dir.path());

    let err = extract(ArtifactKind::SkypeMessages, &ExtractRequest::new(&db)).unwrap_err();
    assert!(matches!(err, Error::DatabaseAccess { .. }));
}

// ============================================
// Reports
// ============================================

#[test]
fn test_scan_writes_report() {
    let dir = TempDir::new().unwrap();
    let db = chrome_cookies_db(dir.path());
    let out = dir.path().join("out");

    let outcome = scan(
        ArtifactKind::ChromeCookies,
        &ExtractRequest::new(&db),
        &TemplateEngine::new().unwrap(),
        &ReportWriter::new(&out),
    )
    .unwrap();

    assert_eq!(outcome.path, out.join("chrome_cookies.html"));
    assert_eq!(outcome.record_count, 3);

    let html = std::fs::read_to_string(&outcome.path).unwrap();
    assert!(html.contains("Records: 3"));
    assert_eq!(html.matches("<tr class=\"record\">").count(), 3);
    assert!(html.contains("SHA-256"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_scan_is_idempotent_except_timestamp() {
    let dir = TempDir::new().unwrap();
    let db = skype_db(dir.path());
    let engine = TemplateEngine::new().unwrap();
    let request = ExtractRequest::new(&db);

    let render = |sub: &str| {
        let outcome = scan(
            ArtifactKind::SkypeMessages,
            &request,
            &engine,
            &ReportWriter::new(dir.path().join(sub)),
        )
        .unwrap();
        std::fs::read_to_string(outcome.path)
            .unwrap()
            .lines()
            .filter(|line| !line.contains("Generated:"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    assert_eq!(render("first"), render("second"));
}

#[test]
fn test_scan_never_overwrites() {
    let dir = TempDir::new().unwrap();
    let db = chrome_cookies_db(dir.path());
    let existing = dir.path().join("chrome_cookies.html");
    std::fs::write(&existing, "earlier report").unwrap();

    let err = scan(
        ArtifactKind::ChromeCookies,
        &ExtractRequest::new(&db),
        &TemplateEngine::new().unwrap(),
        &ReportWriter::new(dir.path()),
    )
    .unwrap_err();

    assert!(matches!(err, Error::ReportExists(_)));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "earlier report");
}

#[test]
fn test_failed_extraction_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let result = scan(
        ArtifactKind::WhatsAppMessages,
        &ExtractRequest::new(dir.path().join("msgstore.db")),
        &TemplateEngine::new().unwrap(),
        &ReportWriter::new(&out),
    );

    assert!(result.is_err());
    assert!(!out.join("whatsapp_scanner_msgs.html").exists());
}

#[test]
fn test_source_database_unchanged() {
    let dir = TempDir::new().unwrap();
    let db = skype_db(dir.path());
    let before = std::fs::read(&db).unwrap();

    for kind in [
        ArtifactKind::SkypeAccounts,
        ArtifactKind::SkypeContacts,
        ArtifactKind::SkypeCalls,
        ArtifactKind::SkypeMessages,
    ] {
        extract(kind, &ExtractRequest::new(&db))
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));
    }

    assert_eq!(std::fs::read(&db).unwrap(), before);
}
