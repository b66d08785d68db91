//! artiscan - forensic artifact extractor
//!
//! Reads one artifact type from a Chrome, Skype or WhatsApp SQLite database
//! and saves it as a static HTML report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use artiscan_core::timestamp::parse_time_arg;
use artiscan_core::{
    scan, ArtifactKind, Config, ExtractRequest, FilterCriteria, ReportWriter, TemplateEngine,
    TimeRange,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "artiscan")]
#[command(about = "Extract Chrome, Skype and WhatsApp artifacts into HTML reports")]
#[command(version)]
struct Args {
    /// Artifact type to extract (see --list-targets)
    #[arg(short, long, required_unless_present = "list_targets")]
    target: Option<String>,

    /// Source database file, or a directory holding the default file name
    #[arg(short, long, required_unless_present = "list_targets")]
    db: Option<PathBuf>,

    /// Lower time bound, local time as YYYY_MM_DD_HH_MM_SS
    #[arg(long)]
    min_time: Option<String>,

    /// Upper time bound, local time as YYYY_MM_DD_HH_MM_SS
    #[arg(long)]
    max_time: Option<String>,

    /// Only rows whose counterpart (or domain) contains this text
    #[arg(short, long, visible_alias = "domain")]
    partner: Option<String>,

    /// WhatsApp contacts database used for name resolution (default: wa.db next to --db)
    #[arg(long)]
    contacts_db: Option<PathBuf>,

    /// Resolve WhatsApp handles to contact names
    #[arg(long)]
    resolve_names: bool,

    /// Directory to write the report into (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory holding a custom report.html template (overrides config)
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// List supported artifact types and exit
    #[arg(long)]
    list_targets: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_targets {
        println!("Supported targets:");
        for kind in ArtifactKind::ALL {
            println!(
                "  - {:<24} {:<9} {} -> {}",
                kind.as_str(),
                kind.application().display_name(),
                kind.default_db_file_name(),
                kind.output_file_name()
            );
        }
        return Ok(());
    }

    // Load configuration
    let mut config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, stdout carries only the summary)
    let _log_guard =
        artiscan_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let kind: ArtifactKind = args
        .target
        .as_deref()
        .unwrap_or_default()
        .parse()
        .context("invalid --target")?;
    let db_arg = args.db.context("--db is required")?;
    let db_path = kind.resolve_db_path(&db_arg);

    let time_range = TimeRange::new(
        parse_bound(args.min_time.as_deref(), "--min-time")?,
        parse_bound(args.max_time.as_deref(), "--max-time")?,
    );
    if !time_range.is_unbounded() && !kind.supports_time_range() {
        eprintln!("note: {kind} has no timestamps; time range ignored");
    }

    let filter = FilterCriteria::new(args.partner);
    if !filter.is_empty() && !kind.supports_filter() {
        eprintln!("note: {kind} does not support --partner/--domain; filter ignored");
    }

    let mut request = ExtractRequest::new(&db_path)
        .with_time_range(time_range)
        .with_filter(filter)
        .resolving_names(args.resolve_names);
    if let Some(contacts_db) = args.contacts_db {
        request = request.with_contacts_db(contacts_db);
    }

    // CLI flags win over config
    if args.output_dir.is_some() {
        config.report.output_dir = args.output_dir;
    }
    if args.template_dir.is_some() {
        config.report.template_dir = args.template_dir;
    }
    config.report.validate().context("invalid report configuration")?;

    let engine = TemplateEngine::from_optional_dir(config.report.template_dir.as_deref())
        .context("failed to load report template")?;
    let writer = ReportWriter::new(config.report.output_dir());

    tracing::info!(artifact = %kind, db = %db_path.display(), "artiscan starting");

    let outcome = scan(kind, &request, &engine, &writer)
        .with_context(|| format!("failed to extract {kind} from {}", db_path.display()))?;

    println!(
        "Saved {} record(s) to {}",
        outcome.record_count,
        outcome.path.display()
    );
    tracing::info!(records = outcome.record_count, path = %outcome.path.display(), "artiscan finished");

    Ok(())
}

fn parse_bound(arg: Option<&str>, flag: &str) -> Result<Option<i64>> {
    arg.map(|value| parse_time_arg(value).with_context(|| format!("invalid {flag}")))
        .transpose()
}
