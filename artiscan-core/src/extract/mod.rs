//! Artifact extraction
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │  Evidence DB │ ──► │ ArtifactExtractor │ ──► │    Report    │
//! │ (read-only)  │     │ query + transform │     │ (assembled)  │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!                               │
//!                               ▼
//!                    ┌──────────────────────┐
//!                    │  Normalizer          │
//!                    │  Code translator     │
//!                    │  Value cells         │
//!                    └──────────────────────┘
//! ```

mod extractor;
pub mod extractors;

pub use extractor::ArtifactExtractor;
pub use extractors::{all_extractors, extractor_for};

use crate::error::Result;
use crate::report::Report;
use crate::types::{ArtifactKind, ExtractRequest};

/// Extract one artifact type into a report.
pub fn extract(kind: ArtifactKind, request: &ExtractRequest) -> Result<Report> {
    extractor_for(kind).extract(request)
}
