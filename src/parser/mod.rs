//! Injury report extraction: locate the report body, split it into player
//! entries, parse each entry, and collect the records in page order.
//!
//! Nothing here performs I/O or keeps state between calls, and no failure
//! escapes as an error. The worst outcome is an empty or partial list;
//! the [`Reporter`] tells the caller which of those happened.

pub mod document;
pub mod fallback;
pub mod locate;
pub mod primary;
pub mod report;
pub mod rules;
pub mod segment;
pub mod text;

use std::sync::Arc;

pub use document::{Element, HtmlDocument, SyntheticNode};
pub use report::{
    NullReporter, ParsePath, PipelineEvent, RecordingReporter, Reporter, TracingReporter,
};
pub use segment::Segment;

use crate::types::InjuredPlayer;
use report::preview;

/// Primary layout first, heuristic fallback second.
pub fn parse_segment(segment: &Segment, reporter: &dyn Reporter) -> Option<InjuredPlayer> {
    let (player, path) = match primary::parse_primary(&segment.text) {
        Some(player) => (player, ParsePath::Primary),
        None => (fallback::parse_fallback(segment)?, ParsePath::Fallback),
    };
    reporter.report(PipelineEvent::RecordParsed {
        path,
        name: player.name.clone(),
    });
    Some(player)
}

/// Runs the full pipeline over a document tree.
pub fn extract_injuries<E: Element>(root: &E, reporter: &dyn Reporter) -> Vec<InjuredPlayer> {
    let Some(located) = locate::locate(root, reporter) else {
        return Vec::new();
    };

    let segments = segment::segment(&located.element, reporter);
    let mut players = Vec::with_capacity(segments.len());
    let mut failures = 0;
    for segment in &segments {
        match parse_segment(segment, reporter) {
            Some(player) => players.push(player),
            None => {
                failures += 1;
                reporter.report(PipelineEvent::ParseFailed {
                    preview: preview(&segment.text, 80),
                });
            }
        }
    }

    reporter.report(PipelineEvent::Completed {
        records: players.len(),
        candidates: segments.len(),
        failures,
    });
    players
}

/// Parses `markup` and runs [`extract_injuries`] on it.
pub fn extract_from_html(markup: &str, reporter: &dyn Reporter) -> Vec<InjuredPlayer> {
    let document = HtmlDocument::parse(markup);
    extract_injuries(&document.root(), reporter)
}

/// Byte-oriented entry point for fetched page bodies.
pub struct InjuryReportParser {
    reporter: Arc<dyn Reporter>,
}

impl Default for InjuryReportParser {
    fn default() -> Self {
        Self::new(Arc::new(TracingReporter))
    }
}

impl InjuryReportParser {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }

    pub fn parse(&self, bytes: &[u8]) -> Vec<InjuredPlayer> {
        tracing::debug!("InjuryReportParser: start bytes_len={}", bytes.len());
        let body = String::from_utf8_lossy(bytes);
        extract_from_html(&body, self.reporter.as_ref())
    }
}
