//! Observable outcomes of one extraction run.

use std::fmt;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// How the content locator found the report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateStrategy {
    /// A structural predicate matched; carries its selector-like label.
    Predicate(String),
    /// Long, injury-flavoured `div` picked by text heuristics.
    Heuristic,
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateStrategy::Predicate(label) => write!(f, "selector {label}"),
            LocateStrategy::Heuristic => write!(f, "text heuristic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Empty,
    Boilerplate,
    NoPositionCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    ContentLocated { strategy: LocateStrategy },
    ContentMissing,
    SectionMissing,
    BlocksFound { count: usize },
    SegmentDropped { reason: DropReason },
    RecordParsed { path: ParsePath, name: String },
    ParseFailed { preview: String },
    Completed {
        records: usize,
        candidates: usize,
        failures: usize,
    },
}

/// Sink for pipeline events. Injected so callers and tests can observe
/// what happened without capturing global log output.
pub trait Reporter: Send + Sync {
    fn report(&self, event: PipelineEvent);
}

/// Default sink: forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::ContentLocated { strategy } => {
                info!("Found report content using {}", strategy)
            }
            PipelineEvent::ContentMissing => {
                warn!("Could not locate injury report content; returning no records")
            }
            PipelineEvent::SectionMissing => {
                debug!("No section element in report content; scanning content root")
            }
            PipelineEvent::BlocksFound { count } => {
                debug!("Found {} story-part markdown blocks", count)
            }
            // Rejected blocks are headers, ads and navigation; not worth a line each
            PipelineEvent::SegmentDropped { .. } => {}
            PipelineEvent::RecordParsed { path, name } => {
                debug!("Parsed player {} via {:?} path", name, path)
            }
            PipelineEvent::ParseFailed { preview } => {
                debug!("Dropped unparsable entry: {}", preview)
            }
            PipelineEvent::Completed {
                records,
                candidates,
                failures,
            } => {
                if records == 0 && failures > 0 {
                    warn!(
                        "All {} candidate entries failed to parse; page layout may have changed",
                        candidates
                    );
                } else if failures > 0 {
                    warn!(
                        "Extracted {} injured players; {} of {} entries could not be parsed",
                        records, failures, candidates
                    );
                } else {
                    info!("Extracted {} injured players", records);
                }
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: PipelineEvent) {}
}

/// Keeps every event in order, for assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, predicate: impl Fn(&PipelineEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// First `max` characters of `text`, for log lines.
pub(crate) fn preview(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    if text.chars().count() > max {
        out.push_str("...");
    }
    out
}
