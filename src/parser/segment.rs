use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

use super::document::{find_all, find_first, Element, Predicate};
use super::report::{DropReason, PipelineEvent, Reporter};

/// Fielding positions and pitching roles that open a player entry.
pub const POSITION_CODES: &[&str] = &[
    "C", "1B", "2B", "3B", "SS", "LF", "CF", "RF", "OF", "IF", "P", "RHP", "LHP", "DH", "INF",
];

/// Alternation over [`POSITION_CODES`] for embedding in larger patterns.
pub(crate) fn position_alternation() -> String {
    POSITION_CODES.join("|")
}

pub(crate) static POSITION_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?:{})\s+", position_alternation())).expect("position prefix pattern")
});

/// Template text the report page repeats around the player entries.
static BOILERPLATE: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)this page will be updated",
        r"(?i)latest injuries",
        r"(?i)get the latest from",
        r"(?i)sign up to receive",
        r"(?i)more\s+[\w .'&-]+?\s+injury news",
    ])
    .expect("boilerplate patterns")
});

/// One candidate player entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Flattened, trimmed block text.
    pub text: String,
    /// Bold/emphasised spans inside the block.
    pub emphasis: Vec<String>,
}

impl Segment {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            emphasis: Vec::new(),
        }
    }
}

pub fn starts_with_position_code(text: &str) -> bool {
    POSITION_PREFIX.is_match(text)
}

pub fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE.is_match(text)
}

const ENTRY_MARKERS: [&str; 2] = ["story-part", "markdown"];

/// Per-entry blocks under `content`, filtered and in source order.
pub fn segment<E: Element>(content: &E, reporter: &dyn Reporter) -> Vec<Segment> {
    let scope = match find_first(content, &Predicate::Tag("section")) {
        Some(section) => section,
        None => {
            reporter.report(PipelineEvent::SectionMissing);
            content.clone()
        }
    };

    let blocks: Vec<E> = find_all(&scope, &Predicate::Tag("div"))
        .into_iter()
        .filter(|div| ENTRY_MARKERS.iter().all(|marker| div.class_contains(marker)))
        .collect();
    reporter.report(PipelineEvent::BlocksFound {
        count: blocks.len(),
    });

    blocks
        .iter()
        .filter_map(|block| {
            let text = block.text();
            let text = text.trim();
            match gate(text) {
                Ok(()) => Some(Segment {
                    text: text.to_string(),
                    emphasis: block.emphasis(),
                }),
                Err(reason) => {
                    reporter.report(PipelineEvent::SegmentDropped { reason });
                    None
                }
            }
        })
        .collect()
}

/// Rejection checks in order: empty, boilerplate, missing position code.
fn gate(text: &str) -> Result<(), DropReason> {
    if text.is_empty() {
        Err(DropReason::Empty)
    } else if is_boilerplate(text) {
        Err(DropReason::Boilerplate)
    } else if !starts_with_position_code(text) {
        Err(DropReason::NoPositionCode)
    } else {
        Ok(())
    }
}
