//! Priority-ordered extraction rules for the heuristic fallback parser.
//!
//! Each field has its own list. Lists are evaluated first-match-wins, and
//! every rule carries a label so tests and trace logs can name the rule
//! that fired.

use once_cell::sync::Lazy;
use regex::Regex;

use super::primary::NAME_TOKENS;
use super::segment::{position_alternation, Segment, POSITION_CODES, POSITION_PREFIX};
use super::text::{clean_field, squash, title_case, MONTH};

/// Which part of a segment a rule searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Whole flattened text.
    Text,
    /// Flattened text with the leading position code removed.
    Body,
    /// Each bold/emphasised span, in order.
    Emphasis,
}

/// Post-processing applied to a captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Squash,
    /// Squash plus removal of update annotations and "More »" markers.
    Clean,
    TitleCase,
}

pub struct Rule {
    pub label: &'static str,
    source: Source,
    pattern: Regex,
    group: usize,
    finish: Finish,
    accept: fn(&str) -> bool,
}

impl Rule {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            source: Source::Text,
            pattern: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid pattern for rule {label}: {e}")),
            group: 1,
            finish: Finish::Squash,
            accept: |_| true,
        }
    }

    fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    fn group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    fn finish(mut self, finish: Finish) -> Self {
        self.finish = finish;
        self
    }

    fn accept(mut self, accept: fn(&str) -> bool) -> Self {
        self.accept = accept;
        self
    }

    /// First accepted capture in the rule's source.
    pub fn apply(&self, segment: &Segment) -> Option<String> {
        let haystacks: Vec<&str> = match self.source {
            Source::Text => vec![segment.text.as_str()],
            Source::Body => vec![strip_position_prefix(&segment.text)],
            Source::Emphasis => segment.emphasis.iter().map(String::as_str).collect(),
        };

        for haystack in haystacks {
            for caps in self.pattern.captures_iter(haystack) {
                let Some(m) = caps.get(self.group) else {
                    continue;
                };
                let value = match self.finish {
                    Finish::Squash => squash(m.as_str()),
                    Finish::Clean => clean_field(m.as_str()),
                    Finish::TitleCase => squash(m.as_str()).map(|v| title_case(&v)),
                };
                if let Some(value) = value.filter(|v| (self.accept)(v)) {
                    return Some(value);
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .field("source", &self.source)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Position,
    Injury,
    IlDate,
    ExpectedReturn,
    Status,
    LastUpdated,
}

#[derive(Debug)]
pub struct FallbackRules {
    pub name: Vec<Rule>,
    pub position: Vec<Rule>,
    pub injury: Vec<Rule>,
    pub il_date: Vec<Rule>,
    pub expected_return: Vec<Rule>,
    pub status: Vec<Rule>,
    pub last_updated: Vec<Rule>,
}

impl FallbackRules {
    pub fn for_field(&self, field: Field) -> &[Rule] {
        match field {
            Field::Name => &self.name,
            Field::Position => &self.position,
            Field::Injury => &self.injury,
            Field::IlDate => &self.il_date,
            Field::ExpectedReturn => &self.expected_return,
            Field::Status => &self.status,
            Field::LastUpdated => &self.last_updated,
        }
    }

    /// Value and rule label of the first rule that matches.
    pub fn first_match(&self, field: Field, segment: &Segment) -> Option<(String, &'static str)> {
        self.for_field(field)
            .iter()
            .find_map(|rule| rule.apply(segment).map(|value| (value, rule.label)))
    }
}

const BODY_PARTS: &str =
    "hand|thumb|elbow|shoulder|knee|ankle|back|hamstring|quad|calf|wrist|finger";
const ACTIONS: &str = "strained|sprained|torn|fractured";

/// Capitalized phrases that are not people.
const NON_NAMES: &[&str] = &["little league", "new york", "major league", "world series"];

/// Field labels that show up capitalized in entry text.
const LABEL_WORDS: &[&str] = &[
    "player name",
    "position",
    "injury",
    "il date",
    "expected return",
    "status",
    "updated",
];

fn plausible_name(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    !NON_NAMES.iter().any(|phrase| lower.contains(phrase))
        && !LABEL_WORDS.iter().any(|label| lower.contains(label))
}

pub fn is_position_code(candidate: &str) -> bool {
    POSITION_CODES.contains(&candidate)
}

fn strip_position_prefix(text: &str) -> &str {
    match POSITION_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

pub static FALLBACK_RULES: Lazy<FallbackRules> = Lazy::new(|| FallbackRules {
    name: vec![
        Rule::new("name.emphasis", &format!(r"^({NAME_TOKENS})"))
            .source(Source::Emphasis)
            .accept(plausible_name),
        Rule::new("name.capitalized_run", &format!(r"({NAME_TOKENS})"))
            .source(Source::Body)
            .accept(plausible_name),
    ],
    position: vec![
        Rule::new("position.label", r"(?i:player position:)\s*([A-Z0-9]+)")
            .accept(is_position_code),
        Rule::new("position.parenthesized", r"\(([A-Z0-9]+)\)").accept(is_position_code),
        Rule::new(
            "position.bare",
            &format!(r"\b({})\b", position_alternation()),
        )
        .accept(is_position_code),
    ],
    injury: vec![
        Rule::new(
            "injury.label",
            r"(?is)injury:\s*(.*?)\s*(?:il date:|expected return:|status:|$)",
        )
        .finish(Finish::Clean),
        Rule::new(
            "injury.action_body_part",
            &format!(r"(?i)\b((?:{ACTIONS})\s+(?:(?:left|right)\s+)?(?:{BODY_PARTS}))\b"),
        )
        .finish(Finish::TitleCase),
        Rule::new(
            "injury.side_body_part",
            &format!(r"(?i)\b((?:left|right)\s+(?:{BODY_PARTS}))\b"),
        )
        .finish(Finish::TitleCase),
        Rule::new(
            "injury.action_phrase",
            &format!(r"(?i)\b((?:{ACTIONS})\s+[^\n|,.;]+)"),
        )
        .finish(Finish::TitleCase),
        Rule::new(
            "injury.body_part",
            &format!(r"(?i)\b((?:{BODY_PARTS})(?:\s+(?:injury|strain|sprain))?)\b"),
        )
        .finish(Finish::TitleCase),
    ],
    il_date: vec![
        Rule::new(
            "il_date.label",
            r"(?is)il date:\s*(.*?)\s*(?:expected return:|status:|$)",
        )
        .finish(Finish::Clean),
        Rule::new(
            "il_date.placed_on",
            &format!(r"(?s)(?i:placed on).*?\bIL\b.*?\b({MONTH}\.?\s+\d{{1,2}})\b"),
        ),
    ],
    expected_return: vec![
        Rule::new(
            "expected_return.label",
            r"(?is)expected return:\s*(.*?)\s*(?:status:|$)",
        )
        .finish(Finish::Clean),
        Rule::new("expected_return.day_to_day", r"(?i)\bday[- ]to[- ]day\b").group(0),
        Rule::new(
            "expected_return.duration",
            r"(?i)\b(\d+(?:\s*(?:-|to)\s*\d+)?\s+(?:days?|weeks?|months?))\b",
        ),
        Rule::new(
            "expected_return.season",
            r"(?i)\b((?:(?:rest|end|remainder) of (?:the )?|next |early |mid-|late )?season|20\d{2})\b",
        ),
    ],
    status: vec![Rule::new("status.label", r"(?is)status:\s*(.*)").finish(Finish::Clean)],
    last_updated: vec![
        Rule::new("last_updated.label", r"(?i)\bupdated:\s*([^|\n]+)").finish(Finish::Clean),
        Rule::new(
            "last_updated.annotation",
            r"(?i)\(\s*updated\s+(\w+\.?\s+\d+)\s*\)",
        ),
        Rule::new(
            "last_updated.month_day",
            &format!(r"\b({MONTH}\.?\s+\d{{1,2}}(?:,\s*\d{{4}})?)\b"),
        ),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str) -> Segment {
        Segment::from_text(text)
    }

    fn rule(field: Field, label: &str) -> &'static Rule {
        FALLBACK_RULES
            .for_field(field)
            .iter()
            .find(|r| r.label == label)
            .unwrap_or_else(|| panic!("no rule {label}"))
    }

    #[test]
    fn test_every_rule_has_a_field_prefixed_label() {
        let fields = [
            (Field::Name, "name."),
            (Field::Position, "position."),
            (Field::Injury, "injury."),
            (Field::IlDate, "il_date."),
            (Field::ExpectedReturn, "expected_return."),
            (Field::Status, "status."),
            (Field::LastUpdated, "last_updated."),
        ];
        for (field, prefix) in fields {
            let rules = FALLBACK_RULES.for_field(field);
            assert!(!rules.is_empty());
            assert!(rules.iter().all(|r| r.label.starts_with(prefix)));
        }
    }

    #[test]
    fn test_name_from_emphasis_skips_non_names() {
        let segment = Segment {
            text: "C New York Mets catcher Francisco Alvarez sprained his thumb".to_string(),
            emphasis: vec!["New York Mets".to_string(), "Francisco Álvarez".to_string()],
        };
        assert_eq!(
            rule(Field::Name, "name.emphasis").apply(&segment).as_deref(),
            Some("Francisco Álvarez")
        );
    }

    #[test]
    fn test_name_run_ignores_position_code_and_labels() {
        let r = rule(Field::Name, "name.capitalized_run");
        assert_eq!(
            r.apply(&seg("LHP Framber Valdez left the game")).as_deref(),
            Some("Framber Valdez")
        );
        assert_eq!(r.apply(&seg("C Expected Return soon")), None);
        assert_eq!(r.apply(&seg("C strained right hamstring, day-to-day")), None);
    }

    #[test]
    fn test_position_rules_validate_code_set() {
        assert_eq!(
            rule(Field::Position, "position.label")
                .apply(&seg("Player position: SS"))
                .as_deref(),
            Some("SS")
        );
        assert_eq!(
            rule(Field::Position, "position.parenthesized")
                .apply(&seg("Alonso (MLB) then Smith (1B)"))
                .as_deref(),
            Some("1B")
        );
        assert_eq!(
            rule(Field::Position, "position.bare")
                .apply(&seg("RHP Kodai Senga"))
                .as_deref(),
            Some("RHP")
        );
    }

    #[test]
    fn test_injury_rule_order() {
        let found = FALLBACK_RULES.first_match(Field::Injury, &seg("C strained right hamstring, day-to-day"));
        assert_eq!(
            found,
            Some(("Strained Right Hamstring".to_string(), "injury.action_body_part"))
        );

        let found = FALLBACK_RULES.first_match(Field::Injury, &seg("out with a left knee issue"));
        assert_eq!(found, Some(("Left Knee".to_string(), "injury.side_body_part")));

        let found = FALLBACK_RULES.first_match(Field::Injury, &seg("has a torn UCL, out"));
        assert_eq!(found, Some(("Torn Ucl".to_string(), "injury.action_phrase")));

        let found = FALLBACK_RULES.first_match(Field::Injury, &seg("dealing with elbow soreness"));
        assert_eq!(found, Some(("Elbow".to_string(), "injury.body_part")));

        let found = FALLBACK_RULES.first_match(
            Field::Injury,
            &seg("C AlonsoInjury: sprained left wrist IL date: May 1"),
        );
        assert_eq!(found, Some(("sprained left wrist".to_string(), "injury.label")));
    }

    #[test]
    fn test_il_date_rules() {
        assert_eq!(
            FALLBACK_RULES.first_match(
                Field::IlDate,
                &seg("He was placed on the 15-day IL retroactive to April 28.")
            ),
            Some(("April 28".to_string(), "il_date.placed_on"))
        );
        assert_eq!(
            FALLBACK_RULES.first_match(Field::IlDate, &seg("il date: May 1 Status: out")),
            Some(("May 1".to_string(), "il_date.label"))
        );
        assert_eq!(
            FALLBACK_RULES.first_match(Field::IlDate, &seg("was placed on waivers in April 2")),
            None
        );
    }

    #[test]
    fn test_expected_return_rules() {
        let cases = [
            ("Expected return: late June Status: rehab", "late June", "expected_return.label"),
            ("listed as day to day", "day to day", "expected_return.day_to_day"),
            ("out 6-8 weeks after surgery", "6-8 weeks", "expected_return.duration"),
            ("will miss the rest of the season", "rest of the season", "expected_return.season"),
            ("could return in 2026", "2026", "expected_return.season"),
        ];
        for (text, value, label) in cases {
            assert_eq!(
                FALLBACK_RULES.first_match(Field::ExpectedReturn, &seg(text)),
                Some((value.to_string(), label)),
                "{text}"
            );
        }
        assert_eq!(
            FALLBACK_RULES.first_match(Field::ExpectedReturn, &seg("placed on the 10-day IL")),
            None
        );
    }

    #[test]
    fn test_last_updated_rules() {
        assert_eq!(
            FALLBACK_RULES.first_match(Field::LastUpdated, &seg("Updated: June 4 More >>")),
            Some(("June 4".to_string(), "last_updated.label"))
        );
        assert_eq!(
            FALLBACK_RULES.first_match(Field::LastUpdated, &seg("IL since May 1 (updated May 9)")),
            Some(("May 9".to_string(), "last_updated.annotation"))
        );
        assert_eq!(
            FALLBACK_RULES.first_match(Field::LastUpdated, &seg("hurt on Sept. 3, 2024 at home")),
            Some(("Sept. 3, 2024".to_string(), "last_updated.month_day"))
        );
    }
}
