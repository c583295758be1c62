//! Parser for the regular entry layout:
//! `<POS> <Name>Injury: ... IL date: ... Expected return: ... Status: ...`

use once_cell::sync::Lazy;
use regex::Regex;

use super::segment::position_alternation;
use super::text::{clean_field, UPDATED_ANNOTATION};
use crate::types::InjuredPlayer;

/// Two or more capitalized tokens, letters from any script.
pub(crate) const NAME_TOKENS: &str = r"\p{Lu}[\p{L}'.\-]+(?:\s+\p{Lu}[\p{L}'.\-]+)+";

// Name runs straight into "Injury:" in the flattened text, so the literal
// marker is the anchor.
static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s)^({})\s+({})Injury:\s*(.*?)\s*(?:IL date:|Expected return:|Status:|$)",
        position_alternation(),
        NAME_TOKENS
    ))
    .expect("primary anchor pattern")
});

static IL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)IL date:\s*(.*?)\s*(?:Expected return:|Status:|$)").expect("il date pattern")
});

static EXPECTED_RETURN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Expected return:\s*(.*?)\s*(?:Status:|$)").expect("expected return pattern")
});

static STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Status:\s*(.*)").expect("status pattern"));

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| clean_field(m.as_str()))
}

/// Returns `None` unless position, a multi-word name and a non-empty
/// injury are all present.
pub fn parse_primary(text: &str) -> Option<InjuredPlayer> {
    let caps = ANCHOR.captures(text)?;
    let position = caps.get(1)?.as_str().to_string();
    let name = caps.get(2)?.as_str().trim().to_string();
    let injury = caps.get(3).and_then(|m| clean_field(m.as_str()))?;

    let last_updated = UPDATED_ANNOTATION
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    Some(InjuredPlayer {
        name,
        position,
        injury,
        il_date: capture(&IL_DATE, text),
        expected_return: capture(&EXPECTED_RETURN, text),
        status: capture(&STATUS, text),
        last_updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_entry() {
        let text = "C Pete AlonsoInjury: sprained left wrist IL date: May 1 Expected return: June 1 Status: day-to-day (updated May 5) More >>";
        let player = parse_primary(text).unwrap();
        assert_eq!(
            player,
            InjuredPlayer {
                name: "Pete Alonso".to_string(),
                position: "C".to_string(),
                injury: "sprained left wrist".to_string(),
                il_date: Some("May 1".to_string()),
                expected_return: Some("June 1".to_string()),
                status: Some("day-to-day".to_string()),
                last_updated: Some("May 5".to_string()),
            }
        );
    }

    #[test]
    fn test_three_letter_code_and_missing_fields() {
        let player = parse_primary("LHP Framber ValdezInjury: forearm tightness Status: day-to-day").unwrap();
        assert_eq!(player.position, "LHP");
        assert_eq!(player.name, "Framber Valdez");
        assert_eq!(player.injury, "forearm tightness");
        assert_eq!(player.il_date, None);
        assert_eq!(player.expected_return, None);
        assert_eq!(player.status.as_deref(), Some("day-to-day"));
        assert_eq!(player.last_updated, None);
    }

    #[test]
    fn test_diacritics_and_numeric_codes() {
        let player = parse_primary("3B José RamírezInjury: left knee contusion").unwrap();
        assert_eq!(player.name, "José Ramírez");
        assert_eq!(player.position, "3B");

        let player = parse_primary("INF Luisangel AcuñaInjury: hamstring").unwrap();
        assert_eq!(player.name, "Luisangel Acuña");
        assert_eq!(player.position, "INF");
    }

    #[test]
    fn test_suffixes_and_initials() {
        let player = parse_primary("OF J.D. Martinez Jr.Injury: back spasms").unwrap();
        assert_eq!(player.name, "J.D. Martinez Jr.");
    }

    #[test]
    fn test_single_word_name_is_rejected() {
        assert!(parse_primary("C AlonsoInjury: sprained left wrist").is_none());
    }

    #[test]
    fn test_missing_marker_is_rejected() {
        assert!(parse_primary("C strained right hamstring, day-to-day").is_none());
    }

    #[test]
    fn test_empty_injury_is_rejected() {
        assert!(parse_primary("RHP Kodai SengaInjury: Status: out").is_none());
    }

    #[test]
    fn test_status_only_annotation_is_omitted() {
        let player = parse_primary(
            "RHP Kodai SengaInjury: right shoulder strain Status: (Updated June 3) More >>",
        )
        .unwrap();
        assert_eq!(player.status, None);
        assert_eq!(player.last_updated.as_deref(), Some("June 3"));
    }

    #[test]
    fn test_annotation_does_not_leak_into_last_field() {
        let player = parse_primary(
            "SS Francisco LindorInjury: back IL date: April 2 Expected return: mid-May (updated April 20) More >>",
        )
        .unwrap();
        assert_eq!(player.il_date.as_deref(), Some("April 2"));
        assert_eq!(player.expected_return.as_deref(), Some("mid-May"));
        assert_eq!(player.last_updated.as_deref(), Some("April 20"));
    }

    #[test]
    fn test_multiline_entry() {
        let text = "RHP Kodai SengaInjury: right shoulder\nstrain\nIL date: March 1\nStatus: Began a\nthrowing program";
        let player = parse_primary(text).unwrap();
        assert_eq!(player.injury, "right shoulder strain");
        assert_eq!(player.il_date.as_deref(), Some("March 1"));
        assert_eq!(player.status.as_deref(), Some("Began a throwing program"));
    }
}
