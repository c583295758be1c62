use super::document::{find_first, Element, Predicate};
use super::report::{LocateStrategy, PipelineEvent, Reporter};

/// Tried in order; the first predicate with a match wins.
pub const CONTENT_PREDICATES: &[Predicate] = &[
    Predicate::TagWithClass { tag: "div", class: "article-content" },
    Predicate::Tag("article"),
    Predicate::TagWithClass { tag: "div", class: "article-wrap" },
    Predicate::TagWithClass { tag: "div", class: "article-body" },
    Predicate::TagWithClass { tag: "div", class: "content" },
    Predicate::Tag("main"),
    Predicate::TagClassContains { tag: "div", needle: "article" },
    Predicate::TagClassContains { tag: "div", needle: "content" },
];

/// Heuristic fallback: text must be strictly longer than this many characters.
pub const MIN_FALLBACK_TEXT_LEN: usize = 500;

pub const FALLBACK_KEYWORDS: &[&str] = &["injury", "injured", "il"];

#[derive(Debug, Clone)]
pub struct Located<E> {
    pub element: E,
    pub strategy: LocateStrategy,
}

/// Finds the sub-tree most likely to hold the injury report.
pub fn locate<E: Element>(root: &E, reporter: &dyn Reporter) -> Option<Located<E>> {
    let found = by_predicate(root).or_else(|| by_heuristic(root));
    match &found {
        Some(located) => reporter.report(PipelineEvent::ContentLocated {
            strategy: located.strategy.clone(),
        }),
        None => reporter.report(PipelineEvent::ContentMissing),
    }
    found
}

fn by_predicate<E: Element>(root: &E) -> Option<Located<E>> {
    CONTENT_PREDICATES.iter().find_map(|predicate| {
        find_first(root, predicate).map(|element| Located {
            element,
            strategy: LocateStrategy::Predicate(predicate.to_string()),
        })
    })
}

fn by_heuristic<E: Element>(root: &E) -> Option<Located<E>> {
    let divs = Predicate::Tag("div");
    std::iter::once(root.clone())
        .chain(root.descendants())
        .filter(|e| divs.matches(e))
        .find(|e| looks_like_report(&e.text()))
        .map(|element| Located {
            element,
            strategy: LocateStrategy::Heuristic,
        })
}

fn looks_like_report(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() <= MIN_FALLBACK_TEXT_LEN {
        return false;
    }
    let lower = text.to_lowercase();
    FALLBACK_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::document::{HtmlDocument, SyntheticNode};
    use crate::parser::report::RecordingReporter;

    fn filler(word: &str, n: usize) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn test_predicates_are_tried_in_priority_order() {
        // `main` appears first in the document but `article` outranks it
        let html = r#"<html><body><main id="m"><p>nav</p></main>
            <article id="a"><p>report</p></article></body></html>"#;
        let doc = HtmlDocument::parse(html);
        let reporter = RecordingReporter::new();
        let located = locate(&doc.root(), &reporter).unwrap();
        assert_eq!(located.element.attr("id"), Some("a"));
        assert_eq!(located.strategy, LocateStrategy::Predicate("article".to_string()));
    }

    #[test]
    fn test_article_content_class_wins_over_article_tag() {
        let html = r#"<html><body><article id="a"></article>
            <div class="article-content" id="c"></div></body></html>"#;
        let doc = HtmlDocument::parse(html);
        let located = locate(&doc.root(), &RecordingReporter::new()).unwrap();
        assert_eq!(located.element.attr("id"), Some("c"));
    }

    #[test]
    fn test_heuristic_selects_long_injury_div() {
        let long = format!("{} was injured in the ninth.", filler("Lorem", 100));
        let tree = SyntheticNode::new("body")
            .with_child(SyntheticNode::new("div").with_attr("id", "nav").with_text("Home | Scores"))
            .with_child(SyntheticNode::new("div").with_attr("id", "report").with_text(&long));
        let reporter = RecordingReporter::new();
        let located = locate(&&tree, &reporter).unwrap();
        assert_eq!(located.element.attr("id"), Some("report"));
        assert_eq!(located.strategy, LocateStrategy::Heuristic);
        assert_eq!(
            reporter.events(),
            vec![PipelineEvent::ContentLocated { strategy: LocateStrategy::Heuristic }]
        );
    }

    #[test]
    fn test_heuristic_requires_keyword_and_length() {
        let long_no_keyword = filler("baseball", 80);
        let short_keyword = "injured";
        let tree = SyntheticNode::new("body")
            .with_child(SyntheticNode::new("div").with_text(&long_no_keyword))
            .with_child(SyntheticNode::new("div").with_text(short_keyword));
        let reporter = RecordingReporter::new();
        assert!(locate(&&tree, &reporter).is_none());
        assert_eq!(reporter.events(), vec![PipelineEvent::ContentMissing]);
    }

    #[test]
    fn test_exactly_threshold_length_is_rejected() {
        let text = format!("injured{}", "x".repeat(MIN_FALLBACK_TEXT_LEN - 7));
        assert_eq!(text.chars().count(), MIN_FALLBACK_TEXT_LEN);
        assert!(!looks_like_report(&text));
        assert!(looks_like_report(&format!("{text}x")));
    }
}
