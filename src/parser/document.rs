//! Structured-content queries over a parsed page.
//!
//! The extraction stages only ever talk to [`Element`], so they run the same
//! way against a real `scraper` DOM and against a hand-built
//! [`SyntheticNode`] tree in tests.

use scraper::{ElementRef, Html};
use std::fmt;
use std::ops::Deref;

/// Read-only view of one element in a document tree.
pub trait Element: Clone {
    /// Lowercase tag name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Element children in document order. Text nodes are not included.
    fn children(&self) -> Vec<Self>;

    /// All descendant text concatenated with no separator.
    fn text(&self) -> String;

    /// Every descendant element in document (pre-)order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Whole-token match against the `class` attribute.
    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|token| token == class))
            .unwrap_or(false)
    }

    /// Substring match against the raw `class` attribute.
    fn class_contains(&self, needle: &str) -> bool {
        self.attr("class").map(|c| c.contains(needle)).unwrap_or(false)
    }

    /// Flattened text of bold/emphasised descendants, blanks removed.
    fn emphasis(&self) -> Vec<String> {
        self.descendants()
            .into_iter()
            .filter(|e| matches!(e.tag(), "b" | "strong" | "em"))
            .map(|e| e.text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl<'a> Element for ElementRef<'a> {
    fn tag(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn children(&self) -> Vec<Self> {
        self.deref().children().filter_map(ElementRef::wrap).collect()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }
}

/// A parsed HTML page.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn title(&self) -> Option<String> {
        let root = self.root();
        find_first(&root, &Predicate::Tag("title"))
            .map(|t| Element::text(&t).trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Structural match on a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Tag(&'static str),
    /// Tag plus a whole class token, like `div.content`.
    TagWithClass {
        tag: &'static str,
        class: &'static str,
    },
    /// Tag plus a class-attribute substring, like `div[class*="content"]`.
    TagClassContains {
        tag: &'static str,
        needle: &'static str,
    },
}

impl Predicate {
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        match self {
            Predicate::Tag(tag) => element.tag() == *tag,
            Predicate::TagWithClass { tag, class } => {
                element.tag() == *tag && element.has_class(class)
            }
            Predicate::TagClassContains { tag, needle } => {
                element.tag() == *tag && element.class_contains(needle)
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Tag(tag) => write!(f, "{tag}"),
            Predicate::TagWithClass { tag, class } => write!(f, "{tag}.{class}"),
            Predicate::TagClassContains { tag, needle } => {
                write!(f, "{tag}[class*=\"{needle}\"]")
            }
        }
    }
}

/// First element at or below `root`, in document order, that matches.
pub fn find_first<E: Element>(root: &E, predicate: &Predicate) -> Option<E> {
    if predicate.matches(root) {
        return Some(root.clone());
    }
    root.descendants().into_iter().find(|e| predicate.matches(e))
}

/// Every matching descendant of `root`, in document order.
pub fn find_all<E: Element>(root: &E, predicate: &Predicate) -> Vec<E> {
    root.descendants()
        .into_iter()
        .filter(|e| predicate.matches(e))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntheticChild {
    Element(SyntheticNode),
    Text(String),
}

/// Owned element tree for building documents without markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<SyntheticChild>,
}

impl SyntheticNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_child(mut self, child: SyntheticNode) -> Self {
        self.children.push(SyntheticChild::Element(child));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(SyntheticChild::Text(text.to_string()));
        self
    }
}

impl<'a> Element for &'a SyntheticNode {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a SyntheticNode = *self;
        node.children
            .iter()
            .filter_map(|child| match child {
                SyntheticChild::Element(e) => Some(e),
                SyntheticChild::Text(_) => None,
            })
            .collect()
    }

    fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                SyntheticChild::Element(e) => out.push_str(&e.text()),
                SyntheticChild::Text(t) => out.push_str(t),
            }
        }
        out
    }
}
