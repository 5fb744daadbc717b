//! Field extraction helpers over parsed documents.
//!
//! These functions are pure and stateless. A selector that matches nothing is
//! not an error here; the parsers decide whether a missing node fails the
//! field they are reading.

use scraper::{ElementRef, Html, Node, Selector};

/// Result of reading an attribute from an element.
///
/// A missing attribute and an empty one both occur in Backloggd markup and
/// mean different things, so they are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute<'a> {
    Absent,
    Empty,
    Value(&'a str),
}

impl<'a> Attribute<'a> {
    /// The attribute's value when it is present and non-empty.
    pub fn non_empty(self) -> Option<&'a str> {
        match self {
            Attribute::Value(v) => Some(v),
            Attribute::Absent | Attribute::Empty => None,
        }
    }
}

/// All nodes in `document` matching `selector`, in document order.
pub fn extract<'a>(document: &'a Html, selector: &Selector) -> Vec<ElementRef<'a>> {
    document.select(selector).collect()
}

/// First node in `document` matching `selector`.
pub fn extract_first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// First descendant of `element` matching `selector`.
pub fn extract_first_within<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Read attribute `name` from `element`.
pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Attribute<'a> {
    match element.value().attr(name) {
        None => Attribute::Absent,
        Some("") => Attribute::Empty,
        Some(v) => Attribute::Value(v),
    }
}

/// Concatenated text of `element` and all its descendants.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenated text of the direct children of `element` whose tag is `tag`.
pub fn child_text(element: ElementRef<'_>, tag: &str) -> String {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .map(text_of)
        .collect()
}

/// Text of the first child node of `element`.
///
/// A text node yields its contents; an element yields its descendant text.
/// Comments and other node kinds yield `None`.
pub fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    let child = element.first_child()?;
    match child.value() {
        Node::Text(text) => Some(text.text.to_string()),
        Node::Element(_) => ElementRef::wrap(child).map(text_of),
        _ => None,
    }
}

/// Parse a counter rendered by the site as a non-negative integer.
///
/// Surrounding whitespace is ignored; anything else that is not a digit
/// makes the value unparseable.
pub fn parse_count(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}
