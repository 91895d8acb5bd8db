//! Value types threaded between the host parser and extensions.
//!
//! These are the descriptors the dispatch protocol moves around: source
//! [`Line`]s offered to block handlers, the [`Block`] descriptor carried
//! through start/continue/complete, the [`Excerpt`] handed to inline
//! handlers, and the [`Element`] render tree everything collapses into.

use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single source line as offered to block handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Raw line, indentation included.
    pub body: &'a str,
    /// Line with leading spaces removed.
    pub text: &'a str,
    /// Number of leading spaces.
    pub indent: usize,
}

impl<'a> Line<'a> {
    /// Split a raw line into its indent and indent-stripped text.
    #[must_use]
    pub fn new(body: &'a str) -> Self {
        let text = body.trim_start_matches(' ');
        Self {
            body,
            text,
            indent: body.len() - text.len(),
        }
    }

    /// A line holding nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// First character of the indent-stripped text, if any.
    #[must_use]
    pub fn marker(&self) -> Option<char> {
        self.text.chars().next()
    }
}

/// Content of an [`Element`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementText {
    /// No content; rendered as a void element.
    #[default]
    Empty,
    /// Literal text, escaped on render.
    Plain(String),
    /// Text run through the inline scanner on render.
    Spans(String),
    /// Pre-rendered markup, emitted verbatim.
    Html(String),
    /// Nested child elements.
    Nodes(Vec<Element>),
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attribute pairs in output order.
    pub attributes: Vec<(String, String)>,
    /// Element content.
    pub text: ElementText,
}

impl Element {
    /// Empty element, rendered as `<name />`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: ElementText::Empty,
        }
    }

    /// Element with literal text content.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: ElementText::Plain(text.into()),
            ..Self::new(name)
        }
    }

    /// Element whose content goes through the inline scanner on render.
    #[must_use]
    pub fn with_spans(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: ElementText::Spans(text.into()),
            ..Self::new(name)
        }
    }

    /// Element wrapping child elements.
    #[must_use]
    pub fn with_nodes(name: impl Into<String>, nodes: Vec<Element>) -> Self {
        Self {
            text: ElementText::Nodes(nodes),
            ..Self::new(name)
        }
    }

    /// Append an attribute, keeping output order.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Block descriptor threaded through the start/continue/complete protocol.
///
/// `kind` is the host's type tag: a native block name or the registration
/// identity of the extension that opened the block. The host assigns it after
/// a successful `start`, so handlers never need to know their own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    /// Host type tag; determines which handler continuation is routed to.
    pub kind: String,
    /// Element the block renders into.
    pub element: Element,
    /// Set by handlers that have seen their terminator and refuse further lines.
    pub finished: bool,
}

impl Block {
    /// Open a descriptor around `element`; the host fills in the type tag.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self {
            kind: String::new(),
            element,
            finished: false,
        }
    }
}

/// Slice of inline text offered to inline handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excerpt<'a> {
    /// Remaining text, starting at the marker character.
    pub text: &'a str,
    /// The whole span being scanned.
    pub context: &'a str,
}

/// Outcome of a successful inline match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InlineMatch {
    /// Number of characters consumed from the excerpt, marker included.
    pub extent: usize,
    /// Element the match renders into.
    pub element: Element,
}
