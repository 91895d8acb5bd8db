//! Host Markdown parser with runtime extension points.
//!
//! The native grammar is deliberately small: paragraphs, ATX headers,
//! fenced code blocks, and backtick code spans. Everything else is meant to
//! arrive through registered extensions. The parser owns one
//! [`ExtensionRegistry`] for its lifetime and drives it through the
//! convention-named dispatch in [`crate::extensions::dispatch`]: block
//! starts try native candidates first, then registered identities in
//! registration order; open extension blocks are recognized as
//! continuable/completable because the host predicates fold
//! [`ExtensionRegistry::has_block`] into their answer.
//!
//! # Example
//!
//! ```rust
//! use downmark_core::Parser;
//!
//! let parser = Parser::new();
//! let html = parser.parse("# Title\n\nHello `world`")?;
//! assert_eq!(html, "<h1>Title</h1>\n<p>Hello <code>world</code></p>");
//! # Ok::<(), downmark_core::ExtensionError>(())
//! ```

use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

use crate::extensions::dispatch::{HookArgs, HookOutput};
use crate::extensions::{BlockExtension, ExtensionRegistry, InlineExtension};
use crate::{ExtensionError, Result};

pub mod ast;
mod inline;

#[cfg(test)]
mod tests;

use ast::{Block, Element, ElementText, Line};

/// Type tag of the unmarked-text fallback block.
const PARAGRAPH: &str = "Paragraph";
/// Type tag of ATX heading blocks.
const HEADER: &str = "Header";
/// Type tag of backtick-fenced code blocks.
const FENCED_CODE: &str = "FencedCode";

/// Native block types that accept continuation lines.
const CONTINUABLE: &[&str] = &[FENCED_CODE];
/// Native block types with a completion step.
const COMPLETABLE: &[&str] = &[FENCED_CODE];

/// Inline markers built into the host scanner.
const NATIVE_MARKERS: &str = "`";

/// Markdown parser for one document at a time.
///
/// Registration is expected to happen before parsing begins; the registry
/// is never mutated by [`parse`](Self::parse) itself.
#[derive(Debug)]
pub struct Parser {
    registry: ExtensionRegistry,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser with an empty registry and the native marker set.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = ExtensionRegistry::new();
        for marker in NATIVE_MARKERS.chars() {
            registry.add_marker(marker);
        }
        Self { registry }
    }

    /// Register a block extension with the parser.
    ///
    /// # Errors
    ///
    /// `MissingStartingCharacter` when the extension declares an empty
    /// starting character.
    pub fn register_block_extension(&mut self, extension: Box<dyn BlockExtension>) -> Result<()> {
        self.registry.register_block(extension)
    }

    /// Register an inline extension with the parser.
    ///
    /// # Errors
    ///
    /// `MissingStartingCharacter` when the extension declares an empty
    /// starting character.
    pub fn register_inline_extension(&mut self, extension: Box<dyn InlineExtension>) -> Result<()> {
        self.registry.register_inline(extension)
    }

    /// The registry backing this parser, for embedders driving their own
    /// host loop.
    #[must_use]
    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Parse a Markdown document into HTML.
    ///
    /// # Errors
    ///
    /// Dispatch errors (`ExtensionNotFound`, `UnknownOperation`) propagate
    /// unmodified; no partial HTML is returned once one is raised.
    pub fn parse(&self, source: &str) -> Result<String> {
        let mut rendered: Vec<String> = Vec::new();
        let mut open: Option<Block> = None;

        for body in source.lines() {
            let line = Line::new(body);

            if let Some(block) = open.take() {
                if self.is_block_continuable(&block.kind) {
                    match self.continue_block(&line, &block)? {
                        Some(updated) => {
                            open = Some(updated);
                            continue;
                        }
                        // the block ended before this line; close it and
                        // let the line start something new below
                        None => rendered.push(self.close_block(block)?),
                    }
                } else if line.is_blank() {
                    rendered.push(self.close_block(block)?);
                    continue;
                } else if let Some(started) = self.start_block(&line, Some(&block))? {
                    rendered.push(self.close_block(block)?);
                    open = self.adopt(started, &mut rendered)?;
                    continue;
                } else {
                    open = Some(Self::extend_paragraph(block, &line));
                    continue;
                }
            }

            if line.is_blank() {
                continue;
            }

            if let Some(started) = self.start_block(&line, None)? {
                open = self.adopt(started, &mut rendered)?;
            } else {
                open = Some(Self::open_paragraph(&line));
            }
        }

        if let Some(block) = open {
            rendered.push(self.close_block(block)?);
        }

        Ok(rendered.join("\n"))
    }

    /// Whether `kind` names a block type that accepts continuation lines.
    ///
    /// Answers true for every registered block identity in addition to the
    /// native continuable set, so extension-owned open blocks survive the
    /// host's own bookkeeping.
    #[must_use]
    pub fn is_block_continuable(&self, kind: &str) -> bool {
        CONTINUABLE.contains(&kind) || self.registry.has_block(kind)
    }

    /// Whether `kind` names a block type with a completion step.
    ///
    /// Same augmentation as [`is_block_continuable`](Self::is_block_continuable).
    #[must_use]
    pub fn is_block_completable(&self, kind: &str) -> bool {
        COMPLETABLE.contains(&kind) || self.registry.has_block(kind)
    }

    /// Try to open a block at `line`: native candidates first, then
    /// registered identities in registration order.
    fn start_block(&self, line: &Line<'_>, previous: Option<&Block>) -> Result<Option<Block>> {
        let Some(marker) = line.marker() else {
            return Ok(None);
        };

        for &kind in Self::native_block_candidates(marker) {
            if let Some(mut block) = Self::start_native(kind, line) {
                block.kind = String::from(kind);
                return Ok(Some(block));
            }
        }

        for identity in self.registry.block_candidates(marker) {
            let operation = format!("block{identity}");
            let args = HookArgs::Start { line, previous };
            if let Some(mut block) = self.registry.dispatch(&operation, args)?.into_block() {
                // the host owns type tags; handlers never set their own
                block.kind = identity.clone();
                return Ok(Some(block));
            }
        }

        Ok(None)
    }

    /// File a freshly started block: continuable kinds stay open,
    /// single-line kinds close immediately.
    fn adopt(&self, block: Block, rendered: &mut Vec<String>) -> Result<Option<Block>> {
        if self.is_block_continuable(&block.kind) {
            Ok(Some(block))
        } else {
            rendered.push(self.close_block(block)?);
            Ok(None)
        }
    }

    /// Offer `line` to an open block.
    fn continue_block(&self, line: &Line<'_>, block: &Block) -> Result<Option<Block>> {
        if Self::is_native_kind(&block.kind) {
            return Ok(Self::continue_native(line, block));
        }

        let operation = format!("block{}Continue", block.kind);
        let args = HookArgs::Continue {
            line,
            block: block.clone(),
        };
        let kind = block.kind.clone();
        Ok(self
            .registry
            .dispatch(&operation, args)?
            .into_block()
            .map(|mut next| {
                next.kind = kind;
                next
            }))
    }

    /// Close a block: run its completion step if it has one, then render.
    fn close_block(&self, block: Block) -> Result<String> {
        let finalized = if !self.is_block_completable(&block.kind) {
            block
        } else if Self::is_native_kind(&block.kind) {
            Self::complete_native(block)
        } else {
            let operation = format!("block{}Complete", block.kind);
            let HookOutput::Completed(done) = self
                .registry
                .dispatch(&operation, HookArgs::Complete { block })?
            else {
                return Err(ExtensionError::UnknownOperation { operation });
            };
            done
        };

        self.render_element(&finalized.element)
    }

    fn is_native_kind(kind: &str) -> bool {
        matches!(kind, PARAGRAPH | HEADER | FENCED_CODE)
    }

    fn native_block_candidates(marker: char) -> &'static [&'static str] {
        match marker {
            '#' => &[HEADER],
            '`' => &[FENCED_CODE],
            _ => &[],
        }
    }

    fn start_native(kind: &str, line: &Line<'_>) -> Option<Block> {
        match kind {
            HEADER => Self::start_header(line),
            FENCED_CODE => Self::start_fenced_code(line),
            _ => None,
        }
    }

    /// `#`–`######` followed by a space (or nothing) opens a heading.
    fn start_header(line: &Line<'_>) -> Option<Block> {
        let level = line.text.chars().take_while(|&c| c == '#').count();
        if !(1..=6).contains(&level) {
            return None;
        }

        let rest = &line.text[level..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            return None;
        }

        Some(Block::new(Element::with_spans(
            format!("h{level}"),
            rest.trim(),
        )))
    }

    /// Three or more backticks open a fence; the info string becomes the
    /// `language-*` class.
    fn start_fenced_code(line: &Line<'_>) -> Option<Block> {
        let fence = line.text.chars().take_while(|&c| c == '`').count();
        if fence < 3 {
            return None;
        }

        let mut code = Element::with_text("code", "");
        let info = line.text[fence..].trim();
        if !info.is_empty() {
            code = code.attribute("class", format!("language-{info}"));
        }

        Some(Block::new(Element::with_nodes("pre", vec![code])))
    }

    fn continue_native(line: &Line<'_>, block: &Block) -> Option<Block> {
        match block.kind.as_str() {
            FENCED_CODE => Self::continue_fenced_code(line, block),
            _ => None,
        }
    }

    /// Fenced code consumes every line, blank ones included, until the
    /// closing fence.
    fn continue_fenced_code(line: &Line<'_>, block: &Block) -> Option<Block> {
        if block.finished {
            return None;
        }

        let mut block = block.clone();
        let fence = line.text.chars().take_while(|&c| c == '`').count();
        if fence >= 3 && line.text[fence..].trim().is_empty() {
            block.finished = true;
            return Some(block);
        }

        if let Some(text) = Self::fenced_code_text(&mut block) {
            text.push('\n');
            text.push_str(line.body);
        }
        Some(block)
    }

    /// Completion normalizes the accumulated code: the leading separator
    /// becomes a trailing newline.
    fn complete_native(mut block: Block) -> Block {
        if block.kind == FENCED_CODE {
            if let Some(text) = Self::fenced_code_text(&mut block) {
                if text.starts_with('\n') {
                    text.remove(0);
                    text.push('\n');
                }
            }
        }
        block
    }

    /// The code child's text inside a fenced code block.
    fn fenced_code_text(block: &mut Block) -> Option<&mut String> {
        let ElementText::Nodes(nodes) = &mut block.element.text else {
            return None;
        };
        let code = nodes.first_mut()?;
        match &mut code.text {
            ElementText::Plain(text) => Some(text),
            _ => None,
        }
    }

    fn open_paragraph(line: &Line<'_>) -> Block {
        let mut block = Block::new(Element::with_spans("p", line.text));
        block.kind = String::from(PARAGRAPH);
        block
    }

    fn extend_paragraph(mut block: Block, line: &Line<'_>) -> Block {
        if let ElementText::Spans(text) = &mut block.element.text {
            text.push('\n');
            text.push_str(line.text);
        }
        block
    }

    /// Render an element tree, resolving span content through the inline
    /// scanner.
    fn render_element(&self, element: &Element) -> Result<String> {
        let mut html = String::new();
        html.push('<');
        html.push_str(&element.name);

        for (name, value) in &element.attributes {
            html.push(' ');
            html.push_str(name);
            html.push_str("=\"");
            html.push_str(&html_escape::encode_double_quoted_attribute(value));
            html.push('"');
        }

        if element.text == ElementText::Empty {
            html.push_str(" />");
            return Ok(html);
        }
        html.push('>');

        match &element.text {
            ElementText::Empty => {}
            ElementText::Plain(text) => html.push_str(&html_escape::encode_text(text)),
            ElementText::Spans(text) => html.push_str(&self.render_spans(text)?),
            ElementText::Html(text) => html.push_str(text),
            ElementText::Nodes(nodes) => {
                for node in nodes {
                    html.push_str(&self.render_element(node)?);
                }
            }
        }

        html.push_str("</");
        html.push_str(&element.name);
        html.push('>');
        Ok(html)
    }
}
