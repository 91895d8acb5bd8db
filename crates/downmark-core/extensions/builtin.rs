//! Bundled extensions for common Markdown dialect additions.
//!
//! These ship with the crate both as useful defaults and as reference
//! implementations of the two capability contracts. Nothing registers them
//! automatically; pass them to
//! [`Parser::register_block_extension`](crate::Parser::register_block_extension)
//! / [`Parser::register_inline_extension`](crate::Parser::register_inline_extension)
//! like any other extension.

use alloc::format;
use alloc::string::String;

use super::{BlockExtension, InlineExtension};
use crate::parser::ast::{Block, Element, ElementText, Excerpt, InlineMatch, Line};

/// `:::`-fenced callout blocks.
///
/// ```text
/// ::: tip
/// Close the fence on its own line.
/// :::
/// ```
///
/// renders `<aside class="callout callout-tip">…</aside>`. The label after
/// the opening fence is optional; content goes through the inline scanner.
pub struct CalloutBlockExtension;

impl CalloutBlockExtension {
    /// Label of a fence line, or `None` when the line is not a fence.
    fn fence(text: &str) -> Option<&str> {
        text.strip_prefix(":::").map(str::trim)
    }
}

impl BlockExtension for CalloutBlockExtension {
    fn starting_character(&self) -> &str {
        ":"
    }

    fn start(&self, line: &Line<'_>, _previous: Option<&Block>) -> Option<Block> {
        let label = Self::fence(line.text)?;
        let class = if label.is_empty() {
            String::from("callout")
        } else {
            format!("callout callout-{label}")
        };

        Some(Block::new(
            Element::with_spans("aside", "").attribute("class", class),
        ))
    }

    fn continue_block(&self, line: &Line<'_>, mut block: Block) -> Option<Block> {
        if block.finished {
            return None;
        }

        if Self::fence(line.text).is_some_and(str::is_empty) {
            block.finished = true;
            return Some(block);
        }

        if let ElementText::Spans(text) = &mut block.element.text {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(line.text);
        }
        Some(block)
    }

    fn complete(&self, mut block: Block) -> Block {
        // unterminated callouts still render; drop the trailing blank run
        if let ElementText::Spans(text) = &mut block.element.text {
            let trimmed = text.trim_end_matches('\n').len();
            text.truncate(trimmed);
        }
        block
    }
}

/// `==text==` highlight spans rendered as `<mark>`.
pub struct HighlightInlineExtension;

impl InlineExtension for HighlightInlineExtension {
    fn starting_character(&self) -> &str {
        "="
    }

    fn run(&self, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
        let inner = excerpt.text.strip_prefix("==")?;
        let close = inner.find("==")?;
        let inner = &inner[..close];
        if inner.is_empty() || inner.contains('\n') {
            return None;
        }

        Some(InlineMatch {
            extent: excerpt.text[..close + 4].chars().count(),
            element: Element::with_text("mark", inner),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn run_highlight(text: &str) -> Option<InlineMatch> {
        HighlightInlineExtension.run(&Excerpt {
            text,
            context: text,
        })
    }

    #[test]
    fn callout_start_requires_fence() {
        let extension = CalloutBlockExtension;
        assert!(extension.start(&Line::new("::: tip"), None).is_some());
        assert!(extension.start(&Line::new(":::"), None).is_some());
        assert!(extension.start(&Line::new(": not a fence"), None).is_none());
    }

    #[test]
    fn callout_label_lands_in_the_class() {
        let extension = CalloutBlockExtension;
        let block = extension.start(&Line::new("::: warning"), None).unwrap();
        assert_eq!(
            block.element.attributes,
            [("class".to_string(), "callout callout-warning".to_string())]
        );

        let block = extension.start(&Line::new(":::"), None).unwrap();
        assert_eq!(
            block.element.attributes,
            [("class".to_string(), "callout".to_string())]
        );
    }

    #[test]
    fn callout_closing_fence_finishes_the_block() {
        let extension = CalloutBlockExtension;
        let block = extension.start(&Line::new("::: tip"), None).unwrap();

        let block = extension
            .continue_block(&Line::new("body"), block)
            .unwrap();
        assert!(!block.finished);

        let block = extension.continue_block(&Line::new(":::"), block).unwrap();
        assert!(block.finished);

        assert!(extension
            .continue_block(&Line::new("after"), block)
            .is_none());
    }

    #[test]
    fn callout_complete_trims_trailing_blanks() {
        let extension = CalloutBlockExtension;
        let mut block = extension.start(&Line::new(":::"), None).unwrap();
        for line in ["body", "", ""] {
            block = extension.continue_block(&Line::new(line), block).unwrap();
        }

        let block = extension.complete(block);
        assert_eq!(block.element.text, ElementText::Spans("body".to_string()));
    }

    #[test]
    fn highlight_matches_closed_spans() {
        let matched = run_highlight("==hot== rest").unwrap();
        assert_eq!(matched.extent, 7);
        assert_eq!(matched.element, Element::with_text("mark", "hot"));
    }

    #[test]
    fn highlight_rejects_open_or_empty_spans() {
        assert!(run_highlight("==dangling").is_none());
        assert!(run_highlight("====").is_none());
        assert!(run_highlight("==a\nb==").is_none());
        assert!(run_highlight("=single=").is_none());
    }
}
