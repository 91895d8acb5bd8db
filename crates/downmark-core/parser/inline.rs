//! Inline scanning against the marker set.
//!
//! Span content walks forward until a marker-set character, tries the
//! native inline types for that character, then the registered identities
//! in registration order via `inline<Identity>` dispatch. A match consumes
//! its reported extent; a miss emits the marker character as text.

use alloc::format;
use alloc::string::String;

use crate::extensions::dispatch::HookArgs;
use crate::parser::ast::{Element, Excerpt, InlineMatch};
use crate::Result;

use super::Parser;

impl Parser {
    /// Resolve span text into HTML, pausing at every marker-set character.
    pub(super) fn render_spans(&self, text: &str) -> Result<String> {
        let mut html = String::new();
        let mut rest = text;

        while !rest.is_empty() {
            let Some((offset, marker)) = rest
                .char_indices()
                .find(|&(_, c)| self.registry().markers().contains(c))
            else {
                html.push_str(&html_escape::encode_text(rest));
                break;
            };

            html.push_str(&html_escape::encode_text(&rest[..offset]));
            let remainder = &rest[offset..];
            let excerpt = Excerpt {
                text: remainder,
                context: text,
            };

            if let Some(matched) = self.try_inline(marker, &excerpt)? {
                html.push_str(&self.render_element(&matched.element)?);
                let consumed: usize = remainder
                    .chars()
                    .take(matched.extent)
                    .map(char::len_utf8)
                    .sum();
                // a zero extent would stall the scan; consume the marker at least
                rest = &remainder[consumed.max(marker.len_utf8())..];
            } else {
                let width = marker.len_utf8();
                html.push_str(&html_escape::encode_text(&remainder[..width]));
                rest = &remainder[width..];
            }
        }

        Ok(html)
    }

    /// Native inline types first, then registered identities in order;
    /// `run` is invoked once per candidate until one matches.
    fn try_inline(&self, marker: char, excerpt: &Excerpt<'_>) -> Result<Option<InlineMatch>> {
        if marker == '`' {
            if let Some(matched) = Self::inline_code_span(excerpt) {
                return Ok(Some(matched));
            }
        }

        for identity in self.registry().inline_candidates(marker) {
            let operation = format!("inline{identity}");
            let output = self
                .registry()
                .dispatch(&operation, HookArgs::Run { excerpt })?;
            if let Some(matched) = output.into_inline() {
                return Ok(Some(matched));
            }
        }

        Ok(None)
    }

    /// Backtick code spans: `` `code` `` becomes `<code>code</code>`.
    fn inline_code_span(excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
        let inner = excerpt.text.strip_prefix('`')?;
        let close = inner.find('`')?;
        let inner = &inner[..close];
        if inner.is_empty() {
            return None;
        }

        Some(InlineMatch {
            extent: excerpt.text[..close + 2].chars().count(),
            element: Element::with_text("code", inner.trim()),
        })
    }
}
