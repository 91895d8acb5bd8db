//! # downmark core
//!
//! Extensible Markdown parsing core. The host parser covers a deliberately
//! small native grammar (paragraphs, ATX headers, fenced code, code spans)
//! and exposes runtime extension points for everything else: block-level
//! constructs with a start/continue/complete lifecycle and inline spans
//! matched at marker characters.
//!
//! ## Architecture
//!
//! - **`BlockExtension` / `InlineExtension`**: capability contracts an
//!   extension implements to plug into the parser
//! - **`ExtensionRegistry`**: per-parser registry mapping generated
//!   identities and trigger characters to registered extensions
//! - **Dispatch**: convention-named lookups (`block<Identity>`,
//!   `block<Identity>Continue`, `block<Identity>Complete`,
//!   `inline<Identity>`) routed to the matching extension
//! - **`Parser`**: the host block loop, inline scanner, and HTML renderer
//!
//! ## Quick start
//!
//! ```rust
//! use downmark_core::extensions::builtin::HighlightInlineExtension;
//! use downmark_core::Parser;
//!
//! let mut parser = Parser::new();
//! parser.register_inline_extension(Box::new(HighlightInlineExtension))?;
//!
//! let html = parser.parse("==important== note")?;
//! assert_eq!(html, "<p><mark>important</mark> note</p>");
//! # Ok::<(), downmark_core::ExtensionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod extensions;
pub mod parser;

pub use extensions::{
    BlockExtension, ExtensionError, ExtensionKind, ExtensionRegistry, InlineExtension, MarkerSet,
};
pub use parser::ast::{Block, Element, ElementText, Excerpt, InlineMatch, Line};
pub use parser::Parser;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified [`ExtensionError`].
pub type Result<T> = core::result::Result<T, ExtensionError>;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use alloc::boxed::Box;

    struct Shrug;

    impl InlineExtension for Shrug {
        fn starting_character(&self) -> &str {
            "~"
        }

        fn run(&self, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
            excerpt.text.starts_with("~shrug~").then(|| InlineMatch {
                extent: 7,
                element: Element::with_text("span", "\u{af}\\_(\u{30c4})_/\u{af}"),
            })
        }
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn native_grammar_parses_without_registration() {
        let parser = Parser::new();
        let html = parser.parse("# Title\n\nbody text").unwrap();
        assert_eq!(html, "<h1>Title</h1>\n<p>body text</p>");
    }

    #[test]
    fn registered_extension_reaches_the_scanner() {
        let mut parser = Parser::new();
        parser.register_inline_extension(Box::new(Shrug)).unwrap();

        let html = parser.parse("well ~shrug~ then").unwrap();
        assert_eq!(
            html,
            "<p>well <span>\u{af}\\_(\u{30c4})_/\u{af}</span> then</p>"
        );
    }
}
