//! Extension system for pluggable Markdown syntax.
//!
//! This module provides a trait-based extension system allowing custom
//! block-level and inline-level handlers to be registered at runtime,
//! without the handler code being compiled into the host parser. Each
//! registration receives a generated identity the host uses as its type
//! tag; dispatch routes convention-named lookups back to the registered
//! handler (see [`dispatch`]).
//!
//! ## Architecture
//!
//! - **[`BlockExtension`]**: multi-line constructs with a
//!   start/continue/complete lifecycle
//! - **[`InlineExtension`]**: single-shot spans matched at a marker character
//! - **[`ExtensionRegistry`]**: central registry for all extensions
//! - **[`MarkerSet`]**: characters that pause the inline scanner
//!
//! ## Example
//!
//! ```rust
//! use downmark_core::parser::ast::{Element, Excerpt, InlineMatch};
//! use downmark_core::{InlineExtension, Parser};
//!
//! struct Smiley;
//!
//! impl InlineExtension for Smiley {
//!     fn starting_character(&self) -> &str {
//!         ":"
//!     }
//!
//!     fn run(&self, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
//!         excerpt.text.starts_with(":)").then(|| InlineMatch {
//!             extent: 2,
//!             element: Element::with_text("span", "\u{1f642}"),
//!         })
//!     }
//! }
//!
//! let mut parser = Parser::new();
//! parser.register_inline_extension(Box::new(Smiley))?;
//! assert_eq!(parser.parse(":) hi")?, "<p><span>\u{1f642}</span> hi</p>");
//! # Ok::<(), downmark_core::ExtensionError>(())
//! ```

use alloc::{boxed::Box, format, string::String, vec::Vec};
use core::fmt;

#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(not(feature = "std"))]
use hashbrown::HashMap;

#[cfg(feature = "std")]
use thiserror::Error;

use crate::parser::ast::{Block, Excerpt, InlineMatch, Line};

pub mod builtin;
pub mod dispatch;

pub use dispatch::{HookArgs, HookName, HookOutput, HookPhase};


/// Contract for block-level extensions.
///
/// Block recognition is a three-phase protocol driven by the host: `start`
/// opens a block when a line beginning with the trigger character matches,
/// `continue_block` is offered every following line while the block stays
/// open, and `complete` finalizes the descriptor once continuation reports
/// no further lines belong to it.
pub trait BlockExtension: Send + Sync {
    /// Character the host watches for before consulting this extension.
    ///
    /// Only the first character of the returned string is used. Returning
    /// an empty string makes registration fail.
    fn starting_character(&self) -> &str;

    /// Attempt to open a block at `line`.
    ///
    /// `previous` is the block that was open when the line arrived, if any.
    /// Returns the new descriptor, or `None` when this extension does not
    /// recognize a block beginning here.
    fn start(&self, line: &Line<'_>, previous: Option<&Block>) -> Option<Block>;

    /// Offer the next line to an open block.
    ///
    /// Returns the updated descriptor while the block stays open, or `None`
    /// once the block has ended and `line` no longer belongs to it.
    fn continue_block(&self, line: &Line<'_>, block: Block) -> Option<Block>;

    /// Finalize the descriptor once continuation has ended.
    ///
    /// The default returns the descriptor unchanged, for handlers that need
    /// no closing step.
    fn complete(&self, block: Block) -> Block {
        block
    }
}

/// Contract for inline-level extensions.
///
/// Inline matching is single-shot: the scanner pauses at the trigger
/// character and offers the remaining text; the extension reports how many
/// characters it consumed and the element they produce, or no match.
pub trait InlineExtension: Send + Sync {
    /// Character the inline scanner pauses at before consulting this
    /// extension.
    ///
    /// Only the first character of the returned string is used. Returning
    /// an empty string makes registration fail.
    fn starting_character(&self) -> &str;

    /// Attempt a match at the excerpt, which starts at the trigger character.
    fn run(&self, excerpt: &Excerpt<'_>) -> Option<InlineMatch>;
}

/// The two extension kinds a registry tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// Block-level, multi-line constructs.
    Block,
    /// Inline-level spans.
    Inline,
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("Block"),
            Self::Inline => f.write_str("Inline"),
        }
    }
}

/// Errors raised by registration and dispatch.
///
/// Every variant reflects a programming or integration defect rather than a
/// data-dependent condition; none is retried and all propagate out of the
/// parse unmodified.
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// Registration rejected: the extension declared an empty starting
    /// character.
    MissingStartingCharacter {
        /// Kind the extension was registered as.
        kind: ExtensionKind,
    },
    /// A dispatched identity has no matching registry entry.
    ExtensionNotFound {
        /// Kind the lookup addressed.
        kind: ExtensionKind,
        /// The unresolved identity.
        identity: String,
    },
    /// An operation name matching neither dispatch convention.
    UnknownOperation {
        /// The attempted operation name.
        operation: String,
    },
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStartingCharacter { kind } => {
                write!(f, "{kind} extension is missing a starting character")
            }
            Self::ExtensionNotFound { kind, identity } => {
                write!(f, "{kind} extension '{identity}' not found")
            }
            Self::UnknownOperation { operation } => {
                write!(f, "Unknown extension operation '{operation}'")
            }
        }
    }
}

/// Result type for extension operations
pub type Result<T> = core::result::Result<T, ExtensionError>;

/// Characters that make the inline scanner stop and attempt extension
/// matches.
///
/// Kept as a deduplicated string; `add` is idempotent and there is no
/// removal, so the set grows monotonically for the parser instance's
/// lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: String,
}

impl MarkerSet {
    /// Create an empty marker set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a marker; characters already present are not duplicated.
    pub fn add(&mut self, marker: char) {
        if !self.markers.contains(marker) {
            self.markers.push(marker);
        }
    }

    /// Whether the scanner should pause at `marker`.
    #[must_use]
    pub fn contains(&self, marker: char) -> bool {
        self.markers.contains(marker)
    }

    /// Number of distinct markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.chars().count()
    }

    /// Whether no markers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The markers as a string, in insertion order.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.markers
    }
}

/// Central registry for block and inline extensions.
///
/// Scoped to one parser instance: entries are added by registration and
/// never removed or replaced. Each registration gets a fresh identity, so
/// two registrations of the same extension type stay distinguishable; the
/// per-character candidate lists keep registration order, which is the
/// dispatch precedence among extensions sharing a trigger character.
#[derive(Default)]
pub struct ExtensionRegistry {
    block_extensions: HashMap<String, Box<dyn BlockExtension>>,
    inline_extensions: HashMap<String, Box<dyn InlineExtension>>,
    block_starts: HashMap<char, Vec<String>>,
    inline_starts: HashMap<char, Vec<String>>,
    markers: MarkerSet,
    registrations: u64,
}

impl ExtensionRegistry {
    /// Create a new empty extension registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block extension.
    ///
    /// Generates a fresh identity and appends it to the candidate list for
    /// the extension's trigger character.
    ///
    /// # Errors
    ///
    /// `MissingStartingCharacter` when the extension declares an empty
    /// starting character; the registry is left unchanged.
    pub fn register_block(&mut self, extension: Box<dyn BlockExtension>) -> Result<()> {
        let marker = Self::trigger(ExtensionKind::Block, extension.starting_character())?;
        let identity = self.next_identity();

        self.block_starts
            .entry(marker)
            .or_default()
            .push(identity.clone());
        self.block_extensions.insert(identity, extension);
        Ok(())
    }

    /// Register an inline extension.
    ///
    /// Same as [`register_block`](Self::register_block) for the inline kind,
    /// and additionally inserts the trigger character into the marker set.
    ///
    /// # Errors
    ///
    /// `MissingStartingCharacter` when the extension declares an empty
    /// starting character; the registry is left unchanged.
    pub fn register_inline(&mut self, extension: Box<dyn InlineExtension>) -> Result<()> {
        let marker = Self::trigger(ExtensionKind::Inline, extension.starting_character())?;
        let identity = self.next_identity();

        self.inline_starts
            .entry(marker)
            .or_default()
            .push(identity.clone());
        self.inline_extensions.insert(identity, extension);
        self.markers.add(marker);
        Ok(())
    }

    /// Locate a block extension by identity.
    ///
    /// # Errors
    ///
    /// `ExtensionNotFound` naming the kind and the unresolved identity.
    pub fn resolve_block(&self, identity: &str) -> Result<&dyn BlockExtension> {
        self.block_extensions
            .get(identity)
            .map(|extension| extension.as_ref())
            .ok_or_else(|| ExtensionError::ExtensionNotFound {
                kind: ExtensionKind::Block,
                identity: String::from(identity),
            })
    }

    /// Locate an inline extension by identity.
    ///
    /// # Errors
    ///
    /// `ExtensionNotFound` naming the kind and the unresolved identity.
    pub fn resolve_inline(&self, identity: &str) -> Result<&dyn InlineExtension> {
        self.inline_extensions
            .get(identity)
            .map(|extension| extension.as_ref())
            .ok_or_else(|| ExtensionError::ExtensionNotFound {
                kind: ExtensionKind::Inline,
                identity: String::from(identity),
            })
    }

    /// Whether `identity` names a registered block extension.
    ///
    /// The host folds this into its continuable/completable checks so
    /// extension-owned open blocks survive its own state machine.
    #[must_use]
    pub fn has_block(&self, identity: &str) -> bool {
        self.block_extensions.contains_key(identity)
    }

    /// Whether `identity` names a registered inline extension.
    #[must_use]
    pub fn has_inline(&self, identity: &str) -> bool {
        self.inline_extensions.contains_key(identity)
    }

    /// Block identities triggered by `marker`, in registration order.
    #[must_use]
    pub fn block_candidates(&self, marker: char) -> &[String] {
        self.block_starts.get(&marker).map_or(&[], Vec::as_slice)
    }

    /// Inline identities triggered by `marker`, in registration order.
    #[must_use]
    pub fn inline_candidates(&self, marker: char) -> &[String] {
        self.inline_starts.get(&marker).map_or(&[], Vec::as_slice)
    }

    /// The marker set driving the inline scanner.
    #[must_use]
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Seed a marker outside registration, for host built-in inline types.
    pub fn add_marker(&mut self, marker: char) {
        self.markers.add(marker);
    }

    /// Total number of registered extensions.
    #[must_use]
    pub fn extension_count(&self) -> usize {
        self.block_extensions.len() + self.inline_extensions.len()
    }

    /// Generate the identity for the next registration.
    ///
    /// Monotonic per registry, so an identity is never reused for a
    /// different extension, and never ending in a phase suffix, which keeps
    /// operation-name parsing unambiguous.
    fn next_identity(&mut self) -> String {
        self.registrations += 1;
        format!("Ext{}", self.registrations)
    }

    /// Validate a declared starting character and return the trigger.
    fn trigger(kind: ExtensionKind, declared: &str) -> Result<char> {
        declared
            .chars()
            .next()
            .ok_or(ExtensionError::MissingStartingCharacter { kind })
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field(
                "block_extensions",
                &self.block_extensions.keys().collect::<Vec<_>>(),
            )
            .field(
                "inline_extensions",
                &self.inline_extensions.keys().collect::<Vec<_>>(),
            )
            .field("markers", &self.markers.as_str())
            .finish()
    }
}
