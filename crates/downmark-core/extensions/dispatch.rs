//! Convention-named dispatch from host type tags to registered extensions.
//!
//! The host parser addresses extension capabilities through operation names
//! built from a type tag: `block<Identity>` opens a block,
//! `block<Identity>Continue` offers it the next line,
//! `block<Identity>Complete` finalizes it, and `inline<Identity>` attempts
//! an inline match. This module is the adapter between that naming
//! convention and the typed registry: [`HookName::parse`] recovers kind,
//! phase, and identity from a name, and [`ExtensionRegistry::dispatch`]
//! resolves the identity and forwards the call's arguments unchanged.
//!
//! A name matching neither convention is an [`UnknownOperation`]
//! programming error; a convention name whose identity has no registry
//! entry is an [`ExtensionNotFound`] integration error. Both are hard,
//! visible failures, never silently ignored.
//!
//! [`UnknownOperation`]: super::ExtensionError::UnknownOperation
//! [`ExtensionNotFound`]: super::ExtensionError::ExtensionNotFound

use alloc::string::ToString;

use super::{ExtensionError, ExtensionKind, ExtensionRegistry, Result};
use crate::parser::ast::{Block, Excerpt, InlineMatch, Line};

const BLOCK_PREFIX: &str = "block";
const INLINE_PREFIX: &str = "inline";
const CONTINUE_SUFFIX: &str = "Continue";
const COMPLETE_SUFFIX: &str = "Complete";

/// Phase of the block lifecycle (or the single inline phase) a hook
/// addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// `block<Identity>`: attempt to open a block.
    Start,
    /// `block<Identity>Continue`: offer the next line to an open block.
    Continue,
    /// `block<Identity>Complete`: finalize a closed block.
    Complete,
    /// `inline<Identity>`: attempt an inline match.
    Run,
}

/// Parsed form of a convention-named extension lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookName<'a> {
    /// Kind addressed by the name's prefix.
    pub kind: ExtensionKind,
    /// Phase addressed by the name's suffix (or its absence).
    pub phase: HookPhase,
    /// The embedded registration identity.
    pub identity: &'a str,
}

impl<'a> HookName<'a> {
    /// Parse an operation name against the dispatch convention.
    ///
    /// # Errors
    ///
    /// `UnknownOperation` when the name matches neither the block nor the
    /// inline convention.
    pub fn parse(operation: &'a str) -> Result<Self> {
        if let Some(rest) = operation.strip_prefix(BLOCK_PREFIX) {
            if let Some(identity) = rest.strip_suffix(CONTINUE_SUFFIX) {
                return Ok(Self {
                    kind: ExtensionKind::Block,
                    phase: HookPhase::Continue,
                    identity,
                });
            }
            if let Some(identity) = rest.strip_suffix(COMPLETE_SUFFIX) {
                return Ok(Self {
                    kind: ExtensionKind::Block,
                    phase: HookPhase::Complete,
                    identity,
                });
            }
            return Ok(Self {
                kind: ExtensionKind::Block,
                phase: HookPhase::Start,
                identity: rest,
            });
        }

        if let Some(identity) = operation.strip_prefix(INLINE_PREFIX) {
            return Ok(Self {
                kind: ExtensionKind::Inline,
                phase: HookPhase::Run,
                identity,
            });
        }

        Err(ExtensionError::UnknownOperation {
            operation: operation.to_string(),
        })
    }
}

/// Positional arguments for a dispatched hook, mirroring the host call
/// sites.
#[derive(Debug)]
pub enum HookArgs<'a, 'src> {
    /// Arguments for the `start` phase: current line and the previously
    /// open block.
    Start {
        /// Line the block would begin at.
        line: &'a Line<'src>,
        /// Block that was open when the line arrived.
        previous: Option<&'a Block>,
    },
    /// Arguments for the `continue` phase: next line and the open
    /// descriptor.
    Continue {
        /// Line offered to the open block.
        line: &'a Line<'src>,
        /// Descriptor returned by the prior phase.
        block: Block,
    },
    /// Arguments for the `complete` phase: the descriptor to finalize.
    Complete {
        /// Descriptor of the block that ended.
        block: Block,
    },
    /// Arguments for the inline `run` phase.
    Run {
        /// Excerpt starting at the marker character.
        excerpt: &'a Excerpt<'src>,
    },
}

/// Result of a dispatched hook, returned to the host unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutput {
    /// `start`/`continue` outcome: the descriptor, or `None` for no match.
    Block(Option<Block>),
    /// `complete` outcome: the finalized descriptor.
    Completed(Block),
    /// `run` outcome: the inline match, or `None` for no match.
    Inline(Option<InlineMatch>),
}

impl HookOutput {
    /// Descriptor payload of a `start`/`continue` hook (`None` otherwise).
    #[must_use]
    pub fn into_block(self) -> Option<Block> {
        match self {
            Self::Block(block) => block,
            Self::Completed(_) | Self::Inline(_) => None,
        }
    }

    /// Match payload of a `run` hook (`None` otherwise).
    #[must_use]
    pub fn into_inline(self) -> Option<InlineMatch> {
        match self {
            Self::Inline(matched) => matched,
            Self::Block(_) | Self::Completed(_) => None,
        }
    }
}

impl ExtensionRegistry {
    /// Resolve a convention-named lookup and forward it to the registered
    /// extension.
    ///
    /// The call's arguments are passed through unchanged and the
    /// extension's result is returned unchanged.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` when the name matches neither convention, or
    ///   when the argument payload cannot belong to the phase the name
    ///   encodes
    /// - `ExtensionNotFound` when the embedded identity has no registry
    ///   entry
    pub fn dispatch(&self, operation: &str, args: HookArgs<'_, '_>) -> Result<HookOutput> {
        let hook = HookName::parse(operation)?;

        match (hook.phase, args) {
            (HookPhase::Start, HookArgs::Start { line, previous }) => {
                let extension = self.resolve_block(hook.identity)?;
                Ok(HookOutput::Block(extension.start(line, previous)))
            }
            (HookPhase::Continue, HookArgs::Continue { line, block }) => {
                let extension = self.resolve_block(hook.identity)?;
                Ok(HookOutput::Block(extension.continue_block(line, block)))
            }
            (HookPhase::Complete, HookArgs::Complete { block }) => {
                let extension = self.resolve_block(hook.identity)?;
                Ok(HookOutput::Completed(extension.complete(block)))
            }
            (HookPhase::Run, HookArgs::Run { excerpt }) => {
                let extension = self.resolve_inline(hook.identity)?;
                Ok(HookOutput::Inline(extension.run(excerpt)))
            }
            _ => Err(ExtensionError::UnknownOperation {
                operation: operation.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_start() {
        let hook = HookName::parse("blockExt1").unwrap();
        assert_eq!(hook.kind, ExtensionKind::Block);
        assert_eq!(hook.phase, HookPhase::Start);
        assert_eq!(hook.identity, "Ext1");
    }

    #[test]
    fn parses_block_continue() {
        let hook = HookName::parse("blockExt1Continue").unwrap();
        assert_eq!(hook.kind, ExtensionKind::Block);
        assert_eq!(hook.phase, HookPhase::Continue);
        assert_eq!(hook.identity, "Ext1");
    }

    #[test]
    fn parses_block_complete() {
        let hook = HookName::parse("blockExt12Complete").unwrap();
        assert_eq!(hook.kind, ExtensionKind::Block);
        assert_eq!(hook.phase, HookPhase::Complete);
        assert_eq!(hook.identity, "Ext12");
    }

    #[test]
    fn parses_inline_run() {
        let hook = HookName::parse("inlineExt3").unwrap();
        assert_eq!(hook.kind, ExtensionKind::Inline);
        assert_eq!(hook.phase, HookPhase::Run);
        assert_eq!(hook.identity, "Ext3");
    }

    #[test]
    fn any_block_prefixed_name_is_a_block_hook() {
        let hook = HookName::parse("blockquote").unwrap();
        assert_eq!(hook.kind, ExtensionKind::Block);
        assert_eq!(hook.phase, HookPhase::Start);
        assert_eq!(hook.identity, "quote");
    }

    #[test]
    fn bare_prefix_yields_empty_identity() {
        let hook = HookName::parse("block").unwrap();
        assert_eq!(hook.phase, HookPhase::Start);
        assert_eq!(hook.identity, "");

        let hook = HookName::parse("blockContinue").unwrap();
        assert_eq!(hook.phase, HookPhase::Continue);
        assert_eq!(hook.identity, "");
    }

    #[test]
    fn unknown_names_are_rejected() {
        let error = HookName::parse("methodThatDoesntExist").unwrap_err();
        assert_eq!(
            error,
            ExtensionError::UnknownOperation {
                operation: "methodThatDoesntExist".to_string(),
            }
        );

        assert!(HookName::parse("").is_err());
        assert!(HookName::parse("Block").is_err());
    }
}
