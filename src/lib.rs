//! Core of the Lorebook world-building wiki: the outline document model one
//! entry is edited in, its markdown publish dialect, and the inline
//! lore-markup tokenizer used to render block content.
//!
//! The crate has no I/O surface of its own. The surrounding application
//! seeds an [`outline::Outline`] with a block tree, drives it with
//! id-keyed mutations, and hands [`outline::Outline::to_markdown`] output to
//! its own persistence layer.

pub mod markup;
pub mod outline;

pub use markup::{EntryMeta, Segment, Term, TermLink, Token};
pub use outline::{
    Block, BlockId, BlockKind, BlockPatch, CalloutVariant, HeadingLevel, ListStyle, Outline,
    Placement, numbered_ordinals,
};
