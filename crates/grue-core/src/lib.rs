//! Core types for Grue: identifiers, game context snapshots, and the vocabulary store.
//!
//! This crate holds everything the command parser reads but never changes.
//! A [`Vocabulary`] is built once from a [`VocabularySource`] (the standard
//! adventure verbs, a game's own JSON feed, or both) and shared between
//! sessions; a [`ContextSnapshot`] describes what the player can see, carry
//! and remember at the moment a line is parsed.

/// Snapshots of the player's current context.
pub mod context;
/// Error types used throughout the crate.
pub mod error;
/// Canonical verb and object identifiers.
pub mod id;
/// Records of the external vocabulary feed.
pub mod record;
/// The built-in standard adventure vocabulary.
pub mod stdlib;
/// The immutable vocabulary store.
pub mod vocabulary;

/// Re-export context types.
pub use context::{ContextProvider, ContextSnapshot, Reach};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifier types.
pub use id::{ObjectId, VerbId};
/// Re-export feed record types.
pub use record::{ObjectKind, ObjectRecord, VerbCategory, VerbRecord, VocabularySource};
/// Re-export vocabulary store types.
pub use vocabulary::{ObjectEntry, VerbEntry, Vocabulary, normalize_key};
