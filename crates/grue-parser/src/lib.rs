//! Natural-language command parser for Grue text adventures.
//!
//! Turns player input such as `take the brass lamp` or `put coin in chest`
//! into structured [`ParsedCommand`]s against a shared vocabulary and a
//! snapshot of what the player can currently reach. Features include
//! abbreviation expansion, typo tolerance, context-aware object resolution
//! with probabilistic disambiguation, validation with player-facing
//! messages, and command suggestions.

/// Probabilistic ranking of ambiguous object references.
pub mod ambiguity;
/// Assembly of token streams into parsed commands.
pub mod assembler;
/// Parsed command types and special meta commands.
pub mod command;
/// Parser configuration.
pub mod config;
/// Error types for the parser.
pub mod error;
/// Input normalisation, abbreviation expansion, and command splitting.
pub mod normalize;
/// The session-owning parser facade.
pub mod parser;
/// Verb and object resolution against the vocabulary.
pub mod resolver;
/// Per-player session state.
pub mod session;
/// Command suggestions, verb help, and example commands.
pub mod suggest;
/// Typo correction.
pub mod typo;
/// Validation of parsed commands against context.
pub mod validate;

pub use ambiguity::{AmbiguityCandidate, resolve_ambiguity};
pub use command::{
    Correction, Direction, ObjectRef, ParsedCommand, SpecialCommand, check_special_commands,
};
pub use config::{AmbiguityWeights, ConfidencePenalties, ParserConfig};
pub use error::{ParseError, ParseErrorKind, ParserError, ParserResult};
pub use normalize::{expand_abbreviations, normalize_input, split_commands, split_conjoined};
pub use parser::CommandParser;
pub use resolver::{get_valid_objects, get_valid_verbs, resolve_object, resolve_verb};
pub use session::SessionState;
pub use suggest::{
    CommandSuggestion, get_command_suggestions, get_contextual_commands, get_example_commands,
    get_verb_help,
};
pub use typo::suggest_typo_corrections;
pub use validate::{CommandValidation, validate_command};
