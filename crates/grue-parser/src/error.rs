//! Error types for the command parser.
//!
//! [`ParserError`] covers setup failures (a bad vocabulary feed or an invalid
//! configuration document). Problems with what the player typed are never
//! returned as `Err`; they are reported as [`ParseError`] values inside a
//! [`CommandValidation`](crate::CommandValidation).

use std::fmt;

use grue_core::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for parser setup operations.
pub type ParserResult<T> = Result<T, ParserError>;

/// Errors that can occur while setting up a parser.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The vocabulary feed could not be loaded or built.
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] CoreError),

    /// A configuration document could not be parsed.
    #[error("invalid parser configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Category of a problem with the player's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// No verb or verb alias matched.
    UnknownVerb,
    /// An object phrase matched nothing in the vocabulary.
    UnknownObject,
    /// An object phrase matched several objects in reach.
    Ambiguous,
    /// The sentence is missing a part the verb needs.
    SyntaxError,
    /// The object exists but the player cannot get at it right now.
    ContextError,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVerb => write!(f, "unknown_verb"),
            Self::UnknownObject => write!(f, "unknown_object"),
            Self::Ambiguous => write!(f, "ambiguous"),
            Self::SyntaxError => write!(f, "syntax_error"),
            Self::ContextError => write!(f, "context_error"),
        }
    }
}

/// A problem with the player's input, reported as data.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ParseError {
    /// What kind of problem this is.
    pub kind: ParseErrorKind,
    /// Player-facing description.
    pub message: String,
    /// Corrected commands or names the player may have meant.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Byte offset of the offending phrase in the normalised input.
    #[serde(default)]
    pub position: Option<usize>,
}

impl ParseError {
    /// Create an error without suggestions or position.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestions: Vec::new(),
            position: None,
        }
    }

    /// Attach suggestions.
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Attach the position of the offending phrase.
    pub fn at(mut self, position: Option<usize>) -> Self {
        self.position = position;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_in_snake_case() {
        let json = serde_json::to_string(&ParseErrorKind::ContextError).unwrap();
        assert_eq!(json, "\"context_error\"");
        assert_eq!(ParseErrorKind::UnknownVerb.to_string(), "unknown_verb");
    }

    #[test]
    fn parse_error_displays_its_message() {
        let err = ParseError::new(ParseErrorKind::SyntaxError, "What do you want to take?")
            .with_suggestions(vec!["take lamp".into()])
            .at(Some(0));
        assert_eq!(err.to_string(), "What do you want to take?");
        assert_eq!(err.position, Some(0));
        assert_eq!(err.suggestions, vec!["take lamp"]);
    }

    #[test]
    fn core_errors_convert() {
        let err: ParserError = CoreError::EmptyAbbreviation("x".into()).into();
        assert!(matches!(err, ParserError::Vocabulary(_)));
        assert!(err.to_string().starts_with("vocabulary error"));
    }
}
