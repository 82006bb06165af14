//! Validation of a parsed command against the player's current context.
//!
//! Checks run in a fixed order: the verb, missing objects, unknown objects,
//! objects out of reach, and finally whether the verb makes sense on its
//! object. Hard problems become errors; doubtful ones become warnings.

use grue_core::{ContextSnapshot, VerbEntry, Vocabulary};
use serde::{Deserialize, Serialize};

use crate::command::{ObjectRef, ParsedCommand, SpecialCommand, check_special_commands};
use crate::config::ParserConfig;
use crate::error::{ParseError, ParseErrorKind};
use crate::resolver::locate_globally;
use crate::typo::suggest_typo_corrections;

/// Outcome of validating a command.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandValidation {
    /// True when there are neither errors nor warnings.
    pub valid: bool,
    /// Problems that stop the command from being executed.
    pub errors: Vec<ParseError>,
    /// Doubts about the command, such as a verb that makes no sense on its object.
    pub warnings: Vec<String>,
    /// Non-blocking style advice.
    pub improvements: Vec<String>,
}

impl CommandValidation {
    /// Whether any error of `kind` was reported.
    pub fn has_error(&self, kind: ParseErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

/// Display name for an object reference.
fn object_name(vocab: &Vocabulary, object: &ObjectRef) -> String {
    match object {
        ObjectRef::Resolved { id } => vocab
            .object(id.as_str())
            .map_or_else(|| id.to_string(), |o| o.name.clone()),
        other => other.phrase(vocab),
    }
}

/// Validate `command` against `ctx`.
pub fn validate_command(
    vocab: &Vocabulary,
    command: &ParsedCommand,
    ctx: &ContextSnapshot,
    config: &ParserConfig,
) -> CommandValidation {
    let mut result = CommandValidation::default();

    let Some(verb) = command.verb.as_ref().and_then(|id| vocab.verb(id.as_str())) else {
        result.errors.push(unknown_verb(vocab, command, ctx, config));
        tracing::debug!(input = %command.raw_input, "command has no verb");
        return result;
    };

    check_objects_present(vocab, verb, command, &mut result);

    for object in command.direct_objects().chain(&command.indirect_object) {
        check_object(vocab, command, object, ctx, config, &mut result);
    }

    for object in command.direct_objects() {
        let ObjectRef::Resolved { id } = object else {
            continue;
        };
        if verb.takes_object() && ctx.is_reachable(id) && !vocab.is_valid_target(&verb.id, id) {
            let name = object_name(vocab, object);
            result
                .warnings
                .push(format!("You can't {} the {name}.", verb.id));
        }
    }

    suggest_improvements(vocab, verb, command, &mut result);

    result.valid = result.errors.is_empty() && result.warnings.is_empty();
    tracing::debug!(
        verb = %verb.id,
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated command"
    );
    result
}

fn unknown_verb(
    vocab: &Vocabulary,
    command: &ParsedCommand,
    ctx: &ContextSnapshot,
    config: &ParserConfig,
) -> ParseError {
    if command.normalized_input.is_empty() {
        return ParseError::new(ParseErrorKind::SyntaxError, "I beg your pardon?");
    }
    if check_special_commands(&command.raw_input) == Some(SpecialCommand::Again) {
        return ParseError::new(ParseErrorKind::SyntaxError, "There is no command to repeat.");
    }
    let word = command
        .normalized_input
        .split(' ')
        .next()
        .unwrap_or_default();
    ParseError::new(
        ParseErrorKind::UnknownVerb,
        format!("I don't know the word \"{word}\"."),
    )
    .with_suggestions(suggest_typo_corrections(
        vocab,
        &command.normalized_input,
        ctx,
        config,
    ))
    .at(Some(0))
}

fn check_objects_present(
    vocab: &Vocabulary,
    verb: &VerbEntry,
    command: &ParsedCommand,
    result: &mut CommandValidation,
) {
    if verb.intransitive {
        if let Some(object) = &command.direct_object {
            result.warnings.push(format!(
                "\"{}\" doesn't take an object; \"{}\" will be ignored.",
                verb.id,
                object.phrase(vocab)
            ));
        }
        return;
    }

    match &command.direct_object {
        None if verb.requires_object => {
            result.errors.push(ParseError::new(
                ParseErrorKind::SyntaxError,
                format!("What do you want to {}?", verb.id),
            ));
        }
        Some(object) if verb.requires_indirect_object && command.indirect_object.is_none() => {
            let preposition = command
                .preposition
                .as_deref()
                .or_else(|| verb.valid_prepositions.iter().next().map(String::as_str))
                .unwrap_or("with");
            result.errors.push(ParseError::new(
                ParseErrorKind::SyntaxError,
                format!(
                    "What do you want to {} the {} {preposition}?",
                    verb.id,
                    object_name(vocab, object)
                ),
            ));
        }
        _ => {}
    }
}

fn check_object(
    vocab: &Vocabulary,
    command: &ParsedCommand,
    object: &ObjectRef,
    ctx: &ContextSnapshot,
    config: &ParserConfig,
    result: &mut CommandValidation,
) {
    match object {
        ObjectRef::Unresolved { phrase } => {
            let position = command.normalized_input.find(phrase.as_str());
            if locate_globally(vocab, phrase).is_empty() {
                result.errors.push(
                    ParseError::new(
                        ParseErrorKind::UnknownObject,
                        format!("I don't know what \"{phrase}\" is."),
                    )
                    .with_suggestions(suggest_typo_corrections(
                        vocab,
                        &command.normalized_input,
                        ctx,
                        config,
                    ))
                    .at(position),
                );
            } else {
                result.errors.push(
                    ParseError::new(
                        ParseErrorKind::ContextError,
                        format!("You can't see any {phrase} here."),
                    )
                    .at(position),
                );
            }
        }
        ObjectRef::Resolved { id } if !ctx.is_reachable(id) => {
            let name = object_name(vocab, object);
            result.errors.push(ParseError::new(
                ParseErrorKind::ContextError,
                format!("The {name} isn't here."),
            ));
        }
        ObjectRef::Ambiguous { phrase, candidates } => {
            let names: Vec<String> = candidates
                .iter()
                .map(|c| format!("the {}", c.display_name))
                .collect();
            let choices = match names.split_last() {
                Some((last, rest)) if !rest.is_empty() => {
                    format!("{} or {last}", rest.join(", "))
                }
                _ => names.join(""),
            };
            result.errors.push(
                ParseError::new(
                    ParseErrorKind::Ambiguous,
                    format!("Which {phrase} do you mean, {choices}?"),
                )
                .with_suggestions(
                    candidates
                        .iter()
                        .map(|c| command.normalized_input.replacen(phrase.as_str(), &c.display_name, 1))
                        .collect(),
                )
                .at(command.normalized_input.find(phrase.as_str())),
            );
        }
        ObjectRef::Resolved { .. } | ObjectRef::Text { .. } => {}
    }
}

fn suggest_improvements(
    vocab: &Vocabulary,
    verb: &VerbEntry,
    command: &ParsedCommand,
    result: &mut CommandValidation,
) {
    for correction in &command.corrections {
        result.improvements.push(format!(
            "Read \"{}\" as \"{}\"; check the spelling.",
            correction.from, correction.to
        ));
    }

    // Only plain aliases; "go north" was rewritten, not aliased.
    let alias = command.verb_phrase.as_deref().filter(|phrase| {
        *phrase != verb.id.as_str()
            && vocab
                .lookup_verb(phrase)
                .is_some_and(|found| found.id == verb.id)
    });
    if let Some(phrase) = alias {
        result
            .improvements
            .push(format!("\"{}\" is the usual word for \"{phrase}\".", verb.id));
    }
}
