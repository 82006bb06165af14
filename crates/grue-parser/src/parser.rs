//! The command parser facade.

use std::sync::Arc;

use grue_core::{ContextProvider, ContextSnapshot, ObjectId, VerbId, Vocabulary, VocabularySource};

use crate::ambiguity::{AmbiguityCandidate, resolve_ambiguity};
use crate::assembler::{assemble, is_valid_syntax};
use crate::command::{ParsedCommand, SpecialCommand, check_special_commands};
use crate::config::ParserConfig;
use crate::error::ParserResult;
use crate::normalize::{expand_abbreviations, normalize_input, split_commands, split_conjoined};
use crate::resolver::{resolve_object, resolve_verb};
use crate::session::SessionState;
use crate::suggest::{
    CommandSuggestion, get_command_suggestions, get_contextual_commands, get_example_commands,
    get_verb_help,
};
use crate::typo::suggest_typo_corrections;
use crate::validate::{CommandValidation, validate_command};

/// A command parser for one player session.
///
/// The vocabulary is shared between sessions; the last-command memory
/// belongs to this parser alone.
#[derive(Debug, Clone)]
pub struct CommandParser {
    vocabulary: Arc<Vocabulary>,
    config: ParserConfig,
    session: SessionState,
}

impl CommandParser {
    /// Create a parser over a shared vocabulary with the default config.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self::with_config(vocabulary, ParserConfig::default())
    }

    /// Create a parser over a shared vocabulary.
    pub fn with_config(vocabulary: Arc<Vocabulary>, config: ParserConfig) -> Self {
        Self {
            vocabulary,
            config,
            session: SessionState::new(),
        }
    }

    /// Create a parser over the standard vocabulary plus a game's feed.
    pub fn from_source(source: VocabularySource) -> ParserResult<Self> {
        Ok(Self::new(Arc::new(Vocabulary::standard_with(source)?)))
    }

    /// Create a parser over the standard vocabulary alone.
    pub fn standard() -> ParserResult<Self> {
        Ok(Self::new(Arc::new(Vocabulary::standard()?)))
    }

    /// The shared vocabulary.
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// The parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// This session's state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Replace the vocabulary with one built from `source` (standard verbs included).
    ///
    /// On error the current vocabulary is kept.
    pub fn reload_vocabulary(&mut self, source: VocabularySource) -> ParserResult<()> {
        let vocabulary = Vocabulary::standard_with(source)?;
        tracing::info!(
            verbs = vocabulary.verb_count(),
            objects = vocabulary.object_count(),
            "reloaded vocabulary"
        );
        self.vocabulary = Arc::new(vocabulary);
        Ok(())
    }

    /// Parse one command.
    ///
    /// `again` returns the stored last command (with the new raw input), or
    /// a zero-confidence command when nothing is stored. The last command is
    /// not updated; call [`set_last_command`](Self::set_last_command) once
    /// the command has been carried out.
    pub fn parse_command(&self, input: &str, ctx: &ContextSnapshot) -> ParsedCommand {
        if check_special_commands(input) == Some(SpecialCommand::Again) {
            return match self.session.last_command() {
                Some(last) => ParsedCommand {
                    raw_input: input.to_string(),
                    ..last.clone()
                },
                None => ParsedCommand::unrecognized(input, normalize_input(input)),
            };
        }
        let command = assemble(
            &self.vocabulary,
            &self.config,
            input,
            ctx,
            self.session.last_command(),
        );
        tracing::debug!(
            input,
            verb = command.verb.as_ref().map(VerbId::as_str),
            confidence = command.confidence,
            "parsed command"
        );
        command
    }

    /// Parse one command against the context `provider` currently reports.
    pub fn parse_from(&self, input: &str, provider: &impl ContextProvider) -> ParsedCommand {
        self.parse_command(input, &provider.snapshot())
    }

    /// Split a line into commands and parse each one independently.
    ///
    /// Separators always split. A conjunction splits only when a verb follows
    /// it (`open mailbox and take leaflet`); otherwise it joins objects.
    pub fn parse_multiple_commands(&self, input: &str, ctx: &ContextSnapshot) -> Vec<ParsedCommand> {
        split_commands(input, &self.config.separators)
            .iter()
            .flat_map(|part| split_conjoined(part, &self.config.conjunctions, &self.vocabulary))
            .map(|part| self.parse_command(part.trim(), ctx))
            .collect()
    }

    /// Check a parsed command against the context.
    pub fn validate_command(&self, command: &ParsedCommand, ctx: &ContextSnapshot) -> CommandValidation {
        validate_command(&self.vocabulary, command, ctx, &self.config)
    }

    /// Suggest completions for partial input.
    pub fn get_command_suggestions(
        &self,
        partial: &str,
        ctx: &ContextSnapshot,
        max: usize,
    ) -> Vec<CommandSuggestion> {
        get_command_suggestions(&self.vocabulary, partial, ctx, max, &self.config)
    }

    /// Suggest actions for the objects in reach.
    pub fn get_contextual_commands(&self, ctx: &ContextSnapshot, max: usize) -> Vec<CommandSuggestion> {
        get_contextual_commands(&self.vocabulary, ctx, max)
    }

    /// The canonical verb for a word or phrase.
    pub fn resolve_verb(&self, token: &str) -> Option<VerbId> {
        resolve_verb(&self.vocabulary, token).map(|verb| verb.id.clone())
    }

    /// The single object in `ctx` that `phrase` names, if there is exactly one.
    pub fn resolve_object(&self, phrase: &str, ctx: &ContextSnapshot) -> Option<ObjectId> {
        resolve_object(&self.vocabulary, phrase, ctx)
    }

    /// Every object in `ctx` that `phrase` could mean, most probable first.
    pub fn resolve_ambiguity(&self, phrase: &str, ctx: &ContextSnapshot) -> Vec<AmbiguityCandidate> {
        resolve_ambiguity(
            &self.vocabulary,
            phrase,
            ctx,
            self.session.last_command(),
            &self.config.weights,
        )
    }

    /// Corrected versions of misspelt input, best first.
    pub fn suggest_typo_corrections(&self, input: &str, ctx: &ContextSnapshot) -> Vec<String> {
        suggest_typo_corrections(&self.vocabulary, input, ctx, &self.config)
    }

    /// Recognise a meta command such as `again`, `undo` or `help`.
    pub fn check_special_commands(&self, input: &str) -> Option<SpecialCommand> {
        check_special_commands(input)
    }

    /// Help text for a verb or any of its aliases.
    pub fn get_verb_help(&self, verb: &str) -> Option<String> {
        get_verb_help(&self.vocabulary, verb)
    }

    /// Example commands for the current context.
    pub fn get_example_commands(&self, ctx: &ContextSnapshot, limit: usize) -> Vec<String> {
        get_example_commands(&self.vocabulary, ctx, limit)
    }

    /// Trim, lowercase, collapse whitespace and strip terminal punctuation.
    pub fn normalize_input(&self, input: &str) -> String {
        normalize_input(input)
    }

    /// Normalise and expand abbreviations such as `x` and `n`.
    pub fn expand_abbreviations(&self, input: &str) -> String {
        expand_abbreviations(input, &self.vocabulary)
    }

    /// Whether `input` is well formed, regardless of context.
    pub fn is_valid_syntax(&self, input: &str) -> bool {
        is_valid_syntax(&self.vocabulary, &self.config, input)
    }

    /// The last command stored for this session.
    pub fn get_last_command(&self) -> Option<&ParsedCommand> {
        self.session.last_command()
    }

    /// Store the command `again` should repeat.
    pub fn set_last_command(&mut self, command: ParsedCommand) {
        self.session.set_last_command(command);
    }

    /// Forget the last command.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grue_core::{ObjectKind, ObjectRecord};

    fn parser() -> CommandParser {
        CommandParser::from_source(
            VocabularySource::default()
                .with_object(
                    ObjectRecord::new("lamp_brass")
                        .aliases(["lamp", "brass lamp"])
                        .kind(ObjectKind::LightSource),
                )
                .with_object(ObjectRecord::new("mailbox").kind(ObjectKind::Container)),
        )
        .unwrap()
    }

    fn field() -> ContextSnapshot {
        ContextSnapshot::new("west_of_house").with_visible(["lamp_brass", "mailbox"])
    }

    #[test]
    fn again_repeats_the_stored_command() {
        let mut parser = parser();
        let open = parser.parse_command("open mailbox", &field());
        parser.set_last_command(open.clone());

        let again = parser.parse_command("g", &field());
        assert_eq!(again.verb, open.verb);
        assert_eq!(again.direct_object, open.direct_object);
        assert_eq!(again.raw_input, "g");
    }

    #[test]
    fn again_without_history_has_zero_confidence() {
        let parser = parser();
        let again = parser.parse_command("again", &field());
        assert!(again.verb.is_none());
        assert_eq!(again.confidence, 0.0);
        let validation = parser.validate_command(&again, &field());
        assert_eq!(validation.errors[0].message, "There is no command to repeat.");
    }

    #[test]
    fn parsing_does_not_touch_the_session() {
        let mut parser = parser();
        parser.parse_command("take lamp", &field());
        assert!(parser.get_last_command().is_none());

        parser.set_last_command(parser.parse_command("take lamp", &field()));
        assert!(parser.get_last_command().is_some());
        parser.reset();
        assert!(parser.get_last_command().is_none());
    }

    #[test]
    fn closures_supply_context() {
        let parser = parser();
        let command = parser.parse_from("x lamp", &field);
        assert_eq!(command.verb.as_ref().map(VerbId::as_str), Some("examine"));
        assert_eq!(command.direct_object_id().map(ObjectId::as_str), Some("lamp_brass"));
    }

    #[test]
    fn sessions_share_one_vocabulary() {
        let first = parser();
        let second = CommandParser::new(Arc::clone(first.vocabulary()));
        assert!(Arc::ptr_eq(first.vocabulary(), second.vocabulary()));
        assert_eq!(second.resolve_verb("GRAB"), Some(VerbId::new("take")));
    }

    #[test]
    fn reload_swaps_the_vocabulary() {
        let mut parser = parser();
        assert!(parser.resolve_object("leaflet", &ContextSnapshot::new("x").with_visible(["leaflet"])).is_none());

        parser
            .reload_vocabulary(VocabularySource::default().with_object(ObjectRecord::new("leaflet")))
            .unwrap();
        let ctx = ContextSnapshot::new("x").with_visible(["leaflet"]);
        assert_eq!(parser.resolve_object("leaflet", &ctx), Some(ObjectId::new("leaflet")));
        assert!(parser.resolve_object("lamp", &field()).is_none());
    }

    #[test]
    fn failed_reload_keeps_the_old_vocabulary() {
        let mut parser = parser();
        let bad = VocabularySource::default()
            .with_object(ObjectRecord::new("rug"))
            .with_object(ObjectRecord::new("rug"));
        assert!(parser.reload_vocabulary(bad).is_err());
        assert_eq!(parser.resolve_object("lamp", &field()), Some(ObjectId::new("lamp_brass")));
    }
}
