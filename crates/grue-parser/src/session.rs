//! Per-player session state.

use crate::command::ParsedCommand;

/// What the parser remembers between commands for one player.
///
/// Only the last command is kept, for `again` and for ranking ambiguous
/// objects by recency. It changes only through [`set_last_command`] and
/// [`reset`].
///
/// [`set_last_command`]: SessionState::set_last_command
/// [`reset`]: SessionState::reset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    last_command: Option<ParsedCommand>,
}

impl SessionState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last command stored by the caller.
    pub fn last_command(&self) -> Option<&ParsedCommand> {
        self.last_command.as_ref()
    }

    /// Remember a command. Nothing about it is checked.
    pub fn set_last_command(&mut self, command: ParsedCommand) {
        self.last_command = Some(command);
    }

    /// Forget the last command.
    pub fn reset(&mut self) {
        self.last_command = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_resets() {
        let mut session = SessionState::new();
        assert!(session.last_command().is_none());

        let command = ParsedCommand {
            verb: Some("look".into()),
            raw_input: "look".into(),
            confidence: 1.0,
            ..ParsedCommand::default()
        };
        session.set_last_command(command.clone());
        assert_eq!(session.last_command(), Some(&command));

        session.reset();
        assert!(session.last_command().is_none());
    }

    #[test]
    fn stores_failed_commands_too() {
        let mut session = SessionState::new();
        session.set_last_command(ParsedCommand::unrecognized("blorb", "blorb"));
        assert_eq!(session.last_command().map(|c| c.confidence), Some(0.0));
    }
}
