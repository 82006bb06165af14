//! Parsed command types and meta-command recognition.

use grue_core::{ObjectId, VerbId, Vocabulary};
use serde::{Deserialize, Serialize};

use crate::ambiguity::AmbiguityCandidate;
use crate::normalize::{normalize_input, tokenize};

/// Direction for movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
}

impl Direction {
    /// Parse a direction from a word or its one/two-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "nor" | "north" => Some(Self::North),
            "s" | "sou" | "south" => Some(Self::South),
            "e" | "eas" | "east" => Some(Self::East),
            "w" | "wes" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            _ => None,
        }
    }

    /// The direction's verb ID in the standard vocabulary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
        }
    }
}

/// What an object slot of a command refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectRef {
    /// A single object in the player's context.
    Resolved {
        /// The object.
        id: ObjectId,
    },
    /// Several objects matched and none was likely enough to pick.
    Ambiguous {
        /// The phrase the player typed.
        phrase: String,
        /// Ranked candidates, most probable first.
        candidates: Vec<AmbiguityCandidate>,
    },
    /// Nothing in the player's context matched.
    Unresolved {
        /// The phrase the player typed.
        phrase: String,
    },
    /// Literal text for verbs such as `say`.
    Text {
        /// The text as typed (normalised).
        text: String,
    },
}

impl ObjectRef {
    /// The resolved object ID, if this slot resolved to one.
    pub fn resolved_id(&self) -> Option<&ObjectId> {
        match self {
            Self::Resolved { id } => Some(id),
            _ => None,
        }
    }

    /// A phrase naming the slot, using the object's primary alias when resolved.
    pub fn phrase(&self, vocab: &Vocabulary) -> String {
        match self {
            Self::Resolved { id } => vocab
                .object(id.as_str())
                .map_or_else(|| id.to_string(), |o| o.primary_alias().to_string()),
            Self::Ambiguous { phrase, .. } | Self::Unresolved { phrase } => phrase.clone(),
            Self::Text { text } => text.clone(),
        }
    }
}

/// A typo fixed while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The word as typed.
    pub from: String,
    /// The vocabulary word it was read as.
    pub to: String,
}

/// A structured command produced from one line of player input.
///
/// The primary reading's confidence is never lower than any alternative's.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Canonical verb, or `None` when no verb could be found.
    pub verb: Option<VerbId>,
    /// The words that were read as the verb.
    pub verb_phrase: Option<String>,
    /// The direct object.
    pub direct_object: Option<ObjectRef>,
    /// Further direct objects joined by a conjunction (`take lamp and sword`).
    #[serde(default)]
    pub additional_objects: Vec<ObjectRef>,
    /// The preposition introducing the indirect object (or qualifying the verb).
    pub preposition: Option<String>,
    /// The indirect object.
    pub indirect_object: Option<ObjectRef>,
    /// The input exactly as typed.
    pub raw_input: String,
    /// The input after normalisation and abbreviation expansion.
    pub normalized_input: String,
    /// How sure the parser is of this reading, from 0.0 to 1.0.
    pub confidence: f64,
    /// Other plausible readings, most confident first.
    pub alternatives: Vec<ParsedCommand>,
    /// Typos fixed along the way.
    pub corrections: Vec<Correction>,
}

impl ParsedCommand {
    /// A zero-confidence command for input nothing could be made of.
    pub fn unrecognized(raw_input: impl Into<String>, normalized_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            normalized_input: normalized_input.into(),
            ..Self::default()
        }
    }

    /// Whether a verb was found.
    pub fn is_recognized(&self) -> bool {
        self.verb.is_some()
    }

    /// The direct object's ID, if it resolved.
    pub fn direct_object_id(&self) -> Option<&ObjectId> {
        self.direct_object.as_ref().and_then(ObjectRef::resolved_id)
    }

    /// The indirect object's ID, if it resolved.
    pub fn indirect_object_id(&self) -> Option<&ObjectId> {
        self.indirect_object.as_ref().and_then(ObjectRef::resolved_id)
    }

    /// The direct object followed by any additional ones.
    pub fn direct_objects(&self) -> impl Iterator<Item = &ObjectRef> {
        self.direct_object.iter().chain(&self.additional_objects)
    }

    /// Whether any object slot resolved to `id`.
    pub fn mentions(&self, id: &ObjectId) -> bool {
        self.direct_objects()
            .chain(&self.indirect_object)
            .any(|object| object.resolved_id() == Some(id))
    }
}

/// Meta commands handled by the game loop rather than the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SpecialCommand {
    /// Repeat the last command.
    Again,
    /// Take back the last move.
    Undo,
    /// Show help.
    Help {
        /// Optional help topic.
        topic: Option<String>,
    },
    /// Leave the game.
    Quit,
    /// Save the game.
    Save,
    /// Load a saved game.
    Restore,
    /// Start over.
    Restart,
    /// Show the score.
    Score,
    /// Always describe rooms in full.
    Verbose,
    /// Describe rooms in full only on the first visit.
    Brief,
}

const AGAIN_WORDS: &[&str] = &["again", "g", "repeat"];
const UNDO_WORDS: &[&str] = &["undo"];
const HELP_WORDS: &[&str] = &["help", "?", "commands", "hint", "hints"];
const QUIT_WORDS: &[&str] = &["quit", "q", "bye"];
const SAVE_WORDS: &[&str] = &["save"];
const RESTORE_WORDS: &[&str] = &["restore", "load"];
const RESTART_WORDS: &[&str] = &["restart"];
const SCORE_WORDS: &[&str] = &["score", "points"];
const VERBOSE_WORDS: &[&str] = &["verbose"];
const BRIEF_WORDS: &[&str] = &["brief", "superbrief"];

/// Recognise a meta command.
///
/// Only `help` takes further words (its topic); every other meta command
/// must stand alone, so `save the princess` is an ordinary command.
pub fn check_special_commands(input: &str) -> Option<SpecialCommand> {
    // Normalisation strips a trailing '?', so a lone one is checked first.
    if input.trim() == "?" {
        return Some(SpecialCommand::Help { topic: None });
    }

    let words = tokenize(&normalize_input(input));
    let (first, rest) = words.split_first()?;
    let verb = first.as_str();

    if HELP_WORDS.contains(&verb) {
        return Some(SpecialCommand::Help {
            topic: (!rest.is_empty()).then(|| rest.join(" ")),
        });
    }
    if !rest.is_empty() {
        return None;
    }

    let table: [(&[&str], SpecialCommand); 9] = [
        (AGAIN_WORDS, SpecialCommand::Again),
        (UNDO_WORDS, SpecialCommand::Undo),
        (QUIT_WORDS, SpecialCommand::Quit),
        (SAVE_WORDS, SpecialCommand::Save),
        (RESTORE_WORDS, SpecialCommand::Restore),
        (RESTART_WORDS, SpecialCommand::Restart),
        (SCORE_WORDS, SpecialCommand::Score),
        (VERBOSE_WORDS, SpecialCommand::Verbose),
        (BRIEF_WORDS, SpecialCommand::Brief),
    ];
    table
        .into_iter()
        .find(|(words, _)| words.contains(&verb))
        .map(|(_, command)| command)
}
