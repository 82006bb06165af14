//! Records of the external vocabulary feed (item and verb definitions).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Category of a verb, also used to group command suggestions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerbCategory {
    /// Moving between scenes.
    Movement,
    /// Handling or examining objects.
    #[default]
    #[serde(alias = "manipulation", alias = "examination")]
    Object,
    /// Meta commands such as save, quit or score.
    #[serde(alias = "utility")]
    System,
    /// Dealing with characters and creatures.
    #[serde(alias = "communication")]
    Interaction,
    /// Spells and other magic.
    Magic,
}

impl fmt::Display for VerbCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement => write!(f, "movement"),
            Self::Object => write!(f, "object"),
            Self::System => write!(f, "system"),
            Self::Interaction => write!(f, "interaction"),
            Self::Magic => write!(f, "magic"),
        }
    }
}

/// Broad kind of a game object, used to decide which verbs make sense on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    /// Valuables worth points.
    Treasure,
    /// Anything that can be fought with.
    Weapon,
    /// Lamps, torches and candles.
    LightSource,
    /// Chests, bags and other things that hold objects.
    Container,
    /// Edible or drinkable things.
    Food,
    /// General-purpose portable objects.
    #[default]
    Tool,
    /// Characters and monsters.
    Creature,
    /// Fixed parts of a scene (doors, walls, trees).
    Scenery,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treasure => write!(f, "treasure"),
            Self::Weapon => write!(f, "weapon"),
            Self::LightSource => write!(f, "light source"),
            Self::Container => write!(f, "container"),
            Self::Food => write!(f, "food"),
            Self::Tool => write!(f, "tool"),
            Self::Creature => write!(f, "creature"),
            Self::Scenery => write!(f, "scenery"),
        }
    }
}

/// A verb definition as delivered by the vocabulary feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbRecord {
    /// Canonical verb ID.
    pub id: String,
    /// Display name; defaults to the ID.
    #[serde(default)]
    pub name: Option<String>,
    /// Alternate words and phrases for the verb.
    #[serde(default, alias = "synonyms")]
    pub aliases: Vec<String>,
    /// Category of the verb.
    #[serde(default, rename = "type", alias = "category")]
    pub category: VerbCategory,
    /// The verb needs a direct object ("take" but not "look").
    #[serde(default)]
    pub requires_object: bool,
    /// The verb needs a preposition and indirect object ("give X to Y").
    #[serde(default, alias = "requiresPreposition")]
    pub requires_indirect_object: bool,
    /// The verb may take a preposition and indirect object.
    #[serde(default)]
    pub accepts_indirect_object: bool,
    /// The verb never takes an object ("north", "score").
    #[serde(default)]
    pub intransitive: bool,
    /// The object phrase is literal text rather than an object ("say hello").
    #[serde(default)]
    pub free_text: bool,
    /// Prepositions that may follow the verb or its direct object.
    #[serde(default)]
    pub valid_prepositions: Vec<String>,
    /// Help text shown for the verb.
    #[serde(default)]
    pub help_text: Option<String>,
    /// Example commands using the verb.
    #[serde(default, alias = "syntax")]
    pub examples: Vec<String>,
    /// Object kinds the verb applies to; empty means any kind.
    #[serde(default)]
    pub applies_to: Vec<ObjectKind>,
}

impl VerbRecord {
    /// Start a record for a verb with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the category.
    pub fn category(mut self, category: VerbCategory) -> Self {
        self.category = category;
        self
    }

    /// Add aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Mark the verb as needing a direct object.
    pub fn requires_object(mut self) -> Self {
        self.requires_object = true;
        self
    }

    /// Mark the verb as needing a preposition and indirect object.
    pub fn requires_indirect_object(mut self) -> Self {
        self.requires_indirect_object = true;
        self.accepts_indirect_object = true;
        self
    }

    /// Mark the verb as never taking an object.
    pub fn intransitive(mut self) -> Self {
        self.intransitive = true;
        self
    }

    /// Mark the verb's object phrase as free text.
    pub fn free_text(mut self) -> Self {
        self.free_text = true;
        self
    }

    /// Allow these prepositions; a verb with prepositions accepts an indirect object.
    pub fn prepositions<I, S>(mut self, prepositions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_prepositions
            .extend(prepositions.into_iter().map(Into::into));
        self.accepts_indirect_object = !self.valid_prepositions.is_empty();
        self
    }

    /// Set the help text.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Add example commands.
    pub fn examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Restrict the verb to these object kinds.
    pub fn applies_to(mut self, kinds: impl IntoIterator<Item = ObjectKind>) -> Self {
        self.applies_to.extend(kinds);
        self
    }
}

/// An object definition as delivered by the vocabulary feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    /// Canonical object ID.
    pub id: String,
    /// Display name; defaults to the ID with underscores as spaces.
    #[serde(default)]
    pub name: Option<String>,
    /// Alternate names, including adjective-qualified ones ("brass lamp").
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Kind of object.
    #[serde(default, rename = "type")]
    pub kind: ObjectKind,
    /// Verb IDs this object supports regardless of its kind.
    #[serde(default)]
    pub interactions: Vec<String>,
}

impl ObjectRecord {
    /// Start a record for an object with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Set the object kind.
    pub fn kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add verb IDs the object explicitly supports.
    pub fn interactions<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interactions.extend(verbs.into_iter().map(Into::into));
        self
    }
}

/// The complete vocabulary feed: verbs, objects, abbreviations and prepositions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularySource {
    /// Verb definitions.
    #[serde(default)]
    pub verbs: Vec<VerbRecord>,
    /// Object definitions.
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
    /// Single-word abbreviations and their expansions ("x" -> "examine").
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    /// Additional prepositions beyond those named by verbs.
    #[serde(default)]
    pub prepositions: Vec<String>,
}

impl VocabularySource {
    /// Parse a feed from a JSON document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a feed from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Add a verb record.
    pub fn with_verb(mut self, verb: VerbRecord) -> Self {
        self.verbs.push(verb);
        self
    }

    /// Add an object record.
    pub fn with_object(mut self, object: ObjectRecord) -> Self {
        self.objects.push(object);
        self
    }

    /// Add an abbreviation.
    pub fn with_abbreviation(mut self, short: impl Into<String>, long: impl Into<String>) -> Self {
        self.abbreviations.insert(short.into(), long.into());
        self
    }

    /// Merge another feed into this one; later records are appended.
    pub fn merge(mut self, other: VocabularySource) -> Self {
        self.verbs.extend(other.verbs);
        self.objects.extend(other.objects);
        self.abbreviations.extend(other.abbreviations);
        self.prepositions.extend(other.prepositions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_field_names() {
        let json = r#"{
            "verbs": [{
                "id": "give",
                "synonyms": ["offer", "hand"],
                "type": "interaction",
                "requiresObject": true,
                "requiresPreposition": true,
                "validPrepositions": ["to"],
                "syntax": ["give <object> to <object>"]
            }],
            "objects": [{
                "id": "lamp_brass",
                "aliases": ["lamp", "brass lamp"],
                "type": "LIGHT_SOURCE",
                "interactions": ["light"]
            }]
        }"#;
        let source = VocabularySource::from_json(json).unwrap();
        let give = &source.verbs[0];
        assert_eq!(give.aliases, vec!["offer", "hand"]);
        assert_eq!(give.category, VerbCategory::Interaction);
        assert!(give.requires_object);
        assert!(give.requires_indirect_object);
        assert_eq!(give.examples.len(), 1);
        assert_eq!(source.objects[0].kind, ObjectKind::LightSource);
    }

    #[test]
    fn feed_categories_map_onto_suggestion_categories() {
        let verbs: Vec<VerbRecord> = serde_json::from_str(
            r#"[{"id": "take", "type": "manipulation"},
                {"id": "read", "type": "examination"},
                {"id": "score", "type": "utility"},
                {"id": "yell", "type": "communication"}]"#,
        )
        .unwrap();
        let categories: Vec<_> = verbs.iter().map(|v| v.category).collect();
        assert_eq!(
            categories,
            vec![
                VerbCategory::Object,
                VerbCategory::Object,
                VerbCategory::System,
                VerbCategory::Interaction
            ]
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = VocabularySource::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = VocabularySource::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn reads_feed_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbs.json");
        std::fs::write(&path, r#"{"verbs": [{"id": "wave"}]}"#).unwrap();
        let source = VocabularySource::from_path(&path).unwrap();
        assert_eq!(source.verbs[0].id, "wave");
        assert!(source.objects.is_empty());
    }

    #[test]
    fn builder_prepositions_enable_indirect_objects() {
        let verb = VerbRecord::new("put").prepositions(["in", "on"]);
        assert!(verb.accepts_indirect_object);
        assert!(!verb.requires_indirect_object);
    }
}
