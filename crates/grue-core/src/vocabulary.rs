//! The immutable vocabulary store: canonical verbs and objects with their aliases.
//!
//! A [`Vocabulary`] is built once from a [`VocabularySource`] and then only
//! read. Every alias is stored under its normalised form, so lookups are
//! single hash-map probes no matter how the player typed the word.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{CoreError, CoreResult};
use crate::id::{ObjectId, VerbId};
use crate::record::{ObjectKind, ObjectRecord, VerbCategory, VerbRecord, VocabularySource};

/// Normalise a word or phrase for use as a lookup key.
///
/// Lowercases, trims and collapses inner whitespace to single spaces.
pub fn normalize_key(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Push `key` onto `keys` unless it is empty or already present.
fn push_unique(keys: &mut Vec<String>, key: String) {
    if !key.is_empty() && !keys.contains(&key) {
        keys.push(key);
    }
}

/// A verb as held by the vocabulary store.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbEntry {
    /// Canonical verb ID.
    pub id: VerbId,
    /// Display name.
    pub name: String,
    /// Normalised aliases in feed order, without the canonical ID.
    pub aliases: Vec<String>,
    /// Category of the verb.
    pub category: VerbCategory,
    /// The verb needs a direct object.
    pub requires_object: bool,
    /// The verb needs a preposition and an indirect object.
    pub requires_indirect_object: bool,
    /// The verb may take a preposition and an indirect object.
    pub accepts_indirect_object: bool,
    /// The verb never takes an object.
    pub intransitive: bool,
    /// The object phrase is literal text.
    pub free_text: bool,
    /// Prepositions that may follow the verb.
    pub valid_prepositions: BTreeSet<String>,
    /// Optional help text.
    pub help_text: Option<String>,
    /// Example commands.
    pub examples: Vec<String>,
    /// Object kinds the verb applies to; empty means any.
    pub applies_to: BTreeSet<ObjectKind>,
}

impl VerbEntry {
    fn from_record(record: VerbRecord) -> CoreResult<Self> {
        let id = VerbId::new(&record.id);
        if id.as_str().is_empty() {
            return Err(CoreError::EmptyId { namespace: "verb" });
        }

        let mut aliases = Vec::new();
        if let Some(name) = &record.name {
            push_unique(&mut aliases, normalize_key(name));
        }
        for alias in &record.aliases {
            push_unique(&mut aliases, normalize_key(alias));
        }
        aliases.retain(|alias| alias != id.as_str());

        let valid_prepositions: BTreeSet<String> = record
            .valid_prepositions
            .iter()
            .map(|p| normalize_key(p))
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            name: record.name.unwrap_or_else(|| id.to_string()),
            aliases,
            category: record.category,
            requires_object: record.requires_object && !record.intransitive,
            requires_indirect_object: record.requires_indirect_object && !record.intransitive,
            accepts_indirect_object: !record.intransitive
                && (record.accepts_indirect_object
                    || record.requires_indirect_object
                    || !valid_prepositions.is_empty()),
            intransitive: record.intransitive,
            free_text: record.free_text,
            valid_prepositions,
            help_text: record.help_text,
            examples: record.examples,
            applies_to: record.applies_to.into_iter().collect(),
            id,
        })
    }

    /// The canonical ID followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether the verb can take a direct object at all.
    pub fn takes_object(&self) -> bool {
        !self.intransitive
    }

    /// Whether `word` may introduce this verb's indirect object.
    pub fn accepts_preposition(&self, word: &str) -> bool {
        self.valid_prepositions.contains(word)
    }

    /// Whether the verb makes sense on objects of `kind`.
    pub fn applies_to_kind(&self, kind: ObjectKind) -> bool {
        self.applies_to.is_empty() || self.applies_to.contains(&kind)
    }

    /// A one-line usage pattern such as `give <object> to <object>`.
    pub fn usage(&self) -> String {
        let mut usage = self.id.to_string();
        if self.intransitive {
            return usage;
        }
        let object = if self.free_text { "<text>" } else { "<object>" };
        if self.requires_object {
            usage.push_str(&format!(" {object}"));
        } else {
            usage.push_str(&format!(" [{object}]"));
        }
        if let Some(prep) = self.valid_prepositions.iter().next() {
            if self.requires_indirect_object {
                usage.push_str(&format!(" {prep} <object>"));
            } else if self.accepts_indirect_object {
                usage.push_str(&format!(" [{prep} <object>]"));
            }
        }
        usage
    }
}

/// An object as held by the vocabulary store.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    /// Canonical object ID.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Normalised aliases in feed order.
    pub aliases: Vec<String>,
    /// Kind of object.
    pub kind: ObjectKind,
    /// Verbs this object supports regardless of its kind.
    pub interactions: BTreeSet<VerbId>,
    keys: Vec<String>,
    tokens: BTreeSet<String>,
}

impl ObjectEntry {
    fn from_record(record: ObjectRecord) -> CoreResult<Self> {
        let id = ObjectId::new(&record.id);
        if id.as_str().is_empty() {
            return Err(CoreError::EmptyId { namespace: "object" });
        }

        let name = record
            .name
            .unwrap_or_else(|| id.words().collect::<Vec<_>>().join(" "));

        let mut aliases = Vec::new();
        for alias in &record.aliases {
            push_unique(&mut aliases, normalize_key(alias));
        }

        let mut keys = aliases.clone();
        push_unique(&mut keys, normalize_key(&name));
        push_unique(&mut keys, id.to_string());

        let tokens = keys
            .iter()
            .flat_map(|key| key.split(' '))
            .chain(id.words())
            .map(str::to_string)
            .collect();

        Ok(Self {
            interactions: record.interactions.iter().map(VerbId::new).collect(),
            kind: record.kind,
            aliases,
            name,
            keys,
            tokens,
            id,
        })
    }

    /// The alias a player would most naturally type.
    ///
    /// This is the first alias of the feed, or the lowercased name when the
    /// feed gave no aliases.
    pub fn primary_alias(&self) -> &str {
        self.aliases
            .first()
            .or_else(|| self.keys.first())
            .map_or(self.id.as_str(), String::as_str)
    }

    /// Every phrase that names this object exactly: aliases, name and ID.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Every single word appearing in any key, plus the words of the ID.
    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    /// Whether every word in `words` appears among this object's tokens.
    pub fn has_all_tokens<'a>(&self, mut words: impl Iterator<Item = &'a str>) -> bool {
        words.all(|w| self.tokens.contains(w))
    }

    /// How many of this object's aliases contain every word in `words`.
    pub fn aliases_sharing(&self, words: &[&str]) -> usize {
        self.aliases
            .iter()
            .filter(|alias| {
                let alias_words: Vec<&str> = alias.split(' ').collect();
                words.iter().all(|w| alias_words.contains(w))
            })
            .count()
    }

    /// Whether `verb` is a sensible action on this object.
    pub fn supports(&self, verb: &VerbEntry) -> bool {
        verb.takes_object() && (verb.applies_to_kind(self.kind) || self.interactions.contains(&verb.id))
    }
}

/// Immutable tables of verbs, objects, prepositions and abbreviations.
///
/// Built once at startup and shared read-only between every player session.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    verbs: BTreeMap<VerbId, VerbEntry>,
    verb_aliases: HashMap<String, VerbId>,
    objects: BTreeMap<ObjectId, ObjectEntry>,
    object_keys: HashMap<String, Vec<ObjectId>>,
    prepositions: BTreeSet<String>,
    abbreviations: BTreeMap<String, String>,
    longest_verb_phrase: usize,
}

impl Vocabulary {
    /// Build the store from a vocabulary feed.
    ///
    /// Fails on empty or duplicate canonical IDs and on empty abbreviation
    /// expansions. A verb alias claimed by two verbs stays with the first
    /// verb that registered it; canonical verb IDs always win over aliases.
    pub fn build(source: VocabularySource) -> CoreResult<Self> {
        let mut vocab = Self::default();

        let mut verbs = Vec::with_capacity(source.verbs.len());
        for record in source.verbs {
            let entry = VerbEntry::from_record(record)?;
            if vocab.verb_aliases.contains_key(entry.id.as_str()) {
                return Err(CoreError::DuplicateVerb(entry.id));
            }
            vocab
                .verb_aliases
                .insert(entry.id.to_string(), entry.id.clone());
            verbs.push(entry);
        }

        // Aliases are registered in feed order so the first claimant wins.
        for entry in &verbs {
            for alias in &entry.aliases {
                match vocab.verb_aliases.get(alias) {
                    Some(owner) if owner != &entry.id => {
                        tracing::warn!(
                            alias = %alias,
                            kept = %owner,
                            ignored = %entry.id,
                            "verb alias claimed by two verbs"
                        );
                    }
                    Some(_) => {}
                    None => {
                        vocab.verb_aliases.insert(alias.clone(), entry.id.clone());
                    }
                }
            }
        }

        vocab.verbs = verbs
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();

        vocab.longest_verb_phrase = vocab
            .verb_aliases
            .keys()
            .map(|alias| alias.split(' ').count())
            .max()
            .unwrap_or(0);

        for record in source.objects {
            let entry = ObjectEntry::from_record(record)?;
            if vocab.objects.contains_key(&entry.id) {
                return Err(CoreError::DuplicateObject(entry.id));
            }
            for key in entry.keys() {
                vocab
                    .object_keys
                    .entry(key.to_string())
                    .or_default()
                    .push(entry.id.clone());
            }
            vocab.objects.insert(entry.id.clone(), entry);
        }

        vocab.prepositions = source
            .prepositions
            .iter()
            .map(|p| normalize_key(p))
            .chain(
                vocab
                    .verbs
                    .values()
                    .flat_map(|v| v.valid_prepositions.iter().cloned()),
            )
            .filter(|p| !p.is_empty())
            .collect();

        for (short, long) in source.abbreviations {
            let long_key = normalize_key(&long);
            if long_key.is_empty() {
                return Err(CoreError::EmptyAbbreviation(short));
            }
            vocab.abbreviations.insert(normalize_key(&short), long_key);
        }

        tracing::debug!(
            verbs = vocab.verbs.len(),
            verb_aliases = vocab.verb_aliases.len(),
            objects = vocab.objects.len(),
            abbreviations = vocab.abbreviations.len(),
            "built vocabulary"
        );

        Ok(vocab)
    }

    /// Build the built-in standard adventure vocabulary (verbs only, no objects).
    pub fn standard() -> CoreResult<Self> {
        Self::build(crate::stdlib::standard_source())
    }

    /// Build the standard vocabulary extended with a game's own feed.
    pub fn standard_with(source: VocabularySource) -> CoreResult<Self> {
        Self::build(crate::stdlib::standard_source().merge(source))
    }

    /// Look up a verb by canonical ID or alias, in any casing.
    pub fn lookup_verb(&self, phrase: &str) -> Option<&VerbEntry> {
        let key = normalize_key(phrase);
        self.verb_aliases
            .get(&key)
            .and_then(|id| self.verbs.get(id))
    }

    /// Get a verb by canonical ID.
    pub fn verb(&self, id: &str) -> Option<&VerbEntry> {
        self.verbs.get(id)
    }

    /// All verbs in canonical-ID order.
    pub fn verbs(&self) -> impl Iterator<Item = &VerbEntry> {
        self.verbs.values()
    }

    /// Every verb lookup key (IDs and aliases) with the verb it resolves to.
    pub fn verb_keys(&self) -> impl Iterator<Item = (&str, &VerbId)> {
        self.verb_aliases.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of words in the longest verb alias ("pick up" is 2).
    pub fn longest_verb_phrase(&self) -> usize {
        self.longest_verb_phrase
    }

    /// Get an object by canonical ID.
    pub fn object(&self, id: &str) -> Option<&ObjectEntry> {
        self.objects.get(id)
    }

    /// All objects in canonical-ID order.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectEntry> {
        self.objects.values()
    }

    /// Objects that have `phrase` as an exact alias, name or ID.
    pub fn objects_named(&self, phrase: &str) -> &[ObjectId] {
        self.object_keys
            .get(&normalize_key(phrase))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether `word` is a known preposition.
    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(word)
    }

    /// The expansion of a single-word abbreviation, if there is one.
    pub fn expand_abbreviation(&self, word: &str) -> Option<&str> {
        self.abbreviations
            .get(&normalize_key(word))
            .map(String::as_str)
    }

    /// All abbreviations with their expansions.
    pub fn abbreviations(&self) -> &BTreeMap<String, String> {
        &self.abbreviations
    }

    /// Whether `object` is a sensible target for `verb`.
    ///
    /// Unknown verbs or objects are never valid targets.
    pub fn is_valid_target(&self, verb: &VerbId, object: &ObjectId) -> bool {
        match (self.verbs.get(verb), self.objects.get(object)) {
            (Some(verb), Some(object)) => object.supports(verb),
            _ => false,
        }
    }

    /// Number of canonical verbs.
    pub fn verb_count(&self) -> usize {
        self.verbs.len()
    }

    /// Number of canonical objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// True when the store holds neither verbs nor objects.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty() && self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> VocabularySource {
        VocabularySource::default()
            .with_verb(VerbRecord::new("take").aliases(["get", "Pick Up", "grab"]).requires_object())
            .with_verb(VerbRecord::new("drop").aliases(["put down", "get"]).requires_object())
            .with_verb(
                VerbRecord::new("eat")
                    .requires_object()
                    .applies_to([ObjectKind::Food]),
            )
            .with_verb(VerbRecord::new("north").intransitive())
            .with_object(
                ObjectRecord::new("lamp_brass")
                    .name("brass lamp")
                    .aliases(["lamp", "brass lamp", "lantern"])
                    .kind(ObjectKind::LightSource),
            )
            .with_object(ObjectRecord::new("sword_rusty").aliases(["sword", "rusty sword"]))
            .with_object(ObjectRecord::new("sword_silver").aliases(["sword", "silver sword"]))
            .with_object(ObjectRecord::new("bread").kind(ObjectKind::Food))
            .with_abbreviation("n", "north")
    }

    #[test]
    fn normalize_key_collapses_whitespace() {
        assert_eq!(normalize_key("  Pick   UP "), "pick up");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn lookup_verb_by_alias_any_case() {
        let vocab = Vocabulary::build(source()).unwrap();
        assert_eq!(vocab.lookup_verb("GRAB").unwrap().id.as_str(), "take");
        assert_eq!(vocab.lookup_verb("pick  up").unwrap().id.as_str(), "take");
        assert_eq!(vocab.lookup_verb("take").unwrap().id.as_str(), "take");
        assert!(vocab.lookup_verb("dance").is_none());
    }

    #[test]
    fn conflicting_alias_stays_with_first_verb() {
        let vocab = Vocabulary::build(source()).unwrap();
        assert_eq!(vocab.lookup_verb("get").unwrap().id.as_str(), "take");
    }

    #[test]
    fn longest_verb_phrase_counts_words() {
        let vocab = Vocabulary::build(source()).unwrap();
        assert_eq!(vocab.longest_verb_phrase(), 2);
    }

    #[test]
    fn objects_share_aliases() {
        let vocab = Vocabulary::build(source()).unwrap();
        let swords = vocab.objects_named("Sword");
        assert_eq!(swords.len(), 2);
        assert_eq!(vocab.objects_named("lamp_brass")[0].as_str(), "lamp_brass");
        assert!(vocab.objects_named("troll").is_empty());
    }

    #[test]
    fn object_name_defaults_from_id() {
        let vocab = Vocabulary::build(source()).unwrap();
        let sword = vocab.object("sword_rusty").unwrap();
        assert_eq!(sword.name, "sword rusty");
        assert_eq!(sword.primary_alias(), "sword");
        let bread = vocab.object("bread").unwrap();
        assert_eq!(bread.primary_alias(), "bread");
    }

    #[test]
    fn object_tokens_include_id_words() {
        let vocab = Vocabulary::build(source()).unwrap();
        let lamp = vocab.object("lamp_brass").unwrap();
        assert!(lamp.has_all_tokens(["brass", "lamp"].into_iter()));
        assert!(lamp.has_all_tokens(["lantern"].into_iter()));
        assert!(!lamp.has_all_tokens(["rusty", "lamp"].into_iter()));
    }

    #[test]
    fn aliases_sharing_counts_matching_aliases() {
        let vocab = Vocabulary::build(source()).unwrap();
        let sword = vocab.object("sword_rusty").unwrap();
        // "sword", "rusty sword"
        assert_eq!(sword.aliases_sharing(&["sword"]), 2);
        assert_eq!(sword.aliases_sharing(&["rusty", "sword"]), 1);
    }

    #[test]
    fn verb_applicability() {
        let vocab = Vocabulary::build(source()).unwrap();
        let eat = VerbId::new("eat");
        assert!(vocab.is_valid_target(&eat, &ObjectId::new("bread")));
        assert!(!vocab.is_valid_target(&eat, &ObjectId::new("lamp_brass")));
        assert!(!vocab.is_valid_target(&VerbId::new("north"), &ObjectId::new("bread")));
        assert!(vocab.is_valid_target(&VerbId::new("take"), &ObjectId::new("lamp_brass")));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dup = source().with_verb(VerbRecord::new("TAKE"));
        assert!(matches!(
            Vocabulary::build(dup),
            Err(CoreError::DuplicateVerb(id)) if id.as_str() == "take"
        ));
        let dup = source().with_object(ObjectRecord::new("bread"));
        assert!(matches!(
            Vocabulary::build(dup),
            Err(CoreError::DuplicateObject(_))
        ));
    }

    #[test]
    fn empty_ids_and_abbreviations_are_rejected() {
        let bad = source().with_object(ObjectRecord::new("  "));
        assert!(matches!(
            Vocabulary::build(bad),
            Err(CoreError::EmptyId { namespace: "object" })
        ));
        let bad = source().with_abbreviation("zz", " ");
        assert!(matches!(
            Vocabulary::build(bad),
            Err(CoreError::EmptyAbbreviation(_))
        ));
    }

    #[test]
    fn abbreviations_are_case_insensitive() {
        let vocab = Vocabulary::build(source()).unwrap();
        assert_eq!(vocab.expand_abbreviation("N"), Some("north"));
        assert_eq!(vocab.expand_abbreviation("x"), None);
    }

    #[test]
    fn usage_lines() {
        let give = VerbEntry::from_record(
            VerbRecord::new("give")
                .requires_object()
                .requires_indirect_object()
                .prepositions(["to"]),
        )
        .unwrap();
        assert_eq!(give.usage(), "give <object> to <object>");

        let look = VerbEntry::from_record(VerbRecord::new("look").prepositions(["under"])).unwrap();
        assert_eq!(look.usage(), "look [<object>] [under <object>]");

        let north = VerbEntry::from_record(VerbRecord::new("north").intransitive()).unwrap();
        assert_eq!(north.usage(), "north");
    }

    #[test]
    fn empty_vocabulary_is_usable() {
        let vocab = Vocabulary::build(VocabularySource::default()).unwrap();
        assert!(vocab.is_empty());
        assert!(vocab.lookup_verb("take").is_none());
        assert_eq!(vocab.longest_verb_phrase(), 0);
    }
}
