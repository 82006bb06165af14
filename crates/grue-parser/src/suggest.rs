//! Command suggestions, verb help and example commands.

use std::collections::BTreeMap;

use grue_core::{ContextSnapshot, ObjectEntry, VerbCategory, VerbEntry, VerbId, Vocabulary};
use serde::{Deserialize, Serialize};

use crate::assembler::match_verb;
use crate::config::ParserConfig;
use crate::normalize::{expand_abbreviations, normalize_input, strip_articles, tokenize};

/// Relevance of a verb whose canonical name starts with the typed text.
const CANONICAL_PREFIX: f64 = 1.0;
/// Relevance of a verb matched through one of its aliases.
const ALIAS_PREFIX: f64 = 0.9;
/// Relevance of a verb-plus-object completion for an object in reach.
const TEMPLATE: f64 = 0.8;
/// Relevance of a verb-plus-object completion for an object out of reach.
const TEMPLATE_OUT_OF_REACH: f64 = 0.6;
/// Relevance of a bare object name.
const OBJECT_ONLY: f64 = 0.5;

/// A command the player might want to type next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSuggestion {
    /// The command text.
    pub command: String,
    /// What the command does.
    pub description: String,
    /// How well the suggestion fits, from 0.0 to 1.0.
    pub relevance: f64,
    /// Category of the suggested verb.
    pub category: VerbCategory,
    /// Whether the command can be carried out in the current context.
    pub available: bool,
    /// The canonical verb, when the suggestion is built around one.
    pub verb: Option<VerbId>,
}

impl CommandSuggestion {
    fn sort_key(&self) -> &str {
        self.verb.as_ref().map_or(self.command.as_str(), VerbId::as_str)
    }
}

fn describe(verb: &VerbEntry) -> String {
    verb.help_text.clone().unwrap_or_else(|| verb.usage())
}

/// Objects in reach that `verb` makes sense on, in ID order.
fn reachable_targets<'v>(
    vocab: &'v Vocabulary,
    verb: &VerbEntry,
    ctx: &ContextSnapshot,
) -> Vec<&'v ObjectEntry> {
    ctx.reachable()
        .into_iter()
        .filter_map(|id| vocab.object(id.as_str()))
        .filter(|object| object.supports(verb))
        .collect()
}

fn verb_available(vocab: &Vocabulary, verb: &VerbEntry, ctx: &ContextSnapshot) -> bool {
    !verb.requires_object || verb.free_text || !reachable_targets(vocab, verb, ctx).is_empty()
}

/// Sort by relevance (highest first), then verb name, then command text.
fn rank(suggestions: Vec<CommandSuggestion>, max: usize) -> Vec<CommandSuggestion> {
    let mut best: BTreeMap<String, CommandSuggestion> = BTreeMap::new();
    for suggestion in suggestions {
        match best.get(&suggestion.command) {
            Some(kept) if kept.relevance >= suggestion.relevance => {}
            _ => {
                best.insert(suggestion.command.clone(), suggestion);
            }
        }
    }
    let mut ranked: Vec<CommandSuggestion> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| a.sort_key().cmp(b.sort_key()))
            .then_with(|| a.command.cmp(&b.command))
    });
    ranked.truncate(max);
    ranked
}

/// Actions that make sense on objects in reach right now.
///
/// Verbs are ranked by how many reachable objects they apply to, then
/// alphabetically. Each suggestion is completed with the first such object.
pub fn get_contextual_commands(
    vocab: &Vocabulary,
    ctx: &ContextSnapshot,
    max: usize,
) -> Vec<CommandSuggestion> {
    let counted: Vec<(&VerbEntry, Vec<&ObjectEntry>)> = vocab
        .verbs()
        .filter(|verb| verb.takes_object() && !verb.free_text)
        .map(|verb| (verb, reachable_targets(vocab, verb, ctx)))
        .filter(|(_, targets)| !targets.is_empty())
        .collect();
    let most = counted
        .iter()
        .map(|(_, targets)| targets.len())
        .max()
        .unwrap_or(1);

    let suggestions = counted
        .into_iter()
        .map(|(verb, targets)| CommandSuggestion {
            command: format!("{} {}", verb.id, targets[0].primary_alias()),
            description: describe(verb),
            relevance: targets.len() as f64 / most as f64,
            category: verb.category,
            available: true,
            verb: Some(verb.id.clone()),
        })
        .collect();
    rank(suggestions, max)
}

/// Complete partially typed input.
///
/// Empty input gives [`get_contextual_commands`]. Otherwise verbs whose
/// name or alias starts with the text are offered, then, once a verb has
/// been typed, that verb with each object whose name starts with the rest.
pub fn get_command_suggestions(
    vocab: &Vocabulary,
    partial: &str,
    ctx: &ContextSnapshot,
    max: usize,
    config: &ParserConfig,
) -> Vec<CommandSuggestion> {
    let prefix = normalize_input(partial);
    if prefix.is_empty() {
        return get_contextual_commands(vocab, ctx, max);
    }
    let expanded = expand_abbreviations(&prefix, vocab);
    let mut suggestions = Vec::new();

    for verb in vocab.verbs() {
        let (command, relevance) = if verb.id.as_str().starts_with(&prefix) {
            (verb.id.to_string(), CANONICAL_PREFIX)
        } else if let Some(alias) = verb.aliases.iter().find(|a| a.starts_with(&prefix)) {
            (alias.clone(), ALIAS_PREFIX)
        } else {
            continue;
        };
        suggestions.push(CommandSuggestion {
            command,
            description: describe(verb),
            relevance,
            category: verb.category,
            available: verb_available(vocab, verb, ctx),
            verb: Some(verb.id.clone()),
        });
    }

    let tokens = tokenize(&expanded);
    if let Some((verb, used)) = match_verb(vocab, &tokens) {
        if verb.takes_object() && !verb.free_text {
            let typed = tokens[..used].join(" ");
            let rest: Vec<&str> = tokens[used..].iter().map(String::as_str).collect();
            let object_prefix = strip_articles(&rest, |w| config.is_article(w)).join(" ");
            for object in vocab.objects().filter(|object| object.supports(verb)) {
                let Some(key) = object.keys().find(|key| key.starts_with(&object_prefix)) else {
                    continue;
                };
                let available = ctx.is_reachable(&object.id);
                suggestions.push(CommandSuggestion {
                    command: format!("{typed} {key}"),
                    description: format!("{} the {}", verb.id, object.name),
                    relevance: if available { TEMPLATE } else { TEMPLATE_OUT_OF_REACH },
                    category: verb.category,
                    available,
                    verb: Some(verb.id.clone()),
                });
            }
        }
    }

    if tokens.len() == 1 {
        for object in vocab.objects() {
            let Some(key) = object.keys().find(|key| key.starts_with(&prefix)) else {
                continue;
            };
            suggestions.push(CommandSuggestion {
                command: key.to_string(),
                description: object.name.clone(),
                relevance: OBJECT_ONLY,
                category: VerbCategory::Object,
                available: ctx.is_reachable(&object.id),
                verb: None,
            });
        }
    }

    rank(suggestions, max)
}

/// Help for a verb given by its canonical name or any alias.
pub fn get_verb_help(vocab: &Vocabulary, verb: &str) -> Option<String> {
    let entry = vocab.lookup_verb(verb)?;
    let mut help = String::new();
    if let Some(text) = &entry.help_text {
        help.push_str(text);
        help.push('\n');
    }
    help.push_str(&format!("Usage: {}", entry.usage()));
    if !entry.aliases.is_empty() {
        help.push_str(&format!("\nSynonyms: {}", entry.aliases.join(", ")));
    }
    if !entry.examples.is_empty() {
        help.push_str(&format!("\nExamples: {}", entry.examples.join("; ")));
    }
    Some(help)
}

/// Example commands for the current context.
///
/// One example per object in reach comes first, using a verb specific to
/// that object when there is one. The verbs' own examples fill the rest.
pub fn get_example_commands(vocab: &Vocabulary, ctx: &ContextSnapshot, limit: usize) -> Vec<String> {
    let mut examples: Vec<String> = Vec::new();
    let mut push = |example: String| {
        if !examples.contains(&example) {
            examples.push(example);
        }
    };

    for id in ctx.reachable() {
        let Some(object) = vocab.object(id.as_str()) else {
            continue;
        };
        let specific = object
            .interactions
            .iter()
            .filter_map(|verb| vocab.verb(verb.as_str()))
            .chain(vocab.verbs().filter(|verb| !verb.applies_to.is_empty()))
            .find(|verb| object.supports(verb) && !verb.requires_indirect_object);
        let verb = specific.or_else(|| vocab.verb("examine"));
        if let Some(verb) = verb {
            push(format!("{} {}", verb.id, object.primary_alias()));
        }
    }

    for verb in vocab.verbs() {
        for example in &verb.examples {
            push(example.clone());
        }
    }

    examples.truncate(limit);
    examples
}

#[cfg(test)]
mod tests {
    use super::*;
    use grue_core::{ObjectKind, ObjectRecord, VocabularySource};

    fn vocab() -> Vocabulary {
        Vocabulary::standard_with(
            VocabularySource::default()
                .with_object(
                    ObjectRecord::new("lamp_brass")
                        .name("brass lamp")
                        .aliases(["lamp", "brass lamp"])
                        .kind(ObjectKind::LightSource)
                        .interactions(["light"]),
                )
                .with_object(
                    ObjectRecord::new("bread")
                        .kind(ObjectKind::Food)
                        .interactions(["eat"]),
                )
                .with_object(ObjectRecord::new("ladder").kind(ObjectKind::Scenery))
                .with_object(ObjectRecord::new("leaflet").aliases(["leaflet"])),
        )
        .unwrap()
    }

    fn kitchen() -> ContextSnapshot {
        ContextSnapshot::new("kitchen")
            .with_visible(["lamp_brass", "bread"])
            .with_known(["leaflet"])
    }

    fn suggest(partial: &str, max: usize) -> Vec<CommandSuggestion> {
        get_command_suggestions(&vocab(), partial, &kitchen(), max, &ParserConfig::default())
    }

    fn is_sorted(suggestions: &[CommandSuggestion]) -> bool {
        suggestions.windows(2).all(|pair| {
            pair[0].relevance > pair[1].relevance
                || (pair[0].relevance == pair[1].relevance
                    && pair[0].sort_key() <= pair[1].sort_key())
        })
    }

    #[test]
    fn canonical_prefix_beats_alias_prefix() {
        let suggestions = suggest("ta", 10);
        assert_eq!(suggestions[0].command, "take");
        assert_eq!(suggestions[0].relevance, 1.0);
        assert!(suggestions.iter().any(|s| s.command == "talk"));
        assert!(is_sorted(&suggestions));
    }

    #[test]
    fn alias_matches_score_lower() {
        let suggestions = suggest("gra", 10);
        let grab = suggestions.iter().find(|s| s.command == "grab").unwrap();
        assert_eq!(grab.relevance, 0.9);
        assert_eq!(grab.verb.as_ref().map(VerbId::as_str), Some("take"));
    }

    #[test]
    fn verb_with_partial_object_completes_the_object() {
        let suggestions = suggest("take la", 10);
        let commands: Vec<&str> = suggestions.iter().map(|s| s.command.as_str()).collect();
        assert!(commands.contains(&"take lamp"));
        assert!(commands.contains(&"take ladder"));
        let lamp = suggestions.iter().find(|s| s.command == "take lamp").unwrap();
        assert!(lamp.available);
        let ladder = suggestions.iter().find(|s| s.command == "take ladder").unwrap();
        assert!(!ladder.available);
        assert!(lamp.relevance > ladder.relevance);
    }

    #[test]
    fn bare_object_names_rank_last() {
        let suggestions = suggest("brea", 10);
        let bread = suggestions.iter().find(|s| s.command == "bread").unwrap();
        assert_eq!(bread.relevance, 0.5);
        assert!(bread.available);
        assert!(bread.verb.is_none());
    }

    #[test]
    fn empty_input_gives_contextual_commands() {
        let vocab = vocab();
        let ctx = kitchen();
        let suggestions = get_command_suggestions(&vocab, "  ", &ctx, 5, &ParserConfig::default());
        assert_eq!(suggestions, get_contextual_commands(&vocab, &ctx, 5));
        assert_eq!(suggestions.len(), 5);
        // Verbs that work on both objects come before "eat" and "light".
        assert_eq!(suggestions[0].relevance, 1.0);
        assert!(suggestions.iter().all(|s| s.available));
        assert!(is_sorted(&suggestions));
    }

    #[test]
    fn contextual_commands_rank_by_object_count() {
        let vocab = vocab();
        let ctx = kitchen();
        let suggestions = get_contextual_commands(&vocab, &ctx, 100);
        let eat = suggestions.iter().find(|s| s.command == "eat bread").unwrap();
        let take = suggestions.iter().find(|s| s.command == "take bread").unwrap();
        assert!(take.relevance > eat.relevance);
        assert!(suggestions.iter().all(|s| s.verb.as_ref().map(VerbId::as_str) != Some("north")));
    }

    #[test]
    fn empty_context_has_no_contextual_commands() {
        let vocab = vocab();
        assert!(get_contextual_commands(&vocab, &ContextSnapshot::default(), 5).is_empty());
    }

    #[test]
    fn verb_help_by_alias() {
        let vocab = vocab();
        let help = get_verb_help(&vocab, "Grab").unwrap();
        insta::assert_snapshot!(help, @r"
        Pick up an object and add it to your inventory.
        Usage: take <object> [from <object>]
        Synonyms: get, grab, carry, pick, pick up, acquire, obtain, hold
        Examples: take lamp; take coin from chest
        ");
        assert!(get_verb_help(&vocab, "frobnicate").is_none());
    }

    #[test]
    fn verb_help_without_help_text_uses_usage() {
        let vocab = vocab();
        let help = get_verb_help(&vocab, "unlock").unwrap();
        insta::assert_snapshot!(help, @r"
        Usage: unlock <object> with <object>
        Examples: unlock grate with key
        ");
    }

    #[test]
    fn examples_start_with_objects_in_reach() {
        let vocab = vocab();
        let examples = get_example_commands(&vocab, &kitchen(), 4);
        assert_eq!(examples.len(), 4);
        assert_eq!(examples[0], "eat bread");
        assert_eq!(examples[1], "light lamp");
        assert!(!examples.iter().any(|e| e.contains("leaflet")));
    }
}
