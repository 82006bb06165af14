//! Assembly of resolved words into a [`ParsedCommand`] with a confidence score.
//!
//! The grammar is `VERB [DIRECT_OBJECT] [PREPOSITION INDIRECT_OBJECT]`.

use grue_core::{ContextSnapshot, ObjectId, VerbCategory, VerbEntry, Vocabulary};

use crate::ambiguity::rank_candidates;
use crate::command::{Correction, Direction, ObjectRef, ParsedCommand};
use crate::config::ParserConfig;
use crate::normalize::{expand_abbreviations, strip_articles, tokenize};
use crate::resolver::{ObjectResolution, locate_globally, match_object};
use crate::typo::{closest_verbs, is_known_word};

/// The words of a command split into its grammatical parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause<'t> {
    /// Object phrase after the verb, articles removed.
    pub direct: Vec<&'t str>,
    /// The preposition, if one valid for the verb was found.
    pub preposition: Option<&'t str>,
    /// Object phrase after the preposition, articles removed.
    pub indirect: Vec<&'t str>,
}

/// Greedily match the longest verb phrase at the start of `tokens`.
///
/// Returns the verb and how many tokens it used.
pub fn match_verb<'v>(vocab: &'v Vocabulary, tokens: &[String]) -> Option<(&'v VerbEntry, usize)> {
    let longest = vocab.longest_verb_phrase().min(tokens.len());
    (1..=longest)
        .rev()
        .find_map(|n| vocab.lookup_verb(&tokens[..n].join(" ")).map(|verb| (verb, n)))
}

/// Split the words after the verb at the first preposition the verb accepts.
///
/// A preposition straight after the verb (`look under rug`) qualifies the
/// verb and the rest is the direct object.
pub fn split_clause<'t>(verb: &VerbEntry, rest: &'t [String], config: &ParserConfig) -> Clause<'t> {
    let words: Vec<&str> = rest.iter().map(String::as_str).collect();
    let split = if verb.accepts_indirect_object {
        words.iter().position(|w| verb.accepts_preposition(w))
    } else {
        None
    };
    let is_article = |w: &str| config.is_article(w);

    match split {
        Some(0) => Clause {
            direct: strip_articles(&words[1..], is_article),
            preposition: Some(words[0]),
            indirect: Vec::new(),
        },
        Some(i) => Clause {
            direct: strip_articles(&words[..i], is_article),
            preposition: Some(words[i]),
            indirect: strip_articles(&words[i + 1..], is_article),
        },
        None => Clause {
            direct: strip_articles(&words, is_article),
            preposition: None,
            indirect: Vec::new(),
        },
    }
}

/// Whether `input` is well formed, without looking at any context.
///
/// The verb must resolve without typo correction, required objects must be
/// present and intransitive verbs must stand alone.
pub fn is_valid_syntax(vocab: &Vocabulary, config: &ParserConfig, input: &str) -> bool {
    let tokens = tokenize(&expand_abbreviations(input, vocab));
    let Some((verb, used)) = match_verb(vocab, &tokens) else {
        return false;
    };
    let clause = split_clause(verb, &tokens[used..], config);

    if verb.intransitive {
        return clause.direct.is_empty() && clause.preposition.is_none();
    }
    if verb.requires_object && clause.direct.is_empty() {
        return false;
    }
    // "look under", "take coin from"
    if clause.preposition.is_some() && tokens.last().map(String::as_str) == clause.preposition {
        return false;
    }
    if verb.requires_indirect_object && (clause.preposition.is_none() || clause.indirect.is_empty())
    {
        return false;
    }
    true
}

/// A resolved object slot with its confidence cost and the readings it passed over.
struct Slot {
    object: ObjectRef,
    penalty: f64,
    others: Vec<(ObjectId, f64)>,
}

fn resolve_slot(
    vocab: &Vocabulary,
    config: &ParserConfig,
    words: &[&str],
    ctx: &ContextSnapshot,
    last: Option<&ParsedCommand>,
    free_text: bool,
) -> Option<Slot> {
    if words.is_empty() {
        return None;
    }
    let phrase = words.join(" ");
    if free_text {
        return Some(Slot {
            object: ObjectRef::Text { text: phrase },
            penalty: 0.0,
            others: Vec::new(),
        });
    }

    let penalties = &config.penalties;
    let slot = match match_object(vocab, &phrase, ctx) {
        ObjectResolution::Resolved { id, via } => Slot {
            object: ObjectRef::Resolved { id },
            penalty: if via.is_fuzzy() { penalties.fuzzy_object } else { 0.0 },
            others: Vec::new(),
        },
        ObjectResolution::Ambiguous { candidates, via } => {
            let ranked = rank_candidates(vocab, &phrase, &candidates, ctx, last, &config.weights);
            let base = if via.is_fuzzy() { penalties.fuzzy_object } else { 0.0 };
            let cost = |p: f64| base + penalties.ambiguity_max * (1.0 - p);
            let top = ranked[0].clone();
            if top.probability > config.acceptance_threshold {
                Slot {
                    object: ObjectRef::Resolved { id: top.object_id },
                    penalty: cost(top.probability),
                    others: ranked[1..]
                        .iter()
                        .map(|c| (c.object_id.clone(), cost(c.probability)))
                        .collect(),
                }
            } else {
                Slot {
                    others: ranked
                        .iter()
                        .map(|c| (c.object_id.clone(), cost(c.probability)))
                        .collect(),
                    penalty: cost(top.probability),
                    object: ObjectRef::Ambiguous {
                        phrase,
                        candidates: ranked,
                    },
                }
            }
        }
        ObjectResolution::Unresolved => Slot {
            object: ObjectRef::Unresolved { phrase },
            penalty: penalties.unresolved_object,
            others: Vec::new(),
        },
    };
    Some(slot)
}

/// Split a direct-object phrase at its conjunctions (`lamp and sword`).
///
/// A phrase naming some object as a whole (`salt and pepper`) stays whole.
fn object_phrases<'t>(vocab: &Vocabulary, config: &ParserConfig, words: &[&'t str]) -> Vec<Vec<&'t str>> {
    if !words.iter().any(|w| config.is_conjunction(w))
        || !locate_globally(vocab, &words.join(" ")).is_empty()
    {
        return vec![words.to_vec()];
    }
    words
        .split(|w| config.is_conjunction(w))
        .filter(|part| !part.is_empty())
        .map(|part| part.to_vec())
        .collect()
}

fn score(penalties: &[f64]) -> f64 {
    (1.0 - penalties.iter().sum::<f64>()).clamp(0.0, 1.0)
}

/// Parse one command.
///
/// Never fails: input without a recognisable verb comes back with no verb
/// and confidence 0.0.
pub fn assemble(
    vocab: &Vocabulary,
    config: &ParserConfig,
    input: &str,
    ctx: &ContextSnapshot,
    last: Option<&ParsedCommand>,
) -> ParsedCommand {
    let normalized = expand_abbreviations(input, vocab);
    let tokens = tokenize(&normalized);
    let mut command = ParsedCommand::unrecognized(input, normalized.clone());
    if tokens.is_empty() {
        return command;
    }

    let mut verb_penalty = 0.0;
    let (mut verb, used) = match match_verb(vocab, &tokens) {
        Some(found) => found,
        None => {
            // "the lamp", "to north"
            if is_known_word(vocab, &tokens[0], config) {
                tracing::debug!(input = %normalized, "input starts with a non-verb word");
                return command;
            }
            let Some((miss, id)) = closest_verbs(vocab, &tokens[0], config).into_iter().next() else {
                tracing::debug!(input = %normalized, "no verb found");
                return command;
            };
            let Some(verb) = vocab.verb(id.as_str()) else {
                return command;
            };
            verb_penalty = config.penalties.typo_verb;
            command.corrections.push(Correction {
                from: tokens[0].clone(),
                to: miss.word,
            });
            (verb, 1)
        }
    };
    command.verb_phrase = Some(tokens[..used].join(" "));

    let mut clause = split_clause(verb, &tokens[used..], config);

    // "go north" and "walk to north" mean "north".
    if verb.category == VerbCategory::Movement
        && matches!(clause.preposition, None | Some("to" | "toward"))
        && clause.indirect.is_empty()
        && clause.direct.len() == 1
    {
        let target = Direction::parse(clause.direct[0]).and_then(|d| vocab.verb(d.name()));
        if let Some(target) = target.filter(|t| t.id != verb.id) {
            verb = target;
            clause.direct.clear();
            clause.preposition = None;
        }
    }

    command.verb = Some(verb.id.clone());
    command.preposition = clause.preposition.map(str::to_string);

    let mut phrases = if verb.free_text {
        vec![clause.direct.clone()]
    } else {
        object_phrases(vocab, config, &clause.direct)
    }
    .into_iter();
    let first = phrases.next().unwrap_or_default();
    let direct = resolve_slot(vocab, config, &first, ctx, last, verb.free_text);
    let extra: Vec<Slot> = phrases
        .filter_map(|words| resolve_slot(vocab, config, &words, ctx, last, false))
        .collect();
    let indirect = resolve_slot(vocab, config, &clause.indirect, ctx, last, false);
    let direct_penalty = direct.as_ref().map_or(0.0, |s| s.penalty);
    let extra_penalty: f64 = extra.iter().map(|s| s.penalty).sum();
    let indirect_penalty = indirect.as_ref().map_or(0.0, |s| s.penalty);

    command.confidence = score(&[verb_penalty, direct_penalty, extra_penalty, indirect_penalty]);
    command.additional_objects = extra.into_iter().map(|s| s.object).collect();

    let mut alternatives = Vec::new();
    if let Some(slot) = &direct {
        for (id, penalty) in &slot.others {
            let mut alternative = command.clone();
            alternative.direct_object = Some(ObjectRef::Resolved { id: id.clone() });
            alternative.indirect_object = indirect.as_ref().map(|s| s.object.clone());
            alternative.confidence = score(&[verb_penalty, *penalty, extra_penalty, indirect_penalty]);
            alternatives.push(alternative);
        }
    }
    if let Some(slot) = &indirect {
        for (id, penalty) in &slot.others {
            let mut alternative = command.clone();
            alternative.direct_object = direct.as_ref().map(|s| s.object.clone());
            alternative.indirect_object = Some(ObjectRef::Resolved { id: id.clone() });
            alternative.confidence = score(&[verb_penalty, direct_penalty, extra_penalty, *penalty]);
            alternatives.push(alternative);
        }
    }
    alternatives.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    alternatives.truncate(config.max_alternatives);

    command.direct_object = direct.map(|s| s.object);
    command.indirect_object = indirect.map(|s| s.object);
    command.alternatives = alternatives;

    tracing::debug!(
        input = %normalized,
        verb = %verb.id,
        confidence = command.confidence,
        alternatives = command.alternatives.len(),
        "assembled command"
    );
    command
}
