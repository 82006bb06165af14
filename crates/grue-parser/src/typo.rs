//! Typo correction by Damerau-Levenshtein distance.
//!
//! Verbs are matched against the whole vocabulary. Object words are matched
//! only against the alias words of objects in the player's context.

use std::collections::BTreeSet;

use grue_core::{ContextSnapshot, VerbId, Vocabulary};
use strsim::damerau_levenshtein;

use crate::config::ParserConfig;
use crate::normalize::{expand_abbreviations, tokenize};

/// Candidates kept per misspelt token.
const CANDIDATES_PER_TOKEN: usize = 3;

/// Partial reconstructions kept while combining corrections.
const BEAM_WIDTH: usize = 64;

/// A vocabulary word close to a misspelt token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NearMiss {
    /// Edit distance from the typed token.
    pub distance: usize,
    /// The vocabulary word.
    pub word: String,
}

/// Single-word verb keys within the typo threshold of `token`, closest first.
///
/// Ties are broken alphabetically, so `tke` prefers `take` over `tie`.
pub fn closest_verbs<'v>(
    vocab: &'v Vocabulary,
    token: &str,
    config: &ParserConfig,
) -> Vec<(NearMiss, &'v VerbId)> {
    let limit = config.typo_threshold(token.chars().count());
    let mut found: Vec<(NearMiss, &VerbId)> = vocab
        .verb_keys()
        .filter(|(key, _)| !key.contains(' ') && *key != token)
        .filter_map(|(key, id)| {
            let distance = damerau_levenshtein(token, key);
            (distance <= limit).then(|| {
                (
                    NearMiss {
                        distance,
                        word: key.to_string(),
                    },
                    id,
                )
            })
        })
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

/// Alias words of objects in `ctx` within the typo threshold of `token`.
pub fn closest_object_words(
    vocab: &Vocabulary,
    token: &str,
    ctx: &ContextSnapshot,
    config: &ParserConfig,
) -> Vec<NearMiss> {
    let limit = config.typo_threshold(token.chars().count());
    let words: BTreeSet<&str> = ctx
        .in_scope()
        .into_iter()
        .filter_map(|id| vocab.object(id.as_str()))
        .flat_map(|object| object.tokens().iter().map(String::as_str))
        .collect();
    let mut found: Vec<NearMiss> = words
        .into_iter()
        .filter(|word| *word != token)
        .filter_map(|word| {
            let distance = damerau_levenshtein(token, word);
            (distance <= limit).then(|| NearMiss {
                distance,
                word: word.to_string(),
            })
        })
        .collect();
    found.sort();
    found
}

/// Whether `token` is already a vocabulary word and needs no correction.
pub(crate) fn is_known_word(vocab: &Vocabulary, token: &str, config: &ParserConfig) -> bool {
    config.is_article(token)
        || config.is_conjunction(token)
        || vocab.is_preposition(token)
        || vocab.lookup_verb(token).is_some()
        || token.chars().all(|c| c.is_ascii_digit())
        || vocab.objects().any(|object| object.tokens().contains(token))
}

/// Corrected versions of `input`, best first.
///
/// Every token that fails to resolve is replaced by its closest vocabulary
/// words (verbs for the first token, object words in `ctx` otherwise). The
/// combinations are ranked by total edit distance, then alphabetically.
/// Returns an empty list when nothing needs correcting or the vocabulary is
/// empty.
pub fn suggest_typo_corrections(
    vocab: &Vocabulary,
    input: &str,
    ctx: &ContextSnapshot,
    config: &ParserConfig,
) -> Vec<String> {
    if vocab.is_empty() || config.max_typo_suggestions == 0 {
        return Vec::new();
    }
    let tokens = tokenize(&expand_abbreviations(input, vocab));
    if tokens.is_empty() {
        return Vec::new();
    }

    // Words of a multi-word verb phrase ("pick up") are never corrected.
    let verb_len = (1..=vocab.longest_verb_phrase().min(tokens.len()))
        .rev()
        .find(|&n| vocab.lookup_verb(&tokens[..n].join(" ")).is_some());
    let free_text = verb_len
        .and_then(|n| vocab.lookup_verb(&tokens[..n].join(" ")))
        .is_some_and(|verb| verb.free_text);

    let mut any_corrected = false;
    let options: Vec<Vec<NearMiss>> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let keep = vec![NearMiss {
                distance: 0,
                word: token.clone(),
            }];
            let misses: Vec<NearMiss> = match verb_len {
                Some(n) if i < n => return keep,
                Some(_) if free_text => return keep,
                None if i == 0 && !is_known_word(vocab, token, config) => {
                    closest_verbs(vocab, token, config)
                        .into_iter()
                        .map(|(miss, _)| miss)
                        .collect()
                }
                _ if is_known_word(vocab, token, config) => return keep,
                _ => closest_object_words(vocab, token, ctx, config),
            };
            if misses.is_empty() {
                keep
            } else {
                any_corrected = true;
                dedup_words(misses)
            }
        })
        .collect();

    if !any_corrected {
        return Vec::new();
    }

    let mut beam: Vec<(usize, Vec<String>)> = vec![(0, Vec::new())];
    for choices in &options {
        let mut next = Vec::with_capacity(beam.len() * choices.len());
        for (distance, words) in &beam {
            for choice in choices {
                let mut words = words.clone();
                words.push(choice.word.clone());
                next.push((distance + choice.distance, words));
            }
        }
        next.sort();
        next.truncate(BEAM_WIDTH);
        beam = next;
    }

    let original = tokens.join(" ");
    let mut seen = BTreeSet::new();
    let mut ranked: Vec<(usize, String)> = beam
        .into_iter()
        .map(|(distance, words)| (distance, words.join(" ")))
        .filter(|(_, text)| *text != original)
        .collect();
    ranked.sort();
    ranked
        .into_iter()
        .filter(|(_, text)| seen.insert(text.clone()))
        .map(|(_, text)| text)
        .take(config.max_typo_suggestions)
        .collect()
}

/// Keep each word once (at its smallest distance) and at most a few per token.
fn dedup_words(mut misses: Vec<NearMiss>) -> Vec<NearMiss> {
    misses.sort();
    let mut seen = BTreeSet::new();
    misses.retain(|miss| seen.insert(miss.word.clone()));
    misses.truncate(CANDIDATES_PER_TOKEN);
    misses
}
