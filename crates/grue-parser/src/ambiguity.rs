//! Ranking of objects that share a name.
//!
//! Each candidate gets a weighted score from three signals:
//!
//! - **inventory**: the player is carrying it;
//! - **recency**: the last command resolved to it;
//! - **specificity**: few of its aliases contain the words typed, so the
//!   phrase points at it more sharply.
//!
//! Scores are normalised into probabilities that sum to 1.0. When every
//! score is zero the candidates share the probability equally.

use grue_core::{ContextSnapshot, ObjectId, Reach, Vocabulary, normalize_key};
use serde::{Deserialize, Serialize};

use crate::command::ParsedCommand;
use crate::config::AmbiguityWeights;
use crate::resolver::{ObjectResolution, match_object};

/// One object a phrase could refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityCandidate {
    /// The candidate object.
    pub object_id: ObjectId,
    /// Display name of the object.
    pub display_name: String,
    /// Where the object is, e.g. "in your inventory".
    pub context: String,
    /// Probability that the player meant this object.
    pub probability: f64,
}

/// Rank `candidates` for `phrase`, most probable first.
///
/// Ties keep ID order.
pub fn rank_candidates(
    vocab: &Vocabulary,
    phrase: &str,
    candidates: &[ObjectId],
    ctx: &ContextSnapshot,
    last: Option<&ParsedCommand>,
    weights: &AmbiguityWeights,
) -> Vec<AmbiguityCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let key = normalize_key(phrase);
    let words: Vec<&str> = key.split(' ').filter(|w| !w.is_empty()).collect();

    let mut ids = candidates.to_vec();
    ids.sort();
    ids.dedup();

    let scores: Vec<f64> = ids
        .iter()
        .map(|id| {
            let reach = ctx.reach(id);
            let inventory = if reach == Some(Reach::Inventory) { 1.0 } else { 0.0 };
            let recency = if last.is_some_and(|cmd| cmd.mentions(id)) { 1.0 } else { 0.0 };
            let sharing = vocab
                .object(id.as_str())
                .map_or(0, |object| object.aliases_sharing(&words));
            let specificity = 1.0 / sharing.max(1) as f64;
            weights.inventory * inventory
                + weights.recency * recency
                + weights.specificity * specificity
        })
        .collect();

    let total: f64 = scores.iter().sum();
    let uniform = 1.0 / ids.len() as f64;

    let mut ranked: Vec<AmbiguityCandidate> = ids
        .into_iter()
        .zip(scores)
        .map(|(id, score)| {
            let probability = if total > 0.0 { score / total } else { uniform };
            let display_name = vocab
                .object(id.as_str())
                .map_or_else(|| id.to_string(), |object| object.name.clone());
            let context = ctx
                .reach(&id)
                .map_or("nowhere in reach", Reach::descriptor)
                .to_string();
            AmbiguityCandidate {
                object_id: id,
                display_name,
                context,
                probability,
            }
        })
        .collect();

    // Stable sort keeps ID order among equal probabilities.
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    tracing::trace!(
        phrase = %key,
        top = %ranked[0].object_id,
        probability = ranked[0].probability,
        "ranked ambiguity candidates"
    );
    ranked
}

/// Rank every object in `ctx` that `phrase` could refer to.
///
/// A phrase naming exactly one object yields that object with probability
/// 1.0; a phrase naming nothing yields an empty list.
pub fn resolve_ambiguity(
    vocab: &Vocabulary,
    phrase: &str,
    ctx: &ContextSnapshot,
    last: Option<&ParsedCommand>,
    weights: &AmbiguityWeights,
) -> Vec<AmbiguityCandidate> {
    match match_object(vocab, phrase, ctx) {
        ObjectResolution::Ambiguous { candidates, .. } => {
            rank_candidates(vocab, phrase, &candidates, ctx, last, weights)
        }
        ObjectResolution::Resolved { id, .. } => {
            rank_candidates(vocab, phrase, &[id], ctx, last, weights)
        }
        ObjectResolution::Unresolved => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ObjectRef;
    use grue_core::{ObjectRecord, VocabularySource};

    fn vocab() -> Vocabulary {
        Vocabulary::build(
            VocabularySource::default()
                .with_object(ObjectRecord::new("sword_rusty").aliases(["sword", "rusty sword"]))
                .with_object(ObjectRecord::new("sword_silver").aliases([
                    "sword",
                    "silver sword",
                    "shiny sword",
                ]))
                .with_object(ObjectRecord::new("sword_wooden").aliases(["sword", "wooden sword"])),
        )
        .unwrap()
    }

    fn armory() -> ContextSnapshot {
        ContextSnapshot::new("armory").with_visible(["sword_rusty", "sword_wooden"])
    }

    fn total(candidates: &[AmbiguityCandidate]) -> f64 {
        candidates.iter().map(|c| c.probability).sum()
    }

    #[test]
    fn equal_weights_split_evenly_in_id_order() {
        let vocab = vocab();
        let ranked = resolve_ambiguity(&vocab, "sword", &armory(), None, &AmbiguityWeights::default());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].object_id.as_str(), "sword_rusty");
        assert_eq!(ranked[1].object_id.as_str(), "sword_wooden");
        assert!((ranked[0].probability - 0.5).abs() < 1e-9);
        assert!((total(&ranked) - 1.0).abs() < 1e-6);
        assert_eq!(ranked[0].context, "in the room");
    }

    #[test]
    fn inventory_outweighs_the_room() {
        let vocab = vocab();
        let ctx = armory().with_inventory(["sword_wooden"]);
        let ranked = resolve_ambiguity(&vocab, "sword", &ctx, None, &AmbiguityWeights::default());
        assert_eq!(ranked[0].object_id.as_str(), "sword_wooden");
        assert_eq!(ranked[0].context, "in your inventory");
        // (0.5 + 0.1) / (0.5 + 0.1 + 0.1)
        assert!((ranked[0].probability - 6.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn last_command_makes_a_candidate_more_likely() {
        let vocab = vocab();
        let last = ParsedCommand {
            verb: Some("examine".into()),
            direct_object: Some(ObjectRef::Resolved {
                id: "sword_wooden".into(),
            }),
            confidence: 1.0,
            ..ParsedCommand::default()
        };
        let ranked = resolve_ambiguity(
            &vocab,
            "sword",
            &armory(),
            Some(&last),
            &AmbiguityWeights::default(),
        );
        assert_eq!(ranked[0].object_id.as_str(), "sword_wooden");
        assert!(ranked[0].probability > ranked[1].probability);
    }

    #[test]
    fn specific_words_favour_fewer_sharing_aliases() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("armory").with_visible(["sword_rusty", "sword_silver"]);
        let ranked = rank_candidates(
            &vocab,
            "sword",
            &["sword_silver".into(), "sword_rusty".into()],
            &ctx,
            None,
            &AmbiguityWeights::default(),
        );
        // rusty shares "sword" with 2 aliases, silver with 3.
        assert_eq!(ranked[0].object_id.as_str(), "sword_rusty");
        assert!((total(&ranked) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let vocab = vocab();
        let weights = AmbiguityWeights {
            inventory: 0.0,
            recency: 0.0,
            specificity: 0.0,
        };
        let ranked = resolve_ambiguity(&vocab, "sword", &armory(), None, &weights);
        assert!(ranked.iter().all(|c| (c.probability - 0.5).abs() < 1e-9));
    }

    #[test]
    fn single_and_missing_matches() {
        let vocab = vocab();
        let ranked = resolve_ambiguity(
            &vocab,
            "rusty sword",
            &armory(),
            None,
            &AmbiguityWeights::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].probability, 1.0);
        assert!(
            resolve_ambiguity(&vocab, "axe", &armory(), None, &AmbiguityWeights::default())
                .is_empty()
        );
    }
}
