//! Verb and object name resolution against the vocabulary and the player's context.

use grue_core::{ContextSnapshot, ObjectId, VerbEntry, VerbId, Vocabulary, normalize_key};
use serde::{Deserialize, Serialize};

/// Shortest phrase tried as a prefix of an object ID.
const MIN_PREFIX_LEN: usize = 3;

/// How an object phrase matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The phrase is an alias, name or ID of the object.
    Exact,
    /// Every word of the phrase appears among the object's alias words.
    TokenSubset,
    /// The phrase starts the object's ID or one of its words.
    Prefix,
}

impl MatchKind {
    /// Whether the match needed anything looser than an exact alias.
    pub fn is_fuzzy(self) -> bool {
        !matches!(self, Self::Exact)
    }
}

/// Outcome of resolving an object phrase within a context.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectResolution {
    /// Exactly one object in reach matched.
    Resolved {
        /// The matched object.
        id: ObjectId,
        /// How it matched.
        via: MatchKind,
    },
    /// Several objects in reach matched at the same step.
    Ambiguous {
        /// The matched objects in ID order.
        candidates: Vec<ObjectId>,
        /// How they matched.
        via: MatchKind,
    },
    /// Nothing in reach matched.
    Unresolved,
}

impl ObjectResolution {
    fn from_matches(mut ids: Vec<ObjectId>, via: MatchKind) -> Self {
        ids.sort();
        ids.dedup();
        match ids.len() {
            0 => Self::Unresolved,
            1 => Self::Resolved {
                id: ids.remove(0),
                via,
            },
            _ => Self::Ambiguous {
                candidates: ids,
                via,
            },
        }
    }

    /// The resolved object, if exactly one matched.
    pub fn resolved(&self) -> Option<&ObjectId> {
        match self {
            Self::Resolved { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Resolve a verb word or phrase to its canonical ID, in any casing.
pub fn resolve_verb<'v>(vocab: &'v Vocabulary, token: &str) -> Option<&'v VerbEntry> {
    vocab.lookup_verb(token)
}

/// Resolve an object phrase among the objects in `ctx`.
///
/// Tries, in order, exact aliases, token subsets of alias words, and
/// prefixes of canonical IDs, stopping at the first step with any match.
/// Objects outside the context are never returned.
pub fn match_object(vocab: &Vocabulary, phrase: &str, ctx: &ContextSnapshot) -> ObjectResolution {
    let key = normalize_key(phrase);
    if key.is_empty() {
        return ObjectResolution::Unresolved;
    }

    let exact: Vec<ObjectId> = vocab
        .objects_named(&key)
        .iter()
        .filter(|id| ctx.contains(id))
        .cloned()
        .collect();
    if !exact.is_empty() {
        tracing::trace!(phrase = %key, matches = exact.len(), "exact object match");
        return ObjectResolution::from_matches(exact, MatchKind::Exact);
    }

    let words: Vec<&str> = key.split(' ').collect();
    let in_scope: Vec<_> = ctx
        .in_scope()
        .into_iter()
        .filter_map(|id| vocab.object(id.as_str()))
        .collect();

    let subset: Vec<ObjectId> = in_scope
        .iter()
        .filter(|object| object.has_all_tokens(words.iter().copied()))
        .map(|object| object.id.clone())
        .collect();
    if !subset.is_empty() {
        tracing::trace!(phrase = %key, matches = subset.len(), "token subset object match");
        return ObjectResolution::from_matches(subset, MatchKind::TokenSubset);
    }

    if key.len() >= MIN_PREFIX_LEN {
        let prefixed: Vec<ObjectId> = in_scope
            .iter()
            .filter(|object| {
                object.id.as_str().starts_with(&key)
                    || object.id.words().any(|w| w.starts_with(&key))
            })
            .map(|object| object.id.clone())
            .collect();
        if !prefixed.is_empty() {
            tracing::trace!(phrase = %key, matches = prefixed.len(), "prefix object match");
            return ObjectResolution::from_matches(prefixed, MatchKind::Prefix);
        }
    }

    ObjectResolution::Unresolved
}

/// Resolve an object phrase to a single object in `ctx`.
///
/// Returns `None` when nothing matches and also when several objects do;
/// use [`resolve_ambiguity`](crate::resolve_ambiguity) to rank those.
pub fn resolve_object(vocab: &Vocabulary, phrase: &str, ctx: &ContextSnapshot) -> Option<ObjectId> {
    match match_object(vocab, phrase, ctx) {
        ObjectResolution::Resolved { id, .. } => Some(id),
        _ => None,
    }
}

/// Objects anywhere in the vocabulary that `phrase` names, ignoring context.
///
/// Used to tell "there is no such thing" apart from "it isn't here".
pub fn locate_globally(vocab: &Vocabulary, phrase: &str) -> Vec<ObjectId> {
    let key = normalize_key(phrase);
    if key.is_empty() {
        return Vec::new();
    }
    let exact = vocab.objects_named(&key);
    if !exact.is_empty() {
        return exact.to_vec();
    }
    let words: Vec<&str> = key.split(' ').collect();
    vocab
        .objects()
        .filter(|object| object.has_all_tokens(words.iter().copied()))
        .map(|object| object.id.clone())
        .collect()
}

/// Verbs that make sense on `object`, if the object is in `ctx`.
pub fn get_valid_verbs<'v>(
    vocab: &'v Vocabulary,
    object: &ObjectId,
    ctx: &ContextSnapshot,
) -> Vec<&'v VerbEntry> {
    if !ctx.contains(object) {
        return Vec::new();
    }
    let Some(entry) = vocab.object(object.as_str()) else {
        return Vec::new();
    };
    vocab.verbs().filter(|verb| entry.supports(verb)).collect()
}

/// Objects in `ctx` that are sensible targets for `verb`, in ID order.
pub fn get_valid_objects(vocab: &Vocabulary, verb: &VerbId, ctx: &ContextSnapshot) -> Vec<ObjectId> {
    ctx.in_scope()
        .into_iter()
        .filter(|id| vocab.is_valid_target(verb, id))
        .cloned()
        .collect()
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
                        .aliases(["lamp", "brass lamp", "lantern"])
                        .kind(ObjectKind::LightSource),
                )
                .with_object(ObjectRecord::new("sword_rusty").aliases(["sword", "rusty sword"]))
                .with_object(ObjectRecord::new("sword_silver").aliases(["sword", "silver sword"]))
                .with_object(ObjectRecord::new("lantern_post").kind(ObjectKind::Scenery))
                .with_object(ObjectRecord::new("bread").kind(ObjectKind::Food)),
        )
        .unwrap()
    }

    #[test]
    fn resolves_verbs_by_alias() {
        let vocab = vocab();
        assert_eq!(resolve_verb(&vocab, "GRAB").unwrap().id.as_str(), "take");
        assert!(resolve_verb(&vocab, "frobnicate").is_none());
    }

    #[test]
    fn exact_alias_within_context() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("hall").with_visible(["lamp_brass"]);
        assert_eq!(
            match_object(&vocab, "Lantern", &ctx),
            ObjectResolution::Resolved {
                id: "lamp_brass".into(),
                via: MatchKind::Exact
            }
        );
    }

    #[test]
    fn token_subset_matches_adjectives_in_any_order() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("hall").with_visible(["lamp_brass"]);
        let resolution = match_object(&vocab, "lamp brass", &ctx);
        assert_eq!(resolution.resolved().map(ObjectId::as_str), Some("lamp_brass"));
        assert!(matches!(
            resolution,
            ObjectResolution::Resolved {
                via: MatchKind::TokenSubset,
                ..
            }
        ));
    }

    #[test]
    fn prefix_of_canonical_id() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("street").with_visible(["lantern_post"]);
        assert_eq!(
            match_object(&vocab, "lant", &ctx),
            ObjectResolution::Resolved {
                id: "lantern_post".into(),
                via: MatchKind::Prefix
            }
        );
        assert_eq!(match_object(&vocab, "la", &ctx), ObjectResolution::Unresolved);
    }

    #[test]
    fn objects_outside_context_do_not_resolve() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("cellar").with_visible(["bread"]);
        assert_eq!(resolve_object(&vocab, "lamp", &ctx), None);
        assert_eq!(locate_globally(&vocab, "lamp"), vec![ObjectId::new("lamp_brass")]);
    }

    #[test]
    fn shared_alias_is_ambiguous() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("armory").with_visible(["sword_rusty", "sword_silver"]);
        assert_eq!(resolve_object(&vocab, "sword", &ctx), None);
        assert_eq!(
            match_object(&vocab, "sword", &ctx),
            ObjectResolution::Ambiguous {
                candidates: vec!["sword_rusty".into(), "sword_silver".into()],
                via: MatchKind::Exact
            }
        );
        assert_eq!(
            resolve_object(&vocab, "rusty sword", &ctx),
            Some(ObjectId::new("sword_rusty"))
        );
    }

    #[test]
    fn valid_verbs_and_objects_follow_applicability() {
        let vocab = vocab();
        let ctx = ContextSnapshot::new("kitchen").with_visible(["bread", "lamp_brass"]);
        let eat = VerbId::new("eat");
        assert_eq!(get_valid_objects(&vocab, &eat, &ctx), vec![ObjectId::new("bread")]);

        let verbs: Vec<&str> = get_valid_verbs(&vocab, &"lamp_brass".into(), &ctx)
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert!(verbs.contains(&"light"));
        assert!(verbs.contains(&"take"));
        assert!(!verbs.contains(&"eat"));
        assert!(get_valid_verbs(&vocab, &"sword_rusty".into(), &ctx).is_empty());
    }
}
