//! Tunable constants for ambiguity scoring, typo tolerance and confidence.

use serde::{Deserialize, Serialize};

use crate::error::ParserResult;

/// Weights combined into an ambiguity candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbiguityWeights {
    /// Weight for the candidate being carried by the player.
    pub inventory: f64,
    /// Weight for the candidate being mentioned in the last command.
    pub recency: f64,
    /// Weight for the matched words being specific to the candidate.
    pub specificity: f64,
}

impl Default for AmbiguityWeights {
    fn default() -> Self {
        Self {
            inventory: 0.5,
            recency: 0.3,
            specificity: 0.2,
        }
    }
}

/// Amounts subtracted from a parse's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePenalties {
    /// The verb was only found through typo correction.
    pub typo_verb: f64,
    /// An object matched by token subset or ID prefix instead of an exact alias.
    pub fuzzy_object: f64,
    /// Ceiling of the ambiguity penalty, scaled by `1 - top probability`.
    pub ambiguity_max: f64,
    /// An object phrase resolved to nothing in reach.
    pub unresolved_object: f64,
}

impl Default for ConfidencePenalties {
    fn default() -> Self {
        Self {
            typo_verb: 0.3,
            fuzzy_object: 0.2,
            ambiguity_max: 0.4,
            unresolved_object: 0.5,
        }
    }
}

/// Configuration for a [`CommandParser`](crate::CommandParser).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Probability the top ambiguity candidate must exceed to be picked.
    pub acceptance_threshold: f64,
    /// Ambiguity scoring weights.
    pub weights: AmbiguityWeights,
    /// Confidence penalties.
    pub penalties: ConfidencePenalties,
    /// A token of length `n` tolerates `n / divisor` edits.
    pub typo_length_divisor: usize,
    /// Edits tolerated regardless of token length.
    pub typo_min_distance: usize,
    /// Maximum number of typo corrections returned.
    pub max_typo_suggestions: usize,
    /// Maximum number of alternative parses kept on a command.
    pub max_alternatives: usize,
    /// Marks and words that separate several commands on one line.
    pub separators: Vec<String>,
    /// Words dropped from object phrases.
    pub articles: Vec<String>,
    /// Words joining object phrases (`take lamp and sword`), or whole
    /// commands when a verb follows (`open mailbox and take leaflet`).
    pub conjunctions: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.6,
            weights: AmbiguityWeights::default(),
            penalties: ConfidencePenalties::default(),
            typo_length_divisor: 4,
            typo_min_distance: 1,
            max_typo_suggestions: 5,
            max_alternatives: 4,
            separators: [".", ";", "then"].map(String::from).to_vec(),
            articles: ["the", "a", "an", "some", "any"].map(String::from).to_vec(),
            conjunctions: vec!["and".to_string()],
        }
    }
}

impl ParserConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration document.
    ///
    /// Missing fields keep their defaults; out-of-range values are clamped.
    pub fn from_json(json: &str) -> ParserResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Set the ambiguity acceptance threshold (clamped to `0.0..=1.0`).
    pub fn with_acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self.clamped()
    }

    /// Set the ambiguity weights (negative weights become zero).
    pub fn with_weights(mut self, weights: AmbiguityWeights) -> Self {
        self.weights = weights;
        self.clamped()
    }

    /// Set the confidence penalties (clamped to `0.0..=1.0`).
    pub fn with_penalties(mut self, penalties: ConfidencePenalties) -> Self {
        self.penalties = penalties;
        self.clamped()
    }

    /// Set the typo tolerance: `max(min_distance, len / divisor)` edits.
    pub fn with_typo_tolerance(mut self, divisor: usize, min_distance: usize) -> Self {
        self.typo_length_divisor = divisor;
        self.typo_min_distance = min_distance;
        self.clamped()
    }

    /// Set how many typo corrections are returned.
    pub fn with_max_typo_suggestions(mut self, max: usize) -> Self {
        self.max_typo_suggestions = max;
        self
    }

    /// Set how many alternative parses a command keeps.
    pub fn with_max_alternatives(mut self, max: usize) -> Self {
        self.max_alternatives = max;
        self
    }

    /// Replace the command separators.
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the article filter.
    pub fn with_articles<I, S>(mut self, articles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.articles = articles.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the conjunctions.
    pub fn with_conjunctions<I, S>(mut self, conjunctions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conjunctions = conjunctions.into_iter().map(Into::into).collect();
        self.clamped()
    }

    /// Whether `word` joins two object phrases or two commands.
    pub fn is_conjunction(&self, word: &str) -> bool {
        self.conjunctions.iter().any(|c| c == word)
    }

    /// Whether `word` is an article dropped from object phrases.
    pub fn is_article(&self, word: &str) -> bool {
        self.articles.iter().any(|a| a == word)
    }

    /// Largest edit distance tolerated for a token of `len` characters.
    pub fn typo_threshold(&self, len: usize) -> usize {
        self.typo_min_distance.max(len / self.typo_length_divisor)
    }

    fn clamped(mut self) -> Self {
        self.acceptance_threshold = unit(self.acceptance_threshold);
        self.weights.inventory = non_negative(self.weights.inventory);
        self.weights.recency = non_negative(self.weights.recency);
        self.weights.specificity = non_negative(self.weights.specificity);
        self.penalties.typo_verb = unit(self.penalties.typo_verb);
        self.penalties.fuzzy_object = unit(self.penalties.fuzzy_object);
        self.penalties.ambiguity_max = unit(self.penalties.ambiguity_max);
        self.penalties.unresolved_object = unit(self.penalties.unresolved_object);
        self.typo_length_divisor = self.typo_length_divisor.max(1);
        self.separators.retain(|s| !s.trim().is_empty());
        self.articles = self.articles.iter().map(|a| a.trim().to_lowercase()).collect();
        self.conjunctions = self
            .conjunctions
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
