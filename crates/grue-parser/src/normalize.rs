//! Input normalisation, abbreviation expansion and multi-command splitting.
//!
//! Everything here is a pure function of its input.

use grue_core::Vocabulary;

/// Punctuation stripped from the end of a command.
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':'];

/// Trim, lowercase, collapse whitespace and strip terminal punctuation.
///
/// `normalize_input(normalize_input(s)) == normalize_input(s)` for every `s`.
pub fn normalize_input(input: &str) -> String {
    let collapsed = input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .trim_end_matches(|c: char| TERMINAL_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}

/// Normalise `input` and replace every token found in the abbreviation map.
///
/// `"x lamp"` becomes `"examine lamp"` and a lone `"n"` becomes `"north"`.
pub fn expand_abbreviations(input: &str, vocab: &Vocabulary) -> String {
    normalize_input(input)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| vocab.expand_abbreviation(token).unwrap_or(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a line holding several commands into its parts, in order.
///
/// Separators made of letters (`then`) split on whole words only; any other
/// separator (`.`, `;`) splits wherever it occurs. Empty parts are dropped.
pub fn split_commands(input: &str, separators: &[String]) -> Vec<String> {
    let (words, marks): (Vec<&String>, Vec<&String>) = separators
        .iter()
        .partition(|sep| sep.chars().all(char::is_alphanumeric));

    let mut pieces = vec![input.to_string()];
    for mark in marks {
        pieces = pieces
            .iter()
            .flat_map(|piece| piece.split(mark.as_str()))
            .map(str::to_string)
            .collect();
    }

    let mut commands = Vec::new();
    for piece in pieces {
        let mut current: Vec<&str> = Vec::new();
        for word in piece.split_whitespace() {
            if words.iter().any(|sep| sep.eq_ignore_ascii_case(word)) {
                commands.push(current.join(" "));
                current.clear();
            } else {
                current.push(word);
            }
        }
        commands.push(current.join(" "));
    }

    commands.retain(|command| !normalize_input(command).is_empty());
    commands
}

/// Split a command wherever a conjunction is followed by a new verb.
///
/// `open mailbox and take leaflet` becomes two commands, while `take lamp
/// and sword` stays whole because `sword` starts no verb. A word that names
/// an object never starts a new command, so `take lamp and light` stays
/// whole when some object is called `light`.
pub fn split_conjoined(input: &str, conjunctions: &[String], vocab: &Vocabulary) -> Vec<String> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let mut commands = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let lowered = word.to_lowercase();
        if conjunctions.contains(&lowered) && starts_command(&words[i + 1..], vocab) {
            commands.push(current.join(" "));
            current.clear();
        } else {
            current.push(word);
        }
    }
    commands.push(current.join(" "));

    commands.retain(|command| !normalize_input(command).is_empty());
    commands
}

/// Whether `words` open with a verb phrase rather than an object name.
fn starts_command(words: &[&str], vocab: &Vocabulary) -> bool {
    let tokens = tokenize(&expand_abbreviations(&words.join(" "), vocab));
    let Some(first) = tokens.first() else {
        return false;
    };
    if vocab.objects().any(|object| object.tokens().contains(first)) {
        return false;
    }
    let longest = vocab.longest_verb_phrase().min(tokens.len());
    (1..=longest).any(|n| vocab.lookup_verb(&tokens[..n].join(" ")).is_some())
}

/// Split normalised input into word tokens, trimming punctuation around each.
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-')))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop articles from a phrase.
pub fn strip_articles<'a>(words: &[&'a str], is_article: impl Fn(&str) -> bool) -> Vec<&'a str> {
    words.iter().copied().filter(|w| !is_article(w)).collect()
}
