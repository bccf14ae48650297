//! Morphological service.
//!
//! The grammar never inspects word forms itself: it asks a [`Morphology`]
//! implementation for a word's case or gender and for re-inflected forms. The
//! service is injected into the grammar at construction time, so tests can
//! swap in a deterministic fake.
//!
//! Every operation degrades gracefully. A word the analyzer does not know is
//! returned unchanged, and an unknown gender is reported as neuter.
//!
//! Phrase-level helpers (`inflect_phrase`, `title_case`) live here as well:
//! geographic names are multi-word and hyphenated ("Ростов-на-Дону",
//! "Нижнего Новгорода"), while the service works on single words.

#[path = "morph/suffix.rs"]
mod suffix;

pub use suffix::SuffixMorphology;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Case {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Instrumental,
    Locative,
}

impl Case {
    pub const ALL: [Case; 6] =
        [Case::Nominative, Case::Genitive, Case::Dative, Case::Accusative, Case::Instrumental, Case::Locative];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
}

/// Word-level morphological analysis and synthesis.
///
/// Implementations must be safe to call concurrently: one grammar value is
/// shared by every parse in the process.
pub trait Morphology: Send + Sync {
    /// Grammatical case of the most likely reading of `word`.
    fn case_of(&self, word: &str) -> Option<Case>;

    /// Gender of `word`, restricted to readings of `pos` when given.
    /// Falls back to [`Gender::Neuter`] when the word cannot be analyzed.
    fn gender_of(&self, word: &str, pos: Option<PartOfSpeech>) -> Gender;

    /// `word` re-inflected into `case`; unchanged when analysis fails.
    fn inflect(&self, word: &str, case: Case) -> String;

    /// `word` re-inflected into `case` agreeing with `gender`. Degrades to
    /// [`Morphology::inflect`] when no reading can take the gender.
    fn inflect_with_gender(&self, word: &str, case: Case, gender: Gender) -> String;
}

/// A service that knows no words at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMorphology;

impl Morphology for IdentityMorphology {
    fn case_of(&self, _word: &str) -> Option<Case> {
        None
    }

    fn gender_of(&self, _word: &str, _pos: Option<PartOfSpeech>) -> Gender {
        Gender::Neuter
    }

    fn inflect(&self, word: &str, _case: Case) -> String {
        word.to_string()
    }

    fn inflect_with_gender(&self, word: &str, _case: Case, _gender: Gender) -> String {
        word.to_string()
    }
}

// --- Phrase helpers -----------------------------------------------------------

/// Hyphen-linked prepositions inside compound names: Ростов-на-Дону.
const LINKING_PREPOSITIONS: &[&str] = &["на", "в"];

fn is_linking(segment: &str) -> bool {
    LINKING_PREPOSITIONS.contains(&segment)
}

/// Tokens that must never be re-inflected: ordinals (2-й), honorific
/// abbreviations (Б., С.-) and all-caps abbreviations (АССР).
fn is_frozen(token: &str) -> bool {
    token.is_empty()
        || token.ends_with('.')
        || token.starts_with(|c: char| c.is_ascii_digit())
        || !token.chars().any(char::is_lowercase)
}

fn inflect_word(morph: &dyn Morphology, word: &str, case: Case, gender: Option<Gender>) -> String {
    if is_frozen(word) {
        return word.to_string();
    }
    match gender {
        Some(g) => morph.inflect_with_gender(word, case, g),
        None => morph.inflect(word, case),
    }
}

fn inflect_compound(morph: &dyn Morphology, word: &str, case: Case, gender: Option<Gender>) -> String {
    if is_frozen(word) || !word.contains('-') {
        return inflect_word(morph, word, case, gender);
    }
    let mut segments: Vec<String> = word.split('-').map(str::to_string).collect();
    let head = if segments.iter().any(|s| is_linking(s)) { 0 } else { segments.len() - 1 };
    segments[head] = inflect_word(morph, &segments[head], case, gender);
    segments.join("-")
}

/// A plural adjective followed by a plural noun: Большие Поляны, Красные Горки.
fn is_plural_nominative(words: &[&str]) -> bool {
    words.windows(2).any(|pair| {
        let adjective = pair[0].to_lowercase();
        let noun = pair[1].to_lowercase();
        (adjective.ends_with("ые") || adjective.ends_with("ие")) && (noun.ends_with('ы') || noun.ends_with('и'))
    })
}

/// Inflect every word of a (possibly multi-word) name.
///
/// Plural names are already nominative when they look it and are returned
/// unchanged in that case; the service only knows singular paradigms.
pub(crate) fn inflect_phrase(morph: &dyn Morphology, phrase: &str, case: Case, gender: Option<Gender>) -> String {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if case == Case::Nominative && is_plural_nominative(&words) {
        return words.join(" ");
    }
    words.iter().map(|w| inflect_compound(morph, w, case, gender)).collect::<Vec<_>>().join(" ")
}

/// Surface forms of a dictionary entry in each requested case.
pub(crate) fn expand_forms(morph: &dyn Morphology, entry: &str, cases: &[Case]) -> Vec<String> {
    cases.iter().map(|&case| inflect_phrase(morph, entry, case, None)).collect()
}

/// Capitalize every word and hyphen segment of a name.
///
/// Linking prepositions stay lowercase (Ростов-на-Дону), segments that start
/// with a digit keep their suffix (2-й), and all-caps abbreviations are left
/// untouched (АССР).
pub(crate) fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut after_digit = false;
            word.split('-')
                .map(|segment| {
                    let lower = segment.to_lowercase();
                    let out = if after_digit || is_linking(&lower) {
                        lower
                    } else if segment.chars().filter(|c| c.is_alphabetic()).count() > 1
                        && !segment.chars().any(char::is_lowercase)
                    {
                        segment.to_string()
                    } else {
                        capitalize(&lower)
                    };
                    after_digit = segment.chars().last().is_some_and(|c| c.is_ascii_digit());
                    out
                })
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
