//! Type registry.
//!
//! Every hierarchy level accepts its own vocabulary of type words: full words
//! in several cases ("село", "села", "селе"), abbreviations ("с.", "дер.") and
//! inflection-tolerant patterns ("р-на", "губ."). A [`GeoType`] groups the
//! variants of one canonical type; a [`TypeRegistry`] is the ordered union of
//! the types of one level.
//!
//! Registries do two jobs:
//!
//! - **Recognition** at a cursor position, used by the level productions.
//! - **Normalization** of a matched (type, name) pair to the canonical type and
//!   a nominative, title-cased name, agreeing the name in gender with the type
//!   word when the type was written in a non-canonical form.

#[path = "registry/vocab.rs"]
pub(crate) mod vocab;

use regex::Regex;

use crate::{GeoLevel, is_word_char};
use crate::error::TypeMismatch;
use crate::morph::{Case, Gender, Morphology, PartOfSpeech, inflect_phrase, title_case};

/// One lexical variant of a type word.
#[derive(Debug, Clone, Copy)]
pub enum Lexeme {
    /// Exact text, may be glued to the following word ("г.Москва").
    Literal(&'static str),
    /// Like [`Lexeme::Literal`], ignoring case.
    CaselessLiteral(&'static str),
    /// Exact text that must stand as a separate word.
    Keyword(&'static str),
    /// Like [`Lexeme::Keyword`], ignoring case.
    CaselessKeyword(&'static str),
    /// Pattern anchored with `^`, matched against the input tail.
    Regex(&'static Regex),
}

/// Identifier characters for keyword edges: word characters and `$`.
fn is_keyword_char(c: char) -> bool {
    is_word_char(c) || c == '$'
}

/// Byte length of the prefix of `tail` that equals `word` ignoring case.
fn caseless_prefix(tail: &str, word: &str) -> Option<usize> {
    let n = word.chars().count();
    let end = tail.char_indices().nth(n).map_or(tail.len(), |(i, _)| i);
    if tail[..end].chars().count() == n && tail[..end].to_lowercase() == word.to_lowercase() {
        Some(end)
    } else {
        None
    }
}

impl Lexeme {
    /// Match at byte offset `pos` of `input`, returning the matched length.
    pub fn match_at(&self, input: &str, pos: usize) -> Option<usize> {
        let tail = input.get(pos..)?;
        match *self {
            Lexeme::Literal(word) => tail.starts_with(word).then_some(word.len()),
            Lexeme::CaselessLiteral(word) => caseless_prefix(tail, word),
            Lexeme::Keyword(word) => tail.starts_with(word).then_some(word.len()).filter(|&n| at_word_edges(input, pos, n)),
            Lexeme::CaselessKeyword(word) => caseless_prefix(tail, word).filter(|&n| at_word_edges(input, pos, n)),
            Lexeme::Regex(re) => re.find(tail).filter(|m| m.start() == 0 && !m.is_empty()).map(|m| m.end()),
        }
    }
}

/// Keyword rule: no identifier character directly before or after the match.
fn at_word_edges(input: &str, pos: usize, len: usize) -> bool {
    let before = input[..pos].chars().next_back().is_some_and(is_keyword_char);
    let after = input[pos + len..].chars().next().is_some_and(is_keyword_char);
    !before && !after
}

/// A simple type: the canonical name and all variants that denote it.
#[derive(Debug, Clone)]
pub struct GeoType {
    name: &'static str,
    lexemes: Vec<Lexeme>,
    agree_when_type_first: bool,
}

impl GeoType {
    /// `agree_when_type_first` controls whether a name written after an
    /// inflected type word is still agreed to it. Settlements want this
    /// ("села Пенькова" names село Пеньково); cemeteries and rivers do not
    /// ("кладбища Жуковского" stays кладбище Жуковского).
    pub fn new(name: &'static str, lexemes: Vec<Lexeme>, agree_when_type_first: bool) -> Self {
        GeoType { name, lexemes, agree_when_type_first }
    }

    /// Whitespace separated word forms; the first one is canonical. Every form
    /// is a case-insensitive keyword.
    pub fn from_words(words: &'static str, agree_when_type_first: bool) -> Self {
        let mut forms = words.split_whitespace();
        let name = forms.next().unwrap_or_default();
        let lexemes = std::iter::once(name).chain(forms).map(Lexeme::CaselessKeyword).collect();
        GeoType { name, lexemes, agree_when_type_first }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// First variant (in declaration order) matching at `pos`.
    pub fn match_at(&self, input: &str, pos: usize) -> Option<usize> {
        self.lexemes.iter().find_map(|lex| lex.match_at(input, pos))
    }

    /// Whether the whole of `token` is one of this type's variants.
    pub fn recognizes(&self, token: &str) -> bool {
        self.lexemes.iter().any(|lex| lex.match_at(token, 0) == Some(token.len()))
    }

    /// Canonical (type, name) for a recognized type token, `None` otherwise.
    pub fn normalize(
        &self,
        token: &str,
        name: &str,
        type_first: bool,
        morph: &dyn Morphology,
    ) -> Option<(&'static str, String)> {
        if !self.recognizes(token) {
            return None;
        }
        let mut name = name.to_string();
        if (token != self.name || is_abbreviation(self.name)) && (!type_first || self.agree_when_type_first) {
            let gender = type_gender(self.name, morph);
            name = inflect_phrase(morph, &name, Case::Nominative, Some(gender));
        }
        Some((self.name, title_case(&name)))
    }
}

/// All-caps words (АССР) and words ending with a period (обл.).
fn is_abbreviation(word: &str) -> bool {
    let word = word.trim();
    word.ends_with('.') || (word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase))
}

/// Grammatical gender of a canonical type word.
fn type_gender(canonical: &str, morph: &dyn Morphology) -> Gender {
    match canonical {
        "АССР" | "ССР" | "АО" => return Gender::Feminine,
        "округ" | "починок" => return Gender::Masculine,
        _ => {}
    }
    // "автономная область" -> "область", "поселок/погост/починок" -> "поселок"
    let head = canonical.split_whitespace().next_back().unwrap_or(canonical);
    let head = head.split('/').next().unwrap_or(head);
    morph.gender_of(head, Some(PartOfSpeech::Noun))
}

/// Ordered union of the types accepted at one level.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    level: GeoLevel,
    types: Vec<GeoType>,
}

impl TypeRegistry {
    pub fn new(level: GeoLevel, types: Vec<GeoType>) -> Self {
        TypeRegistry { level, types }
    }

    /// The union of several registries, tried in the given order.
    pub fn union(level: GeoLevel, parts: impl IntoIterator<Item = TypeRegistry>) -> Self {
        TypeRegistry { level, types: parts.into_iter().flat_map(|r| r.types).collect() }
    }

    pub fn level(&self) -> GeoLevel {
        self.level
    }

    pub fn types(&self) -> &[GeoType] {
        &self.types
    }

    /// First member type matching at `pos`, as a byte length.
    pub fn match_at(&self, input: &str, pos: usize) -> Option<usize> {
        self.types.iter().find_map(|t| t.match_at(input, pos))
    }

    pub fn recognizes(&self, token: &str) -> bool {
        self.types.iter().any(|t| t.recognizes(token.trim()))
    }

    /// Normalize a (type, name) pair.
    ///
    /// Without a type token the name is only brought to the nominative case.
    /// Members are tried in declaration order; the first one recognizing the
    /// token wins. A token no member recognizes is a [`TypeMismatch`].
    pub fn normalize(
        &self,
        token: Option<&str>,
        name: &str,
        type_first: bool,
        morph: &dyn Morphology,
    ) -> Result<(Option<String>, String), TypeMismatch> {
        let name = name.trim();
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok((None, title_case(&inflect_phrase(morph, name, Case::Nominative, None))));
        };
        self.types
            .iter()
            .find_map(|t| t.normalize(token, name, type_first, morph))
            .map(|(kind, name)| (Some(kind.to_string()), name))
            .ok_or_else(|| TypeMismatch { level: self.level, token: token.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::SuffixMorphology;

    fn plant() -> GeoType {
        GeoType::from_words("завод завода заводе", false)
    }

    fn village() -> GeoType {
        GeoType::from_words("село села селе", true)
    }

    fn norm(t: &GeoType, token: &str, name: &str, type_first: bool) -> Option<(&'static str, String)> {
        t.normalize(token, name, type_first, &SuffixMorphology)
    }

    #[test]
    fn canonical_type_keeps_the_name() {
        let exp = Some(("завод", "Ивановский".to_string()));
        assert_eq!(norm(&plant(), "завод", "Ивановский", true), exp);
        assert_eq!(norm(&plant(), "завод", "Ивановский", false), exp);
    }

    #[test]
    fn agreement_depends_on_type_position() {
        assert_eq!(norm(&plant(), "завода", "Ивановского", false), Some(("завод", "Ивановский".to_string())));
        assert_eq!(norm(&plant(), "завода", "Ивановского", true), Some(("завод", "Ивановского".to_string())));
        assert_eq!(norm(&village(), "села", "Глинного", true), Some(("село", "Глинное".to_string())));
        assert_eq!(norm(&village(), "селе", "Глинном", false), Some(("село", "Глинное".to_string())));
    }

    #[test]
    fn foreign_type_is_rejected() {
        assert_eq!(norm(&plant(), "село", "Ивановского", true), None);
        assert_eq!(norm(&village(), "завод", "Ивановского", true), None);
    }

    #[test]
    fn registry_tries_members_in_order() {
        let reg = TypeRegistry::new(GeoLevel::Town, vec![plant(), village()]);
        let m = SuffixMorphology;
        assert_eq!(
            reg.normalize(Some("села"), "Гусевка", true, &m),
            Ok((Some("село".to_string()), "Гусевка".to_string()))
        );
        assert_eq!(
            reg.normalize(Some("заводе"), "Уфимскому", true, &m),
            Ok((Some("завод".to_string()), "Уфимскому".to_string()))
        );
        assert_eq!(
            reg.normalize(Some("абра"), "кадабра", true, &m),
            Err(TypeMismatch { level: GeoLevel::Town, token: "абра".to_string() })
        );
    }

    #[test]
    fn missing_type_only_changes_case() {
        let reg = TypeRegistry::new(GeoLevel::Town, vec![village()]);
        assert_eq!(
            reg.normalize(None, " Ивановки ", false, &SuffixMorphology),
            Ok((None, "Ивановка".to_string()))
        );
    }

    #[test]
    fn lexeme_kinds() {
        assert_eq!(Lexeme::Literal("г.").match_at("г.Москва", 0), Some("г.".len()));
        assert_eq!(Lexeme::Literal("г.").match_at("Г.Москва", 0), None);
        assert_eq!(Lexeme::CaselessLiteral("дер.").match_at("Дер. Ивановка", 0), Some("дер.".len()));
        assert_eq!(Lexeme::CaselessKeyword("г").match_at("г Москва", 0), Some("г".len()));
        assert_eq!(Lexeme::CaselessKeyword("г").match_at("гора", 0), None);
        assert_eq!(Lexeme::Keyword("р.").match_at("Ивановского р. ", "Ивановского ".len()), Some("р.".len()));
        assert_eq!(Lexeme::Keyword("р.").match_at("хр.", "х".len()), None);
        assert_eq!(Lexeme::Keyword("г").match_at("г$", 0), None);
        assert_eq!(Lexeme::Keyword("г").match_at("$г", "$".len()), None);
        assert_eq!(re!(r"^район(а|е)?\b").match_at("в районе Москвы", "в ".len()), Some("районе".len()));
    }

    #[test]
    fn abbreviations() {
        assert!(is_abbreviation("АССР"));
        assert!(is_abbreviation("обл."));
        assert!(!is_abbreviation("область"));
        assert!(!is_abbreviation("ж.-д. станция"));
    }
}
