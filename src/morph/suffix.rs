//! Ending-table analyzer for singular Russian nouns and adjectives.
//!
//! This is a small, deterministic stand-in for a dictionary-backed analyzer.
//! A word is analyzed by splitting off up to three trailing letters and asking
//! every paradigm whether the remaining stem regenerates the word for some
//! (case, gender). Readings come out in paradigm order (adjectives first, then
//! feminine, masculine and neuter nouns) and within a paradigm nominative
//! first, which is the preference order used when a word is ambiguous.
//!
//! Coverage is aimed at toponyms: "Рязанской" (adjective), "Ивановки"
//! (feminine -а), "Курска" (masculine), "Пеньково" (neuter -о), "России"
//! (feminine -ия), "Твери" (soft feminine), "края" (masculine -й).
//! Stems typical of masculine town names (-ов, -ск, -град) never take a
//! feminine noun reading, and known indeclinable names ("Коми") have no
//! readings at all.

use super::{Case, Gender, Morphology, PartOfSpeech};

const VOWELS: &str = "аеёиоуыэюя";
const VELARS: &str = "кгх";
const HUSHING: &str = "жшчщ";

/// Stems that never take a feminine noun reading: Курска, Новгороде, Саратове.
const MASCULINE_STEM_ENDINGS: &[&str] = &["город", "град", "бург", "ск", "цк", "ов", "ев", "ёв"];

/// Stems read as masculine only in the -е cases: Пушкине, but Украина.
const MASCULINE_LOCATIVE_STEM_ENDINGS: &[&str] = &["ин", "ын"];

/// Loanwords with no case forms.
const INDECLINABLE: &[&str] =
    &["коми", "марий", "эл", "саха", "тыва", "сочи", "тбилиси", "баку", "перу", "чили", "гаити", "конго"];

const MAX_ENDING_CHARS: usize = 3;
const MIN_STEM_CHARS: usize = 2;

// Rows follow `Case::ALL`: nominative, genitive, dative, accusative,
// instrumental, locative. Adjective tables are indexed by `Gender`.
const ADJ_HARD: [[&str; 6]; 3] = [
    ["ый", "ого", "ому", "ый", "ым", "ом"],
    ["ая", "ой", "ой", "ую", "ой", "ой"],
    ["ое", "ого", "ому", "ое", "ым", "ом"],
];
const ADJ_VELAR: [[&str; 6]; 3] = [
    ["ий", "ого", "ому", "ий", "им", "ом"],
    ["ая", "ой", "ой", "ую", "ой", "ой"],
    ["ое", "ого", "ому", "ое", "им", "ом"],
];
const ADJ_SOFT: [[&str; 6]; 3] = [
    ["ий", "его", "ему", "ий", "им", "ем"],
    ["яя", "ей", "ей", "юю", "ей", "ей"],
    ["ее", "его", "ему", "ее", "им", "ем"],
];
const NOUN_FEM_A: [&str; 6] = ["а", "ы", "е", "у", "ой", "е"];
const NOUN_FEM_YA: [&str; 6] = ["я", "и", "е", "ю", "ей", "е"];
const NOUN_FEM_IYA: [&str; 6] = ["ия", "ии", "ии", "ию", "ией", "ии"];
const NOUN_FEM_SOFT: [&str; 6] = ["ь", "и", "и", "ь", "ью", "и"];
const NOUN_MASC: [&str; 6] = ["", "а", "у", "", "ом", "е"];
const NOUN_MASC_J: [&str; 6] = ["й", "я", "ю", "й", "ем", "е"];
const NOUN_NEUT_O: [&str; 6] = ["о", "а", "у", "о", "ом", "е"];
const NOUN_NEUT_E: [&str; 6] = ["е", "а", "у", "е", "ем", "е"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paradigm {
    AdjHard,
    AdjVelar,
    AdjSoft,
    NounFemA,
    NounFemYa,
    NounFemIya,
    NounFemSoft,
    NounMasc,
    NounMascJ,
    NounNeutO,
    NounNeutE,
}

const PARADIGMS: [Paradigm; 11] = [
    Paradigm::AdjHard,
    Paradigm::AdjVelar,
    Paradigm::AdjSoft,
    Paradigm::NounFemA,
    Paradigm::NounFemYa,
    Paradigm::NounFemIya,
    Paradigm::NounFemSoft,
    Paradigm::NounMasc,
    Paradigm::NounMascJ,
    Paradigm::NounNeutO,
    Paradigm::NounNeutE,
];

const ALL_GENDERS: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::Neuter];

impl Paradigm {
    fn pos(self) -> PartOfSpeech {
        match self {
            Paradigm::AdjHard | Paradigm::AdjVelar | Paradigm::AdjSoft => PartOfSpeech::Adjective,
            _ => PartOfSpeech::Noun,
        }
    }

    fn genders(self) -> &'static [Gender] {
        match self {
            Paradigm::AdjHard | Paradigm::AdjVelar | Paradigm::AdjSoft => &ALL_GENDERS,
            Paradigm::NounFemA | Paradigm::NounFemYa | Paradigm::NounFemIya | Paradigm::NounFemSoft => {
                &[Gender::Feminine]
            }
            Paradigm::NounMasc | Paradigm::NounMascJ => &[Gender::Masculine],
            Paradigm::NounNeutO | Paradigm::NounNeutE => &[Gender::Neuter],
        }
    }

    fn is_feminine_noun(self) -> bool {
        matches!(self, Paradigm::NounFemA | Paradigm::NounFemYa | Paradigm::NounFemIya | Paradigm::NounFemSoft)
    }

    fn is_masculine_or_neuter_noun(self) -> bool {
        matches!(self, Paradigm::NounMasc | Paradigm::NounMascJ | Paradigm::NounNeutO | Paradigm::NounNeutE)
    }

    /// Feminine noun readings are refused for masculine-looking stems.
    fn blocked(self, stem: &str, case: Case) -> bool {
        if !self.is_feminine_noun() {
            return false;
        }
        MASCULINE_STEM_ENDINGS.iter().any(|e| stem.ends_with(e))
            || (matches!(case, Case::Dative | Case::Locative)
                && MASCULINE_LOCATIVE_STEM_ENDINGS.iter().any(|e| stem.ends_with(e)))
    }

    fn accepts_stem(self, stem: &str) -> bool {
        let Some(last) = stem.chars().last() else {
            return false;
        };
        if stem.chars().count() < MIN_STEM_CHARS {
            return false;
        }
        let consonant = is_consonant(last);
        match self {
            Paradigm::AdjHard => consonant && !VELARS.contains(last),
            Paradigm::AdjVelar => VELARS.contains(last),
            Paradigm::AdjSoft => last == 'н',
            Paradigm::NounFemSoft => consonant && !VELARS.contains(last) && last != 'ц',
            Paradigm::NounMascJ => VOWELS.contains(last),
            Paradigm::NounNeutE => HUSHING.contains(last) || last == 'ц',
            _ => consonant,
        }
    }

    fn ending(self, stem: &str, case: Case, gender: Gender) -> &'static str {
        let c = case.index();
        match self {
            Paradigm::AdjHard => ADJ_HARD[gender.index()][c],
            Paradigm::AdjVelar => ADJ_VELAR[gender.index()][c],
            Paradigm::AdjSoft => ADJ_SOFT[gender.index()][c],
            Paradigm::NounFemA if case == Case::Genitive && ends_with_any(stem, VELARS, HUSHING) => "и",
            Paradigm::NounFemA => NOUN_FEM_A[c],
            Paradigm::NounFemYa => NOUN_FEM_YA[c],
            Paradigm::NounFemIya => NOUN_FEM_IYA[c],
            Paradigm::NounFemSoft => NOUN_FEM_SOFT[c],
            Paradigm::NounMasc => NOUN_MASC[c],
            Paradigm::NounMascJ => NOUN_MASC_J[c],
            Paradigm::NounNeutO => NOUN_NEUT_O[c],
            Paradigm::NounNeutE => NOUN_NEUT_E[c],
        }
    }
}

fn is_consonant(c: char) -> bool {
    ('а'..='я').contains(&c) && !VOWELS.contains(c) && !"ьъй".contains(c)
}

fn ends_with_any(stem: &str, a: &str, b: &str) -> bool {
    stem.chars().last().is_some_and(|c| a.contains(c) || b.contains(c))
}

/// One reading of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Analysis {
    paradigm: Paradigm,
    stem: String,
    case: Case,
    gender: Gender,
}

impl Analysis {
    fn form(&self, case: Case, gender: Gender) -> String {
        let gender = if self.paradigm.pos() == PartOfSpeech::Adjective { gender } else { self.gender };
        format!("{}{}", self.stem, self.paradigm.ending(&self.stem, case, gender))
    }
}

/// Heuristic analyzer driven by ending tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixMorphology;

impl SuffixMorphology {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        if !word.chars().any(char::is_lowercase) {
            return Vec::new();
        }
        let lower = word.to_lowercase();
        if lower.is_empty() || !lower.chars().all(|c| ('а'..='я').contains(&c) || c == 'ё') {
            return Vec::new();
        }
        if INDECLINABLE.contains(&lower.as_str()) {
            return Vec::new();
        }

        let chars: Vec<char> = lower.chars().collect();
        let mut out = Vec::new();
        for paradigm in PARADIGMS {
            for &gender in paradigm.genders() {
                for case in Case::ALL {
                    for cut in 0..=MAX_ENDING_CHARS.min(chars.len()) {
                        let stem: String = chars[..chars.len() - cut].iter().collect();
                        if !paradigm.accepts_stem(&stem) || paradigm.blocked(&stem, case) {
                            continue;
                        }
                        let candidate = Analysis { paradigm, stem, case, gender };
                        if candidate.form(case, gender) == lower && !out.contains(&candidate) {
                            out.push(candidate);
                        }
                    }
                }
            }
        }
        out
    }
}

/// Masculine and neuter nouns share their oblique endings (Пенькова,
/// Пушкине); pick the reading of the requested gender when both exist.
fn prefer_gender(analyses: &[Analysis], gender: Gender) -> Option<&Analysis> {
    let first = analyses.first()?;
    if !first.paradigm.is_masculine_or_neuter_noun() || first.gender == gender {
        return Some(first);
    }
    let twin = analyses.iter().find(|a| {
        a.paradigm.is_masculine_or_neuter_noun() && a.gender == gender && a.case == first.case && a.stem == first.stem
    });
    Some(twin.unwrap_or(first))
}

/// Re-apply the capitalization pattern of `template` to `word`.
fn recase(template: &str, word: String) -> String {
    let letters = template.chars().filter(|c| c.is_alphabetic()).count();
    if letters > 1 && !template.chars().any(char::is_lowercase) {
        return word.to_uppercase();
    }
    if template.chars().next().is_some_and(char::is_uppercase) {
        return super::capitalize(&word);
    }
    word
}

impl Morphology for SuffixMorphology {
    fn case_of(&self, word: &str) -> Option<Case> {
        self.analyze(word).first().map(|a| a.case)
    }

    fn gender_of(&self, word: &str, pos: Option<PartOfSpeech>) -> Gender {
        let analyses: Vec<Analysis> =
            self.analyze(word).into_iter().filter(|a| pos.is_none_or(|p| a.paradigm.pos() == p)).collect();
        analyses
            .iter()
            .find(|a| a.case == Case::Nominative)
            .or_else(|| analyses.first())
            .map_or(Gender::Neuter, |a| a.gender)
    }

    fn inflect(&self, word: &str, case: Case) -> String {
        match self.analyze(word).first() {
            Some(a) if a.case == case => word.to_string(),
            Some(a) => recase(word, a.form(case, a.gender)),
            None => word.to_string(),
        }
    }

    fn inflect_with_gender(&self, word: &str, case: Case, gender: Gender) -> String {
        // Nouns keep their own gender; only the case changes.
        let analyses = self.analyze(word);
        match prefer_gender(&analyses, gender) {
            Some(a) if a.case == case => word.to_string(),
            Some(a) => recase(word, a.form(case, gender)),
            None => word.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nom(word: &str) -> String {
        SuffixMorphology.inflect(word, Case::Nominative)
    }

    fn agree(word: &str, gender: Gender) -> String {
        SuffixMorphology.inflect_with_gender(word, Case::Nominative, gender)
    }

    #[test]
    fn oblique_names_return_to_nominative() {
        assert_eq!(nom("Ивановки"), "Ивановка");
        assert_eq!(nom("Москвы"), "Москва");
        assert_eq!(nom("Рязанской"), "Рязанская");
        assert_eq!(nom("Ивановского"), "Ивановский");
        assert_eq!(nom("Нижнего"), "Нижний");
        assert_eq!(nom("Курска"), "Курск");
        assert_eq!(nom("России"), "Россия");
        assert_eq!(nom("Петровской"), "Петровская");
    }

    #[test]
    fn nominative_words_are_kept() {
        for word in ["Москва", "Видное", "Украина", "Тутаев", "Ивановское", "Уфа", "Коми"] {
            assert_eq!(nom(word), word, "{word}");
        }
    }

    #[test]
    fn gender_agreement_applies_to_adjectives() {
        assert_eq!(agree("Глинного", Gender::Neuter), "Глинное");
        assert_eq!(agree("Глинном", Gender::Neuter), "Глинное");
        assert_eq!(agree("Рязанской", Gender::Feminine), "Рязанская");
        assert_eq!(agree("Богородского", Gender::Masculine), "Богородский");
        assert_eq!(agree("Нижнего", Gender::Neuter), "Нижнее");
        assert_eq!(agree("Курска", Gender::Masculine), "Курск");
    }

    #[test]
    fn nominative_and_noun_readings_keep_their_gender() {
        assert_eq!(agree("Видное", Gender::Masculine), "Видное");
        assert_eq!(agree("Гусевка", Gender::Neuter), "Гусевка");
        assert_eq!(agree("Москвы", Gender::Masculine), "Москва");
        assert_eq!(agree("АССР", Gender::Feminine), "АССР");
    }

    #[test]
    fn masculine_stems_never_read_as_feminine() {
        let cases = [
            ("Саратове", "Саратов"),
            ("Курске", "Курск"),
            ("Тамбове", "Тамбов"),
            ("Киеве", "Киев"),
            ("Новгороде", "Новгород"),
            ("Пушкине", "Пушкин"),
            ("Саратова", "Саратов"),
            ("Украины", "Украина"),
            ("Ивановке", "Ивановка"),
            ("Москве", "Москва"),
        ];
        for (word, expected) in cases {
            assert_eq!(agree(word, Gender::Masculine), expected, "{word}");
        }
    }

    #[test]
    fn agreement_picks_between_masculine_and_neuter_nouns() {
        assert_eq!(agree("Пенькова", Gender::Neuter), "Пеньково");
        assert_eq!(agree("Пенькова", Gender::Masculine), "Пеньков");
        assert_eq!(agree("Пушкине", Gender::Neuter), "Пушкино");
        assert_eq!(agree("Ивановка", Gender::Neuter), "Ивановка");
    }

    #[test]
    fn indeclinable_names_are_left_alone() {
        let m = SuffixMorphology;
        for word in ["Коми", "Сочи", "Баку"] {
            assert_eq!(agree(word, Gender::Feminine), word);
            assert_eq!(m.inflect(word, Case::Genitive), word);
            assert_eq!(m.case_of(word), None);
        }
    }

    #[test]
    fn genders_of_type_words() {
        let m = SuffixMorphology;
        let noun = Some(PartOfSpeech::Noun);
        assert_eq!(m.gender_of("город", noun), Gender::Masculine);
        assert_eq!(m.gender_of("деревня", noun), Gender::Feminine);
        assert_eq!(m.gender_of("село", noun), Gender::Neuter);
        assert_eq!(m.gender_of("область", noun), Gender::Feminine);
        assert_eq!(m.gender_of("губерния", noun), Gender::Feminine);
        assert_eq!(m.gender_of("край", noun), Gender::Masculine);
        assert_eq!(m.gender_of("кладбище", noun), Gender::Neuter);
        assert_eq!(m.gender_of("ССР", noun), Gender::Neuter);
    }

    #[test]
    fn forward_inflection_of_lemmas() {
        let m = SuffixMorphology;
        assert_eq!(m.inflect("Москва", Case::Genitive), "Москвы");
        assert_eq!(m.inflect("Москва", Case::Locative), "Москве");
        assert_eq!(m.inflect("Польша", Case::Genitive), "Польши");
        assert_eq!(m.inflect("Россия", Case::Locative), "России");
        assert_eq!(m.inflect("Тверь", Case::Genitive), "Твери");
        assert_eq!(m.inflect("Китай", Case::Genitive), "Китая");
        assert_eq!(m.inflect("Нижний", Case::Locative), "Нижнем");
        assert_eq!(m.case_of("Ивановки"), Some(Case::Genitive));
        assert_eq!(m.case_of("АССР"), None);
    }
}
