//! Closed-vocabulary dictionaries of well-known names.
//!
//! Towns, regions and countries that are commonly written without any type
//! word ("в Москве", "России") are recognized from newline-delimited lists.
//! Each entry is pre-expanded through the morphological service into the
//! grammatical cases a name typically takes in running text, and every surface
//! form maps back to its entry, so a match yields the nominative lemma.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::DictionaryError;
use crate::is_word_char;
use crate::morph::{Case, Morphology, expand_forms};

/// Cases every entry is expanded into by default: "Москвы", "Москве".
pub const DEFAULT_INFLECTIONS: &[Case] = &[Case::Genitive, Case::Locative];

pub(crate) const EMBEDDED_TOWNS: &str = include_str!("../resources/towns.txt");
pub(crate) const EMBEDDED_REGIONS: &str = include_str!("../resources/regions.txt");
pub(crate) const EMBEDDED_COUNTRIES: &str = include_str!("../resources/countries.txt");

/// Where a dictionary's entries come from.
#[derive(Debug, Clone, Default)]
pub enum DictionarySource {
    /// The list bundled with the crate.
    #[default]
    Embedded,
    /// Newline-delimited entries held in memory.
    Text(String),
    /// A newline-delimited file.
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Form {
    surface: String,
    lemma: String,
}

/// Exact-match set of surface forms, indexed by first character.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    // Each bucket is sorted longest form first.
    by_first: HashMap<char, Vec<Form>>,
    entries: usize,
}

impl Dictionary {
    /// Build from entries, expanding each into `cases`.
    pub fn new<I, S>(entries: I, morph: &dyn Morphology, cases: &[Case]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Dictionary::default();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            dict.entries += 1;
            dict.insert(entry, entry);
            for form in expand_forms(morph, entry, cases) {
                dict.insert(&form, entry);
            }
        }
        for bucket in dict.by_first.values_mut() {
            bucket.sort_by(|a, b| b.surface.len().cmp(&a.surface.len()).then_with(|| a.surface.cmp(&b.surface)));
        }
        dict
    }

    fn insert(&mut self, surface: &str, lemma: &str) {
        let Some(first) = surface.chars().next() else {
            return;
        };
        let bucket = self.by_first.entry(first).or_default();
        if !bucket.iter().any(|f| f.surface == surface) {
            bucket.push(Form { surface: surface.to_string(), lemma: lemma.to_string() });
        }
    }

    /// Build from a newline-delimited reader. `path` is only used for errors.
    pub fn from_reader<R: BufRead>(
        reader: R,
        path: &Path,
        morph: &dyn Morphology,
        cases: &[Case],
    ) -> Result<Self, DictionaryError> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| DictionaryError::Io { path: path.to_path_buf(), source })?;
        Ok(Dictionary::new(lines, morph, cases))
    }

    pub fn from_path(path: &Path, morph: &dyn Morphology, cases: &[Case]) -> Result<Self, DictionaryError> {
        let file = File::open(path).map_err(|source| DictionaryError::Io { path: path.to_path_buf(), source })?;
        let dict = Dictionary::from_reader(BufReader::new(file), path, morph, cases)?;
        tracing::info!(path = %path.display(), entries = dict.entries, "loaded dictionary");
        Ok(dict)
    }

    /// Resolve a source; `embedded` is the bundled list for this dictionary.
    pub(crate) fn load(
        source: &DictionarySource,
        embedded: &str,
        morph: &dyn Morphology,
        cases: &[Case],
    ) -> Result<Self, DictionaryError> {
        match source {
            DictionarySource::Embedded => Ok(Dictionary::new(embedded.lines(), morph, cases)),
            DictionarySource::Text(text) => Ok(Dictionary::new(text.lines(), morph, cases)),
            DictionarySource::Path(path) => Dictionary::from_path(path, morph, cases),
        }
    }

    /// Number of entries (lemmas), not surface forms.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Longest form starting at `pos` and standing as whole words.
    /// Returns the matched byte length and the entry it belongs to.
    pub fn match_at(&self, input: &str, pos: usize) -> Option<(usize, &str)> {
        let tail = input.get(pos..)?;
        let first = tail.chars().next()?;
        if input[..pos].chars().next_back().is_some_and(is_word_char) {
            return None;
        }
        self.by_first.get(&first)?.iter().find_map(|form| {
            let end = form.surface.len();
            let bounded = tail.starts_with(&form.surface) && !tail[end..].chars().next().is_some_and(is_word_char);
            bounded.then_some((end, form.lemma.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::{IdentityMorphology, SuffixMorphology};
    use std::io::Cursor;

    fn towns() -> Dictionary {
        Dictionary::new(["Москва", "Нижний Новгород", "Новгород", "Ростов-на-Дону"], &SuffixMorphology, DEFAULT_INFLECTIONS)
    }

    #[test]
    fn inflected_forms_map_to_the_entry() {
        let d = towns();
        assert_eq!(d.len(), 4);
        assert_eq!(d.match_at("в Москве", "в ".len()), Some(("Москве".len(), "Москва")));
        assert_eq!(d.match_at("Москвы.", 0), Some(("Москвы".len(), "Москва")));
        assert_eq!(d.match_at("Нижнего Новгорода", 0), Some(("Нижнего Новгорода".len(), "Нижний Новгород")));
        assert_eq!(d.match_at("Ростове-на-Дону", 0), Some(("Ростове-на-Дону".len(), "Ростов-на-Дону")));
        assert_eq!(d.match_at("Ростов-на-Дону", 0), Some(("Ростов-на-Дону".len(), "Ростов-на-Дону")));
    }

    #[test]
    fn longest_form_wins() {
        let d = towns();
        assert_eq!(d.match_at("Нижний Новгород", 0), Some(("Нижний Новгород".len(), "Нижний Новгород")));
        assert_eq!(d.match_at("Новгород", 0), Some(("Новгород".len(), "Новгород")));
    }

    #[test]
    fn forms_must_stand_as_whole_words() {
        let d = towns();
        assert_eq!(d.match_at("Москвариум", 0), None);
        assert_eq!(d.match_at("ПодМосква", "Под".len()), None);
    }

    #[test]
    fn identity_morphology_keeps_only_entries() {
        let d = Dictionary::new(["Москва"], &IdentityMorphology, DEFAULT_INFLECTIONS);
        assert!(d.match_at("Москве", 0).is_none());
        assert!(d.match_at("Москва", 0).is_some());
    }

    #[test]
    fn reader_skips_blank_lines() {
        let text = "Москва\n\n  Тула  \n";
        let d = Dictionary::from_reader(Cursor::new(text), Path::new("mem"), &SuffixMorphology, &[]).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.match_at("Тула", 0), Some(("Тула".len(), "Тула")));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dictionary::from_path(Path::new("/nonexistent/towns.txt"), &IdentityMorphology, &[]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/towns.txt"));
    }

    #[test]
    fn embedded_lists_are_not_empty() {
        for text in [EMBEDDED_TOWNS, EMBEDDED_REGIONS, EMBEDDED_COUNTRIES] {
            assert!(!Dictionary::new(text.lines(), &IdentityMorphology, &[]).is_empty());
        }
    }
}
