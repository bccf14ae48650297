//! The immutable grammar value.
//!
//! A [`Grammar`] bundles everything the productions read: the morphological
//! service, the per-level type registries and the closed dictionaries. It is
//! built once (usually through [`GrammarBuilder`]) and shared by reference
//! across any number of concurrent parses.

use std::fmt;
use std::sync::Arc;

use super::cursor::ParseState;
use super::scanner::{self, Scan};
use crate::api::Options;
use crate::ast::GeoParse;
use crate::dictionary::{
    DEFAULT_INFLECTIONS, Dictionary, DictionarySource, EMBEDDED_COUNTRIES, EMBEDDED_REGIONS, EMBEDDED_TOWNS,
};
use crate::error::GeoError;
use crate::morph::{Case, Morphology, SuffixMorphology};
use crate::registry::{GeoType, TypeRegistry, vocab};
use crate::GeoLevel;

pub struct Grammar {
    morph: Arc<dyn Morphology>,
    pub(crate) place: TypeRegistry,
    pub(crate) town: TypeRegistry,
    pub(crate) town_after: TypeRegistry,
    pub(crate) sub_district: TypeRegistry,
    pub(crate) district: TypeRegistry,
    pub(crate) sub_region: TypeRegistry,
    pub(crate) region: TypeRegistry,
    pub(crate) country: TypeRegistry,
    pub(crate) republic: GeoType,
    pub(crate) towns: Dictionary,
    pub(crate) regions: Dictionary,
    pub(crate) countries: Dictionary,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// Suffix morphology and the bundled dictionaries. Cannot fail.
    pub fn bundled() -> Self {
        let dictionary = |text: &str| Dictionary::new(text.lines(), &SuffixMorphology, DEFAULT_INFLECTIONS);
        Grammar::assemble(
            Arc::new(SuffixMorphology),
            dictionary(EMBEDDED_TOWNS),
            dictionary(EMBEDDED_REGIONS),
            dictionary(EMBEDDED_COUNTRIES),
        )
    }

    fn assemble(morph: Arc<dyn Morphology>, towns: Dictionary, regions: Dictionary, countries: Dictionary) -> Self {
        tracing::debug!(
            towns = towns.len(),
            regions = regions.len(),
            countries = countries.len(),
            "grammar built"
        );
        Grammar {
            morph,
            place: vocab::place(),
            town: vocab::town(),
            town_after: vocab::town_after(),
            sub_district: vocab::sub_district(),
            district: vocab::district(),
            sub_region: vocab::sub_region(),
            region: vocab::region(),
            country: vocab::country(),
            republic: GeoType::new("республика", vocab::republic_lexemes(), true),
            towns,
            regions,
            countries,
        }
    }

    /// Grammar with the bundled dictionaries and the given morphology.
    pub fn new(morph: Arc<dyn Morphology>) -> Result<Self, GeoError> {
        GrammarBuilder::default().morphology(morph).build()
    }

    pub fn morphology(&self) -> &dyn Morphology {
        &*self.morph
    }

    /// The type vocabulary used at `level`. Sub-towns share the town one.
    pub fn registry(&self, level: GeoLevel) -> &TypeRegistry {
        match level {
            GeoLevel::Country => &self.country,
            GeoLevel::Region => &self.region,
            GeoLevel::SubRegion => &self.sub_region,
            GeoLevel::District => &self.district,
            GeoLevel::SubDistrict => &self.sub_district,
            GeoLevel::Town | GeoLevel::SubTown => &self.town,
            GeoLevel::Place => &self.place,
        }
    }

    /// Whether any level's type word starts at `pos` (after whitespace).
    pub(crate) fn any_type_at(&self, input: &str, pos: usize) -> bool {
        [&self.sub_district, &self.district, &self.sub_region, &self.region, &self.country, &self.town]
            .iter()
            .any(|reg| reg.match_at(input, pos).is_some())
    }

    /// Non-overlapping geographic references in `input`, left to right.
    pub fn scan<'g, 'i>(&'g self, input: &'i str) -> Scan<'g, 'i> {
        self.scan_with(input, &Options::default())
    }

    pub fn scan_with<'g, 'i>(&'g self, input: &'i str, options: &Options) -> Scan<'g, 'i> {
        Scan::new(ParseState::new(self, input, options.step_limit))
    }

    /// Parse `input` as one geographic reference spanning all of it.
    pub fn parse_whole(&self, input: &str) -> Result<GeoParse, GeoError> {
        self.parse_whole_with(input, &Options::default())
    }

    pub fn parse_whole_with(&self, input: &str, options: &Options) -> Result<GeoParse, GeoError> {
        scanner::parse_whole(&mut ParseState::new(self, input, options.step_limit))
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("towns", &self.towns.len())
            .field("regions", &self.regions.len())
            .field("countries", &self.countries.len())
            .finish_non_exhaustive()
    }
}

/// Configures the morphology and dictionaries of a [`Grammar`].
pub struct GrammarBuilder {
    morph: Arc<dyn Morphology>,
    towns: DictionarySource,
    regions: DictionarySource,
    countries: DictionarySource,
    inflections: Vec<Case>,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        GrammarBuilder {
            morph: Arc::new(SuffixMorphology),
            towns: DictionarySource::Embedded,
            regions: DictionarySource::Embedded,
            countries: DictionarySource::Embedded,
            inflections: DEFAULT_INFLECTIONS.to_vec(),
        }
    }
}

impl GrammarBuilder {
    pub fn morphology(mut self, morph: Arc<dyn Morphology>) -> Self {
        self.morph = morph;
        self
    }

    pub fn towns(mut self, source: DictionarySource) -> Self {
        self.towns = source;
        self
    }

    pub fn regions(mut self, source: DictionarySource) -> Self {
        self.regions = source;
        self
    }

    pub fn countries(mut self, source: DictionarySource) -> Self {
        self.countries = source;
        self
    }

    /// Cases every dictionary entry is expanded into.
    pub fn inflections(mut self, cases: &[Case]) -> Self {
        self.inflections = cases.to_vec();
        self
    }

    pub fn build(self) -> Result<Grammar, GeoError> {
        let morph = &*self.morph;
        let towns = Dictionary::load(&self.towns, EMBEDDED_TOWNS, morph, &self.inflections)?;
        let regions = Dictionary::load(&self.regions, EMBEDDED_REGIONS, morph, &self.inflections)?;
        let countries = Dictionary::load(&self.countries, EMBEDDED_COUNTRIES, morph, &self.inflections)?;
        Ok(Grammar::assemble(self.morph, towns, regions, countries))
    }
}
