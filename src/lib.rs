extern crate self as toponym;

#[macro_use]
mod macros;
mod api;
mod ast;
mod dictionary;
mod engine;
mod entity;
mod error;
mod morph;
mod registry;

pub use api::{
    Options, ScanReport, default_grammar, parse_whole, parse_whole_with, scan, scan_verbose, scan_verbose_with, scan_with,
};
pub use ast::{Annotation, GeoNode, GeoParse, ParsedName};
pub use dictionary::{DEFAULT_INFLECTIONS, Dictionary, DictionarySource};
pub use engine::{GeoMatch, Grammar, GrammarBuilder, Scan, ScanMetrics, candidate_entities};
pub use entity::{GeoEntity, GeoLevelSet, MatchPolicy, Naming, TypedName};
pub use error::{DictionaryError, GeoError, TypeMismatch};
pub use morph::{Case, Gender, IdentityMorphology, Morphology, PartOfSpeech, SuffixMorphology};
pub use registry::{GeoType, Lexeme, TypeRegistry};

use serde::Serialize;

// --- Shared types -----------------------------------------------------------

/// Geographic granularity, ordered from the broadest to the most specific.
///
/// The declaration order is load-bearing: entity ordering, hashing and the
/// "most specific level" lookup all walk the levels in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoLevel {
    Country,
    Region,
    SubRegion,
    District,
    SubDistrict,
    Town,
    SubTown,
    Place,
}

impl GeoLevel {
    /// All levels, broad to specific.
    pub const ALL: [GeoLevel; 8] = [
        GeoLevel::Country,
        GeoLevel::Region,
        GeoLevel::SubRegion,
        GeoLevel::District,
        GeoLevel::SubDistrict,
        GeoLevel::Town,
        GeoLevel::SubTown,
        GeoLevel::Place,
    ];

    /// Position of the level in [`GeoLevel::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            GeoLevel::Country => "country",
            GeoLevel::Region => "region",
            GeoLevel::SubRegion => "sub_region",
            GeoLevel::District => "district",
            GeoLevel::SubDistrict => "sub_district",
            GeoLevel::Town => "town",
            GeoLevel::SubTown => "sub_town",
            GeoLevel::Place => "place",
        }
    }

    /// Settlement-like levels are written "type name" (г. Москва), the
    /// administrative ones "name type" (Рязанская область).
    pub fn type_leads(self) -> bool {
        matches!(self, GeoLevel::Town | GeoLevel::SubTown | GeoLevel::Place)
    }
}

impl std::fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte span into the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Range { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Characters that make up a word for boundary checks (regex `\w`).
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
