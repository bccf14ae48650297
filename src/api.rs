use crate::ast::GeoParse;
use crate::engine::{GeoMatch, Grammar, Scan, ScanMetrics};
use crate::error::GeoError;
use once_cell::sync::Lazy;
use serde::Serialize;

static DEFAULT_GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::bundled);

/// The process-wide grammar built from the bundled dictionaries.
pub fn default_grammar() -> &'static Grammar {
    &DEFAULT_GRAMMAR
}

/// Options that affect one parse or scan.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Maximum level productions evaluated per match attempt. Memo hits are
    /// free. `None` means unbounded.
    pub step_limit: Option<usize>,
}

/// Result from [`scan_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// The scanned input text.
    pub text: String,
    pub matches: Vec<GeoMatch>,
    pub metrics: ScanMetrics,
}

/// Parse `text` as one geographic reference spanning all of it.
///
/// # Example
/// ```
/// use toponym::{GeoLevel, parse_whole};
///
/// let parse = parse_whole("г. Видное Московской области России").unwrap();
/// assert_eq!(parse.get(GeoLevel::Town).unwrap().name, "Видное");
/// assert_eq!(parse.get(GeoLevel::Region).unwrap().name, "Московская");
/// ```
pub fn parse_whole(text: &str) -> Result<GeoParse, GeoError> {
    parse_whole_with(text, &Options::default())
}

pub fn parse_whole_with(text: &str, options: &Options) -> Result<GeoParse, GeoError> {
    default_grammar().parse_whole_with(text, options)
}

/// Lazily find every non-overlapping reference in `text`.
///
/// # Example
/// ```
/// use toponym::scan;
///
/// let text = "Родился в с. Ивановка Рязанской губ., учился в Москве.";
/// let found: Vec<_> = scan(text).map(|m| m.text(text).to_string()).collect();
/// assert_eq!(found, ["с. Ивановка Рязанской губ.", "Москве."]);
/// ```
pub fn scan(text: &str) -> Scan<'static, '_> {
    default_grammar().scan(text)
}

pub fn scan_with<'i>(text: &'i str, options: &Options) -> Scan<'static, 'i> {
    default_grammar().scan_with(text, options)
}

/// Scan `text` to the end and return the matches with the scan counters.
pub fn scan_verbose(text: &str) -> ScanReport {
    scan_verbose_with(text, &Options::default())
}

pub fn scan_verbose_with(text: &str, options: &Options) -> ScanReport {
    let mut scan = scan_with(text, options);
    let matches: Vec<GeoMatch> = scan.by_ref().collect();
    ScanReport { text: text.to_string(), matches, metrics: scan.metrics() }
}
