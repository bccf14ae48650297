//! Matching engine.
//!
//! The grammar is a PEG-style recursive descent over the input bytes with
//! ordered alternatives, greedy optionals and lookaheads. The parts:
//!
//! ```text
//! input ── TriggerInfo::scan ──> capital / bracket / "ныне" signals
//!          (trigger.rs)                 │
//!                                       v
//!          Scan (scanner.rs) ── every word start ──> geo
//!                                       │
//!                                       v
//!          main_geo (chain.rs): specific-to-general vs general-to-specific,
//!                               longest wins, optional place / sub-town prefix
//!                                       │
//!                                       v
//!          ParseState::level (cursor.rs): packrat memo + step budget
//!                                       │
//!                                       v
//!          produce (productions.rs): per-level alternatives over
//!                                    title.rs tokens, type registries,
//!                                    dictionaries and brackets.rs
//!                                       │
//!                                       v
//!          TypeRegistry::normalize ──> ParsedName (nominative, canonical type)
//! ```
//!
//! A [`Grammar`] is immutable and shared; all per-call state lives in a
//! [`cursor::ParseState`] owned by one [`Scan`] or one `parse_whole` call.
//!
//! ## Responsibilities by module
//!
//! - `grammar.rs`: the grammar value and its builder.
//! - `cursor.rs`: parse state, memo, step budget, whitespace and literals.
//! - `title.rs`: capitalized proper-name tokens.
//! - `productions.rs`: one production per level and normalization.
//! - `brackets.rs`: "(ныне ...)", alternative names and comments.
//! - `chain.rs`: level chains in both directions.
//! - `scanner.rs`: whole-input parsing and the lazy scan.
//! - `trigger.rs`: cheap pre-classification of the input.
//! - `metrics.rs`: scan counters.
//! - `dedup.rs`: historical / present-day entity candidates.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=toponym=trace` to see every level production and
//! rejected alternative.

#[path = "engine/brackets.rs"]
mod brackets;
#[path = "engine/chain.rs"]
mod chain;
#[path = "engine/cursor.rs"]
mod cursor;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/grammar.rs"]
mod grammar;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/productions.rs"]
mod productions;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/title.rs"]
mod title;
#[path = "engine/trigger.rs"]
mod trigger;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use dedup::candidate_entities;
pub use grammar::{Grammar, GrammarBuilder};
pub use metrics::ScanMetrics;
pub use scanner::{GeoMatch, Scan};
