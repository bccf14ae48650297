//! Top-level matching: whole-input parsing and scanning running text.

use std::time::Instant;

use serde::Serialize;

use super::cursor::ParseState;
use super::metrics::ScanMetrics;
use super::trigger::{TriggerMask, word_starts};
use crate::ast::{GeoNode, GeoParse};
use crate::entity::{GeoEntity, Naming};
use crate::error::GeoError;
use crate::Range;

/// One reference found in running text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoMatch {
    pub parse: GeoParse,
    pub range: Range,
}

impl GeoMatch {
    /// The matched slice of the scanned input.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range.start..self.range.end]
    }

    pub fn entity(&self, naming: Naming) -> GeoEntity {
        GeoEntity::from_parse(&self.parse, naming)
    }
}

impl ParseState<'_, '_> {
    /// A full reference at `pos`: a chain, an optional ", ныне <chain>" clause
    /// and an optional closing period. Must start on a word boundary.
    pub(crate) fn geo(&mut self, pos: usize) -> Option<GeoParse> {
        let start = self.skip_ws(pos);
        if !self.is_boundary(start) {
            return None;
        }
        let (mut nodes, mut range) = self.main_geo(start)?;
        if self.trigger.has(TriggerMask::HAS_NOWADAYS) {
            let clause = self.lit(range.end, ",").and_then(|p| self.lit(p, "ныне"));
            if let Some((now_nodes, now_range)) = clause.and_then(|p| self.main_geo(p)) {
                nodes.push(GeoNode::Nowadays(Box::new(GeoParse { nodes: now_nodes, range: now_range })));
                range.end = now_range.end;
            }
        }
        if let Some(end) = self.lit(range.end, ".") {
            range.end = end;
        }
        Some(GeoParse { nodes, range })
    }
}

/// Parse the whole input as one reference.
pub(crate) fn parse_whole(state: &mut ParseState<'_, '_>) -> Result<GeoParse, GeoError> {
    let input = state.input;
    let no_match = |consumed| GeoError::NoMatch { input: input.to_string(), consumed };
    if !state.trigger.has(TriggerMask::HAS_CAPITAL) {
        return Err(no_match(0));
    }
    state.begin_attempt();
    let parse = state.geo(0);
    if state.exhausted() {
        let limit = state.step_limit().unwrap_or_default();
        tracing::warn!(limit, "parse abandoned: step limit exceeded");
        return Err(GeoError::StepLimitExceeded { limit });
    }
    match parse {
        Some(parse) if state.at_end(parse.range.end) => Ok(parse),
        Some(parse) => Err(no_match(parse.range.end)),
        None => Err(no_match(0)),
    }
}

/// Lazy, non-overlapping matches in running text.
///
/// Every word start is tried left to right; after a match the scan resumes
/// at its end. An attempt that exceeds the step limit is logged and skipped.
pub struct Scan<'g, 'i> {
    state: ParseState<'g, 'i>,
    candidates: Vec<usize>,
    next: usize,
    resume: usize,
    metrics: ScanMetrics,
    started: Instant,
}

impl<'g, 'i> Scan<'g, 'i> {
    pub(crate) fn new(state: ParseState<'g, 'i>) -> Self {
        let candidates =
            if state.trigger.has(TriggerMask::HAS_CAPITAL) { word_starts(state.input) } else { Vec::new() };
        let metrics = ScanMetrics { candidates: candidates.len(), ..ScanMetrics::default() };
        Scan { state, candidates, next: 0, resume: 0, metrics, started: Instant::now() }
    }

    /// The scanned input.
    pub fn input(&self) -> &'i str {
        self.state.input
    }

    /// Counters collected so far.
    pub fn metrics(&self) -> ScanMetrics {
        ScanMetrics {
            total: self.started.elapsed(),
            steps: self.state.total_steps,
            memo_hits: self.state.memo_hits,
            ..self.metrics
        }
    }
}

impl Iterator for Scan<'_, '_> {
    type Item = GeoMatch;

    fn next(&mut self) -> Option<GeoMatch> {
        while let Some(&pos) = self.candidates.get(self.next) {
            self.next += 1;
            if pos < self.resume {
                continue;
            }
            self.metrics.attempts += 1;
            self.state.begin_attempt();
            let found = self.state.geo(pos);
            if self.state.exhausted() {
                self.metrics.exhausted += 1;
                tracing::warn!(pos, limit = ?self.state.step_limit(), "candidate skipped: step limit exceeded");
                continue;
            }
            if let Some(parse) = found {
                self.resume = parse.range.end;
                self.metrics.matches += 1;
                tracing::debug!(start = parse.range.start, end = parse.range.end, "reference found");
                return Some(GeoMatch { range: parse.range, parse });
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Scan<'_, '_> {}
