//! Per-call parse state and token-level helpers.
//!
//! A [`ParseState`] lives for one `parse_whole` call or one whole scan. It owns
//! the packrat memo for level productions and the step budget; the grammar it
//! points to is never mutated.
//!
//! Positions are byte offsets. Every token helper skips leading whitespace
//! first, the way the grammar treats whitespace between tokens.

use std::collections::HashMap;

use super::grammar::Grammar;
use super::trigger::TriggerInfo;
use crate::{GeoLevel, is_word_char};
use crate::ast::ParsedName;

/// A successful level production.
#[derive(Debug, Clone)]
pub(crate) struct LevelMatch {
    pub(crate) level: GeoLevel,
    pub(crate) name: ParsedName,
    pub(crate) end: usize,
}

pub(crate) struct ParseState<'g, 'i> {
    pub(crate) grammar: &'g Grammar,
    pub(crate) input: &'i str,
    pub(crate) trigger: TriggerInfo,
    memo: HashMap<(GeoLevel, usize), Option<LevelMatch>>,
    step_limit: Option<usize>,
    steps: usize,
    exhausted: bool,
    pub(crate) total_steps: usize,
    pub(crate) memo_hits: usize,
}

impl<'g, 'i> ParseState<'g, 'i> {
    pub(crate) fn new(grammar: &'g Grammar, input: &'i str, step_limit: Option<usize>) -> Self {
        ParseState {
            grammar,
            input,
            trigger: TriggerInfo::scan(input),
            memo: HashMap::new(),
            step_limit,
            steps: 0,
            exhausted: false,
            total_steps: 0,
            memo_hits: 0,
        }
    }

    /// Reset the step budget before a new match attempt. The memo is kept.
    pub(crate) fn begin_attempt(&mut self) {
        self.steps = 0;
        self.exhausted = false;
    }

    /// Whether the current attempt ran out of steps.
    pub(crate) fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    /// Memoized level production at `pos`.
    pub(crate) fn level(&mut self, level: GeoLevel, pos: usize) -> Option<LevelMatch> {
        let pos = self.skip_ws(pos);
        if let Some(hit) = self.memo.get(&(level, pos)) {
            self.memo_hits += 1;
            return hit.clone();
        }
        if self.exhausted {
            return None;
        }
        self.steps += 1;
        self.total_steps += 1;
        if self.step_limit.is_some_and(|limit| self.steps > limit) {
            tracing::trace!(limit = self.steps - 1, pos, "step limit reached");
            self.exhausted = true;
            return None;
        }

        let result = self.produce(level, pos);
        // A failure caused by the budget says nothing about the input.
        if !self.exhausted {
            self.memo.insert((level, pos), result.clone());
        }
        result
    }

    // --- token helpers -------------------------------------------------------

    pub(crate) fn skip_ws(&self, pos: usize) -> usize {
        let tail = &self.input[pos..];
        pos + (tail.len() - tail.trim_start_matches([' ', '\t', '\r', '\n']).len())
    }

    pub(crate) fn at_end(&self, pos: usize) -> bool {
        self.skip_ws(pos) == self.input.len()
    }

    /// Literal text after optional whitespace; returns the end offset.
    pub(crate) fn lit(&self, pos: usize, text: &str) -> Option<usize> {
        let p = self.skip_ws(pos);
        self.input[p..].starts_with(text).then_some(p + text.len())
    }

    /// Regex word boundary at `pos`.
    pub(crate) fn is_boundary(&self, pos: usize) -> bool {
        let before = self.input[..pos].chars().next_back().is_some_and(is_word_char);
        let after = self.input[pos..].chars().next().is_some_and(is_word_char);
        before != after
    }
}
