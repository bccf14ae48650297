//! Trigger scanning (input pre-classification).
//!
//! Before any production runs, the input is scanned once for coarse signals
//! that let whole parts of the grammar be skipped:
//!
//! - no capital letter means no title can start anywhere, so nothing matches;
//! - no "(" means neither bracket form needs to be tried;
//! - no "ныне" means the chain-level re-addressing clause cannot follow.
//!
//! The scan also lists the candidate start offsets for [`super::Scan`]: every
//! position where a word begins.
//!
//! False positives are fine; the productions still have to match.

use bitflags::bitflags;

use crate::is_word_char;

bitflags! {
    /// Coarse input characteristics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TriggerMask: u8 {
        const HAS_CAPITAL = 1 << 0;
        const HAS_BRACKET = 1 << 1;
        const HAS_NOWADAYS = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TriggerInfo {
    pub(crate) mask: TriggerMask,
}

impl TriggerInfo {
    pub(crate) fn scan(input: &str) -> Self {
        let mut mask = TriggerMask::empty();
        if input.chars().any(char::is_uppercase) {
            mask |= TriggerMask::HAS_CAPITAL;
        }
        if input.contains('(') {
            mask |= TriggerMask::HAS_BRACKET;
        }
        if input.contains("ныне") {
            mask |= TriggerMask::HAS_NOWADAYS;
        }
        TriggerInfo { mask }
    }

    pub(crate) fn has(&self, flag: TriggerMask) -> bool {
        self.mask.contains(flag)
    }
}

/// Byte offsets where a word starts.
pub(crate) fn word_starts(input: &str) -> Vec<usize> {
    let mut prev_word = false;
    let mut starts = Vec::new();
    for (i, c) in input.char_indices() {
        let word = is_word_char(c);
        if word && !prev_word {
            starts.push(i);
        }
        prev_word = word;
    }
    starts
}
