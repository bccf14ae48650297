//! Bracketed annotations.
//!
//! Two bracket positions exist. After a level, "(ныне <address>)" re-addresses
//! the level and anything else is kept as a comment. Between a name and its
//! type word a bracket may also hold a bare alternative name: "Ивановка
//! (Петровка) слободы". An unclosed bracket running to the end of the input
//! is accepted.

use super::cursor::ParseState;
use super::trigger::TriggerMask;
use crate::ast::{Annotation, GeoParse};
use crate::morph::{Case, inflect_phrase, title_case};
use crate::Range;

/// Content of a bracket between a name and its type word.
#[derive(Debug, Clone)]
pub(crate) enum NameBracket {
    Nowadays(GeoParse),
    /// Nominative form of the alternative name and its source span.
    OtherName { name: String, raw: Range },
    Comment(String),
}

impl ParseState<'_, '_> {
    /// Bracket following a level.
    pub(crate) fn in_brackets(&mut self, pos: usize) -> Option<(Annotation, usize)> {
        if !self.trigger.has(TriggerMask::HAS_BRACKET) {
            return None;
        }
        if let Some((parse, end)) = self.nowadays_in_brackets(pos) {
            return Some((Annotation::Reassignment(Box::new(parse)), end));
        }
        self.comment(pos).map(|(text, end)| (Annotation::Comment(text), end))
    }

    /// Bracket between a name and its type word.
    pub(crate) fn name_brackets(&mut self, pos: usize) -> Option<(NameBracket, usize)> {
        if !self.trigger.has(TriggerMask::HAS_BRACKET) {
            return None;
        }
        if let Some((parse, end)) = self.nowadays_in_brackets(pos) {
            return Some((NameBracket::Nowadays(parse), end));
        }
        if let Some(found) = self.other_name(pos) {
            return Some(found);
        }
        self.comment(pos).map(|(text, end)| (NameBracket::Comment(text), end))
    }

    fn nowadays_in_brackets(&mut self, pos: usize) -> Option<(GeoParse, usize)> {
        let open = self.lit(pos, "(")?;
        let p = self.lit(open, "ныне").unwrap_or(open);
        let (nodes, range) = self.main_geo(p)?;
        let end = self.close(range.end)?;
        Some((GeoParse { nodes, range }, end))
    }

    fn other_name(&self, pos: usize) -> Option<(NameBracket, usize)> {
        let open = self.lit(pos, "(")?;
        let p = self.lit(open, "ныне").unwrap_or(open);
        let raw = self.title(p)?;
        let end = self.close(raw.end)?;
        let text = &self.input[raw.start..raw.end];
        let name = title_case(&inflect_phrase(self.grammar.morphology(), text, Case::Nominative, None));
        Some((NameBracket::OtherName { name, raw }, end))
    }

    fn comment(&self, pos: usize) -> Option<(String, usize)> {
        let open = self.lit(pos, "(")?;
        let p = self.skip_ws(open);
        let text = regex!(r"^[^)]+").find(&self.input[p..])?;
        let end = self.close(p + text.end())?;
        Some((text.as_str().trim().to_string(), end))
    }

    /// ")" or the end of the input.
    fn close(&self, pos: usize) -> Option<usize> {
        self.lit(pos, ")").or_else(|| self.at_end(pos).then(|| self.skip_ws(pos)))
    }
}
