//! Proper-name tokens.
//!
//! A title is a capitalized word ("Ивановка"), optionally hyphen-compounded
//! ("Романов-Борисоглебск", "Ростов-на-Дону"), optionally preceded by a size or
//! saint abbreviation ("Б. Ивановка", "С.-Петербург") and by an ordinal
//! ("2-й Покровский"). The compound itself admits no whitespace; the prefixes
//! may be followed by a space.

use super::cursor::ParseState;
use crate::is_word_char;
use crate::Range;

/// Abbreviations of Большой, Великий, Малый, Новый, Санкт-.
const PREFIXES: &[&str] = &["С.-", "В.", "Б.", "М.", "Н."];

impl ParseState<'_, '_> {
    /// Span of the title starting at `pos` (after whitespace).
    pub(crate) fn title(&self, pos: usize) -> Option<Range> {
        let start = self.skip_ws(pos);
        let mut p = start;

        let glued = self.input[..p].chars().next_back().is_some_and(is_word_char);
        let ordinal = if glued { None } else { regex!(r"^[0-9]+-(й|м)\b").find(&self.input[p..]) };
        if let Some(m) = ordinal {
            p = self.skip_ws(p + m.end());
        }
        if let Some(prefix) = PREFIXES.iter().find(|prefix| self.input[p..].starts_with(**prefix)) {
            p = self.skip_ws(p + prefix.len());
        }

        let core = regex!(r"^[А-ЯЁ][а-яё]{2,}(-(на|в)-[А-ЯЁ][а-яё]{2,}|-[А-ЯЁ][а-яё]{2,})?").find(&self.input[p..])?;
        Some(Range::new(start, p + core.end()))
    }

    /// Two titles in a row: the guard that keeps a name-first production from
    /// stopping in the middle of a longer name.
    pub(crate) fn two_titles(&self, pos: usize) -> bool {
        self.title(pos).and_then(|first| self.title(first.end)).is_some()
    }
}
