//! Level chains.
//!
//! A reference is a chain of levels written either from the most specific
//! level outwards ("г. Видное Московской области") or from the broadest level
//! inwards ("Россия, Московская область, г. Видное"). Each chain may start at
//! any of its levels and may skip levels, but never goes back. Both readings
//! are tried at the same position and the longer one wins; on a tie the
//! specific-to-general reading is kept.

use super::cursor::{LevelMatch, ParseState};
use crate::ast::GeoNode;
use crate::registry::Lexeme;
use crate::{GeoLevel, Range};

const SPECIFIC_TO_GENERAL: [GeoLevel; 6] = [
    GeoLevel::Town,
    GeoLevel::SubDistrict,
    GeoLevel::District,
    GeoLevel::SubRegion,
    GeoLevel::Region,
    GeoLevel::Country,
];

const GENERAL_TO_SPECIFIC: [GeoLevel; 6] = [
    GeoLevel::Country,
    GeoLevel::Region,
    GeoLevel::SubRegion,
    GeoLevel::District,
    GeoLevel::SubDistrict,
    GeoLevel::Town,
];

/// Prepositions allowed between a place or sub-town and the town it belongs to.
const PREPOSITIONS: [Lexeme; 5] =
    [Lexeme::Keyword("в"), Lexeme::Keyword("при"), Lexeme::Keyword("близ"), Lexeme::Keyword("у"), Lexeme::Keyword("под")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    SpecificToGeneral,
    GeneralToSpecific,
}

impl Direction {
    fn levels(self) -> &'static [GeoLevel] {
        match self {
            Direction::SpecificToGeneral => &SPECIFIC_TO_GENERAL,
            Direction::GeneralToSpecific => &GENERAL_TO_SPECIFIC,
        }
    }

    /// Reading kept when both match: the longer, specific-to-general on a tie.
    fn prefer(forward_end: usize, backward_end: usize) -> Direction {
        if backward_end > forward_end { Direction::GeneralToSpecific } else { Direction::SpecificToGeneral }
    }
}

type Chain = (Vec<GeoNode>, usize);

impl ParseState<'_, '_> {
    /// The longer of the two chain readings at `pos`.
    pub(crate) fn main_geo(&mut self, pos: usize) -> Option<(Vec<GeoNode>, Range)> {
        let start = self.skip_ws(pos);
        let ((nodes, end), _) = self.directed_chain(start)?;
        Some((nodes, Range::new(start, end)))
    }

    fn directed_chain(&mut self, start: usize) -> Option<(Chain, Direction)> {
        let forward = self.prefixed_chain(start);
        let backward = self.chain(Direction::GeneralToSpecific, start);
        match (forward, backward) {
            (Some(f), Some(b)) => {
                let chosen = Direction::prefer(f.1, b.1);
                tracing::debug!(start, forward = f.1, backward = b.1, ?chosen, "both chain readings matched");
                match chosen {
                    Direction::SpecificToGeneral => Some((f, chosen)),
                    Direction::GeneralToSpecific => Some((b, chosen)),
                }
            }
            (Some(f), None) => Some((f, Direction::SpecificToGeneral)),
            (None, Some(b)) => Some((b, Direction::GeneralToSpecific)),
            (None, None) => None,
        }
    }

    /// Specific-to-general chain, optionally led by a place or sub-town. When
    /// the chain fails after the prefix it is retried without it.
    fn prefixed_chain(&mut self, pos: usize) -> Option<Chain> {
        if let Some((prefix, after)) = self.prefix(pos) {
            if let Some((mut nodes, end)) = self.chain(Direction::SpecificToGeneral, after) {
                nodes.insert(0, GeoNode::Level(prefix.level, prefix.name));
                return Some((nodes, end));
            }
        }
        self.chain(Direction::SpecificToGeneral, pos)
    }

    /// "кладбище при г. ...", "хутор Зимняцкий Глазуновской станицы".
    fn prefix(&mut self, pos: usize) -> Option<(LevelMatch, usize)> {
        if let Some(place) = self.level(GeoLevel::Place, pos) {
            let end = self.preposition(place.end).or_else(|| self.lit(place.end, ",")).unwrap_or(place.end);
            return Some((place, end));
        }
        let sub_town = self.level(GeoLevel::SubTown, pos)?;
        let end = self.preposition(sub_town.end).unwrap_or(sub_town.end);
        self.level(GeoLevel::Town, end)?;
        Some((sub_town, end))
    }

    fn preposition(&self, pos: usize) -> Option<usize> {
        let p = self.skip_ws(pos);
        PREPOSITIONS.iter().find_map(|word| word.match_at(self.input, p)).map(|len| p + len)
    }

    /// Levels in `direction` order starting at `pos`. The first matching level
    /// anchors the chain; each later level is optional and may be preceded by
    /// a delimiter.
    fn chain(&mut self, direction: Direction, pos: usize) -> Option<Chain> {
        let levels = direction.levels();
        for (i, &head) in levels.iter().enumerate() {
            let Some(first) = self.level(head, pos) else { continue };
            let mut end = first.end;
            let mut nodes = vec![GeoNode::Level(first.level, first.name)];
            for &level in &levels[i + 1..] {
                let at = self.delimiter(direction, end);
                if let Some(m) = self.level(level, at) {
                    end = m.end;
                    nodes.push(GeoNode::Level(m.level, m.name));
                }
            }
            return Some((nodes, end));
        }
        None
    }

    /// Skip "," (or the preposition "в" when reading outwards).
    fn delimiter(&self, direction: Direction, pos: usize) -> usize {
        if let Some(end) = self.lit(pos, ",") {
            return end;
        }
        if direction == Direction::SpecificToGeneral {
            let p = self.skip_ws(pos);
            if self.is_boundary(p) {
                if let Some(m) = regex!(r"^в\b").find(&self.input[p..]) {
                    return p + m.end();
                }
            }
        }
        pos
    }
}
