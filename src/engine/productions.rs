//! Level productions.
//!
//! Each level is a short ordered list of alternatives, tried first to last.
//! An alternative only recognizes spans (name, optional type word, optional
//! bracket); [`ParseState::finish`] then reads a trailing bracket and
//! normalizes the pair through the level's type registry. When normalization
//! rejects the type word the next alternative is tried.

use super::brackets::NameBracket;
use super::cursor::{LevelMatch, ParseState};
use crate::ast::{Annotation, GeoNode, GeoParse, ParsedName};
use crate::dictionary::Dictionary;
use crate::morph::{IdentityMorphology, Morphology};
use crate::registry::TypeRegistry;
use crate::{GeoLevel, Range};

/// Spans recognized by one alternative, before normalization.
pub(crate) struct Draft<'g> {
    name: Range,
    /// Dictionary entry the name was found under; replaces the surface text.
    lemma: Option<&'g str>,
    kind: Option<Range>,
    type_first: bool,
    bracket: Option<NameBracket>,
    end: usize,
}

impl<'g> Draft<'g> {
    fn bare(name: Range) -> Self {
        Draft { name, lemma: None, kind: None, type_first: false, bracket: None, end: name.end }
    }

    fn typed(name: Range, kind: Range, type_first: bool) -> Self {
        let end = if type_first { name.end } else { kind.end };
        Draft { name, lemma: None, kind: Some(kind), type_first, bracket: None, end }
    }
}

type Alternative<'g, 'i> = fn(&mut ParseState<'g, 'i>, usize) -> Option<Draft<'g>>;

impl<'g, 'i> ParseState<'g, 'i> {
    pub(crate) fn produce(&mut self, level: GeoLevel, pos: usize) -> Option<LevelMatch> {
        let g = self.grammar;
        let found = match level {
            GeoLevel::Place => self.first_of(level, &g.place, pos, &[Self::place_type_first, Self::place_name_first]),
            GeoLevel::Town => self.first_of(
                level,
                &g.town,
                pos,
                &[
                    Self::town_type_first,
                    Self::town_bracketed_name_first,
                    Self::town_two_word_name_first,
                    Self::town_from_dictionary,
                    Self::town_before_typed_level,
                ],
            ),
            GeoLevel::SubTown => self.level(GeoLevel::Town, pos).map(|m| LevelMatch { level, ..m }),
            GeoLevel::SubDistrict => self.first_of(level, &g.sub_district, pos, &[Self::sub_district_name_first]),
            GeoLevel::District => self.first_of(level, &g.district, pos, &[Self::district_name_first]),
            GeoLevel::SubRegion => self.sub_region(pos),
            GeoLevel::Region => {
                self.first_of(level, &g.region, pos, &[Self::region_name_first, Self::region_from_dictionary])
            }
            GeoLevel::Country => self.first_of(
                level,
                &g.country,
                pos,
                &[Self::country_name_first, Self::country_from_dictionary, Self::republic_name],
            ),
        };
        if let Some(m) = &found {
            tracing::trace!(%level, pos, end = m.end, name = %m.name.name, "level matched");
        }
        found
    }

    fn first_of(
        &mut self,
        level: GeoLevel,
        registry: &TypeRegistry,
        pos: usize,
        alternatives: &[Alternative<'g, 'i>],
    ) -> Option<LevelMatch> {
        alternatives.iter().find_map(|alt| {
            let draft = alt(self, pos)?;
            self.finish(level, registry, draft)
        })
    }

    /// Read the trailing bracket and normalize the draft.
    fn finish(&mut self, level: GeoLevel, registry: &TypeRegistry, draft: Draft<'g>) -> Option<LevelMatch> {
        let input = self.input;
        let (annotation, end) = match self.in_brackets(draft.end) {
            Some((annotation, end)) => (Some(annotation), end),
            None => (None, draft.end),
        };

        let raw_name = &input[draft.name.start..draft.name.end];
        let raw_type = draft.kind.map(|k| &input[k.start..k.end]);
        let morph: &dyn Morphology = if draft.lemma.is_some() { &IdentityMorphology } else { self.grammar.morphology() };
        let (kind, name) = match registry.normalize(raw_type, draft.lemma.unwrap_or(raw_name), draft.type_first, morph)
        {
            Ok(pair) => pair,
            Err(mismatch) => {
                tracing::trace!(%mismatch, "alternative rejected");
                return None;
            }
        };

        let name_annotation = draft.bracket.map(|bracket| match bracket {
            NameBracket::Nowadays(parse) => Annotation::Reassignment(Box::new(parse)),
            NameBracket::Comment(text) => Annotation::Comment(text),
            NameBracket::OtherName { name, raw } => {
                let alias = ParsedName {
                    name,
                    kind: kind.clone(),
                    raw_name: input[raw.start..raw.end].to_string(),
                    raw_type: None,
                    type_first: draft.type_first,
                    annotation: None,
                    name_annotation: None,
                    range: raw,
                };
                Annotation::Reassignment(Box::new(GeoParse { nodes: vec![GeoNode::Level(level, alias)], range: raw }))
            }
        });

        let start = draft.kind.map_or(draft.name.start, |k| k.start.min(draft.name.start));
        let parsed = ParsedName {
            name,
            kind,
            raw_name: raw_name.to_string(),
            raw_type: raw_type.map(str::to_string),
            type_first: draft.type_first,
            annotation,
            name_annotation,
            range: Range::new(start, end),
        };
        Some(LevelMatch { level, name: parsed, end })
    }

    // --- lookups ------------------------------------------------------------

    fn type_at(&self, registry: &TypeRegistry, pos: usize) -> Option<Range> {
        let p = self.skip_ws(pos);
        registry.match_at(self.input, p).map(|len| Range::new(p, p + len))
    }

    /// Any administrative or town type word follows.
    fn typed_level_follows(&self, pos: usize) -> bool {
        self.grammar.any_type_at(self.input, self.skip_ws(pos))
    }

    fn dictionary_name(&self, dictionary: &'g Dictionary, pos: usize) -> Option<(Range, &'g str)> {
        let p = self.skip_ws(pos);
        dictionary.match_at(self.input, p).map(|(len, lemma)| (Range::new(p, p + len), lemma))
    }

    /// Title, optional name bracket, type word from `registry`.
    fn name_first(&mut self, registry: &TypeRegistry, pos: usize) -> Option<Draft<'g>> {
        let name = self.title(pos)?;
        let (bracket, after) = match self.name_brackets(name.end) {
            Some((bracket, end)) => (Some(bracket), end),
            None => (None, name.end),
        };
        let kind = self.type_at(registry, after)?;
        Some(Draft { bracket, ..Draft::typed(name, kind, false) })
    }

    /// Optional "республика", then a dictionary entry.
    fn republic_then_dictionary(&mut self, dictionary: &'g Dictionary, pos: usize) -> Option<Draft<'g>> {
        let p = self.skip_ws(pos);
        let kind = self.grammar.republic.match_at(self.input, p).map(|len| Range::new(p, p + len));
        let (name, lemma) = self.dictionary_name(dictionary, kind.map_or(p, |k| k.end))?;
        Some(Draft { lemma: Some(lemma), kind, type_first: kind.is_some(), ..Draft::bare(name) })
    }

    // --- place --------------------------------------------------------------

    fn place_type_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let kind = self.type_at(&self.grammar.place, pos)?;
        let mut name = self.title(kind.end)?;
        if let Some(second) = self.title(name.end) {
            if !self.typed_level_follows(second.end) {
                name.end = second.end;
            }
        }
        Some(Draft::typed(name, kind, true))
    }

    fn place_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let mut name = self.title(pos)?;
        if let Some(second) = self.title(name.end) {
            if self.type_at(&self.grammar.place, second.end).is_some() {
                name.end = second.end;
            }
        }
        let kind = self.type_at(&self.grammar.place, name.end)?;
        if self.two_titles(kind.end) {
            return None;
        }
        Some(Draft::typed(name, kind, false))
    }

    // --- town ---------------------------------------------------------------

    /// "г. Романов-Борисоглебск", "с. Большие Поляны (Березовка)".
    fn town_type_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let kind = self.type_at(&self.grammar.town, pos)?;
        let mut name = self.title(kind.end)?;
        if let Some(second) = self.title(name.end) {
            let after = self.name_brackets(second.end).map_or(second.end, |(_, end)| end);
            if !self.typed_level_follows(after) {
                name.end = second.end;
            }
        }
        let mut draft = Draft::typed(name, kind, true);
        // A bracket right after the name is an alias only when another one follows.
        if let Some((bracket, end)) = self.name_brackets(name.end) {
            if self.lit(end, "(").is_some() {
                draft.bracket = Some(bracket);
                draft.end = end;
            }
        }
        Some(draft)
    }

    /// "Ивановка (Петровка) слободы".
    fn town_bracketed_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        let draft = self.name_first(&g.town_after, pos)?;
        if self.two_titles(draft.end) {
            return None;
        }
        Some(draft)
    }

    /// "Большие Поляны села".
    fn town_two_word_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let mut name = self.title(pos)?;
        if let Some(second) = self.title(name.end) {
            name.end = second.end;
        }
        let kind = self.type_at(&self.grammar.town_after, name.end)?;
        if self.two_titles(kind.end) {
            return None;
        }
        Some(Draft::typed(name, kind, false))
    }

    fn town_from_dictionary(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        let (name, lemma) = self.dictionary_name(&g.towns, pos)?;
        Some(Draft { lemma: Some(lemma), ..Draft::bare(name) })
    }

    /// An untyped name directly before a typed level: "Видное Московской области".
    fn town_before_typed_level(&mut self, pos: usize) -> Option<Draft<'g>> {
        let name = self.title(pos)?;
        let next = self.title(name.end)?;
        self.typed_level_follows(next.end).then(|| Draft::bare(name))
    }

    // --- administrative levels ----------------------------------------------

    fn sub_district_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.name_first(&g.sub_district, pos)
    }

    fn district_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.name_first(&g.district, pos)
    }

    fn region_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.name_first(&g.region, pos)
    }

    fn region_from_dictionary(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.republic_then_dictionary(&g.regions, pos)
    }

    fn country_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.name_first(&g.country, pos)
    }

    fn country_from_dictionary(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.republic_then_dictionary(&g.countries, pos)
    }

    /// "республики Коми".
    fn republic_name(&mut self, pos: usize) -> Option<Draft<'g>> {
        let p = self.skip_ws(pos);
        let len = self.grammar.republic.match_at(self.input, p)?;
        let kind = Range::new(p, p + len);
        let name = self.title(kind.end)?;
        Some(Draft::typed(name, kind, true))
    }

    /// Sub-regions are written like regions except for "обл." used for an
    /// okrug-like unit directly inside a region: "Тобольская обл. Тюменской
    /// области". That form is normalized with the region vocabulary and only
    /// accepted when a region follows.
    fn sub_region(&mut self, pos: usize) -> Option<LevelMatch> {
        let g = self.grammar;
        if let Some(m) = self.first_of(GeoLevel::SubRegion, &g.sub_region, pos, &[Self::sub_region_name_first]) {
            return Some(m);
        }
        let draft = self.oblast_abbreviation(pos)?;
        let m = self.finish(GeoLevel::SubRegion, &g.region, draft)?;
        self.level(GeoLevel::Region, m.end)?;
        Some(m)
    }

    fn sub_region_name_first(&mut self, pos: usize) -> Option<Draft<'g>> {
        let g = self.grammar;
        self.name_first(&g.sub_region, pos)
    }

    fn oblast_abbreviation(&mut self, pos: usize) -> Option<Draft<'g>> {
        let name = self.title(pos)?;
        let p = self.skip_ws(name.end);
        let m = regex!(r"^обл(\.|\b)").find(&self.input[p..])?;
        Some(Draft::typed(name, Range::new(p, p + m.end()), false))
    }
}
