//! Geographic entity model.
//!
//! A [`GeoEntity`] has one optional [`TypedName`] per [`GeoLevel`]. It is
//! assembled once from a [`GeoParse`], folding in the parse's "ныне"
//! re-addressings according to a [`Naming`] policy, and never changes after.
//!
//! Two notions of sameness coexist:
//!
//! - `==`, `Ord` and `Hash` compare every level exactly (unset levels
//!   included), which is what deduplication needs.
//! - [`GeoEntity::shared_level_match`] compares only the levels both sides
//!   have, which is what gazetteer lookup needs.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::GeoLevel;
use crate::ast::{GeoParse, ParsedName};

bitflags::bitflags! {
    /// A set of hierarchy levels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeoLevelSet: u8 {
        const COUNTRY      = 1 << 0;
        const REGION       = 1 << 1;
        const SUB_REGION   = 1 << 2;
        const DISTRICT     = 1 << 3;
        const SUB_DISTRICT = 1 << 4;
        const TOWN         = 1 << 5;
        const SUB_TOWN     = 1 << 6;
        const PLACE        = 1 << 7;
    }
}

impl GeoLevelSet {
    pub fn of(level: GeoLevel) -> Self {
        GeoLevelSet::from_bits_retain(1 << level.index())
    }

    pub fn has(self, level: GeoLevel) -> bool {
        self.contains(GeoLevelSet::of(level))
    }
}

/// How re-addressings ("ныне ...") combine with the levels written in the
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Naming {
    /// Re-addressings only fill levels the text left unset.
    #[default]
    Historical,
    /// Re-addressings replace the historical names.
    PresentDay,
}

/// What an empty [`GeoEntity::shared_level_match`] means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Entities with no level in common do not match.
    RequireOverlap,
    /// Entities with no level in common match (nothing contradicts).
    AllowDisjoint,
}

/// A (name, type) pair for one level.
#[derive(Debug, Clone, Serialize)]
pub struct TypedName {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The parse the pair came from.
    #[serde(skip)]
    pub source: Option<ParsedName>,
}

impl TypedName {
    pub fn new(name: impl Into<String>, kind: Option<&str>) -> Self {
        TypedName { name: name.into(), kind: kind.map(str::to_string), source: None }
    }

    pub fn from_parsed(parsed: &ParsedName) -> Self {
        TypedName { name: parsed.name.clone(), kind: parsed.kind.clone(), source: Some(parsed.clone()) }
    }

    fn key(&self) -> (&str, &str) {
        (&self.name, self.kind.as_deref().unwrap_or(""))
    }
}

impl PartialEq for TypedName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TypedName {}

impl Hash for TypedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for TypedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for TypedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(kind) = &self.kind {
            write!(f, " {kind}")?;
        }
        Ok(())
    }
}

/// One optional [`TypedName`] per hierarchy level.
#[derive(Debug, Clone, Default)]
pub struct GeoEntity {
    slots: [Option<TypedName>; 8],
}

impl GeoEntity {
    pub fn from_levels(levels: impl IntoIterator<Item = (GeoLevel, TypedName)>) -> Self {
        let mut entity = GeoEntity::default();
        for (level, name) in levels {
            entity.slots[level.index()] = Some(name);
        }
        entity
    }

    /// Assemble an entity from a parse.
    ///
    /// Levels written in the text are set first. Every re-addressing of the
    /// parse is then built into an entity of its own (recursively, with the
    /// same policy) and merged in source order: unset levels are always
    /// filled, set ones are replaced only under [`Naming::PresentDay`].
    pub fn from_parse(parse: &GeoParse, naming: Naming) -> Self {
        let mut entity = GeoEntity::from_levels(parse.levels().map(|(level, name)| (level, TypedName::from_parsed(name))));
        for reassignment in parse.reassignments() {
            let other = GeoEntity::from_parse(reassignment, naming);
            for (level, name) in other.levels() {
                let slot = &mut entity.slots[level.index()];
                if slot.is_none() || naming == Naming::PresentDay {
                    *slot = Some(name.clone());
                }
            }
        }
        entity
    }

    pub fn get(&self, level: GeoLevel) -> Option<&TypedName> {
        self.slots[level.index()].as_ref()
    }

    /// Set levels, broad to specific.
    pub fn levels(&self) -> impl DoubleEndedIterator<Item = (GeoLevel, &TypedName)> + '_ {
        GeoLevel::ALL.into_iter().filter_map(|level| self.get(level).map(|name| (level, name)))
    }

    pub fn level_set(&self) -> GeoLevelSet {
        self.levels().fold(GeoLevelSet::empty(), |set, (level, _)| set | GeoLevelSet::of(level))
    }

    pub fn level_count(&self) -> usize {
        self.levels().count()
    }

    pub fn is_empty(&self) -> bool {
        self.level_count() == 0
    }

    /// Whether the entity pins down an actual point: a settlement or place
    /// anchored in some broader unit, or a town explicitly typed as a city.
    pub fn is_locatable(&self) -> bool {
        let has = |level| self.get(level).is_some();
        let anchored = has(GeoLevel::Region) || has(GeoLevel::Country) || has(GeoLevel::District);
        let pointed = has(GeoLevel::Town) || has(GeoLevel::Place);
        let city = self.get(GeoLevel::Town).is_some_and(|t| t.kind.as_deref() == Some("город"));
        (anchored && pointed) || city
    }

    /// Compare names on the levels both entities have.
    ///
    /// Returns `None` as soon as one shared level disagrees, otherwise the set
    /// of levels that were compared. The set is empty when the entities have
    /// no level in common; see [`GeoEntity::matches`] for interpreting that.
    pub fn shared_level_match(&self, other: &GeoEntity) -> Option<GeoLevelSet> {
        let mut matched = GeoLevelSet::empty();
        for level in GeoLevel::ALL {
            if let (Some(a), Some(b)) = (self.get(level), other.get(level)) {
                if a.name != b.name {
                    return None;
                }
                matched |= GeoLevelSet::of(level);
            }
        }
        Some(matched)
    }

    pub fn matches(&self, other: &GeoEntity, policy: MatchPolicy) -> bool {
        match self.shared_level_match(other) {
            None => false,
            Some(set) if set.is_empty() => policy == MatchPolicy::AllowDisjoint,
            Some(_) => true,
        }
    }

    /// The most specific set level.
    pub fn key_level(&self) -> Option<GeoLevel> {
        self.levels().next_back().map(|(level, _)| level)
    }

    pub fn key_value(&self) -> Option<&TypedName> {
        self.levels().next_back().map(|(_, name)| name)
    }

    fn sort_key(&self) -> [Option<(&str, &str)>; 8] {
        std::array::from_fn(|i| self.slots[i].as_ref().map(TypedName::key))
    }
}

impl PartialEq for GeoEntity {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for GeoEntity {}

impl Hash for GeoEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for GeoEntity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeoEntity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Broad to specific, "Россия, Московская область, город Видное".
impl fmt::Display for GeoEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (level, name)) in self.levels().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match (&name.kind, level.type_leads()) {
                (Some(kind), true) => write!(f, "{kind} {}", name.name)?,
                _ => write!(f, "{name}")?,
            }
        }
        Ok(())
    }
}

impl Serialize for GeoEntity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.level_count()))?;
        for (level, name) in self.levels() {
            map.serialize_entry(&level, name)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Range;
    use crate::ast::{Annotation, GeoNode};
    use std::collections::HashSet;

    fn tn(name: &str, kind: Option<&str>) -> TypedName {
        TypedName::new(name, kind)
    }

    fn vidnoye() -> GeoEntity {
        GeoEntity::from_levels([
            (GeoLevel::Town, tn("Видное", Some("город"))),
            (GeoLevel::Region, tn("Московская", Some("область"))),
        ])
    }

    fn parsed(name: &str, kind: Option<&str>) -> ParsedName {
        ParsedName {
            name: name.to_string(),
            kind: kind.map(str::to_string),
            raw_name: name.to_string(),
            raw_type: kind.map(str::to_string),
            type_first: true,
            annotation: None,
            name_annotation: None,
            range: Range::default(),
        }
    }

    fn parse(nodes: Vec<GeoNode>) -> GeoParse {
        GeoParse { nodes, range: Range::default() }
    }

    #[test]
    fn locatable_needs_an_anchor_or_a_city() {
        assert!(vidnoye().is_locatable());
        assert!(!GeoEntity::from_levels([(GeoLevel::Town, tn("Ивановка", None))]).is_locatable());
        assert!(GeoEntity::from_levels([(GeoLevel::Town, tn("Тула", Some("город")))]).is_locatable());
        assert!(!GeoEntity::from_levels([(GeoLevel::Region, tn("Рязанская", Some("область")))]).is_locatable());
        assert!(
            GeoEntity::from_levels([
                (GeoLevel::Place, tn("Жуковского", Some("кладбище"))),
                (GeoLevel::District, tn("Ленинский", Some("район"))),
            ])
            .is_locatable()
        );
    }

    #[test]
    fn level_set_lists_the_set_levels() {
        let set = vidnoye().level_set();
        assert!(set.has(GeoLevel::Town));
        assert!(set.has(GeoLevel::Region));
        assert!(!set.has(GeoLevel::Country));
        assert_eq!(set, GeoLevelSet::TOWN | GeoLevelSet::REGION);
    }

    #[test]
    fn shared_levels_must_all_agree() {
        let region = tn("Рязанская", Some("область"));
        let a = GeoEntity::from_levels([(GeoLevel::Town, tn("Ивановка", None)), (GeoLevel::Region, region.clone())]);
        let b = GeoEntity::from_levels([(GeoLevel::Town, tn("Петровка", None)), (GeoLevel::Region, region.clone())]);
        assert_eq!(a.shared_level_match(&b), None);
        assert!(!a.matches(&b, MatchPolicy::AllowDisjoint));

        let c = GeoEntity::from_levels([(GeoLevel::Region, region)]);
        assert_eq!(a.shared_level_match(&c), Some(GeoLevelSet::REGION));
        assert!(a.matches(&c, MatchPolicy::RequireOverlap));
    }

    #[test]
    fn disjoint_entities_depend_on_policy() {
        let a = GeoEntity::from_levels([(GeoLevel::Town, tn("Ивановка", None))]);
        let b = GeoEntity::from_levels([(GeoLevel::Country, tn("Россия", None))]);
        assert_eq!(a.shared_level_match(&b), Some(GeoLevelSet::empty()));
        assert!(!a.matches(&b, MatchPolicy::RequireOverlap));
        assert!(a.matches(&b, MatchPolicy::AllowDisjoint));
    }

    #[test]
    fn equality_is_exact_and_ignores_source() {
        let mut with_source = tn("Видное", Some("город"));
        with_source.source = Some(parsed("Видное", Some("город")));
        let a = GeoEntity::from_levels([(GeoLevel::Town, with_source)]);
        let b = GeoEntity::from_levels([(GeoLevel::Town, tn("Видное", Some("город")))]);
        assert_eq!(a, b);
        assert_ne!(a, vidnoye());
        assert_ne!(
            GeoEntity::from_levels([(GeoLevel::Town, tn("Видное", None))]),
            GeoEntity::from_levels([(GeoLevel::SubTown, tn("Видное", None))])
        );

        let set: HashSet<GeoEntity> = [a.clone(), b, vidnoye()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_walks_levels_broad_first() {
        let russia = GeoEntity::from_levels([(GeoLevel::Country, tn("Россия", None))]);
        let town = GeoEntity::from_levels([(GeoLevel::Town, tn("Ивановка", None))]);
        // Unset country sorts before a set one.
        assert!(town < russia);
        assert_eq!(vidnoye().key_level(), Some(GeoLevel::Town));
        assert_eq!(vidnoye().key_value().map(|t| t.name.as_str()), Some("Видное"));
        assert_eq!(GeoEntity::default().key_level(), None);
    }

    #[test]
    fn reassignments_fill_or_replace_by_policy() {
        let mut town = parsed("Романов-Борисоглебск", Some("город"));
        let now = parse(vec![
            GeoNode::Level(GeoLevel::Town, parsed("Тутаев", Some("город"))),
            GeoNode::Level(GeoLevel::Region, parsed("Ярославская", Some("область"))),
        ]);
        town.annotation = Some(Annotation::Reassignment(Box::new(now)));
        let p = parse(vec![GeoNode::Level(GeoLevel::Town, town)]);

        let historical = GeoEntity::from_parse(&p, Naming::Historical);
        assert_eq!(historical.get(GeoLevel::Town).map(|t| t.name.as_str()), Some("Романов-Борисоглебск"));
        assert_eq!(historical.get(GeoLevel::Region).map(|t| t.name.as_str()), Some("Ярославская"));

        let present = GeoEntity::from_parse(&p, Naming::PresentDay);
        assert_eq!(present.get(GeoLevel::Town).map(|t| t.name.as_str()), Some("Тутаев"));
        assert_eq!(present.level_count(), 2);
    }

    #[test]
    fn display_puts_settlement_types_first() {
        let mut e = vidnoye();
        e.slots[GeoLevel::Country.index()] = Some(tn("Россия", None));
        assert_eq!(e.to_string(), "Россия, Московская область, город Видное");
    }

    #[test]
    fn serializes_as_level_map() {
        let json = serde_json::to_value(vidnoye()).unwrap();
        assert_eq!(json["town"]["name"], "Видное");
        assert_eq!(json["region"]["type"], "область");
        assert!(json.get("country").is_none());
    }
}
