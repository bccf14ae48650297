//! Parse result tree.
//!
//! A [`GeoParse`] is the ordered list of levels one grammar match produced,
//! plus any chain-level "ныне" re-addressing. Levels carry their own optional
//! bracketed annotation, so nothing is looked up by string key.

use serde::Serialize;

use crate::{GeoLevel, Range};

/// One matched level: normalized name and type plus the raw source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    /// Nominative, title-cased name.
    pub name: String,
    /// Canonical type word, absent when the text had none.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub raw_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_type: Option<String>,
    /// The type word was written before the name ("г. Москва").
    pub type_first: bool,
    /// Bracket following the level: "г. Романов-Борисоглебск (ныне г. Тутаев)".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
    /// Bracket between name and type: "Ивановская (ныне Рязанская) обл.".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_annotation: Option<Annotation>,
    pub range: Range,
}

/// Bracketed or comma-introduced extra information attached to a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// A "now known as" address, itself a full parse.
    Reassignment(Box<GeoParse>),
    /// Bracket text the grammar could not read, kept verbatim.
    Comment(String),
}

impl Annotation {
    pub fn as_reassignment(&self) -> Option<&GeoParse> {
        match self {
            Annotation::Reassignment(parse) => Some(parse),
            Annotation::Comment(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoNode {
    Level(GeoLevel, ParsedName),
    /// ", ныне <address>" after the whole chain.
    Nowadays(Box<GeoParse>),
}

/// Result of one grammar match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoParse {
    pub nodes: Vec<GeoNode>,
    pub range: Range,
}

impl GeoParse {
    pub fn get(&self, level: GeoLevel) -> Option<&ParsedName> {
        self.levels().find(|(l, _)| *l == level).map(|(_, name)| name)
    }

    /// Matched levels in source order.
    pub fn levels(&self) -> impl Iterator<Item = (GeoLevel, &ParsedName)> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            GeoNode::Level(level, name) => Some((*level, name)),
            GeoNode::Nowadays(_) => None,
        })
    }

    /// Every re-addressing of this parse in source order: embedded name
    /// brackets, trailing brackets and the chain-level "ныне" clause.
    pub fn reassignments(&self) -> Vec<&GeoParse> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                GeoNode::Level(_, name) => {
                    out.extend(name.name_annotation.as_ref().and_then(Annotation::as_reassignment));
                    out.extend(name.annotation.as_ref().and_then(Annotation::as_reassignment));
                }
                GeoNode::Nowadays(parse) => out.push(parse),
            }
        }
        out
    }

    /// Verbatim bracket comments in source order.
    pub fn comments(&self) -> Vec<&str> {
        self.levels()
            .flat_map(|(_, name)| [&name.name_annotation, &name.annotation])
            .filter_map(|a| match a {
                Some(Annotation::Comment(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str, kind: Option<&str>) -> ParsedName {
        ParsedName {
            name: text.to_string(),
            kind: kind.map(str::to_string),
            raw_name: text.to_string(),
            raw_type: kind.map(str::to_string),
            type_first: false,
            annotation: None,
            name_annotation: None,
            range: Range::default(),
        }
    }

    fn single(level: GeoLevel, n: ParsedName) -> GeoParse {
        GeoParse { nodes: vec![GeoNode::Level(level, n)], range: Range::default() }
    }

    #[test]
    fn reassignments_follow_source_order() {
        let embedded = single(GeoLevel::Region, name("Рязанская", None));
        let trailing = single(GeoLevel::Town, name("Тутаев", Some("город")));
        let comma = single(GeoLevel::Country, name("Россия", None));

        let mut town = name("Романов-Борисоглебск", Some("город"));
        town.annotation = Some(Annotation::Reassignment(Box::new(trailing.clone())));
        let mut region = name("Ивановская", Some("область"));
        region.name_annotation = Some(Annotation::Reassignment(Box::new(embedded.clone())));
        region.annotation = Some(Annotation::Comment("бывш.".to_string()));

        let parse = GeoParse {
            nodes: vec![
                GeoNode::Level(GeoLevel::Town, town),
                GeoNode::Level(GeoLevel::Region, region),
                GeoNode::Nowadays(Box::new(comma.clone())),
            ],
            range: Range::default(),
        };

        assert_eq!(parse.reassignments(), vec![&trailing, &embedded, &comma]);
        assert_eq!(parse.comments(), vec!["бывш."]);
        assert_eq!(parse.get(GeoLevel::Region).map(|n| n.name.as_str()), Some("Ивановская"));
        assert!(parse.get(GeoLevel::Country).is_none());
    }

    #[test]
    fn serializes_with_type_key() {
        let parse = single(GeoLevel::Town, name("Видное", Some("город")));
        let json = serde_json::to_value(&parse).unwrap();
        assert_eq!(json["nodes"][0]["level"][0], "town");
        assert_eq!(json["nodes"][0]["level"][1]["type"], "город");
    }
}
