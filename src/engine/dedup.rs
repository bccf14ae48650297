//! Entity candidates for one parse.
//!
//! A parse that carries re-addressing ("ныне ...") denotes the same place
//! under two namings. Consumers that look entities up in a gazetteer want
//! both, without duplicates.

use crate::ast::GeoParse;
use crate::entity::{GeoEntity, Naming};

/// The historical entity, followed by the present-day one when it differs.
pub fn candidate_entities(parse: &GeoParse) -> Vec<GeoEntity> {
    let historical = GeoEntity::from_parse(parse, Naming::Historical);
    let present = GeoEntity::from_parse(parse, Naming::PresentDay);
    if present == historical { vec![historical] } else { vec![historical, present] }
}
