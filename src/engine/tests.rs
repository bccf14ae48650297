use super::*;
use crate::api::{Options, default_grammar};
use crate::ast::{Annotation, GeoNode, GeoParse, ParsedName};
use crate::entity::{GeoEntity, Naming};
use crate::error::GeoError;
use crate::GeoLevel;
use proptest::prelude::*;

fn parse(input: &str) -> GeoParse {
    default_grammar().parse_whole(input).unwrap_or_else(|err| panic!("{input:?}: {err}"))
}

fn level<'a>(parse: &'a GeoParse, level: GeoLevel) -> &'a ParsedName {
    parse.get(level).unwrap_or_else(|| panic!("no {level} in {parse:?}"))
}

fn levels(parse: &GeoParse) -> Vec<GeoLevel> {
    parse.levels().map(|(level, _)| level).collect()
}

#[test]
fn finds_the_region_in_running_text() {
    let text = "У лукоморья дуб зелёный, в Рязанской области шёл дождь";
    let found: Vec<GeoMatch> = default_grammar().scan(text).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].text(text), "Рязанской области");
    assert_eq!(levels(&found[0].parse), vec![GeoLevel::Region]);
    let region = level(&found[0].parse, GeoLevel::Region);
    assert_eq!(region.name, "Рязанская");
    assert_eq!(region.kind.as_deref(), Some("область"));
    assert!(!region.type_first);
}

#[test]
fn specific_to_general_chain_wins_when_longer() {
    let p = parse("г. Видное Московской области России");
    assert_eq!(levels(&p), vec![GeoLevel::Town, GeoLevel::Region, GeoLevel::Country]);
    let town = level(&p, GeoLevel::Town);
    assert_eq!(town.kind.as_deref(), Some("город"));
    assert!(town.type_first);
    assert_eq!(town.raw_type.as_deref(), Some("г."));
    assert_eq!(level(&p, GeoLevel::Country).name, "Россия");

    let entity = GeoEntity::from_parse(&p, Naming::Historical);
    assert_eq!(entity.to_string(), "Россия, Московская область, город Видное");
    assert!(entity.is_locatable());
}

#[test]
fn general_to_specific_chain_wins_when_longer() {
    let p = parse("Россия, Московская область, г. Видное");
    assert_eq!(levels(&p), vec![GeoLevel::Country, GeoLevel::Region, GeoLevel::Town]);
    assert_eq!(level(&p, GeoLevel::Town).name, "Видное");
}

#[test]
fn comma_separated_town_and_region() {
    let p = parse("г. Видное, Московская область");
    assert_eq!(levels(&p), vec![GeoLevel::Town, GeoLevel::Region]);
    assert_eq!(p.range.end, "г. Видное, Московская область".len());
}

#[test]
fn bracketed_nowadays_reassigns_the_town() {
    let p = parse("г. Романов-Борисоглебск (ныне г. Тутаев) Ярославской губ.");
    let town = level(&p, GeoLevel::Town);
    assert_eq!(town.name, "Романов-Борисоглебск");
    let now = town.annotation.as_ref().and_then(Annotation::as_reassignment).unwrap();
    assert_eq!(level(now, GeoLevel::Town).name, "Тутаев");
    assert_eq!(level(&p, GeoLevel::Region).name, "Ярославская");
    assert_eq!(level(&p, GeoLevel::Region).kind.as_deref(), Some("губерния"));

    let historical = GeoEntity::from_parse(&p, Naming::Historical);
    let present = GeoEntity::from_parse(&p, Naming::PresentDay);
    assert_eq!(historical.get(GeoLevel::Town).unwrap().name, "Романов-Борисоглебск");
    assert_eq!(present.get(GeoLevel::Town).unwrap().name, "Тутаев");
    assert_eq!(candidate_entities(&p), vec![historical, present]);
}

#[test]
fn comma_nowadays_clause_follows_the_chain() {
    let input = "с. Ивановка Рязанской губ., ныне Рязанская обл.";
    let p = parse(input);
    assert_eq!(p.range.end, input.len());
    assert_eq!(levels(&p), vec![GeoLevel::Town, GeoLevel::Region]);
    let Some(GeoNode::Nowadays(now)) = p.nodes.last() else { panic!("no nowadays clause in {p:?}") };
    let region = level(now, GeoLevel::Region);
    assert_eq!(region.name, "Рязанская");
    assert_eq!(region.kind.as_deref(), Some("область"));

    let present = GeoEntity::from_parse(&p, Naming::PresentDay);
    assert_eq!(present.get(GeoLevel::Region).unwrap().kind.as_deref(), Some("область"));
    assert_eq!(present.get(GeoLevel::Town).unwrap().name, "Ивановка");
}

#[test]
fn bare_name_in_brackets_is_an_alias_of_the_same_level() {
    let p = parse("Ивановская (ныне Рязанская) обл.");
    let region = level(&p, GeoLevel::Region);
    assert_eq!(region.name, "Ивановская");
    assert!(region.annotation.is_none());
    let alias = region.name_annotation.as_ref().and_then(Annotation::as_reassignment).unwrap();
    let renamed = level(alias, GeoLevel::Region);
    assert_eq!(renamed.name, "Рязанская");
    assert_eq!(renamed.kind.as_deref(), Some("область"));
    assert_eq!(candidate_entities(&p).len(), 2);
}

#[test]
fn unclosed_bracket_becomes_a_comment() {
    let input = "г. Тутаев (бывш. Романов";
    let p = parse(input);
    let town = level(&p, GeoLevel::Town);
    assert_eq!(town.annotation, Some(Annotation::Comment("бывш. Романов".to_string())));
    assert_eq!(p.comments(), vec!["бывш. Романов"]);
    assert_eq!(p.range.end, input.len());
}

#[test]
fn settlement_inside_a_settlement() {
    let p = parse("хутор Зимняцкий Глазуновской станицы");
    assert_eq!(levels(&p), vec![GeoLevel::SubTown, GeoLevel::Town]);
    let sub_town = level(&p, GeoLevel::SubTown);
    assert_eq!(sub_town.name, "Зимняцкий");
    assert_eq!(sub_town.kind.as_deref(), Some("хутор"));
    let town = level(&p, GeoLevel::Town);
    assert_eq!(town.name, "Глазуновская");
    assert_eq!(town.kind.as_deref(), Some("станица"));
}

#[test]
fn ordinal_names_keep_their_suffix() {
    let p = parse("2-й Покровский починок");
    let town = level(&p, GeoLevel::Town);
    assert_eq!(town.name, "2-й Покровский");
    assert_eq!(town.kind.as_deref(), Some("починок"));
}

#[test]
fn oblast_abbreviation_inside_a_region_is_a_sub_region() {
    let p = parse("Тобольская обл. Тюменской области");
    assert_eq!(levels(&p), vec![GeoLevel::SubRegion, GeoLevel::Region]);
    let sub = level(&p, GeoLevel::SubRegion);
    assert_eq!(sub.name, "Тобольская");
    assert_eq!(sub.kind.as_deref(), Some("область"));
    assert_eq!(level(&p, GeoLevel::Region).name, "Тюменская");
}

#[test]
fn inflected_names_are_brought_to_the_nominative() {
    let cases = [
        ("г. Саратове", "Саратов"),
        ("г. Курске", "Курск"),
        ("г. Тамбове", "Тамбов"),
        ("г. Ростове-на-Дону", "Ростов-на-Дону"),
        ("с. Большие Поляны", "Большие Поляны"),
        ("д. Красные Горки", "Красные Горки"),
        ("села Пенькова", "Пеньково"),
    ];
    for (input, expected) in cases {
        assert_eq!(level(&parse(input), GeoLevel::Town).name, expected, "{input}");
    }

    let p = parse("республики Коми");
    let (_, republic) = p.levels().next().unwrap();
    assert_eq!(republic.name, "Коми");
}

#[test]
fn dictionary_towns_need_no_type() {
    let text = "Родился в с. Ивановка Рязанской губ., учился в Москве.";
    let found: Vec<GeoMatch> = default_grammar().scan(text).collect();
    assert_eq!(found.len(), 2);
    let moscow = level(&found[1].parse, GeoLevel::Town);
    assert_eq!(moscow.name, "Москва");
    assert_eq!(moscow.raw_name, "Москве");
    assert!(moscow.kind.is_none());
}

#[test]
fn trailing_text_is_no_match() {
    let err = default_grammar().parse_whole("г. Москва и далее").unwrap_err();
    match err {
        GeoError::NoMatch { consumed, .. } => assert_eq!(consumed, "г. Москва".len()),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(default_grammar().parse_whole("родился в деревне"), Err(GeoError::NoMatch { consumed: 0, .. })));
}

#[test]
fn step_limit_fails_the_parse() {
    let options = Options { step_limit: Some(1) };
    let err = default_grammar().parse_whole_with("г. Видное Московской области России", &options).unwrap_err();
    assert!(matches!(err, GeoError::StepLimitExceeded { limit: 1 }));
}

#[test]
fn step_limit_skips_scan_candidates() {
    let options = Options { step_limit: Some(1) };
    let mut scan = default_grammar().scan_with("в г. Видное Московской области", &options);
    assert!(scan.by_ref().next().is_none());
    assert!(scan.metrics().exhausted > 0);
}

#[test]
fn scan_is_restartable_and_non_overlapping() {
    let text = "с. Ивановка Рязанской губ. и д. Петровка Тульской губ.";
    let first: Vec<GeoMatch> = default_grammar().scan(text).collect();
    let second: Vec<GeoMatch> = default_grammar().scan(text).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(first[0].range.end <= first[1].range.start);
    assert_eq!(first[1].text(text), "д. Петровка Тульской губ.");
}

#[test]
fn one_grammar_serves_many_threads() {
    let text = "г. Видное Московской области России";
    let expected = parse(text);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| default_grammar().parse_whole(text).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

const WORDS: &[&str] = &[
    "г.", "с.", "д.", "Видное", "Москве", "Ивановка", "Рязанской", "губ.", "области", "обл.", "уезда", "волости", ",",
    "(ныне", ")", "в", "и", "России", "Петровки", "хутор",
];

proptest! {
    #[test]
    fn scanning_is_deterministic(words in prop::collection::vec(prop::sample::select(WORDS), 0..12)) {
        let text = words.join(" ");
        let first: Vec<GeoMatch> = default_grammar().scan(&text).collect();
        let second: Vec<GeoMatch> = default_grammar().scan(&text).collect();
        prop_assert_eq!(&first, &second);
        for (a, b) in first.iter().zip(&second) {
            prop_assert!(a.range.end <= text.len());
            prop_assert_eq!(a.entity(Naming::PresentDay), b.entity(Naming::PresentDay));
        }
        for pair in first.windows(2) {
            prop_assert!(pair[0].range.end <= pair[1].range.start);
        }
    }
}
