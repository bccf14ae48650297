//! Per-level type vocabularies.
//!
//! One-letter abbreviations ("г.", "д.", "с.") are case-sensitive literals so
//! they are not confused with initials. Abbreviations that are not words on
//! their own may appear in any case. Full words must stand as separate words.

use super::{GeoType, Lexeme, TypeRegistry};
use crate::GeoLevel;
use Lexeme::{CaselessKeyword, CaselessLiteral, Keyword, Literal};

fn from_words(level: GeoLevel, lines: &'static str, agree_when_type_first: bool) -> TypeRegistry {
    let types = lines
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| GeoType::from_words(line, agree_when_type_first))
        .collect();
    TypeRegistry::new(level, types)
}

/// Places on a map: valleys, cemeteries, islands, churches.
pub(crate) fn place() -> TypeRegistry {
    let full = from_words(
        GeoLevel::Place,
        "долина долины долине
         заимка заимки заимке
         источник источника источнике
         кладбище кладбища
         лесничество лесничества лесничестве
         лесопункт лесопункте лесопункта
         остров острове острова
         прииск прииске прииска
         пустошь пустоши
         роща роще рощи
         церковь церкви",
        false,
    );
    let short = TypeRegistry::new(GeoLevel::Place, vec![geo_type!("остров", [Literal("о.")], agree_when_type_first: true)]);
    TypeRegistry::union(GeoLevel::Place, [full, short])
}

/// Settlement abbreviations.
fn town_short() -> TypeRegistry {
    TypeRegistry::new(
        GeoLevel::Town,
        vec![
            geo_type!("город", [CaselessLiteral("гор."), Literal("г."), CaselessKeyword("г")], agree_when_type_first: true),
            geo_type!("деревня", [CaselessLiteral("дер."), Literal("д."), CaselessKeyword("д")], agree_when_type_first: true),
            geo_type!("ж.-д. станция", [CaselessLiteral("ж.-д. ст.")], agree_when_type_first: true),
            geo_type!("местечко", [CaselessLiteral("мест."), Literal("м.")], agree_when_type_first: true),
            geo_type!("погост", [CaselessLiteral("пог.")], agree_when_type_first: true),
            geo_type!("поселок", [CaselessLiteral("пос.")], agree_when_type_first: true),
            geo_type!("поселок/погост/починок", [Literal("п."), CaselessKeyword("п")], agree_when_type_first: true),
            geo_type!("село", [Literal("с.")], agree_when_type_first: true),
            geo_type!("слобода", [CaselessLiteral("слоб."), CaselessLiteral("сл.")], agree_when_type_first: true),
            geo_type!("станция", [CaselessLiteral("ст.")], agree_when_type_first: true),
            geo_type!("хутор", [CaselessLiteral("хут.")], agree_when_type_first: true),
        ],
    )
}

/// Settlement words that also read naturally after the name ("Никольская
/// слобода").
fn town_full() -> TypeRegistry {
    from_words(
        GeoLevel::Town,
        "аул ауле аула
         выселок выселке выселка
         завод заводе завода
         местечко местечке местечка
         погост погосте погоста пог
         посад посаде посада
         поселок поселке поселка
         починок починке починка
         село селе села
         сельцо сельце сельца
         слобода слободе слободы
         спецпоселок спецпоселке спецпоселка
         станица станице станицы
         станок станке станка
         станция станции
         трудпоселок трудпоселке трудпоселка
         урочище урочища
         хутор хуторе хутора
         деревня деревне деревни
         пустынь пустыни
         слободка слободке слободки
         наслег наслеге наслега",
        true,
    )
}

pub(crate) fn town() -> TypeRegistry {
    TypeRegistry::union(GeoLevel::Town, [town_short(), town_full()])
}

/// Settlement types accepted after the name: full words plus two
/// abbreviations that cannot be mistaken for initials.
pub(crate) fn town_after() -> TypeRegistry {
    let extra = TypeRegistry::new(
        GeoLevel::Town,
        vec![
            geo_type!("слобода", [CaselessLiteral("слоб.")], agree_when_type_first: true),
            geo_type!("хутор", [CaselessLiteral("хут.")], agree_when_type_first: true),
        ],
    );
    TypeRegistry::union(GeoLevel::Town, [town_full(), extra])
}

pub(crate) fn sub_district() -> TypeRegistry {
    TypeRegistry::new(
        GeoLevel::SubDistrict,
        vec![
            geo_type!("волость", [re!(r"^вол(\.|ость\b|ости\b)")], agree_when_type_first: true),
            geo_type!("улус", [re!(r"^улус(а|е?)\b")], agree_when_type_first: true),
            geo_type!("сельсовет", [re!(r"^сельсовет(а|е)?\b")], agree_when_type_first: true),
        ],
    )
}

pub(crate) fn district() -> TypeRegistry {
    TypeRegistry::new(
        GeoLevel::District,
        vec![
            geo_type!("район", [re!(r"^р-н(а|е)?\b"), re!(r"^район(а|е)?\b"), Keyword("р.")], agree_when_type_first: false),
            geo_type!("уезд", [re!(r"^уезд(а|е)?\b"), re!(r"^у\.")], agree_when_type_first: false),
            // Майкопского отд. Кубанской обл.
            geo_type!("отдел", [re!(r"^отд\."), re!(r"^отдел(а|е)?\b")], agree_when_type_first: false),
        ],
    )
}

pub(crate) fn sub_region() -> TypeRegistry {
    TypeRegistry::new(
        GeoLevel::SubRegion,
        vec![
            geo_type!("округ", [re!(r"^окр(\.|уга\b|уге\b|уг\b)")], agree_when_type_first: false),
            geo_type!("автономная область", [re!(r"^АО\b")], agree_when_type_first: false),
        ],
    )
}

/// "республика" in its three case forms, or "респ.".
pub(crate) fn republic_lexemes() -> Vec<Lexeme> {
    vec![
        CaselessKeyword("республика"),
        CaselessKeyword("республики"),
        CaselessKeyword("республике"),
        CaselessLiteral("респ."),
    ]
}

pub(crate) fn region() -> TypeRegistry {
    TypeRegistry::new(
        GeoLevel::Region,
        vec![
            geo_type!("область", [re!(r"^обл(\.|асть\b|асти\b|\b)"), Keyword("о.")], agree_when_type_first: false),
            geo_type!("губерния", [re!(r"^губ(\.|ерния\b|ернии\b|\b)")], agree_when_type_first: false),
            geo_type!("край", [re!(r"^кра(й|я|е)\b")], agree_when_type_first: false),
            geo_type!("АССР", [re!(r"^АССР\b")], agree_when_type_first: false),
            geo_type!("епархия", [re!(r"^епархи(и|я)\b")], agree_when_type_first: false),
            GeoType::new("республика", republic_lexemes(), false),
        ],
    )
}

pub(crate) fn country() -> TypeRegistry {
    TypeRegistry::new(
        GeoLevel::Country,
        vec![GeoType::new("республика", republic_lexemes(), true), geo_type!("ССР", [Literal("ССР")], agree_when_type_first: true)],
    )
}
