/// Lazily compiled static regex. Grammar regexes are anchored with `^` and
/// applied to the input tail, so they only ever match at the cursor.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Lexeme::Regex`](crate::Lexeme) from an anchored literal pattern.
#[macro_export]
macro_rules! re {
    ($pat:literal) => {
        $crate::Lexeme::Regex($crate::regex!($pat))
    };
}

/// Build a [`GeoType`](crate::GeoType) from a canonical name and its lexemes.
///
/// ```ignore
/// geo_type!("район", [re!(r"^р-н(а|е)?\b"), re!(r"^район(а|е)?\b")], agree_when_type_first: false)
/// ```
#[macro_export]
macro_rules! geo_type {
    ($name:expr, [ $($lex:expr),* $(,)? ], agree_when_type_first: $agree:expr $(,)?) => {
        $crate::GeoType::new($name, vec![ $($lex),* ], $agree)
    };
}
