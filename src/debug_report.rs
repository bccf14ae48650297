use serde_json::json;
use toponym::{Annotation, GeoEntity, GeoError, GeoMatch, GeoParse, Naming, ParsedName, ScanReport};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
        if self.enabled { format!("{}{}{}", color, s.as_ref(), ansi::RESET) } else { s.as_ref().to_string() }
    }

    fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(s, ansi::BOLD)
    }

    fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(s, ansi::DIM)
    }
}

pub fn print_scan(report: &ScanReport, naming: Naming, palette: &Palette) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Scanning: \"{}\"", report.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Matches ━━━", ansi::GRAY));
    if report.matches.is_empty() {
        println!("{}", palette.dim("  No references found"));
    }
    for (idx, m) in report.matches.iter().enumerate() {
        print_match(idx, &report.text, m, naming, palette);
    }

    let metrics = &report.metrics;
    println!("\n{}", palette.paint("━━━ Metrics ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Candidates: {}  │  Attempts: {}  │  Steps: {}  │  Memo hits: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.paint(metrics.candidates.to_string(), ansi::BLUE),
        palette.paint(metrics.attempts.to_string(), ansi::BLUE),
        palette.paint(metrics.steps.to_string(), ansi::YELLOW),
        palette.dim(metrics.memo_hits.to_string()),
    );
    if metrics.exhausted > 0 {
        println!("  {}", palette.paint(format!("{} attempts hit the step limit", metrics.exhausted), ansi::RED));
    }
    println!();
}

pub fn print_whole(input: &str, result: &Result<GeoParse, GeoError>, naming: Naming, palette: &Palette) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));
    match result {
        Ok(parse) => {
            let m = GeoMatch { parse: parse.clone(), range: parse.range };
            print_match(0, input, &m, naming, palette);
        }
        Err(err) => println!("  {}", palette.paint(err.to_string(), ansi::RED)),
    }
    println!();
}

fn print_match(idx: usize, input: &str, m: &GeoMatch, naming: Naming, palette: &Palette) {
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{idx}]"), ansi::GRAY),
        palette.bold(palette.paint(m.entity(naming).to_string(), ansi::GREEN)),
        palette.dim("│"),
        palette.paint(format!("span {}..{} \"{}\"", m.range.start, m.range.end, m.text(input)), ansi::YELLOW),
    );
    print_levels(&m.parse, 3, palette);
}

fn print_levels(parse: &GeoParse, indent: usize, palette: &Palette) {
    let pad = " ".repeat(indent * 2);
    for (level, name) in parse.levels() {
        println!(
            "{pad}{} {}  {}",
            palette.paint(format!("{level}:"), ansi::BLUE),
            describe(name),
            palette.dim(format!("← \"{}\"", raw(name))),
        );
        for annotation in [&name.name_annotation, &name.annotation].into_iter().flatten() {
            print_annotation(annotation, indent + 1, palette);
        }
    }
    for now in parse.nodes.iter().filter_map(|node| match node {
        toponym::GeoNode::Nowadays(now) => Some(now),
        toponym::GeoNode::Level(..) => None,
    }) {
        println!("{pad}{}", palette.paint("ныне:", ansi::MAGENTA));
        print_levels(now, indent + 1, palette);
    }
}

fn print_annotation(annotation: &Annotation, indent: usize, palette: &Palette) {
    let pad = " ".repeat(indent * 2);
    match annotation {
        Annotation::Reassignment(parse) => {
            println!("{pad}{}", palette.paint("ныне:", ansi::MAGENTA));
            print_levels(parse, indent + 1, palette);
        }
        Annotation::Comment(text) => println!("{pad}{} {}", palette.paint("comment:", ansi::MAGENTA), palette.dim(text)),
    }
}

fn describe(name: &ParsedName) -> String {
    match &name.kind {
        Some(kind) => format!("{} ({kind})", name.name),
        None => name.name.clone(),
    }
}

fn raw(name: &ParsedName) -> String {
    match (&name.raw_type, name.type_first) {
        (Some(kind), true) => format!("{kind} {}", name.raw_name),
        (Some(kind), false) => format!("{} {kind}", name.raw_name),
        (None, _) => name.raw_name.clone(),
    }
}

fn entities_json(parse: &GeoParse, naming: Naming) -> serde_json::Value {
    let entity = GeoEntity::from_parse(parse, naming);
    json!({ "entity": entity, "display": entity.to_string(), "parse": parse })
}

pub fn scan_json(report: &ScanReport, naming: Naming) -> serde_json::Value {
    let matches: Vec<_> = report
        .matches
        .iter()
        .map(|m| {
            let mut value = entities_json(&m.parse, naming);
            value["text"] = json!(m.text(&report.text));
            value
        })
        .collect();
    json!({ "text": report.text, "matches": matches, "metrics": report.metrics })
}

pub fn whole_json(input: &str, result: &Result<GeoParse, GeoError>, naming: Naming) -> serde_json::Value {
    match result {
        Ok(parse) => {
            let mut value = entities_json(parse, naming);
            value["text"] = json!(input);
            value
        }
        Err(err) => json!({ "text": input, "error": err.to_string() }),
    }
}
