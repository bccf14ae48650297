mod debug_report;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use toponym::{DictionarySource, Grammar, GrammarBuilder, Naming, Options, ScanReport};
use tracing_subscriber::EnvFilter;

/// Find and normalize geographic references in historical Russian text.
///
/// Each input line is scanned on its own. Input is taken from the arguments,
/// or from stdin when no arguments are given.
#[derive(Parser, Debug)]
#[command(name = "toponym", version)]
struct Cli {
    /// Text to scan.
    input: Vec<String>,

    /// Parse each line as one whole reference instead of scanning it.
    #[arg(long)]
    whole: bool,

    /// Print JSON instead of the colored report.
    #[arg(long)]
    json: bool,

    /// Let "ныне" re-addressing overwrite the levels written in the text.
    #[arg(long)]
    present_day: bool,

    /// Newline-delimited town dictionary replacing the bundled one.
    #[arg(long, value_name = "PATH")]
    towns: Option<PathBuf>,

    /// Newline-delimited region dictionary replacing the bundled one.
    #[arg(long, value_name = "PATH")]
    regions: Option<PathBuf>,

    /// Newline-delimited country dictionary replacing the bundled one.
    #[arg(long, value_name = "PATH")]
    countries: Option<PathBuf>,

    /// Maximum level productions per match attempt.
    #[arg(long, value_name = "N")]
    step_limit: Option<usize>,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let grammar = match build_grammar(&cli) {
        Ok(grammar) => grammar,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let input = if cli.input.is_empty() {
        match read_stdin_input() {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error: failed to read stdin: {err}");
                return ExitCode::from(2);
            }
        }
    } else {
        cli.input.join(" ")
    };
    if input.trim().is_empty() {
        eprintln!("error: no input provided");
        return ExitCode::from(2);
    }

    let options = Options { step_limit: cli.step_limit };
    let naming = if cli.present_day { Naming::PresentDay } else { Naming::Historical };
    let color = (cli.color || io::stdout().is_terminal()) && !cli.no_color;
    let palette = debug_report::Palette::new(color);

    let mut failed = false;
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        if cli.whole {
            let result = grammar.parse_whole_with(line, &options);
            failed |= result.is_err();
            if cli.json {
                print_json(&debug_report::whole_json(line, &result, naming));
            } else {
                debug_report::print_whole(line, &result, naming, &palette);
            }
        } else {
            let mut scan = grammar.scan_with(line, &options);
            let matches = scan.by_ref().collect();
            let report = ScanReport { text: line.to_string(), matches, metrics: scan.metrics() };
            if cli.json {
                print_json(&debug_report::scan_json(&report, naming));
            } else {
                debug_report::print_scan(&report, naming, &palette);
            }
        }
    }

    if failed { ExitCode::from(3) } else { ExitCode::SUCCESS }
}

fn build_grammar(cli: &Cli) -> Result<Grammar, toponym::GeoError> {
    let source = |path: &Option<PathBuf>| path.clone().map_or(DictionarySource::Embedded, DictionarySource::Path);
    GrammarBuilder::default()
        .towns(source(&cli.towns))
        .regions(source(&cli.regions))
        .countries(source(&cli.countries))
        .build()
}

fn read_stdin_input() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("error: failed to encode JSON: {err}"),
    }
}
