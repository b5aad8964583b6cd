use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    process::ExitCode,
};

use lexdfa::prelude::*;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("lexdfa")
        .about("Validates deterministic automata and runs them on inputs")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(["simulate", "dfa", "fallback", "fbdfa"])
                .default_value("simulate")
                .help("simulate every input, or extract the longest accepted prefix"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("file to read specifications from, defaults to stdin"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("file to write the report to, defaults to stdout"),
        )
        .arg(
            Arg::new("separator")
                .short('s')
                .long("separator")
                .default_value(",")
                .help("separates the entries of a line and the fields of a record"),
        )
        .arg(
            Arg::new("record-separator")
                .short('r')
                .long("record-separator")
                .default_value("#")
                .help("separates the records of the transitions and inputs lines"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let Ok(Some(verbosity)) = matches.try_get_one::<String>("verbosity") else {
        return;
    };

    let level = match verbosity.as_str() {
        "trace" => filter::LevelFilter::TRACE,
        "debug" => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::INFO,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn string_arg<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches.get_one::<String>(id).map(String::as_str)
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mode: Mode = string_arg(matches, "mode").unwrap_or("simulate").parse()?;
    let separators = Separators::new(
        string_arg(matches, "separator").unwrap_or(","),
        string_arg(matches, "record-separator").unwrap_or("#"),
    );
    if separators.normal.is_empty() || separators.secondary.is_empty() {
        return Err("separators must not be empty".into());
    }

    let read: Box<dyn BufRead> = match string_arg(matches, "input") {
        Some(path) => {
            debug!("reading specifications from {path}");
            Box::new(BufReader::new(File::open(path)?))
        }
        None => {
            debug!("reading specifications from stdin");
            Box::new(std::io::stdin().lock())
        }
    };

    let start = std::time::Instant::now();
    let report = run_stream(read, mode, separators.clone())?;
    info!(
        "evaluating {} specifications took {}µs",
        report.sections.len(),
        start.elapsed().as_micros()
    );

    let rendered = report.to_report(&separators);
    match string_arg(matches, "output") {
        Some(path) => {
            debug!("writing report to {path}");
            File::create(path)?.write_all(rendered.as_bytes())?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("lexdfa: {e}");
            ExitCode::FAILURE
        }
    }
}
