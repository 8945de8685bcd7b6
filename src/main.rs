use std::{fs, io, process};

use anyhow::Context;
use clap::{crate_version, App, Arg, ArgMatches};
use tracing_subscriber::EnvFilter;

use kaleidoscope::{
    driver::{Driver, Report},
    lexer::Lexer,
    parser::Parser,
    source::ReaderChars,
};

fn parse<I>(lexer: Lexer<I>, prompt: bool, print_ast: bool) -> io::Result<Report>
where
    I: Iterator<Item = char>,
{
    let prompt = if prompt { Some(io::stdout()) } else { None };
    Driver::new(Parser::new(lexer), prompt).run_with(|unit| {
        if print_ast {
            println!("{:#?}", unit);
        }
    })
}

fn run<I>(lexer: Lexer<I>, matches: &ArgMatches, interactive: bool) -> anyhow::Result<bool>
where
    I: Iterator<Item = char>,
{
    if matches.is_present("tokens") {
        for token in lexer {
            println!("{}", token);
        }
        return Ok(true);
    }

    let prompt = interactive && !matches.is_present("no-prompt");
    let report = parse(lexer, prompt, matches.is_present("ast"))?;
    if prompt {
        println!();
    }
    tracing::debug!(
        units = report.units.len(),
        errors = report.errors.len(),
        "finished parsing"
    );
    Ok(report.is_clean())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let matches = App::new("kaleidoscope")
        .version(crate_version!())
        .about("parses definitions, externs, and expressions and reports what it found")
        .arg(
            Arg::with_name("INPUT")
                .help("source file to parse, standard input when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("tokens")
                .long("tokens")
                .help("print the token stream instead of parsing"),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("print the tree of every parsed unit"),
        )
        .arg(
            Arg::with_name("no-prompt")
                .long("no-prompt")
                .help("don't print the ready> prompt when reading standard input"),
        )
        .get_matches();

    let clean = match matches.value_of("INPUT") {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path))?;
            run(Lexer::new(source.chars()), &matches, false)?
        }
        None => {
            let stdin = io::stdin();
            let mut chars = ReaderChars::new(stdin.lock());
            let clean = run(Lexer::new(&mut chars), &matches, true)?;
            if let Some(err) = chars.take_error() {
                return Err(err).context("failed to read standard input");
            }
            clean
        }
    };

    if !clean {
        process::exit(1);
    }
    Ok(())
}
