//! Top-level loop: parses one unit at a time until end of input.
//!
//! When a unit fails to parse, the diagnostic is logged and exactly one token
//! is discarded before the next attempt. Badly unbalanced input can take many
//! of these single-token skips to resynchronize.

use std::io::{self, Write};

use tracing::{error, info};

use crate::ast::TopLevel;
use crate::lexer::Token;
use crate::parser::{Parser, ParserError};

pub const PROMPT: &str = "ready> ";

/// Everything a run produced, in input order.
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub units: Vec<TopLevel>,
    pub errors: Vec<ParserError>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Driver<I, W> {
    parser: Parser<I>,
    prompt: Option<W>,
}

impl<I: Iterator<Item = char>, W: Write> Driver<I, W> {
    /// `prompt` receives a `ready> ` before each dispatch when set.
    pub fn new(parser: Parser<I>, prompt: Option<W>) -> Self {
        Self { parser, prompt }
    }

    fn show_prompt(&mut self) -> io::Result<()> {
        if let Some(out) = self.prompt.as_mut() {
            out.write_all(PROMPT.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }

    /// Runs to end of input, calling `on_unit` for each unit as soon as it parses.
    pub fn run_with<F>(mut self, mut on_unit: F) -> io::Result<Report>
    where
        F: FnMut(&TopLevel),
    {
        let mut report = Report::default();

        loop {
            self.show_prompt()?;

            if self.parser.current() == &Token::Char(';') {
                self.parser.skip_token();
                continue;
            }

            let result = match self.parser.parse_unit() {
                Some(result) => result,
                None => break,
            };

            match result {
                Ok(unit) => {
                    info!("parsed a {}", unit.kind());
                    on_unit(&unit);
                    report.units.push(unit);
                }
                Err(err) => {
                    error!("{}", err);
                    report.errors.push(err);
                    self.parser.skip_token();
                }
            }
        }

        Ok(report)
    }

    pub fn run(self) -> io::Result<Report> {
        self.run_with(|_| {})
    }
}
