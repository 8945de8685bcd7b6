use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Eof,
    Def,
    Extern,
    Ident(String),
    Number(f64),
    /// Any other single character: punctuation, operators, or unknown symbols.
    Char(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Def => write!(f, "def"),
            Token::Extern => write!(f, "extern"),
            Token::Ident(name) => write!(f, "identifier {}", name),
            Token::Number(value) => write!(f, "number {}", value),
            Token::Char(c) => write!(f, "'{}'", c),
        }
    }
}

/// Pull-based tokenizer over a character stream.
///
/// Holds exactly one pending character of look-ahead between calls to
/// [`Lexer::next_token`]; `None` marks the end of the stream.
pub struct Lexer<I> {
    input: I,
    last_char: Option<char>,
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            last_char: Some(' '),
        }
    }

    fn bump(&mut self) {
        self.last_char = self.input.next();
    }

    /// Consumes input and returns the next token. Never fails.
    pub fn next_token(&mut self) -> Token {
        loop {
            while let Some(c) = self.last_char {
                if !c.is_ascii_whitespace() {
                    break;
                }
                self.bump();
            }

            let c = match self.last_char {
                Some(c) => c,
                None => return Token::Eof,
            };

            if c.is_ascii_alphabetic() {
                let mut ident = String::new();
                while let Some(c) = self.last_char.filter(char::is_ascii_alphanumeric) {
                    ident.push(c);
                    self.bump();
                }
                tracing::trace!(%ident, "lexed word");
                return match ident.as_str() {
                    "def" => Token::Def,
                    "extern" => Token::Extern,
                    _ => Token::Ident(ident),
                };
            }

            if c.is_ascii_digit() || c == '.' {
                let mut digits = String::new();
                while let Some(c) = self.last_char.filter(|c| c.is_ascii_digit() || *c == '.') {
                    digits.push(c);
                    self.bump();
                }
                return Token::Number(parse_decimal_prefix(&digits));
            }

            if c == '#' {
                while let Some(c) = self.last_char {
                    if c == '\n' || c == '\r' {
                        break;
                    }
                    self.bump();
                }
                // comments are transparent, go round again for the real token
                continue;
            }

            self.bump();
            return Token::Char(c);
        }
    }
}

/// Parses the longest decimal prefix of a run of digits and dots.
///
/// Everything from a second `.` onwards is ignored, so `1.2.3` reads as `1.2`.
/// A run without any digits reads as `0`.
fn parse_decimal_prefix(run: &str) -> f64 {
    let end = run
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .nth(1)
        .map_or(run.len(), |(i, _)| i);
    run[..end].parse().unwrap_or(0.0)
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::Eof => None,
            tok => Some(tok),
        }
    }
}

/// Lex a whole string into its tokens, end-of-input excluded.
pub fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input.chars()).collect()
}
