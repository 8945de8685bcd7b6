use std::{
    io::{self, BufRead},
    vec,
};

/// Feeds the characters of a buffered reader to the lexer one line at a time,
/// so interactive input is parsed as soon as a line is entered.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than dropped. A read error
/// ends the stream and is kept for [`ReaderChars::take_error`].
pub struct ReaderChars<R> {
    reader: R,
    line: vec::IntoIter<char>,
    error: Option<io::Error>,
}

impl<R: BufRead> ReaderChars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new().into_iter(),
            error: None,
        }
    }

    /// The error that ended the stream early, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for ReaderChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.line.next() {
                return Some(c);
            }
            if self.error.is_some() {
                return None;
            }

            let mut buf = Vec::new();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line = String::from_utf8_lossy(&buf)
                        .chars()
                        .collect::<Vec<_>>()
                        .into_iter()
                }
                Err(err) => {
                    tracing::warn!("failed to read input: {}", err);
                    self.error = Some(err);
                    return None;
                }
            }
        }
    }
}
