//! Front-end for a small expression language: a character-stream lexer and a
//! recursive-descent, operator-precedence parser producing function
//! definitions, extern declarations, and standalone expressions.

pub mod ast;
pub mod driver;
pub mod lexer;
pub mod parser;
pub mod source;
