pub mod ast;
pub mod cursor;
pub mod parser;
pub mod token;
pub mod tokenizer;

use ast::Ast;
use parser::ParseError;
use thiserror::Error;
use tokenizer::LexError;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub fn parse(input: &str) -> Result<Ast, SyntaxError> {
    let tokens = tokenizer::tokenize(input.as_bytes())?;
    Ok(parser::parse(&tokens)?)
}
