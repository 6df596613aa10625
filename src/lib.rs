pub mod eval;

pub use calc_syntax as syntax;

use calc_syntax::{ast::Ast, parser::ParseError, tokenizer::LexError, SyntaxError};
use eval::EvalError;
use rug::Rational;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<SyntaxError> for Error {
    fn from(error: SyntaxError) -> Self {
        match error {
            SyntaxError::Lex(error) => Error::Lex(error),
            SyntaxError::Parse(error) => Error::Parse(error),
        }
    }
}

pub fn parse_str(input: &str) -> Result<Ast, Error> {
    Ok(calc_syntax::parse(input)?)
}

/// Runs one line of input through the whole pipeline.
pub fn evaluate_str(input: &str) -> Result<Rational, Error> {
    let tree = parse_str(input)?;
    Ok(eval::evaluate(&tree)?)
}
