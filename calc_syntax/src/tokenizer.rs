use log::trace;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{map, value},
    IResult,
};
use nom_locate::LocatedSpan;
use thiserror::Error;

use crate::token::Token;

pub type Span<'a> = LocatedSpan<&'a [u8]>;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum LexError {
    #[error("unexpected character at {position}: '{}'", escaped(.byte))]
    UnexpectedCharacter { position: usize, byte: u8 },
}

fn escaped(byte: &u8) -> String {
    std::ascii::escape_default(*byte).to_string()
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n')
}

fn blank(i: Span) -> IResult<Span, Span> {
    take_while1(is_blank)(i)
}

fn number(i: Span) -> IResult<Span, Token> {
    map(digit1, |digits: Span| {
        Token::number(String::from_utf8_lossy(digits.fragment()))
    })(i)
}

fn token(i: Span) -> IResult<Span, Token> {
    alt((
        number,
        value(Token::open_paren(), char('(')),
        value(Token::close_paren(), char(')')),
        value(Token::add(), char('+')),
        value(Token::subtract(), char('-')),
    ))(i)
}

// Digits are greedy, so `12` is one token and `1 2` is two. Nothing else
// spans more than a single byte.
pub fn tokenize(input: &[u8]) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut remaining = Span::new(input);

    loop {
        if let Ok((i, _)) = blank(remaining) {
            remaining = i;
        }

        let byte = match remaining.fragment().first() {
            None => return Ok(tokens),
            Some(&byte) => byte,
        };

        match token(remaining) {
            Ok((i, token)) => {
                trace!("token {:?} at {}", token, remaining.location_offset());
                tokens.push(token);
                remaining = i;
            }
            Err(_) => {
                return Err(LexError::UnexpectedCharacter {
                    position: remaining.location_offset(),
                    byte,
                })
            }
        }
    }
}
