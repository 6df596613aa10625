// The grammar, with left recursion removed:
//
//   E   -> E1 | E2
//   E1  -> E' Op E
//   E2  -> E'
//   E'  -> Number | "(" E ")"
//   Op  -> "+" | "-"
//
// Both alternatives of E start with E', so E is parsed as E' (Op E')*: the
// leading operand once, then as many `Op E'` steps as will parse. A step that
// fails is rewound and the chain ends there, which is exactly where the
// ordered choice would have fallen back from E1 to E2. Stack depth only
// grows with parenthesis nesting, and no operand is ever parsed twice.
//
// Every rule takes the tree built so far and returns an extended copy of it,
// leaving its argument alone. An alternative that fails halfway can't have
// touched a tree someone else is still holding, so rewinding the cursor is
// the only cleanup needed. A chain like `1 + 2 - 3` comes out as one flat
// group, `(1 + 2 - 3)`, rather than nested binary nodes.

use log::{debug, trace};
use thiserror::Error;

use crate::ast::{Ast, OpKind};
use crate::cursor::{Cursor, CursorError};
use crate::token::{Token, TokenClass};

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    #[error("unexpected token \"{token}\" at {position}")]
    UnexpectedToken { token: Token, position: usize },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

// Rewinds only ever target a position recorded before a token was read, so
// `OutOfRange` can only mean we ran off the end.
impl From<CursorError> for ParseError {
    fn from(error: CursorError) -> Self {
        match error {
            CursorError::EndOfInput | CursorError::OutOfRange { .. } => {
                ParseError::UnexpectedEndOfInput
            }
        }
    }
}

type RuleResult = Result<Ast, ParseError>;
type Rule = fn(&mut Parser, &Ast) -> RuleResult;

struct Parser<'a> {
    cursor: Cursor<'a>,
    furthest: Option<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            furthest: None,
        }
    }

    fn reach(&self, error: &ParseError) -> usize {
        match error {
            ParseError::UnexpectedToken { position, .. } => *position,
            ParseError::UnexpectedEndOfInput => self.cursor.len(),
        }
    }

    // Backtracking throws failures away, but the one that got furthest into
    // the input is usually the one worth reporting.
    fn note(&mut self, error: &ParseError) {
        let further = match &self.furthest {
            None => true,
            Some(furthest) => self.reach(error) > self.reach(furthest),
        };
        if further {
            self.furthest = Some(error.clone());
        }
    }

    fn report(mut self, error: ParseError) -> ParseError {
        match self.furthest.take() {
            Some(furthest) if self.reach(&furthest) > self.reach(&error) => furthest,
            _ => error,
        }
    }
}

fn read_token<'a>(cursor: &mut Cursor<'a>) -> Result<(&'a Token, usize), ParseError> {
    let position = cursor.pos();
    let token = cursor.read()?;
    Ok((token, position))
}

fn unexpected(token: &Token, position: usize) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.clone(),
        position,
    }
}

fn expect(cursor: &mut Cursor, class: TokenClass) -> Result<(), ParseError> {
    let (token, position) = read_token(cursor)?;
    if token.class == class {
        Ok(())
    } else {
        Err(unexpected(token, position))
    }
}

fn require_input(cursor: &Cursor) -> Result<(), ParseError> {
    if cursor.is_exhausted() {
        Err(ParseError::UnexpectedEndOfInput)
    } else {
        Ok(())
    }
}

// Ordered choice. The first alternative to succeed wins; otherwise the
// cursor is rewound before each retry and the last failure is returned.
fn first_of(name: &str, alternatives: &[Rule], p: &mut Parser, tree: &Ast) -> RuleResult {
    let start = p.cursor.pos();
    let mut failure = ParseError::UnexpectedEndOfInput;
    for (i, &alternative) in alternatives.iter().enumerate() {
        if i > 0 {
            p.cursor.seek(start)?;
        }
        match alternative(p, tree) {
            Ok(tree) => return Ok(tree),
            Err(error) => {
                debug!(
                    "{} alternative {} failed at {}: {}",
                    name,
                    i + 1,
                    p.cursor.pos(),
                    error
                );
                p.note(&error);
                failure = error;
            }
        }
    }
    p.cursor.seek(start)?;
    Err(failure)
}

fn expression(p: &mut Parser, tree: &Ast) -> RuleResult {
    trace!("E at {}", p.cursor.pos());
    let mut tree = operand(p, tree)?;
    while !p.cursor.is_exhausted() {
        let mark = p.cursor.pos();
        match step(p) {
            Ok(step) => tree.extend(&step),
            Err(error) => {
                debug!("E ends at {}: {}", mark, error);
                p.note(&error);
                p.cursor.seek(mark)?;
                break;
            }
        }
    }
    Ok(tree)
}

// One `Op E'` link of a chain, as a fresh group for the caller to splice in.
fn step(p: &mut Parser) -> RuleResult {
    let mut step = Ast::group();
    step.push(&operator(&mut p.cursor)?);
    require_input(&p.cursor)?;
    operand(p, &step)
}

fn operand(p: &mut Parser, tree: &Ast) -> RuleResult {
    trace!("E' at {}", p.cursor.pos());
    first_of("E'", &[number as Rule, parenthesized], p, tree)
}

fn number(p: &mut Parser, tree: &Ast) -> RuleResult {
    let (token, position) = read_token(&mut p.cursor)?;
    match token.class {
        TokenClass::Number => {
            let mut tree = tree.clone();
            tree.push(&Ast::number(token.value.as_str()));
            Ok(tree)
        }
        _ => Err(unexpected(token, position)),
    }
}

fn parenthesized(p: &mut Parser, tree: &Ast) -> RuleResult {
    expect(&mut p.cursor, TokenClass::OpenParen)?;
    require_input(&p.cursor)?;
    let inner = expression(p, &Ast::group())?;
    expect(&mut p.cursor, TokenClass::CloseParen)?;
    let mut tree = tree.clone();
    tree.push(&inner);
    Ok(tree)
}

// Op returns a standalone node; the caller decides where it goes.
fn operator(cursor: &mut Cursor) -> RuleResult {
    let (token, position) = read_token(cursor)?;
    match token.class {
        TokenClass::Add => Ok(Ast::operator(OpKind::Add)),
        TokenClass::Subtract => Ok(Ast::operator(OpKind::Subtract)),
        _ => Err(unexpected(token, position)),
    }
}

/// Parses a complete token sequence into a tree rooted at a group.
///
/// The root's children are the top-level operand/operator sequence, with one
/// nested group per pair of parentheses. Every token has to be used. When the
/// parse fails, the error names the token furthest into the input that no
/// rule could accept.
pub fn parse(tokens: &[Token]) -> Result<Ast, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEndOfInput);
    }
    let mut p = Parser::new(tokens);
    let error = match expression(&mut p, &Ast::group()) {
        Ok(tree) => match p.cursor.peek() {
            None => return Ok(tree),
            Some(token) => unexpected(token, p.cursor.pos()),
        },
        Err(error) => error,
    };
    Err(p.report(error))
}
