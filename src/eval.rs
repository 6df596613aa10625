use calc_syntax::ast::{Ast, Node, NodeKind, OpKind};
use log::debug;
use rug::{Integer, Rational};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum EvalError {
    #[error("cannot evaluate an empty expression")]
    EmptyExpression,
    #[error("invalid number literal \"{literal}\"")]
    InvalidNumber { literal: String },
    #[error("found an operator where an operand was expected")]
    UnexpectedOperator,
    #[error("found two operands with no operator between them")]
    MissingOperator,
    #[error("expression ends with an operator")]
    DanglingOperator,
}

/// Reduces a tree to a single exact value.
///
/// Groups fold left to right with no precedence: `1 - 2 + 3` is
/// `(1 - 2) + 3`. A nested group is reduced to a scalar before it is
/// combined with anything, so parentheses are the only way to change
/// the order.
pub fn evaluate(tree: &Ast) -> Result<Rational, EvalError> {
    let value = evaluate_node(tree.root())?;
    debug!("{} = {}", tree, value);
    Ok(value)
}

fn evaluate_node(node: Node) -> Result<Rational, EvalError> {
    match node.kind() {
        NodeKind::Number(literal) => parse_number(literal),
        NodeKind::Group => evaluate_group(node),
        NodeKind::Operator(_) => Err(EvalError::UnexpectedOperator),
    }
}

fn evaluate_group(group: Node) -> Result<Rational, EvalError> {
    let mut children = group.children();
    let first = children.next().ok_or(EvalError::EmptyExpression)?;
    let mut accumulator = evaluate_node(first)?;
    let mut pending: Option<OpKind> = None;

    for child in children {
        match (child.kind(), pending.take()) {
            (NodeKind::Operator(op), None) => pending = Some(*op),
            (NodeKind::Operator(_), Some(_)) => return Err(EvalError::UnexpectedOperator),
            (NodeKind::Number(_) | NodeKind::Group, None) => {
                return Err(EvalError::MissingOperator)
            }
            (NodeKind::Number(_) | NodeKind::Group, Some(op)) => {
                let operand = evaluate_node(child)?;
                apply(&mut accumulator, op, operand);
            }
        }
    }

    match pending {
        Some(_) => Err(EvalError::DanglingOperator),
        None => Ok(accumulator),
    }
}

fn apply(accumulator: &mut Rational, op: OpKind, operand: Rational) {
    match op {
        OpKind::Add => *accumulator += operand,
        OpKind::Subtract => *accumulator -= operand,
    }
}

// rug's own parser is more permissive than the tokenizer (signs,
// underscores, whitespace), so check the literal is plain digits first.
fn parse_number(literal: &str) -> Result<Rational, EvalError> {
    let invalid = || EvalError::InvalidNumber {
        literal: literal.to_string(),
    };
    if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    literal
        .parse::<Integer>()
        .map(Rational::from)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: &str) -> Ast {
        Ast::number(value)
    }

    fn add() -> Ast {
        Ast::operator(OpKind::Add)
    }

    fn sub() -> Ast {
        Ast::operator(OpKind::Subtract)
    }

    #[test]
    fn bare_number() {
        k9::assert_equal!(evaluate(&num("42")), Ok(Rational::from(42)));
        k9::assert_equal!(evaluate(&num("007")), Ok(Rational::from(7)));
    }

    #[test]
    fn flat_groups() {
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("2"), add(), num("3")])),
            Ok(Rational::from(5))
        );
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("5"), sub(), num("3")])),
            Ok(Rational::from(2))
        );
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("1"), sub(), num("2"), add(), num("3")])),
            Ok(Rational::from(2))
        );
    }

    #[test]
    fn nested_groups_reduce_first() {
        let tree = Ast::group_of(&[
            num("1"),
            sub(),
            Ast::group_of(&[num("2"), add(), num("3")]),
        ]);
        k9::assert_equal!(evaluate(&tree), Ok(Rational::from(-4)));

        let leading = Ast::group_of(&[
            Ast::group_of(&[Ast::group_of(&[num("9")])]),
            sub(),
            num("10"),
        ]);
        k9::assert_equal!(evaluate(&leading), Ok(Rational::from(-1)));
    }

    #[test]
    fn no_overflow() {
        let tree = Ast::group_of(&[
            num("99999999999999999999999999999"),
            add(),
            num("1"),
        ]);
        k9::snapshot!(evaluate(&tree).unwrap(), "100000000000000000000000000000");
    }

    #[test]
    fn empty_groups() {
        k9::assert_equal!(evaluate(&Ast::group()), Err(EvalError::EmptyExpression));
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("1"), add(), Ast::group()])),
            Err(EvalError::EmptyExpression)
        );
    }

    #[test]
    fn invalid_numbers() {
        for literal in ["", "-1", "+1", "1_000", " 1", "1.5", "x"] {
            k9::assert_equal!(
                evaluate(&num(literal)),
                Err(EvalError::InvalidNumber {
                    literal: literal.to_string()
                })
            );
        }
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("1"), add(), num("two")])).map_err(|e| e.to_string()),
            Err("invalid number literal \"two\"".to_string())
        );
    }

    #[test]
    fn malformed_groups() {
        k9::assert_equal!(evaluate(&add()), Err(EvalError::UnexpectedOperator));
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[sub(), num("1")])),
            Err(EvalError::UnexpectedOperator)
        );
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("1"), add(), sub(), num("1")])),
            Err(EvalError::UnexpectedOperator)
        );
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("1"), num("2")])),
            Err(EvalError::MissingOperator)
        );
        k9::assert_equal!(
            evaluate(&Ast::group_of(&[num("1"), add()])),
            Err(EvalError::DanglingOperator)
        );
    }
}
