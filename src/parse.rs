//! Conversion of infix token sequences into postfix expressions

use crate::error::ParseError;
use crate::token::{Assoc, Fixity};
use crate::*;
use log::debug;

/// Parse a token sequence into a postfix [Expression].
///
/// An AND operator is inserted between adjacent operands (as in ```AB``` or ```A(B+C)```),
/// then a shunting-yard pass reorders the tokens.
///
/// Only the balance of parentheses is checked here: a missing operand is detected
/// when the expression is [evaluated](Expression::evaluate).
pub fn parse(tokens: &[Token]) -> Result<Expression, ParseError> {
    let expanded = insert_implicit_and(tokens);
    let mut output = Vec::with_capacity(expanded.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in expanded {
        match token {
            Token::Number(_) | Token::Variable(_) => output.push(token),
            Token::Operator(op) => match op.fixity() {
                Fixity::Postfix => output.push(token),
                Fixity::Prefix => stack.push(token),
                Fixity::Infix => {
                    while let Some(Token::Operator(top)) = stack.last().copied() {
                        let pops = top.precedence() > op.precedence()
                            || (top.precedence() == op.precedence()
                                && op.associativity() == Assoc::Left);
                        if !pops {
                            break;
                        }
                        stack.pop();
                        output.push(Token::Operator(top));
                    }
                    stack.push(token);
                }
            },
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    None => return Err(ParseError::UnmatchedClose),
                    Some(Token::LeftParen) => break,
                    Some(t) => output.push(t),
                }
            },
        }
    }

    while let Some(token) = stack.pop() {
        if let Token::LeftParen | Token::RightParen = token {
            return Err(ParseError::UnclosedParen);
        }
        output.push(token);
    }

    debug!("parsed {} tokens into {} postfix tokens", tokens.len(), output.len());
    Ok(Expression::from_tokens(output))
}

/// Tokenize and parse an expression in a single step.
///
/// ```
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let expr = qmkit::parse_expression("A(B + C)")?;
/// assert_eq!(expr.to_string(), "A B C | &");
/// # Ok(())
/// # }
/// ```
pub fn parse_expression(s: &str) -> Result<Expression, QmkitError> {
    let tokens = tokenize(s)?;
    Ok(parse(&tokens)?)
}

/// Insert an explicit AND between two tokens when the first can end an operand
/// and the second can start one.
fn insert_implicit_and(tokens: &[Token]) -> Vec<Token> {
    let mut expanded = Vec::with_capacity(tokens.len() * 2);
    for (idx, token) in tokens.iter().enumerate() {
        expanded.push(*token);
        if let Some(next) = tokens.get(idx + 1) {
            if token.ends_operand() && next.starts_operand() {
                expanded.push(Token::Operator(Operator::And));
            }
        }
    }
    expanded
}
