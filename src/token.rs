//! Lexical analysis of Boolean expressions

use crate::error::LexError;
use std::fmt;

/// A single lexical element of an expression.
///
/// Variables are single letters, always stored in uppercase.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// A fixed Boolean value, written `0` or `1`
    Number(bool),

    /// A variable, identified by its (uppercase) letter
    Variable(char),

    /// A Boolean operator
    Operator(Operator),

    LeftParen,
    RightParen,
}

/// Position of a negation relative to its operand
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Notation {
    /// `!A` or `~A`
    Prefix,
    /// `A'`
    Postfix,
}

/// Position of an operator relative to its operands
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Fixity {
    Prefix,
    Postfix,
    Infix,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Assoc {
    Left,
    Right,
}

/// Boolean operators accepted in expressions.
///
/// Precedence and associativity are derived from the kind of operator,
/// they can not be chosen independently.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Operator {
    /// AND operator: both operands need to be true
    And,
    /// OR operator: at least one operand needs to be true
    Or,
    /// XOR operator: exactly one operand needs to be true
    Xor,
    /// Negation of a single operand
    Not(Notation),
}

impl Operator {
    /// Binding strength of the operator: OR < XOR < AND < NOT
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Or => 1,
            Operator::Xor => 2,
            Operator::And => 3,
            Operator::Not(_) => 4,
        }
    }

    pub fn associativity(self) -> Assoc {
        match self {
            Operator::And | Operator::Or | Operator::Xor => Assoc::Left,
            Operator::Not(_) => Assoc::Right,
        }
    }

    pub fn fixity(self) -> Fixity {
        match self {
            Operator::And | Operator::Or | Operator::Xor => Fixity::Infix,
            Operator::Not(Notation::Prefix) => Fixity::Prefix,
            Operator::Not(Notation::Postfix) => Fixity::Postfix,
        }
    }

    /// Apply a binary operator. Negation ignores its second operand.
    pub(crate) fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Operator::And => a && b,
            Operator::Or => a || b,
            Operator::Xor => a ^ b,
            Operator::Not(_) => !a,
        }
    }
}

impl Token {
    /// Test if this token can be the last token of an operand
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_)
                | Token::Variable(_)
                | Token::RightParen
                | Token::Operator(Operator::Not(Notation::Postfix))
        )
    }

    /// Test if this token can be the first token of an operand
    pub(crate) fn starts_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_)
                | Token::Variable(_)
                | Token::LeftParen
                | Token::Operator(Operator::Not(Notation::Prefix))
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => write!(f, "&"),
            Operator::Or => write!(f, "|"),
            Operator::Xor => write!(f, "^"),
            Operator::Not(Notation::Prefix) => write!(f, "!"),
            Operator::Not(Notation::Postfix) => write!(f, "'"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(false) => write!(f, "0"),
            Token::Number(true) => write!(f, "1"),
            Token::Variable(c) => write!(f, "{}", c),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// Split an expression into tokens.
///
/// Whitespace is ignored. Letters are variables (case-insensitive), `0` and `1` are constants.
/// A run of apostrophes after a variable negates it if its length is odd,
/// an even run cancels out and produces no token.
///
/// ```
/// use qmkit::{tokenize, Notation, Operator, Token};
///
/// let tokens = tokenize("a'' ^ !b").unwrap();
/// assert_eq!(tokens, [
///     Token::Variable('A'),
///     Token::Operator(Operator::Xor),
///     Token::Operator(Operator::Not(Notation::Prefix)),
///     Token::Variable('B'),
/// ]);
/// ```
pub fn tokenize(expr: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokens = Vec::with_capacity(chars.len());

    let mut pos = 0;
    while pos < chars.len() {
        let ch = chars[pos];
        let token = match ch {
            '0' => Token::Number(false),
            '1' => Token::Number(true),
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '!' | '~' => Token::Operator(Operator::Not(Notation::Prefix)),
            '&' | '*' => Token::Operator(Operator::And),
            '+' | '|' => Token::Operator(Operator::Or),
            '^' => Token::Operator(Operator::Xor),
            c if c.is_ascii_alphabetic() => {
                tokens.push(Token::Variable(c.to_ascii_uppercase()));
                let marks = chars[pos + 1..].iter().take_while(|c| **c == '\'').count();
                if marks % 2 == 1 {
                    tokens.push(Token::Operator(Operator::Not(Notation::Postfix)));
                }
                pos += 1 + marks;
                continue;
            }
            _ => return Err(LexError::UnexpectedChar { ch, pos }),
        };
        tokens.push(token);
        pos += 1;
    }

    Ok(tokens)
}
