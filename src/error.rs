use crate::Token;
use thiserror::Error;

/// Error raised while splitting an expression into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The character is not part of the expression grammar.
    ///
    /// The position counts characters of the input after removal of whitespace.
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
}

/// Error in the structure of parentheses.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A closing parenthesis has no matching opening one
    #[error("Unbalanced parentheses: unexpected ')'")]
    UnmatchedClose,

    /// An opening parenthesis is never closed
    #[error("Unbalanced parentheses: missing ')'")]
    UnclosedParen,
}

/// Error raised by the stack machine evaluating a postfix expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The variable has no value in the environment
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(char),

    /// An operator found too few values on the stack
    #[error("Missing operand")]
    InsufficientOperands,

    /// The stack does not end with exactly one value
    #[error("Not a valid expression")]
    InvalidExpression,

    /// The token can not be executed by the stack machine
    #[error("Unexpected token '{0}' in postfix expression")]
    UnknownOperator(Token),
}

/// Error in a textual list of minterms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    #[error("Invalid term list: {0}")]
    Syntax(String),

    #[error("The term '{0}' is too large")]
    Overflow(String),
}

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QmkitError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Terms(#[from] TermError),

    /// The number of variables exceeds a supported bound
    #[error("{count} variables are used, at most {max} are supported")]
    TooManyVariables { count: usize, max: usize },

    /// The name is not a valid variable name
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// The name is used twice
    #[error("The name '{0}' conflicts with an other variable")]
    ConflictingName(String),

    /// The string is not a pattern of 0, 1 and - symbols
    #[error("Invalid implicant pattern '{0}'")]
    InvalidPattern(String),

    /// The cell is outside of the current function
    #[error("There is no cell {0}")]
    NoSuchCell(usize),

    /// The position is outside of the Karnaugh map
    #[error("There is no cell at row {row}, column {col}")]
    NoSuchPosition { row: usize, col: usize },

    /// No Karnaugh map is available for this number of variables
    #[error("No Karnaugh map for {0} variables")]
    NoLayout(usize),
}
