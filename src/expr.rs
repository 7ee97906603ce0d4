//! Postfix expressions and their evaluation

use crate::error::EvalError;
use crate::*;

use bit_set::BitSet;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::iter::FromIterator;
use std::str::FromStr;

/// A Boolean expression stored as a sequence of tokens in postfix (RPN) order.
///
/// Expressions are usually obtained by [parsing](parse) a token sequence. A well-formed expression
/// leaves exactly one value on the stack when it is replayed on a stack machine.
/// This property is only checked during [evaluation](Expression::evaluate).
///
/// ```
/// use qmkit::{Environment, Expression};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
///
/// let expr: Expression = "AB' + C".parse()?;
/// let env = Environment::from_iter([('A', true), ('B', false), ('C', false)]);
/// assert!(expr.evaluate(&env)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Wrap a sequence of tokens, assumed to be in postfix order.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The distinct variables used in this expression, in alphabetical order.
    pub fn variables(&self) -> VarList {
        let letters: BTreeSet<char> = self
            .tokens
            .iter()
            .filter_map(|t| match t {
                Token::Variable(v) => Some(*v),
                _ => None,
            })
            .collect();
        VarList::with(letters.into_iter().collect())
    }

    /// Run the stack machine on this expression with the given variable assignment.
    ///
    /// Binary operators pop their right operand first, then their left one.
    pub fn evaluate(&self, env: &Environment) -> Result<bool, EvalError> {
        let mut stack: Vec<bool> = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            match *token {
                Token::Number(b) => stack.push(b),
                Token::Variable(v) => stack.push(env.get(v).ok_or(EvalError::UndefinedVariable(v))?),
                Token::Operator(Operator::Not(_)) => {
                    let a = stack.pop().ok_or(EvalError::InsufficientOperands)?;
                    stack.push(!a);
                }
                Token::Operator(op) => {
                    if stack.len() < 2 {
                        return Err(EvalError::InsufficientOperands);
                    }
                    let b = stack.pop().ok_or(EvalError::InsufficientOperands)?;
                    let a = stack.pop().ok_or(EvalError::InsufficientOperands)?;
                    stack.push(op.apply(a, b));
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(EvalError::UnknownOperator(*token))
                }
            }
        }

        match stack[..] {
            [value] => Ok(value),
            _ => Err(EvalError::InvalidExpression),
        }
    }
}

/// Evaluate a postfix expression, see [Expression::evaluate]
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<bool, EvalError> {
    expr.evaluate(env)
}

impl FromStr for Expression {
    type Err = QmkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}

/// Assignment of Boolean values to variables.
///
/// Variables are identified by their letter (case-insensitive), other characters can not be assigned.
/// Internally, two bit-sets indexed by the position of the letter in the alphabet
/// store the assigned variables and the true ones.
#[derive(Clone, Default, Debug)]
pub struct Environment {
    assigned: BitSet,
    values: BitSet,
}

fn letter_slot(var: char) -> Option<usize> {
    let c = var.to_ascii_uppercase();
    c.is_ascii_uppercase().then(|| (c as u8 - b'A') as usize)
}

fn slot_letter(slot: usize) -> char {
    (b'A' + slot as u8) as char
}

impl Environment {
    /// Build the assignment associated to a minterm index.
    ///
    /// The first variable of the list takes the most significant bit of the index.
    pub fn from_index(vars: &VarList, index: usize) -> Self {
        let width = vars.len();
        vars.iter()
            .enumerate()
            .map(|(pos, v)| (*v, tools::bit_at(index, width, pos)))
            .collect()
    }

    /// Assign a value to a variable, replacing any previous value.
    ///
    /// Characters which are not ASCII letters are ignored.
    pub fn set(&mut self, var: char, value: bool) {
        if let Some(slot) = letter_slot(var) {
            self.assigned.insert(slot);
            match value {
                true => self.values.insert(slot),
                false => self.values.remove(slot),
            };
        }
    }

    /// Remove the value of a variable
    pub fn unset(&mut self, var: char) {
        if let Some(slot) = letter_slot(var) {
            self.assigned.remove(slot);
            self.values.remove(slot);
        }
    }

    pub fn get(&self, var: char) -> Option<bool> {
        let slot = letter_slot(var)?;
        self.assigned
            .contains(slot)
            .then(|| self.values.contains(slot))
    }

    /// Iterate over the assigned variables in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.assigned
            .iter()
            .map(|slot| (slot_letter(slot), self.values.contains(slot)))
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Environment {}

impl FromIterator<(char, bool)> for Environment {
    fn from_iter<I: IntoIterator<Item = (char, bool)>>(iter: I) -> Self {
        let mut env = Environment::default();
        for (var, value) in iter {
            env.set(var, value);
        }
        env
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .iter()
            .map(|(v, b)| format!("{}={}", v, b as u8))
            .join(" ");
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::iter::FromIterator;

    fn env(values: &[(char, bool)]) -> Environment {
        Environment::from_iter(values.iter().copied())
    }

    #[test]
    fn evaluate_examples() -> Result<(), QmkitError> {
        let e1 = parse_expression("AB'+C")?;
        assert!(e1.evaluate(&env(&[('A', true), ('B', false), ('C', false)]))?);
        assert!(!e1.evaluate(&env(&[('A', true), ('B', true), ('C', false)]))?);

        let e2 = parse_expression("!A & B | C")?;
        assert!(evaluate(&e2, &env(&[('A', false), ('B', true), ('C', false)]))?);

        let e3 = parse_expression("A ^ B ^ 1")?;
        assert!(e3.evaluate(&env(&[('A', true), ('B', true)]))?);
        assert!(!e3.evaluate(&env(&[('A', false), ('B', true)]))?);
        Ok(())
    }

    #[test]
    fn evaluation_errors() -> Result<(), QmkitError> {
        let full = env(&[('A', true), ('B', true)]);

        let e = parse_expression("A + C")?;
        assert_eq!(e.evaluate(&full), Err(EvalError::UndefinedVariable('C')));

        let e = parse_expression("A +")?;
        assert_eq!(e.evaluate(&full), Err(EvalError::InsufficientOperands));

        let e = parse_expression("!")?;
        assert_eq!(e.evaluate(&full), Err(EvalError::InsufficientOperands));

        let e = parse_expression("")?;
        assert_eq!(e.evaluate(&full), Err(EvalError::InvalidExpression));

        let e = Expression::from_tokens(vec![Token::Variable('A'), Token::Variable('B')]);
        assert_eq!(e.evaluate(&full), Err(EvalError::InvalidExpression));

        let e = Expression::from_tokens(vec![Token::Variable('A'), Token::LeftParen]);
        assert_eq!(
            e.evaluate(&full),
            Err(EvalError::UnknownOperator(Token::LeftParen))
        );
        Ok(())
    }

    #[test]
    fn expression_variables() -> Result<(), QmkitError> {
        let e: Expression = "c(b + a') + C".parse()?;
        assert_eq!(e.variables().to_string(), "A, B, C");
        Ok(())
    }

    #[test]
    fn environment() {
        let vars: VarList = "A B C".parse().unwrap();
        let e = Environment::from_index(&vars, 0b101);
        assert_eq!(e.get('A'), Some(true));
        assert_eq!(e.get('b'), Some(false));
        assert_eq!(e.get('C'), Some(true));
        assert_eq!(e.get('D'), None);
        assert_eq!(e.to_string(), "A=1 B=0 C=1");

        let mut e2 = e.clone();
        e2.set('b', true);
        assert_ne!(e, e2);
        e2.set('B', false);
        assert_eq!(e, e2);
        e2.unset('C');
        assert_eq!(e2.len(), 2);
        e2.set('%', true);
        assert_eq!(e2.len(), 2);
    }
}
