//! Enumeration of truth tables

use crate::*;

use delegate::delegate;
use itertools::Itertools;
use log::debug;
use std::collections::BTreeSet;
use std::slice::Iter;

/// Largest number of variables accepted when enumerating a truth table
pub const MAX_TABLE_VARIABLES: usize = 8;

/// A single row of a truth table
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TruthTableRow {
    /// Minterm index of the row
    pub index: usize,
    /// Value of each variable, as encoded in the index
    pub env: Environment,
    /// Value of the function
    pub output: bool,
}

/// The value of a function for every assignment of its variables.
///
/// Rows are ordered by minterm index: this is the canonical order used to identify minterms.
///
/// ```
/// use qmkit::{build_truth_table, Expression};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
///
/// let expr: Expression = "A ^ B".parse()?;
/// let table = build_truth_table(&expr.variables(), Some(&expr))?;
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.minterms().into_iter().collect::<Vec<_>>(), [1, 2]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug)]
pub struct TruthTable {
    variables: VarList,
    rows: Vec<TruthTableRow>,
}

impl TruthTable {
    pub fn variables(&self) -> &VarList {
        &self.variables
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    /// Build a table from the output of each row, in minterm order
    pub(crate) fn from_outputs(vars: &VarList, outputs: impl IntoIterator<Item = bool>) -> Self {
        let rows = outputs
            .into_iter()
            .enumerate()
            .map(|(index, output)| TruthTableRow {
                index,
                env: Environment::from_index(vars, index),
                output,
            })
            .collect();
        Self {
            variables: vars.clone(),
            rows,
        }
    }

    /// Indices of the rows where the function is true
    pub fn minterms(&self) -> BTreeSet<usize> {
        self.rows.iter().filter(|r| r.output).map(|r| r.index).collect()
    }

    /// Indices of the rows where the function is false
    pub fn maxterms(&self) -> BTreeSet<usize> {
        self.rows.iter().filter(|r| !r.output).map(|r| r.index).collect()
    }

    delegate! {
        to self.rows {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> Iter<'_, TruthTableRow>;
        }
    }
}

impl<'a> IntoIterator for &'a TruthTable {
    type Item = &'a TruthTableRow;
    type IntoIter = Iter<'a, TruthTableRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | F", self.variables.iter().join(" "))?;
        for row in &self.rows {
            let bits = self
                .variables
                .iter()
                .map(|v| row.env.get(*v).unwrap_or(false) as u8)
                .join(" ");
            writeln!(f, "{} | {}", bits, row.output as u8)?;
        }
        Ok(())
    }
}

/// Evaluate an expression for all assignments of a list of variables.
///
/// Without expression, the function is false everywhere.
/// The first evaluation error is returned, and no partial table.
pub fn build_truth_table(
    vars: &VarList,
    expr: Option<&Expression>,
) -> Result<TruthTable, QmkitError> {
    if vars.len() > MAX_TABLE_VARIABLES {
        return Err(QmkitError::TooManyVariables {
            count: vars.len(),
            max: MAX_TABLE_VARIABLES,
        });
    }

    let rows = (0..tools::term_count(vars.len()))
        .map(|index| {
            let env = Environment::from_index(vars, index);
            let output = match expr {
                Some(e) => e.evaluate(&env)?,
                None => false,
            };
            Ok(TruthTableRow { index, env, output })
        })
        .collect::<Result<Vec<_>, EvalError>>()?;

    debug!("truth table over [{}]: {} rows", vars, rows.len());
    Ok(TruthTable {
        variables: vars.clone(),
        rows,
    })
}
