//! Application context around the core functions.
//!
//! A [Session] carries the state edited by an interactive front-end (variables, cell values and
//! the requested form) as a plain value. Operations never mutate a session in place:
//! they return an updated copy, so that independent sessions can be handled concurrently.

use crate::*;

use log::{debug, info};
use std::collections::BTreeSet;

/// Upper bounds on the number of variables accepted by a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Limits {
    /// Largest function for truth tables and expression analysis
    pub max_table_variables: usize,
    /// Largest function displayed on a Karnaugh map
    pub max_kmap_variables: usize,
    /// Largest function given to the minimizer
    pub max_minimize_variables: usize,
}

pub static DEFAULT_LIMITS: Limits = Limits {
    max_table_variables: MAX_TABLE_VARIABLES,
    max_kmap_variables: MAX_KMAP_VARIABLES,
    max_minimize_variables: MAX_TABLE_VARIABLES,
};

/// Restrictive limits for grid-based workflows
pub static KMAP_LIMITS: Limits = Limits {
    max_table_variables: MAX_KMAP_VARIABLES,
    max_kmap_variables: MAX_KMAP_VARIABLES,
    max_minimize_variables: MAX_KMAP_VARIABLES,
};

impl Default for Limits {
    fn default() -> Self {
        DEFAULT_LIMITS
    }
}

impl Limits {
    fn check(count: usize, max: usize) -> Result<(), QmkitError> {
        match count > max {
            true => Err(QmkitError::TooManyVariables { count, max }),
            false => Ok(()),
        }
    }
}

/// Value of the function for a single minterm
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Zero,
    One,
    DontCare,
}

impl Cell {
    /// Next value when a cell is toggled: 0, then 1, then don't-care
    pub fn next(self) -> Self {
        match self {
            Cell::Zero => Cell::One,
            Cell::One => Cell::DontCare,
            Cell::DontCare => Cell::Zero,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Zero => write!(f, "0"),
            Cell::One => write!(f, "1"),
            Cell::DontCare => write!(f, "X"),
        }
    }
}

/// A Boolean function under edition.
///
/// ```
/// use qmkit::{Form, Session};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
///
/// let session = Session::from_expression("AB + AB'")?;
/// assert_eq!(session.minimize()?.text(), "A");
///
/// // Toggle the cell of minterm 0 to true, then ask for a product of sums
/// let session = session.toggle(0)?.with_form(Form::Pos);
/// assert_eq!(session.terms().to_string(), "0,2,3");
/// assert_eq!(session.minimize()?.text(), "(A + B')");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Session {
    variables: VarList,
    form: Form,
    cells: Vec<Cell>,
    limits: Limits,
}

impl Session {
    /// Create a function where all cells are false
    pub fn new(variables: VarList, limits: Limits) -> Result<Self, QmkitError> {
        Limits::check(variables.len(), limits.max_table_variables)?;
        let cells = vec![Cell::Zero; tools::term_count(variables.len())];
        Ok(Self {
            variables,
            form: Form::default(),
            cells,
            limits,
        })
    }

    /// Analyze an expression using its own variables in alphabetical order
    pub fn from_expression(expr: &str) -> Result<Self, QmkitError> {
        Self::from_expression_with(expr, DEFAULT_LIMITS)
    }

    pub fn from_expression_with(expr: &str, limits: Limits) -> Result<Self, QmkitError> {
        let parsed = parse_expression(expr)?;
        let variables = parsed.variables();
        Limits::check(variables.len(), limits.max_table_variables)?;

        let table = build_truth_table(&variables, Some(&parsed))?;
        let cells = table
            .iter()
            .map(|row| match row.output {
                true => Cell::One,
                false => Cell::Zero,
            })
            .collect();
        debug!("loaded '{}' over [{}]", expr, variables);
        Ok(Self {
            variables,
            form: Form::default(),
            cells,
            limits,
        })
    }

    /// Create a function from lists of minterms and don't-care terms
    pub fn from_terms(variables: VarList, terms: &TermList, limits: Limits) -> Result<Self, QmkitError> {
        let mut session = Self::new(variables, limits)?;
        if let Some(idx) = terms
            .minterms
            .iter()
            .chain(&terms.dontcares)
            .find(|idx| **idx >= session.cells.len())
        {
            return Err(QmkitError::NoSuchCell(*idx));
        }
        for idx in &terms.dontcares {
            session.cells[*idx] = Cell::DontCare;
        }
        for idx in &terms.minterms {
            session.cells[*idx] = Cell::One;
        }
        Ok(session)
    }

    /// Change the list of variables, keeping the function over the shared variables.
    ///
    /// Each new cell takes the value of the old cell where the shared variables have the same value.
    /// The function does not depend on added variables, removed variables are fixed to false.
    pub fn with_variables(&self, variables: VarList) -> Result<Self, QmkitError> {
        let mut result = Self::new(variables, self.limits)?;
        result.form = self.form;
        for (index, cell) in result.cells.iter_mut().enumerate() {
            let env = Environment::from_index(&result.variables, index);
            let bits = self.variables.iter().map(|v| env.get(*v).unwrap_or(false));
            let old = tools::index_from_bits(bits);
            *cell = self.cells.get(old).copied().unwrap_or_default();
        }
        Ok(result)
    }

    pub fn with_form(&self, form: Form) -> Self {
        Self {
            form,
            ..self.clone()
        }
    }

    /// Set the value of a single cell
    pub fn with_cell(&self, index: usize, value: Cell) -> Result<Self, QmkitError> {
        let mut result = self.clone();
        let cell = result
            .cells
            .get_mut(index)
            .ok_or(QmkitError::NoSuchCell(index))?;
        *cell = value;
        Ok(result)
    }

    /// Cycle the value of a cell identified by its minterm index
    pub fn toggle(&self, index: usize) -> Result<Self, QmkitError> {
        let current = self.cell(index).ok_or(QmkitError::NoSuchCell(index))?;
        self.with_cell(index, current.next())
    }

    /// Cycle the value of a cell identified by its position in the Karnaugh map
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<Self, QmkitError> {
        let index = self
            .layout()?
            .index(row, col)
            .ok_or(QmkitError::NoSuchPosition { row, col })?;
        self.toggle(index)
    }

    pub fn variables(&self) -> &VarList {
        &self.variables
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Minterms and don't-care terms of the function
    pub fn terms(&self) -> TermList {
        let select = |value: Cell| -> BTreeSet<usize> {
            self.cells
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == value)
                .map(|(idx, _)| idx)
                .collect()
        };
        TermList::new(select(Cell::One), select(Cell::DontCare))
    }

    /// Truth table of the function, don't-care terms are listed as false
    pub fn truth_table(&self) -> TruthTable {
        let outputs = self.cells.iter().map(|c| *c == Cell::One);
        TruthTable::from_outputs(&self.variables, outputs)
    }

    /// Karnaugh map layout of the function
    pub fn layout(&self) -> Result<KMapLayout, QmkitError> {
        let count = self.variables.len();
        Limits::check(count, self.limits.max_kmap_variables)?;
        KMapLayout::for_variables(&self.variables).ok_or(QmkitError::NoLayout(count))
    }

    /// Minimize the function in the selected form.
    ///
    /// For a Product-of-Sums, the minimizer covers the false cells.
    /// A function without any true cell is then the constant 0.
    pub fn minimize(&self) -> Result<Minimized, QmkitError> {
        Limits::check(self.variables.len(), self.limits.max_minimize_variables)?;
        let terms = self.terms();
        let result = match self.form {
            Form::Sop => minimize(&terms.minterms, &terms.dontcares, &self.variables, Form::Sop),
            Form::Pos if terms.minterms.is_empty() => {
                Minimized::constant(Form::Pos, &self.variables, false)
            }
            Form::Pos => {
                let maxterms = terms.complement(self.variables.len());
                minimize(&maxterms, &terms.dontcares, &self.variables, Form::Pos)
            }
        };
        info!("{} of [{}]: {}", self.form, self.variables, result);
        Ok(result)
    }
}
