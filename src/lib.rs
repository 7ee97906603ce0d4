//! Analyze and minimize Boolean functions of a few named variables.
//!
//! Boolean [expressions](Expression) are written over single-letter variables, with constants ```0``` and ```1```,
//! parentheses and the usual operators: ```+``` or ```|``` for OR, ```*``` or ```&``` for AND, ```^``` for XOR,
//! a prefix ```!``` or ```~``` or a postfix apostrophe for NOT. Juxtaposition stands for AND: ```AB'``` is ```A & !B```.
//! An expression is converted into postfix form when it is parsed, and can then be evaluated in
//! an [Environment] giving the value of each variable.
//!
//! ```
//! use qmkit::{parse_expression, Environment};
//! use std::iter::FromIterator;
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//!
//! let expr = parse_expression("AB' + C")?;
//! assert_eq!(expr.to_string(), "A B ' & C |");
//!
//! let env = Environment::from_iter([('A', true), ('B', false), ('C', false)]);
//! assert!(expr.evaluate(&env)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Truth tables
//!
//! The [truth table](TruthTable) of a function lists its value for each assignment of an ordered [list of variables](VarList).
//! Rows are identified by their minterm index, where the first variable is the most significant bit.
//!
//! ```
//! use qmkit::{build_truth_table, parse_expression};
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//!
//! let expr = parse_expression("A'B + C")?;
//! let table = build_truth_table(&expr.variables(), Some(&expr))?;
//! assert_eq!(table.minterms().into_iter().collect::<Vec<_>>(), [1, 2, 3, 5, 7]);
//! # Ok(())
//! # }
//! ```
//!
//! # Minimization
//!
//! The Quine-McCluskey method first combines minterms (and don't-care terms) into [implicants](Implicant)
//! until only prime implicants remain, then selects a small subset of them covering all minterms.
//! The result is a sum of products or a product of sums, depending on the requested [Form].
//!
//! ```
//! use qmkit::{minimize, Form, TermList, VarList};
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//!
//! let terms: TermList = "1,3,7,11,15 + d(0,2,5)".parse()?;
//! let vars = VarList::alphabetic(4)?;
//! let result = minimize(&terms.minterms, &terms.dontcares, &vars, Form::Sop);
//! assert_eq!(result.primes().len(), 3);
//! assert_eq!(result.text(), "CD + A'B'");
//! # Ok(())
//! # }
//! ```
//!
//! # Sessions and Karnaugh maps
//!
//! A [Session] holds a function under edition as a list of cells (true, false or don't-care) which can be
//! toggled directly or through a [Karnaugh map layout](KMapLayout).
//!
//! ```
//! use qmkit::Session;
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//!
//! let session = Session::from_expression("A ^ B")?;
//! let layout = session.layout()?;
//! assert_eq!(layout.index(1, 0), Some(2));
//!
//! let session = session.toggle_cell(1, 1)?;
//! assert_eq!(session.minimize()?.text(), "B + A");
//! # Ok(())
//! # }
//! ```

mod error;
mod expr;
mod implicants;
mod kmap;
mod minimize;
mod parse;
mod pattern;
mod session;
mod table;
mod terms;
mod token;
mod variable;

pub mod efmt;
pub mod tools;

mod proptests;

use std::fmt;

#[macro_use]
extern crate pest_derive;

// Export public structures and API
pub use error::{EvalError, LexError, ParseError, QmkitError, TermError};
pub use expr::{evaluate, Environment, Expression};
pub use implicants::Implicants;
pub use kmap::{kmap_layout, KMapLayout, MAX_KMAP_VARIABLES};
pub use minimize::{minimize, Form, Minimized, PrimeChart};
pub use parse::{parse, parse_expression};
pub use pattern::{Implicant, WithOrigins};
pub use session::{Cell, Limits, Session, DEFAULT_LIMITS, KMAP_LIMITS};
pub use table::{build_truth_table, TruthTable, TruthTableRow, MAX_TABLE_VARIABLES};
pub use terms::TermList;
pub use token::{tokenize, Assoc, Fixity, Notation, Operator, Token};
pub use variable::VarList;
