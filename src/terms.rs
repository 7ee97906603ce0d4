//! Textual lists of minterms and don't-care terms

use crate::error::TermError;
use crate::*;

use itertools::Itertools;
use pest::{iterators, Parser};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Parser)]
#[grammar_inline = r####"
terms     = { SOI ~ list ~ dontcares? ~ EOI }
dontcares = { "+" ~ ^"d" ~ "(" ~ list ~ ")" }
list      = { (value ~ (","? ~ value)*)? }
value     = @{ ASCII_DIGIT+ }

WHITESPACE = _{ " " | "\t" }
"####]
struct TermParser;

/// Minterms and don't-care terms of a function, identified by their index.
///
/// The text format is a list of indices separated by commas and/or spaces, optionally followed by
/// a list of don't-care terms enclosed in ```+d( )```.
///
/// ```
/// use qmkit::TermList;
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
///
/// let terms: TermList = "0,1,5,7 + d(2, 3)".parse()?;
/// assert_eq!(terms.minterms.len(), 4);
/// assert_eq!(terms.dontcares.len(), 2);
/// assert_eq!(terms.to_string(), "0,1,5,7+d(2,3)");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct TermList {
    pub minterms: BTreeSet<usize>,
    pub dontcares: BTreeSet<usize>,
}

impl TermList {
    pub fn new(minterms: BTreeSet<usize>, dontcares: BTreeSet<usize>) -> Self {
        Self {
            minterms,
            dontcares,
        }
    }

    /// Indices of a function of ```width``` variables which are neither minterms nor don't-cares.
    ///
    /// These are the terms to cover when a Product-of-Sums is requested.
    pub fn complement(&self, width: usize) -> BTreeSet<usize> {
        (0..tools::term_count(width))
            .filter(|idx| !self.minterms.contains(idx) && !self.dontcares.contains(idx))
            .collect()
    }

    /// Check that all terms are valid indices for ```width``` variables
    pub fn fits(&self, width: usize) -> bool {
        self.minterms
            .iter()
            .chain(&self.dontcares)
            .all(|idx| tools::in_range(*idx, width))
    }

    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty() && self.dontcares.is_empty()
    }
}

fn load_list(pair: iterators::Pair<Rule>) -> Result<BTreeSet<usize>, TermError> {
    pair.into_inner()
        .map(|v| {
            v.as_str()
                .parse()
                .map_err(|_| TermError::Overflow(v.as_str().to_string()))
        })
        .collect()
}

impl FromStr for TermList {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = TermParser::parse(Rule::terms, s)
            .map_err(|e| TermError::Syntax(e.to_string()))?
            .next()
            .ok_or_else(|| TermError::Syntax(s.to_string()))?;

        let mut result = TermList::default();
        for pair in parsed.into_inner() {
            match pair.as_rule() {
                Rule::list => result.minterms = load_list(pair)?,
                Rule::dontcares => {
                    if let Some(list) = pair.into_inner().next() {
                        result.dontcares = load_list(list)?;
                    }
                }
                // End of input
                _ => (),
            }
        }
        Ok(result)
    }
}

impl fmt::Display for TermList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minterms.iter().join(","))?;
        if !self.dontcares.is_empty() {
            write!(f, "+d({})", self.dontcares.iter().join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::TermError;
    use crate::*;
    use std::collections::BTreeSet;

    fn set(terms: &[usize]) -> BTreeSet<usize> {
        terms.iter().copied().collect()
    }

    #[test]
    fn separators() -> Result<(), TermError> {
        let expected = TermList::new(set(&[0, 1, 5, 7]), set(&[2, 3]));
        assert_eq!("0,1,5,7+d(2,3)".parse::<TermList>()?, expected);
        assert_eq!("0 1 5 7 +D(2 3)".parse::<TermList>()?, expected);
        assert_eq!(" 7, 5 1,0 + d( 3,2 ) ".parse::<TermList>()?, expected);
        Ok(())
    }

    #[test]
    fn partial_lists() -> Result<(), TermError> {
        assert!("".parse::<TermList>()?.is_empty());

        let only_dc: TermList = "+d(4)".parse()?;
        assert!(only_dc.minterms.is_empty());
        assert_eq!(only_dc.dontcares, set(&[4]));

        let empty_dc: TermList = "1, 2 + d()".parse()?;
        assert_eq!(empty_dc.to_string(), "1,2");
        Ok(())
    }

    #[test]
    fn invalid_lists() {
        assert!(matches!("1,,2".parse::<TermList>(), Err(TermError::Syntax(_))));
        assert!(matches!("1, a".parse::<TermList>(), Err(TermError::Syntax(_))));
        assert!(matches!("1 + d(2".parse::<TermList>(), Err(TermError::Syntax(_))));
        assert!(matches!(
            "99999999999999999999999".parse::<TermList>(),
            Err(TermError::Overflow(_))
        ));
    }

    #[test]
    fn complement() -> Result<(), TermError> {
        let terms: TermList = "0,3+d(1)".parse()?;
        assert_eq!(terms.complement(2), set(&[2]));
        assert!(terms.fits(2));
        assert!(!terms.fits(1));
        Ok(())
    }
}
