//! Ordered lists of single-letter variables

use crate::*;

use delegate::delegate;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Index;
use std::str::FromStr;

static RE_NAMES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static NAME_SEPARATORS: [char; 3] = [' ', ',', ';'];

/// Ordered list of distinct variables.
///
/// The order defines the position of each variable in truth tables, implicants and K-maps:
/// the first variable is associated to the most significant bit of minterm indices.
/// Variables are uppercase ASCII letters.
///
/// A list can be parsed from a string of letters separated by spaces, commas or semicolons,
/// adjacent letters are considered as separate variables.
///
/// ```
/// use qmkit::VarList;
///
/// let vars: VarList = "a, B c".parse().unwrap();
/// assert_eq!(vars.len(), 3);
/// assert_eq!(vars[0], 'A');
/// assert_eq!(vars.position('C'), Some(2));
///
/// let same: VarList = "ABC".parse().unwrap();
/// assert_eq!(vars, same);
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct VarList {
    names: Vec<char>,
}

impl VarList {
    /// Wrap a list of letters known to be valid and distinct
    pub(crate) fn with(names: Vec<char>) -> Self {
        Self { names }
    }

    /// The first `count` letters of the alphabet.
    pub fn alphabetic(count: usize) -> Result<Self, QmkitError> {
        if count > 26 {
            return Err(QmkitError::TooManyVariables { count, max: 26 });
        }
        Ok(Self::with((b'A'..b'A' + count as u8).map(char::from).collect()))
    }

    /// Append a new variable at the end of the list
    pub fn push(&mut self, name: char) -> Result<(), QmkitError> {
        if !name.is_ascii_alphabetic() {
            return Err(QmkitError::InvalidName(name.to_string()));
        }
        let name = name.to_ascii_uppercase();
        if self.names.contains(&name) {
            return Err(QmkitError::ConflictingName(name.to_string()));
        }
        self.names.push(name);
        Ok(())
    }

    /// Find the position of a variable in the list
    pub fn position(&self, name: char) -> Option<usize> {
        let name = name.to_ascii_uppercase();
        self.names.iter().position(|v| *v == name)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.names
    }

    delegate! {
        to self.names {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> std::slice::Iter<'_, char>;
            pub fn get(&self, idx: usize) -> Option<&char>;
        }
    }
}

impl Index<usize> for VarList {
    type Output = char;

    fn index(&self, idx: usize) -> &char {
        &self.names[idx]
    }
}

impl<'a> IntoIterator for &'a VarList {
    type Item = &'a char;
    type IntoIter = std::slice::Iter<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl FromStr for VarList {
    type Err = QmkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut result = VarList::default();
        for chunk in s.split(&NAME_SEPARATORS[..]).filter(|n| !n.is_empty()) {
            if !RE_NAMES.is_match(chunk) {
                return Err(QmkitError::InvalidName(chunk.to_string()));
            }
            chunk.chars().try_for_each(|c| result.push(c))?;
        }
        Ok(result)
    }
}

impl fmt::Display for VarList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.iter().join(", "))
    }
}
