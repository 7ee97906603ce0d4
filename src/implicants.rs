//! Manipulate ordered lists of implicants.

use crate::*;

use delegate::delegate;
use std::collections::HashSet;
use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter;
use std::str::FromStr;
use std::vec::IntoIter;

pub(crate) static PATTERN_SEPARATORS: [char; 3] = [',', ';', '\n'];

/// Ordered list of distinct implicants.
///
/// Implicants are listed in insertion order, a lookup set rejects new implicants
/// with the same pattern and origins as an existing one.
/// The position of an implicant in the list is stable and can be used as an index.
#[derive(Clone, Default, Debug)]
pub struct Implicants {
    patterns: Vec<Implicant>,
    known: HashSet<(String, Vec<usize>)>,
}

impl Implicants {
    /// Add an implicant at the end of the list if it is not already present.
    ///
    /// Returns true if the implicant was added.
    pub fn push_new(&mut self, p: Implicant) -> bool {
        if !self.known.insert(p.key()) {
            return false;
        }
        self.patterns.push(p);
        true
    }

    /// Add all implicants of another list, skipping duplicates
    pub fn extend_new(&mut self, other: impl IntoIterator<Item = Implicant>) {
        for p in other {
            self.push_new(p);
        }
    }

    /// Test if an implicant with the same pattern and origins is in the list
    pub fn contains(&self, p: &Implicant) -> bool {
        self.known.contains(&p.key())
    }

    /// Indices of the implicants covering a minterm
    pub fn covering(&self, index: usize) -> Vec<usize> {
        self.patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| p.covers(index))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn as_slice(&self) -> &[Implicant] {
        &self.patterns
    }

    delegate! {
        to self.patterns {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> Iter<'_, Implicant>;
            pub fn get(&self, idx: usize) -> Option<&Implicant>;
        }
    }
}

impl Index<usize> for Implicants {
    type Output = Implicant;

    fn index(&self, idx: usize) -> &Implicant {
        &self.patterns[idx]
    }
}

impl FromIterator<Implicant> for Implicants {
    fn from_iter<I: IntoIterator<Item = Implicant>>(iter: I) -> Self {
        let mut implicants = Implicants::default();
        implicants.extend_new(iter);
        implicants
    }
}

impl<'a> IntoIterator for &'a Implicants {
    type Item = &'a Implicant;
    type IntoIter = Iter<'a, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl IntoIterator for Implicants {
    type Item = Implicant;
    type IntoIter = IntoIter<Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl FromStr for Implicants {
    type Err = QmkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut result = Implicants::default();
        for elt in s.split(&PATTERN_SEPARATORS[..]).filter(|e| !e.trim().is_empty()) {
            result.push_new(elt.parse()?);
        }
        Ok(result)
    }
}

impl fmt::Display for Implicants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.patterns {
            writeln!(f, "{}", p)?;
        }
        Ok(())
    }
}
