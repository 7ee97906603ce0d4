use crate::*;

use bit_set::BitSet;
use itertools::Itertools;
use std::str::FromStr;

/// Widest pattern accepted by the parser, one position per letter
const MAX_PATTERN_WIDTH: usize = 26;

/// A group of minterms defined by fixed and free variable positions.
///
/// An implicant is a cube of fixed width, written as a string with one symbol per variable position:
/// ```1``` for a variable fixed to true, ```0``` for a variable fixed to false and ```-``` for a free variable.
/// An implicant with k free positions covers exactly 2^k minterms.
///
/// The fixed positions are stored in two bit-sets (positive and negative positions).
/// Each implicant also tracks the set of minterms it was built from.
///
/// ```
/// use qmkit::Implicant;
///
/// let a = Implicant::from_minterm(0b010, 3);
/// let b = Implicant::from_minterm(0b110, 3);
/// let c = a.combine(&b).unwrap();
/// assert_eq!(c.to_string(), "-10");
/// assert!(c.covers(0b110));
/// assert!(!c.covers(0b111));
/// assert_eq!(c.origins().collect::<Vec<_>>(), [2, 6]);
/// ```
#[derive(Clone, Default, Debug)]
pub struct Implicant {
    width: usize,
    pub(crate) positive: BitSet,
    pub(crate) negative: BitSet,
    from: BitSet,
}

impl Implicant {
    /// Create the implicant covering a single minterm
    pub fn from_minterm(index: usize, width: usize) -> Self {
        let mut result = Implicant {
            width,
            ..Implicant::default()
        };
        for pos in 0..width {
            match tools::bit_at(index, width, pos) {
                true => result.positive.insert(pos),
                false => result.negative.insert(pos),
            };
        }
        result.from.insert(index);
        result
    }

    /// Number of variable positions
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of free positions
    pub fn dashes(&self) -> usize {
        self.width - self.positive.len() - self.negative.len()
    }

    /// Number of positions fixed to true
    pub fn ones(&self) -> usize {
        self.positive.len()
    }

    /// Value of a position, None if it is free
    pub fn value_at(&self, pos: usize) -> Option<bool> {
        if self.positive.contains(pos) {
            Some(true)
        } else if self.negative.contains(pos) {
            Some(false)
        } else {
            None
        }
    }

    /// Iterate over the fixed positions and their values, in position order
    pub fn iter_fixed_values(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.width).filter_map(move |pos| self.value_at(pos).map(|v| (pos, v)))
    }

    /// Original minterms (or don't-cares) merged into this implicant
    pub fn origins(&self) -> impl Iterator<Item = usize> + '_ {
        self.from.iter()
    }

    /// Check if a minterm index matches all fixed positions
    pub fn covers(&self, index: usize) -> bool {
        tools::in_range(index, self.width)
            && self
                .iter_fixed_values()
                .all(|(pos, v)| tools::bit_at(index, self.width, pos) == v)
    }

    /// All minterm indices covered by this implicant, in increasing order.
    ///
    /// Only the free positions are expanded: the result has exactly 2^k elements for k dashes.
    pub fn covered_terms(&self) -> Vec<usize> {
        let base = tools::index_from_bits((0..self.width).map(|pos| self.positive.contains(pos)));
        let mut terms = vec![base];
        for pos in (0..self.width).filter(|pos| self.value_at(*pos).is_none()) {
            let bit = 1 << (self.width - 1 - pos);
            let expanded: Vec<usize> = terms.iter().map(|t| t | bit).collect();
            terms.extend(expanded);
        }
        terms.sort_unstable();
        terms
    }

    /// Merge two implicants differing in a single fixed position.
    ///
    /// Both implicants must have the same free positions and the same width.
    /// The differing position becomes free in the result, which inherits the origins of both.
    pub fn combine(&self, other: &Self) -> Option<Self> {
        if self.width != other.width || !self.same_free_positions(other) {
            return None;
        }

        let mut diff = self.positive.clone();
        diff.symmetric_difference_with(&other.positive);
        let mut conflicts = diff.iter();
        conflicts.next()?;
        if conflicts.next().is_some() {
            return None;
        }

        let mut positive = self.positive.clone();
        positive.intersect_with(&other.positive);
        let mut negative = self.negative.clone();
        negative.intersect_with(&other.negative);
        let mut from = self.from.clone();
        from.union_with(&other.from);
        Some(Implicant {
            width: self.width,
            positive,
            negative,
            from,
        })
    }

    fn same_free_positions(&self, other: &Self) -> bool {
        let mut fixed = self.positive.clone();
        fixed.union_with(&self.negative);
        let mut other_fixed = other.positive.clone();
        other_fixed.union_with(&other.negative);
        fixed.iter().eq(other_fixed.iter())
    }

    /// Identity used to detect duplicates: the pattern and the origins
    pub(crate) fn key(&self) -> (String, Vec<usize>) {
        (self.to_string(), self.from.iter().collect())
    }
}

impl PartialEq for Implicant {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Implicant {}

impl FromStr for Implicant {
    type Err = QmkitError;

    /// Parse a pattern of ```0```, ```1``` and ```-``` symbols, spaces are ignored.
    /// The origins of a parsed implicant are all the minterms it covers.
    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let mut p = Implicant::default();
        for c in descr.chars() {
            match c {
                ' ' | '\t' => continue,
                '-' => (),
                '0' => {
                    p.negative.insert(p.width);
                }
                '1' => {
                    p.positive.insert(p.width);
                }
                _ => return Err(QmkitError::InvalidPattern(descr.to_string())),
            };
            p.width += 1;
        }
        if p.width > MAX_PATTERN_WIDTH {
            return Err(QmkitError::TooManyVariables {
                count: p.width,
                max: MAX_PATTERN_WIDTH,
            });
        }
        p.from = p.covered_terms().into_iter().collect();
        Ok(p)
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = (0..self.width)
            .map(|pos| match self.value_at(pos) {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            })
            .collect();
        write!(f, "{}", &s)
    }
}

/// Show the origins along with the pattern, as in ```-10 (2,6)```
pub struct WithOrigins<'a>(pub &'a Implicant);

impl fmt::Display for WithOrigins<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.0.origins().join(","))
    }
}

#[cfg(test)]
mod tests {
    use crate::pattern::*;

    #[test]
    fn construct_and_display() -> Result<(), QmkitError> {
        let p = Implicant::from_minterm(5, 4);
        assert_eq!(p.to_string(), "0101");
        assert_eq!(p.ones(), 2);
        assert_eq!(p.dashes(), 0);

        let p = Implicant::from_str("1 - 0")?;
        assert_eq!(p.width(), 3);
        assert_eq!(p.to_string(), "1-0");
        assert_eq!(p.origins().collect::<Vec<_>>(), [4, 6]);
        assert_eq!(format!("{}", WithOrigins(&p)), "1-0 (4,6)");

        assert_eq!(
            Implicant::from_str("10x"),
            Err(QmkitError::InvalidPattern("10x".to_string()))
        );
        Ok(())
    }

    #[test]
    fn pattern_width_is_bounded() -> Result<(), QmkitError> {
        assert_eq!(
            "-".repeat(64).parse::<Implicant>(),
            Err(QmkitError::TooManyVariables { count: 64, max: 26 })
        );
        assert!("-".repeat(27).parse::<Implicant>().is_err());

        let wide: Implicant = format!("1{}", "-".repeat(19)).parse()?;
        assert_eq!(wide.covered_terms().len(), 1 << 19);
        assert_eq!(wide.origins().next(), Some(1 << 19));
        Ok(())
    }

    #[test]
    fn combine() -> Result<(), QmkitError> {
        let a: Implicant = "0-10".parse()?;
        let b: Implicant = "0-11".parse()?;
        let c: Implicant = "1-11".parse()?;
        let d: Implicant = "--11".parse()?;

        assert_eq!(a.combine(&b).map(|p| p.to_string()), Some("0-1-".to_string()));
        // two differences
        assert!(a.combine(&c).is_none());
        // different free positions
        assert!(b.combine(&d).is_none());
        // identical patterns
        assert!(a.combine(&a).is_none());

        let merged = b.combine(&c).unwrap();
        assert_eq!(merged.to_string(), "--11");
        assert_eq!(merged, d);
        Ok(())
    }

    #[test]
    fn coverage_size() -> Result<(), QmkitError> {
        for descr in ["----", "1-0-", "0110", "-1--"] {
            let p: Implicant = descr.parse()?;
            assert_eq!(p.covered_terms().len(), 1 << p.dashes());
            for idx in p.covered_terms() {
                assert!(p.covers(idx));
            }
        }
        let empty: Implicant = "".parse()?;
        assert!(empty.covers(0));
        assert!(!empty.covers(1));
        Ok(())
    }
}
