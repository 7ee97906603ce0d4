//! Karnaugh map layouts
//!
//! A Karnaugh map arranges the minterms of a function in a grid such that neighbouring cells
//! (including across the borders) differ in a single variable. Rows and columns follow
//! Gray code sequences. Layouts are available for one to four variables.

use crate::*;

/// Gray code over a single bit
const GRAY_2: &[usize] = &[0, 1];

/// Gray code over two bits
const GRAY_4: &[usize] = &[0, 1, 3, 2];

const NO_GRAY: &[usize] = &[];

/// Largest number of variables with a Karnaugh map layout
pub const MAX_KMAP_VARIABLES: usize = 4;

/// Mapping between the cells of a Karnaugh map and minterm indices.
///
/// The first variables are assigned to rows and the others to columns.
/// A layout depends only on the number of variables, the names are carried for display purposes.
///
/// ```
/// use qmkit::KMapLayout;
///
/// let layout = KMapLayout::new(4).unwrap();
/// assert_eq!((layout.height(), layout.width()), (4, 4));
/// assert_eq!(layout.index(2, 3), Some(0b1110));
/// assert_eq!(layout.index(4, 0), None);
/// assert_eq!(layout.position(0b1110), Some((2, 3)));
///
/// assert!(KMapLayout::new(5).is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct KMapLayout {
    rows: &'static [usize],
    cols: &'static [usize],
    row_vars: Vec<char>,
    col_vars: Vec<char>,
}

impl KMapLayout {
    /// Layout for a function of ```count``` variables named by the first letters of the alphabet.
    ///
    /// Returns None if there is no layout for this number of variables.
    pub fn new(count: usize) -> Option<Self> {
        let vars = VarList::alphabetic(count).ok()?;
        Self::for_variables(&vars)
    }

    /// Layout for a list of variables
    pub fn for_variables(vars: &VarList) -> Option<Self> {
        let (rows, cols, split) = match vars.len() {
            1 => (GRAY_2, NO_GRAY, 1),
            2 => (GRAY_2, GRAY_2, 1),
            3 => (GRAY_2, GRAY_4, 1),
            4 => (GRAY_4, GRAY_4, 2),
            _ => return None,
        };
        let (row_vars, col_vars) = vars.as_slice().split_at(split);
        Some(Self {
            rows,
            cols,
            row_vars: row_vars.to_vec(),
            col_vars: col_vars.to_vec(),
        })
    }

    pub fn variable_count(&self) -> usize {
        self.row_vars.len() + self.col_vars.len()
    }

    /// Gray code values of the rows, in display order
    pub fn rows(&self) -> &[usize] {
        self.rows
    }

    /// Gray code values of the columns, in display order (empty for a single variable)
    pub fn cols(&self) -> &[usize] {
        self.cols
    }

    pub fn row_variables(&self) -> &[char] {
        &self.row_vars
    }

    pub fn col_variables(&self) -> &[char] {
        &self.col_vars
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns. A single variable map still has one column.
    pub fn width(&self) -> usize {
        self.cols.len().max(1)
    }

    /// Minterm index of a cell: row bits first, then column bits.
    ///
    /// Returns None if the cell is outside of the map.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        let row_bits = *self.rows.get(row)?;
        let col_bits = match self.cols {
            [] if col == 0 => 0,
            cols => *cols.get(col)?,
        };
        Some((row_bits << self.col_vars.len()) | col_bits)
    }

    /// Find the cell associated to a minterm index
    pub fn position(&self, minterm: usize) -> Option<(usize, usize)> {
        self.cells()
            .find(|(_, _, idx)| *idx == minterm)
            .map(|(row, col, _)| (row, col))
    }

    /// Iterate over all cells as ```(row, col, minterm)``` in display order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width()).filter_map(move |col| self.index(row, col).map(|idx| (row, col, idx)))
        })
    }
}

/// Layout of a Karnaugh map for ```count``` variables, None above four variables
pub fn kmap_layout(count: usize) -> Option<KMapLayout> {
    KMapLayout::new(count)
}
