//! Some helper functions on minterm indices
//!
//! Minterm indices are read with the most significant bit first: in a function of ```width```
//! variables, the variable at position 0 is associated to the bit of weight ```2^(width-1)```.

/// Extract the bit associated to a variable position in a minterm index.
///
/// ```
/// # use qmkit::tools::bit_at;
/// // 6 = 0b110 in a function of 3 variables
/// assert!( bit_at(6, 3, 0));
/// assert!( bit_at(6, 3, 1));
/// assert!(!bit_at(6, 3, 2));
/// ```
pub fn bit_at(index: usize, width: usize, pos: usize) -> bool {
    debug_assert!(pos < width);
    (index >> (width - 1 - pos)) & 1 == 1
}

/// Build a minterm index from the values of all variables, most significant first.
///
/// ```
/// # use qmkit::tools::index_from_bits;
/// assert_eq!(index_from_bits([true, false, true]), 5);
/// assert_eq!(index_from_bits([]), 0);
/// ```
pub fn index_from_bits(bits: impl IntoIterator<Item = bool>) -> usize {
    bits.into_iter().fold(0, |idx, b| (idx << 1) | b as usize)
}

/// Number of minterms in a function of ```width``` variables
pub fn term_count(width: usize) -> usize {
    1 << width
}

/// Test if an index is a valid minterm of a function of ```width``` variables
pub fn in_range(index: usize, width: usize) -> bool {
    width >= usize::BITS as usize || index >> width == 0
}

/// Test if two indices differ in exactly one bit
pub fn adjacent(a: usize, b: usize) -> bool {
    (a ^ b).count_ones() == 1
}
