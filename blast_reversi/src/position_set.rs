use std::iter::FusedIterator;

use crate::{Position, BOARD_SIZE};

/// A compact set of on-board [`Position`]s, one bit per cell.
///
/// Allows union with other such sets via bitwise ops.
/// Also implements [`IntoIterator`], which yields positions in row-major order.
///
/// ```
/// use blast_reversi::{Position, PositionSet};
/// let mut set = PositionSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `PositionSet`.
/// set = set.insert(Position::new(4, 2));
/// set = set.insert(Position::new(4, 2)); // Inserting a second time has no effect
/// set = set.insert(Position::new(0, 7));
/// assert_eq!(Vec::from_iter(set), vec![Position::new(0, 7), Position::new(4, 2)]);
/// ```
///
/// # Note on immutability
///
/// The "mutating" methods return a new value instead of mutating in place.
/// The type is [`Copy`], so a value is not consumed by methods with `self` receiver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PositionSet {
    bits: u64,
}

fn bit(position: Position) -> u64 {
    debug_assert!(position.is_on_board(), "{} is not on the board", position);
    1u64 << (position.row as u32 * BOARD_SIZE as u32 + position.col as u32)
}

impl PositionSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Off-board positions are never contained.
    pub fn contains(self, position: Position) -> bool {
        position.is_on_board() && (self.bits & bit(position)) != 0
    }

    /// Only valid for on-board positions, panics in debug mode otherwise.
    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, position: Position) -> Self {
        Self {
            bits: self.bits | bit(position),
        }
    }
}

impl std::ops::BitOr for PositionSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut bits = 0;
        for position in iter {
            bits |= bit(position);
        }
        Self { bits }
    }
}

impl IntoIterator for PositionSet {
    type Item = Position;

    type IntoIter = PositionSetIter;

    fn into_iter(self) -> Self::IntoIter {
        PositionSetIter { bits: self.bits }
    }
}

/// Iterator for a [`PositionSet`] that returns positions in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct PositionSetIter {
    bits: u64,
}

impl Iterator for PositionSetIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros() as i8;
            // Clear the flag corresponding to this cell
            self.bits ^= 1u64 << idx;
            Some(Position::new(idx / BOARD_SIZE, idx % BOARD_SIZE))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PositionSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for PositionSetIter {}
