/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::Square;

/// Upper bound on the number of pseudo-legal moves available to one side.
///
/// A side never has more than 16 pieces, and no piece has more than the 27 destinations
/// of a Queen in the center of an open board.
pub const MAX_NUM_MOVES: usize = 16 * 27;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A move of whatever occupies `from` onto `to`.
///
/// Moves carry no flags: captures are implied by the destination's occupant, and
/// promotion is decided when the move is made.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`.
    ///
    /// `from` and `to` must differ.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        debug_assert!(from.index() != to.index(), "A move must change squares");
        Self { from, to }
    }

    /// Creates a new [`Move`] from a pair of cell indices.
    ///
    /// Returns `None` if either index is outside `[0, 63]`, or if both indices are equal.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Move, Square};
    /// assert_eq!(Move::from_indices(12, 28), Some(Move::new(Square::E2, Square::E4)));
    /// assert_eq!(Move::from_indices(12, 12), None);
    /// assert_eq!(Move::from_indices(12, 64), None);
    /// ```
    #[inline(always)]
    pub fn from_indices(from: usize, to: usize) -> Option<Self> {
        if from == to {
            return None;
        }

        let from = Square::from_index(from).ok()?;
        let to = Square::from_index(to).ok()?;
        Some(Self::new(from, to))
    }

    /// Fetches the [`Square`] this move starts on.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the [`Square`] this move ends on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Parses a [`Move`] from its two squares written back to back, like `"e2e4"`.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Move, Square};
    /// let mv = Move::from_uci("g1f3").unwrap();
    /// assert_eq!(mv, Move::new(Square::G1, Square::F3));
    /// assert!(Move::from_uci("g1g1").is_err());
    /// ```
    pub fn from_uci(mv: &str) -> Result<Self> {
        if mv.len() != 4 || !mv.is_ascii() {
            bail!("Invalid move {mv:?}: must be two squares, like \"e2e4\"");
        }

        let from = Square::from_uci(&mv[0..2]).context("Invalid start square")?;
        let to = Square::from_uci(&mv[2..4]).context("Invalid end square")?;

        if from == to {
            bail!("Invalid move {mv:?}: start and end squares are the same");
        }

        Ok(Self::new(from, to))
    }

    /// Converts this [`Move`] into its two squares written back to back.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    /// Wrapper for [`Move::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self, self.from.index(), self.to.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_squares() {
        let mv = Move::new(Square::G1, Square::F3);
        assert_eq!(mv.from(), Square::G1);
        assert_eq!(mv.to(), Square::F3);
        assert_eq!(mv.to_string(), "g1f3");
        assert_eq!("g1f3".parse::<Move>().unwrap(), mv);
    }

    #[test]
    fn test_same_square_is_rejected() {
        assert!(Move::from_uci("e2e2").is_err());
        assert_eq!(Move::from_indices(12, 12), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "A move must change squares")]
    fn test_new_same_square_panics_in_debug() {
        Move::new(Square::E2, Square::E2);
    }
}
