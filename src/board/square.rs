/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// Represents a single cell on an `8x8` chess board.
///
/// Squares are numbered row-major from White's back rank, so `square = file + rank * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// A [`Square`] can only be constructed in bounds, so indexing a board with one never fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const A1: Self = Self::new(0, 0);
    pub const A2: Self = Self::new(0, 1);
    pub const A3: Self = Self::new(0, 2);
    pub const A4: Self = Self::new(0, 3);
    pub const A5: Self = Self::new(0, 4);
    pub const A6: Self = Self::new(0, 5);
    pub const A7: Self = Self::new(0, 6);
    pub const A8: Self = Self::new(0, 7);

    pub const B1: Self = Self::new(1, 0);
    pub const B2: Self = Self::new(1, 1);
    pub const B3: Self = Self::new(1, 2);
    pub const B4: Self = Self::new(1, 3);
    pub const B5: Self = Self::new(1, 4);
    pub const B6: Self = Self::new(1, 5);
    pub const B7: Self = Self::new(1, 6);
    pub const B8: Self = Self::new(1, 7);

    pub const C1: Self = Self::new(2, 0);
    pub const C2: Self = Self::new(2, 1);
    pub const C3: Self = Self::new(2, 2);
    pub const C4: Self = Self::new(2, 3);
    pub const C5: Self = Self::new(2, 4);
    pub const C6: Self = Self::new(2, 5);
    pub const C7: Self = Self::new(2, 6);
    pub const C8: Self = Self::new(2, 7);

    pub const D1: Self = Self::new(3, 0);
    pub const D2: Self = Self::new(3, 1);
    pub const D3: Self = Self::new(3, 2);
    pub const D4: Self = Self::new(3, 3);
    pub const D5: Self = Self::new(3, 4);
    pub const D6: Self = Self::new(3, 5);
    pub const D7: Self = Self::new(3, 6);
    pub const D8: Self = Self::new(3, 7);

    pub const E1: Self = Self::new(4, 0);
    pub const E2: Self = Self::new(4, 1);
    pub const E3: Self = Self::new(4, 2);
    pub const E4: Self = Self::new(4, 3);
    pub const E5: Self = Self::new(4, 4);
    pub const E6: Self = Self::new(4, 5);
    pub const E7: Self = Self::new(4, 6);
    pub const E8: Self = Self::new(4, 7);

    pub const F1: Self = Self::new(5, 0);
    pub const F2: Self = Self::new(5, 1);
    pub const F3: Self = Self::new(5, 2);
    pub const F4: Self = Self::new(5, 3);
    pub const F5: Self = Self::new(5, 4);
    pub const F6: Self = Self::new(5, 5);
    pub const F7: Self = Self::new(5, 6);
    pub const F8: Self = Self::new(5, 7);

    pub const G1: Self = Self::new(6, 0);
    pub const G2: Self = Self::new(6, 1);
    pub const G3: Self = Self::new(6, 2);
    pub const G4: Self = Self::new(6, 3);
    pub const G5: Self = Self::new(6, 4);
    pub const G6: Self = Self::new(6, 5);
    pub const G7: Self = Self::new(6, 6);
    pub const G8: Self = Self::new(6, 7);

    pub const H1: Self = Self::new(7, 0);
    pub const H2: Self = Self::new(7, 1);
    pub const H3: Self = Self::new(7, 2);
    pub const H4: Self = Self::new(7, 3);
    pub const H5: Self = Self::new(7, 4);
    pub const H6: Self = Self::new(7, 5);
    pub const H7: Self = Self::new(7, 6);
    pub const H8: Self = Self::new(7, 7);

    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Number of files (and ranks) on the board.
    pub const SIDE: u8 = 8;

    /// Creates a new [`Square`] from a file and rank, both in `0..8`.
    ///
    /// Out of range values are a logic error, caught only with debug assertions.
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < Self::SIDE && rank < Self::SIDE);
        Self(rank * Self::SIDE + file)
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use kingfall::Square;
    /// assert_eq!(Square::from_index(12).unwrap(), Square::E2);
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!("Invalid index for Square: Must be between [0,63]. Got {index}");
        }

        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    #[inline(always)]
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Returns an iterator over all squares, from A1 to H8.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index_unchecked)
    }

    /// Fetches the index (`0..64`) of this [`Square`], for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Fetches the file (x coordinate, `0..8`) of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use kingfall::Square;
    /// assert_eq!(Square::C4.file(), 2);
    /// ```
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 % Self::SIDE
    }

    /// Fetches the rank (y coordinate, `0..8`) of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use kingfall::Square;
    /// assert_eq!(Square::C4.rank(), 3);
    /// ```
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 / Self::SIDE
    }

    /// Offsets this [`Square`] by `file_delta` files and `rank_delta` ranks,
    /// returning `None` if the result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use kingfall::Square;
    /// assert_eq!(Square::B1.offset(1, 2), Some(Square::C3));
    /// assert_eq!(Square::B1.offset(-2, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;

        if file < 0 || file >= Self::SIDE as i8 || rank < 0 || rank >= Self::SIDE as i8 {
            return None;
        }

        Some(Self::new(file as u8, rank as u8))
    }

    /// Returns the square `n` ranks "ahead" of this one, relative to `forward` (`+1` or `-1`).
    #[inline(always)]
    pub const fn advance(&self, forward: i8, n: i8) -> Option<Self> {
        self.offset(0, forward * n)
    }

    /// Parses a [`Square`] from a file letter and a rank digit, like `"e2"`.
    ///
    /// # Example
    /// ```
    /// # use kingfall::Square;
    /// assert_eq!(Square::from_uci("a1").unwrap(), Square::A1);
    /// assert_eq!(Square::from_uci("h8").unwrap().index(), 63);
    /// assert!(Square::from_uci("i1").is_err());
    /// assert!(Square::from_uci("a9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();

        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square {square:?}: must be two characters, like \"e2\"");
        };

        if !('a'..='h').contains(&file) {
            bail!("Invalid file in Square {square:?}: must be between [a, h]. Got {file:?}");
        }

        if !('1'..='8').contains(&rank) {
            bail!("Invalid rank in Square {square:?}: must be between [1, 8]. Got {rank:?}");
        }

        Ok(Self::new(file as u8 - b'a', rank as u8 - b'1'))
    }

    /// Converts this [`Square`] into its file letter and rank digit.
    ///
    /// # Example
    /// ```
    /// # use kingfall::Square;
    /// assert_eq!(Square::E2.to_uci(), "e2");
    /// ```
    pub fn to_uci(&self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    /// Calls [`Square::to_uci`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_uci().fmt(f)
    }
}

impl fmt::Debug for Square {
    /// Calls [`Square::to_uci`] and also displays the internal index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}
