/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, GameState};

/// A numerical representation of the evaluation of a position / move.
///
/// Scores are always from White's perspective: positive is good for White, negative is good for Black.
/// Ordinary evaluations lie strictly between [`Score::BLACK_WIN`] and [`Score::WHITE_WIN`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Score of a position in which Black's King has been captured.
    pub const WHITE_WIN: Self = Self(10_000);

    /// Score of a position in which White's King has been captured.
    pub const BLACK_WIN: Self = Self(-10_000);

    /// Score of an equal position.
    pub const DRAW: Self = Self(0);

    /// The score of a position that `color` has already won.
    #[inline(always)]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_WIN,
            Color::Black => Self::BLACK_WIN,
        }
    }

    /// The worst possible score for `color`, used to seed a search before any move is tried.
    #[inline(always)]
    pub const fn loss_for(color: Color) -> Self {
        Self::win_for(color.opponent())
    }

    /// The score of a finished game, or `None` if it is still being played.
    #[inline(always)]
    pub const fn terminal(state: GameState) -> Option<Self> {
        match state {
            GameState::Ongoing => None,
            GameState::WhiteWins => Some(Self::WHITE_WIN),
            GameState::BlackWins => Some(Self::BLACK_WIN),
        }
    }

    /// Returns `true` if `self` is strictly better than `other` for `color`.
    ///
    /// White prefers larger scores and Black prefers smaller ones.
    #[inline(always)]
    pub const fn is_better_for(&self, color: Color, other: Self) -> bool {
        match color {
            Color::White => self.0 > other.0,
            Color::Black => self.0 < other.0,
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl PartialEq<i32> for Score {
    fn eq(&self, other: &i32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<i32> for Score {
    fn partial_cmp(&self, other: &i32) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::WHITE_WIN => write!(f, "{} (White wins)", self.0),
            Self::BLACK_WIN => write!(f, "{} (Black wins)", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}
