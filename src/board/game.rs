/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Color, Move, MoveList, Position, Square};

/// Whether a game is still being played, and who won if not.
///
/// A game ends only when a King has been captured. Checkmate, stalemate and draws are not detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Both Kings are on the board.
    Ongoing,

    /// Black's King has been captured.
    WhiteWins,

    /// White's King has been captured.
    BlackWins,
}

impl GameState {
    /// Creates the [`GameState`] in which `color` has won.
    #[inline(always)]
    pub const fn won_by(color: Color) -> Self {
        match color {
            Color::White => Self::WhiteWins,
            Color::Black => Self::BlackWins,
        }
    }

    /// Returns `true` if the game has ended.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    /// Fetches the winning [`Color`], if the game has ended.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Color> {
        match self {
            Self::Ongoing => None,
            Self::WhiteWins => Some(Color::White),
            Self::BlackWins => Some(Color::Black),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "{} wins", color.name()),
            None => write!(f, "ongoing"),
        }
    }
}

impl Position {
    /// Determines whether the game is over, by checking that both Kings are still on the board.
    ///
    /// White's King is checked first, so a board without any Kings counts as a win for Black.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{GameState, Position};
    /// assert_eq!(Position::new().game_state(), GameState::Ongoing);
    ///
    /// let no_black_king = Position::from_fen("8/8/8/8/8/8/8/4K3").unwrap();
    /// assert_eq!(no_black_king.game_state(), GameState::WhiteWins);
    /// ```
    pub fn game_state(&self) -> GameState {
        let mut kings = [false; Color::COUNT];
        for (_, piece) in self.iter().filter(|(_, piece)| piece.is_king()) {
            kings[piece.color()] = true;
        }

        // White first, so a board without any Kings is Black's
        for color in Color::all() {
            if !kings[color] {
                return GameState::won_by(color.opponent());
            }
        }

        GameState::Ongoing
    }

    /// Returns `true` if either King has been captured.
    #[inline(always)]
    pub fn is_game_over(&self) -> bool {
        self.game_state().is_over()
    }

    /// Returns `true` if `side` may play `mv` in this position.
    ///
    /// The piece on `mv.from()` must belong to `side`, and `mv.to()` must be one of its
    /// pseudo-legal destinations. Moves that leave `side`'s King capturable are legal.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Color, Move, Position, Square};
    /// let pos = Position::new();
    /// let e4 = Move::new(Square::E2, Square::E4);
    /// assert!(pos.is_legal(e4, Color::White));
    /// assert!(!pos.is_legal(e4, Color::Black));
    /// ```
    pub fn is_legal(&self, mv: Move, side: Color) -> bool {
        if self.color_at(mv.from()) != Some(side) {
            return false;
        }

        self.moves_from(mv.from()).contains(&mv)
    }

    /// Index-based version of [`Position::is_legal`].
    ///
    /// Any malformed pair, such as indices outside `[0, 63]` or `start == end`, is simply illegal.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Color, Position};
    /// let pos = Position::new();
    /// assert!(pos.is_legal_move(12, 28, Color::White));
    /// assert!(!pos.is_legal_move(12, 12, Color::White));
    /// assert!(!pos.is_legal_move(12, 99, Color::White));
    /// ```
    pub fn is_legal_move(&self, start: usize, end: usize, side: Color) -> bool {
        Move::from_indices(start, end).is_some_and(|mv| self.is_legal(mv, side))
    }

    /// Generates all moves `side` may play in this position.
    ///
    /// Squares are scanned from A1 to H8, and each piece's moves are appended in generation order.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Color, Position};
    /// assert_eq!(Position::new().legal_moves(Color::White).len(), 20);
    /// assert_eq!(Position::new().legal_moves(Color::Black).len(), 20);
    /// ```
    pub fn legal_moves(&self, side: Color) -> MoveList {
        let mut moves = MoveList::new();

        for (square, _) in self.pieces(side) {
            self.generate_moves_from(square, &mut moves);
        }

        moves
    }

    /// Generates the moves `side` may play with the piece on `square`.
    ///
    /// Empty if `square` is empty or holds a piece of the other color.
    pub fn legal_moves_from(&self, square: Square, side: Color) -> MoveList {
        if self.color_at(square) != Some(side) {
            return MoveList::new();
        }

        self.moves_from(square)
    }
}
