/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Piece, PieceKind, Position, Score, Square, WeightTables};

/// Encapsulates the logic of scoring a chess position.
///
/// A high score is good for White, and a low score is good for Black.
/// Unlike a negamax engine, the score is never flipped to the side-to-move's perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    /// Positional bonuses, fixed for the lifetime of the evaluator.
    tables: WeightTables,
}

impl Evaluator {
    /// Construct a new [`Evaluator`] with the standard weight tables.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            tables: WeightTables::new(),
        }
    }

    /// Fetches the weight tables used by this evaluator.
    #[inline(always)]
    pub const fn tables(&self) -> &WeightTables {
        &self.tables
    }

    /// Evaluate `position` from White's perspective.
    ///
    /// If a King has been captured, this is [`Score::WHITE_WIN`] or [`Score::BLACK_WIN`].
    /// Otherwise, each piece adds its material value and positional bonus, for White, or subtracts them, for Black.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Evaluator, Position, Score};
    /// let evaluator = Evaluator::new();
    /// assert_eq!(evaluator.eval(&Position::new()), Score::DRAW);
    ///
    /// let no_black_king = Position::from_fen("8/8/8/8/8/8/8/4K3").unwrap();
    /// assert_eq!(evaluator.eval(&no_black_king), Score::WHITE_WIN);
    /// ```
    pub fn eval(&self, position: &Position) -> Score {
        if let Some(score) = Score::terminal(position.game_state()) {
            return score;
        }

        position
            .iter()
            .fold(Score::DRAW, |score, (square, piece)| {
                score + self.contribution(piece, square)
            })
    }

    /// The signed amount `piece` adds to the evaluation by standing on `square`.
    #[inline(always)]
    pub const fn contribution(&self, piece: Piece, square: Square) -> i32 {
        let value = value_of(piece.kind()) + self.tables.bonus(piece, square);
        value * piece.color().negation_multiplier()
    }

    /// Wraps `position` for printing a per-square breakdown of its evaluation.
    pub fn breakdown<'a>(&'a self, position: &'a Position) -> Breakdown<'a> {
        Breakdown {
            evaluator: self,
            position,
        }
    }
}

/// A printable table of how much each piece contributes to a position's evaluation.
///
/// Created by [`Evaluator::breakdown`].
#[derive(Debug, Clone, Copy)]
pub struct Breakdown<'a> {
    evaluator: &'a Evaluator,
    position: &'a Position,
}

impl Breakdown<'_> {
    fn write_separator(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  +")?;
        for _ in 0..Square::SIDE {
            write!(f, "-----+")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Breakdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_separator(f)?;

        for rank in (0..Square::SIDE).rev() {
            write!(f, "{} |", rank + 1)?;

            // Step 1: Write the piece char
            for file in 0..Square::SIDE {
                let piece = self.position.piece_at(Square::new(file, rank));
                let piece_char = piece.map(|p| p.to_uci()).unwrap_or(' ');
                write!(f, "  {piece_char}  |")?;
            }
            writeln!(f)?;
            write!(f, "  |")?;

            // Step 2: Write the contribution of that piece
            for file in 0..Square::SIDE {
                let square = Square::new(file, rank);
                let value = self
                    .position
                    .piece_at(square)
                    .map(|piece| format!("{:+}", self.evaluator.contribution(piece, square)))
                    .unwrap_or_default();
                write!(f, "{value:^5}|")?;
            }
            writeln!(f)?;

            Self::write_separator(f)?;
        }
        for file in 'a'..='h' {
            write!(f, "     {file}")?;
        }

        let state = self.position.game_state();
        let score = self.evaluator.eval(self.position);

        let winning_side = if let Some(winner) = state.winner() {
            Some(winner)
        } else if score > Score::DRAW {
            Some(Color::White)
        } else if score < Score::DRAW {
            Some(Color::Black)
        } else {
            None
        };

        writeln!(f, "\n\nGame: {state}")?;
        writeln!(
            f,
            "Winning side: {}",
            winning_side.map(|c| c.name()).unwrap_or("N/A")
        )?;
        write!(f, "Score: {score}")
    }
}

/// Returns the material value of the provided `PieceKind`.
///
/// The King is given a finite value here, but losing it ends the game regardless.
#[inline(always)]
pub const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 30,
        PieceKind::Rook => 50,
        PieceKind::Queen => 90,
        PieceKind::King => 150,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    #[test]
    fn test_startpos_is_balanced() {
        assert_eq!(Evaluator::new().eval(&Position::new()), Score::DRAW);
    }

    #[test]
    fn test_terminal_positions() {
        let evaluator = Evaluator::new();

        // Lots of White material, but White's King is gone
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/QQQQ4").unwrap();
        assert_eq!(evaluator.eval(&pos), Score::BLACK_WIN);

        let pos = Position::from_fen("rrrr4/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(evaluator.eval(&pos), Score::WHITE_WIN);

        assert_eq!(evaluator.eval(&Position::empty()), Score::BLACK_WIN);
    }

    #[test]
    fn test_two_kings() {
        // White King on an edge: 150 + 8. Black King in the center: 150 + 2.
        let pos = Position::from_fen("8/8/8/8/3k4/8/8/4K3").unwrap();
        assert_eq!(Evaluator::new().eval(&pos), Score(6));
    }

    #[test]
    fn test_mirrored_position_negates_score() {
        let evaluator = Evaluator::new();
        let white = Position::from_fen("4k3/8/8/8/3N4/8/4P3/4K3").unwrap();
        // Same layout rotated half a turn, colors swapped
        let black = Position::from_fen("3k4/3p4/8/4n3/8/8/8/3K4").unwrap();

        let score = evaluator.eval(&white);
        assert!(score > Score::DRAW);
        assert_eq!(evaluator.eval(&black), -score);
    }

    #[test]
    fn test_single_pawn_push() {
        let evaluator = Evaluator::new();
        let pos = Position::new().with_move_made(Move::new(Square::E2, Square::E4));
        // e2 is worth 6, e4 is worth 8
        assert_eq!(evaluator.eval(&pos), Score(2));
    }

    #[test]
    fn test_contribution_signs() {
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.contribution(Piece::WHITE_QUEEN, Square::D4), 98);
        assert_eq!(evaluator.contribution(Piece::BLACK_QUEEN, Square::D4), -98);
        assert_eq!(
            evaluator.contribution(Piece::new(Color::Black, PieceKind::King), Square::A8),
            -158
        );
    }

    #[test]
    fn test_breakdown_reports_score() {
        let evaluator = Evaluator::new();
        let pos = Position::new();
        let printed = evaluator.breakdown(&pos).to_string();
        assert!(printed.ends_with("Score: 0"));
        assert!(printed.contains("+158"));
    }
}
