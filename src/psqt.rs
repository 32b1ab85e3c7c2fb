/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Piece, PieceKind, Square};

/// Bonus for a White Pawn on each square. Pawns are worth more as they near the center and advance.
#[rustfmt::skip]
const WHITE_PAWN: Psqt = Psqt([
    1, 2,  4,  5,  5,  4, 2, 1,
    2, 3,  5,  6,  6,  5, 3, 2,
    2, 3,  6,  7,  7,  6, 3, 2,
    3, 4,  7,  8,  8,  7, 4, 3,
    3, 4,  8,  9,  9,  8, 4, 3,
    4, 5,  9, 10, 10,  9, 5, 4,
    4, 5, 10, 11, 11, 10, 5, 4,
    5, 6, 11, 12, 12, 11, 6, 5,
]);

/// Bonus for a Black Pawn on each square; White's table turned around.
const BLACK_PAWN: Psqt = WHITE_PAWN.reversed();

/// Bonus for Knights, Bishops, Rooks, and Queens, which are stronger in the center.
const CENTER: Psqt = Psqt::from_rings([2, 4, 6, 8]);

/// Bonus for Kings, which are safer near the edges.
const EDGE: Psqt = Psqt::from_rings([8, 6, 4, 2]);

/// A [Piece-Square Table](https://www.chessprogramming.org/Piece-Square_Tables) for use in evaluation.
///
/// Written from White's perspective: index `0` is A1, index `63` is H8.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Psqt([i32; Square::COUNT]);

impl Psqt {
    /// Builds a table whose value depends only on how many rings in from the edge a square is.
    ///
    /// `rings[0]` is the outermost ring, `rings[3]` is the central 2x2.
    const fn from_rings(rings: [i32; 4]) -> Self {
        let mut table = [0; Square::COUNT];

        let mut i = 0;
        while i < Square::COUNT {
            let square = Square::from_index_unchecked(i);
            let (file, rank) = (square.file(), square.rank());

            let mut ring = file;
            if rank < ring {
                ring = rank;
            }
            if 7 - file < ring {
                ring = 7 - file;
            }
            if 7 - rank < ring {
                ring = 7 - rank;
            }

            table[i] = rings[ring as usize];
            i += 1;
        }

        Self(table)
    }

    /// Returns a copy of this table rotated half a turn, so A1 reads what H8 did.
    const fn reversed(&self) -> Self {
        let mut table = [0; Square::COUNT];

        let mut i = 0;
        while i < Square::COUNT {
            table[i] = self.0[Square::COUNT - 1 - i];
            i += 1;
        }

        Self(table)
    }

    /// Get the value of this PSQT at the provided square.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> i32 {
        self.0[square.index()]
    }
}

impl fmt::Display for Psqt {
    /// Printing a [`Psqt`] displays it with rank 8 on top, the way a board is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{}| ", rank + 1)?;
            for file in 0..8 {
                let value = self.get(Square::new(file, rank));
                write!(f, "{value:3} ")?;
            }
            writeln!(f)?;
        }

        write!(f, " +{}\n    ", "----".repeat(8))?;
        for file in 'a'..='h' {
            write!(f, "{file}   ")?;
        }

        Ok(())
    }
}

/// The positional bonus tables consulted by the [`crate::Evaluator`].
///
/// These are fixed at construction and never modified.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WeightTables {
    /// Shared by Knights, Bishops, Rooks, and Queens.
    pieces: Psqt,

    /// Kings only.
    king: Psqt,

    /// Pawns, one table per color.
    pawns: [Psqt; Color::COUNT],
}

impl WeightTables {
    /// The standard tables.
    pub const fn new() -> Self {
        Self {
            pieces: CENTER,
            king: EDGE,
            pawns: [WHITE_PAWN, BLACK_PAWN],
        }
    }

    /// Fetches the table that applies to `piece`.
    #[inline(always)]
    pub const fn table_for(&self, piece: Piece) -> &Psqt {
        match piece.kind() {
            PieceKind::Pawn => &self.pawns[piece.color().index()],
            PieceKind::King => &self.king,
            _ => &self.pieces,
        }
    }

    /// Positional bonus for `piece` standing on `square`. Always positive, regardless of color.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Piece, Square, WeightTables};
    /// let tables = WeightTables::new();
    /// assert_eq!(tables.bonus(Piece::WHITE_KNIGHT, Square::D4), 8);
    /// assert_eq!(tables.bonus(Piece::WHITE_KING, Square::D4), 2);
    /// assert_eq!(tables.bonus(Piece::BLACK_PAWN, Square::H8), 1);
    /// ```
    #[inline(always)]
    pub const fn bonus(&self, piece: Piece, square: Square) -> i32 {
        self.table_for(piece).get(square)
    }
}

impl Default for WeightTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_tables_mirror_each_other() {
        let tables = WeightTables::new();
        for square in Square::iter() {
            let mirrored = Square::from_index(63 - square.index()).unwrap();
            assert_eq!(
                tables.bonus(Piece::WHITE_PAWN, square),
                tables.bonus(Piece::BLACK_PAWN, mirrored),
                "pawn bonus mismatch on {square}"
            );
        }
    }

    #[test]
    fn test_center_and_edge_rings() {
        let tables = WeightTables::new();

        // Outer ring, second ring, third ring, center
        let squares = [Square::A1, Square::B2, Square::C3, Square::D4];
        let expected_pieces = [2, 4, 6, 8];
        let expected_kings = [8, 6, 4, 2];

        for (i, square) in squares.into_iter().enumerate() {
            assert_eq!(tables.bonus(Piece::BLACK_ROOK, square), expected_pieces[i]);
            assert_eq!(tables.bonus(Piece::WHITE_QUEEN, square), expected_pieces[i]);
            assert_eq!(tables.bonus(Piece::BLACK_KING, square), expected_kings[i]);
        }

        assert_eq!(tables.bonus(Piece::WHITE_BISHOP, Square::H5), 2);
        assert_eq!(tables.bonus(Piece::WHITE_BISHOP, Square::G5), 4);
        assert_eq!(tables.bonus(Piece::WHITE_BISHOP, Square::E5), 8);
    }

    #[test]
    fn test_pawn_bonus_grows_as_pawns_advance() {
        let tables = WeightTables::new();
        assert!(
            tables.bonus(Piece::WHITE_PAWN, Square::E7) > tables.bonus(Piece::WHITE_PAWN, Square::E2)
        );
        assert!(
            tables.bonus(Piece::BLACK_PAWN, Square::E2) > tables.bonus(Piece::BLACK_PAWN, Square::E7)
        );
        assert_eq!(tables.bonus(Piece::WHITE_PAWN, Square::E2), 6);
        assert_eq!(tables.bonus(Piece::BLACK_PAWN, Square::E7), 6);
    }
}
