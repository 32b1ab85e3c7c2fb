/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, Move, MoveList, PieceKind, Position, Square};

/// Deltas for the movement of the Queen.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (1, -2),
    (-1, -2),
];

/// Deltas for the movement of the King. Same directions as the Queen, but only one step.
const KING_DELTAS: [(i8, i8); 8] = QUEEN_DELTAS;

/// Files a Pawn captures towards, relative to its own.
const PAWN_CAPTURE_FILES: [i8; 2] = [1, -1];

impl Position {
    /// Generates every pseudo-legal move for the piece on `square`.
    ///
    /// Moves are generated as though it were that piece's turn: they respect blocking and never
    /// land on a friendly piece, but whose turn it actually is, and whether the mover's King is
    /// left capturable, are not considered. Returns an empty list if `square` is empty.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Position, Square};
    /// let pos = Position::new();
    /// assert_eq!(pos.moves_from(Square::G1).len(), 2);
    /// assert_eq!(pos.moves_from(Square::E2).len(), 2);
    /// assert!(pos.moves_from(Square::D1).is_empty());
    /// assert!(pos.moves_from(Square::E4).is_empty());
    /// ```
    pub fn moves_from(&self, square: Square) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves_from(square, &mut moves);
        moves
    }

    /// Appends every pseudo-legal move for the piece on `square` to `moves`.
    pub(crate) fn generate_moves_from(&self, square: Square, moves: &mut MoveList) {
        let Some(piece) = self.piece_at(square) else {
            return;
        };

        let color = piece.color();

        match piece.kind() {
            PieceKind::Pawn => self.generate_pawn_moves(square, color, moves),
            PieceKind::Knight => self.generate_leaper_moves(square, color, &KNIGHT_DELTAS, moves),
            PieceKind::Bishop => self.generate_slider_moves(square, color, &BISHOP_DELTAS, moves),
            PieceKind::Rook => self.generate_slider_moves(square, color, &ROOK_DELTAS, moves),
            PieceKind::Queen => self.generate_slider_moves(square, color, &QUEEN_DELTAS, moves),
            PieceKind::King => self.generate_leaper_moves(square, color, &KING_DELTAS, moves),
        }
    }

    /// Returns `true` if a piece of `color` may end its move on `to`: it is empty or holds an enemy.
    #[inline(always)]
    fn can_land_on(&self, to: Square, color: Color) -> bool {
        self.color_at(to) != Some(color)
    }

    /// Casts a ray from `from` along each of `deltas`.
    ///
    /// Each ray emits empty squares and keeps going, emits an enemy-occupied square and stops,
    /// and stops without emitting on a friendly piece or at the edge of the board.
    fn generate_slider_moves(
        &self,
        from: Square,
        color: Color,
        deltas: &[(i8, i8)],
        moves: &mut MoveList,
    ) {
        for &(df, dr) in deltas {
            let mut current = from;

            while let Some(to) = current.offset(df, dr) {
                match self.color_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(occupant) => {
                        if occupant != color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }

                current = to;
            }
        }
    }

    /// Tries a single jump from `from` along each of `deltas`. Nothing in between can block it.
    fn generate_leaper_moves(
        &self,
        from: Square,
        color: Color,
        deltas: &[(i8, i8)],
        moves: &mut MoveList,
    ) {
        for &(df, dr) in deltas {
            if let Some(to) = from.offset(df, dr) {
                if self.can_land_on(to, color) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    /// Pawns push onto empty squares only, and capture diagonally onto enemy pieces only.
    fn generate_pawn_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let forward = color.forward();

        if let Some(single) = from.advance(forward, 1) {
            if self.is_empty_at(single) {
                moves.push(Move::new(from, single));
            }

            if from.rank() == color.pawn_rank() {
                if let Some(double) = from.advance(forward, 2) {
                    if self.is_empty_at(single) && self.is_empty_at(double) {
                        moves.push(Move::new(from, double));
                    }
                }
            }
        }

        for df in PAWN_CAPTURE_FILES {
            if let Some(to) = from.offset(df, forward) {
                if self.color_at(to) == Some(color.opponent()) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destinations(fen: &str, square: Square) -> Vec<Square> {
        let pos = Position::from_fen(fen).unwrap();
        let mut targets = pos
            .moves_from(square)
            .into_iter()
            .map(|mv| {
                assert_eq!(mv.from(), square);
                mv.to()
            })
            .collect::<Vec<_>>();
        targets.sort();
        targets
    }

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    #[test]
    fn test_rook_on_open_board() {
        let moves = destinations("4k3/8/8/8/3R4/8/8/4K3", Square::D4);
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn test_rook_ray_stops_at_first_blocker() {
        // Enemy pawn on d6 is capturable, d7 and d8 behind it are not reachable.
        // Friendly pawn on f4 blocks, and is not a destination.
        let moves = destinations("4k3/8/3p4/8/3R1P2/8/8/4K3", Square::D4);
        assert!(moves.contains(&Square::D6));
        assert!(!moves.contains(&Square::D7));
        assert!(!moves.contains(&Square::D8));
        assert!(moves.contains(&Square::E4));
        assert!(!moves.contains(&Square::F4));
        assert!(!moves.contains(&Square::G4));
        assert_eq!(
            moves,
            sorted(vec![
                Square::D1,
                Square::D2,
                Square::D3,
                Square::D5,
                Square::D6,
                Square::A4,
                Square::B4,
                Square::C4,
                Square::E4,
            ])
        );
    }

    #[test]
    fn test_bishop_in_corner() {
        let moves = destinations("4k3/8/8/8/8/8/8/B3K3", Square::A1);
        assert_eq!(moves.len(), 7);
        assert!(moves.contains(&Square::H8));
    }

    #[test]
    fn test_bishop_blocked_by_own_pieces() {
        let pos = Position::new();
        assert!(pos.moves_from(Square::C1).is_empty());
        assert!(pos.moves_from(Square::F8).is_empty());
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let fen = "4k3/8/8/8/3Q4/8/8/4K3";
        assert_eq!(destinations(fen, Square::D4).len(), 27);
    }

    #[test]
    fn test_knight_in_corner_and_center() {
        assert_eq!(destinations("4k3/8/8/8/8/8/8/N3K3", Square::A1).len(), 2);
        assert_eq!(destinations("4k3/8/8/8/3N4/8/8/4K3", Square::D4).len(), 8);
    }

    #[test]
    fn test_knight_jumps_and_captures() {
        // Surrounded by friendly pawns, it still jumps; it can take the enemy on c6 but not its own pawn on e6.
        let moves = destinations("4k3/8/2p1P3/2PPP3/2PNP3/2PPP3/8/4K3", Square::D4);
        assert!(moves.contains(&Square::C6));
        assert!(!moves.contains(&Square::E6));
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn test_king_moves() {
        assert_eq!(destinations("4k3/8/8/8/3K4/8/8/8", Square::D4).len(), 8);
        assert_eq!(destinations("4k3/8/8/8/8/8/8/K7", Square::A1).len(), 3);
        // No castling
        assert_eq!(
            destinations("r3k2r/8/8/8/8/8/8/R3K2R", Square::E1),
            sorted(vec![Square::D1, Square::F1, Square::D2, Square::E2, Square::F2])
        );
    }

    #[test]
    fn test_pawn_double_push_from_start_rank() {
        assert_eq!(
            destinations("4k3/8/8/8/8/8/4P3/4K3", Square::E2),
            sorted(vec![Square::E3, Square::E4])
        );
        assert_eq!(
            destinations("4k3/4p3/8/8/8/8/8/4K3", Square::E7),
            sorted(vec![Square::E6, Square::E5])
        );
    }

    #[test]
    fn test_pawn_single_push_elsewhere() {
        assert_eq!(destinations("4k3/8/8/8/8/4P3/8/4K3", Square::E3), vec![Square::E4]);
        assert_eq!(destinations("4k3/8/4p3/8/8/8/8/4K3", Square::E6), vec![Square::E5]);
    }

    #[test]
    fn test_pawn_blocked() {
        // Blocked directly: no pushes at all
        assert!(destinations("4k3/8/8/8/8/4n3/4P3/4K3", Square::E2).is_empty());
        // Blocked on the double push square only
        assert_eq!(destinations("4k3/8/8/8/4n3/8/4P3/4K3", Square::E2), vec![Square::E3]);
    }

    #[test]
    fn test_pawn_captures_only_enemies() {
        let moves = destinations("4k3/8/8/8/8/3p1N2/4P3/4K3", Square::E2);
        assert_eq!(moves, sorted(vec![Square::E3, Square::E4, Square::D3]));
    }

    #[test]
    fn test_pawn_on_edge_file_captures_one_side() {
        let moves = destinations("4k3/8/8/8/8/1p6/P7/4K3", Square::A2);
        assert_eq!(moves, sorted(vec![Square::A3, Square::A4, Square::B3]));
    }

    #[test]
    fn test_pawn_on_last_rank_has_no_moves() {
        assert!(destinations("P3k3/8/8/8/8/8/8/4K3", Square::A8).is_empty());
    }

    #[test]
    fn test_generation_ignores_side_to_move() {
        // Black pieces get moves generated regardless of whose turn it is
        let pos = Position::new();
        assert_eq!(pos.moves_from(Square::B8).len(), 2);
    }
}
