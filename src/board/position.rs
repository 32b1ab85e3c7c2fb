/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index, str::FromStr};

use anyhow::{bail, Context, Result};

use super::{Color, Move, Piece, PieceKind, Square};

/// Most pieces a single side can have on the board.
pub const MAX_PIECES_PER_SIDE: usize = 16;

/// Back rank layout of the standard starting position, from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The contents of all 64 cells of a chess board.
///
/// Cells are indexed by [`Square`]. A cell is either empty (`None`) or holds a [`Piece`].
///
/// This type is `Copy`: the search copies a [`Position`] for every move it makes,
/// so speculative moves never touch the caller's board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Position {
    /// Creates a [`Position`] with the standard starting layout.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Position, Piece, Square};
    /// let pos = Position::new();
    /// assert_eq!(pos.piece_at(Square::E1), Some(Piece::WHITE_KING));
    /// assert_eq!(pos.piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
    /// assert_eq!(pos.piece_at(Square::E4), None);
    /// ```
    pub const fn new() -> Self {
        let mut mailbox = [None; Square::COUNT];

        let mut file = 0;
        while file < 8 {
            let kind = BACK_RANK[file];
            mailbox[file] = Some(Piece::new(Color::White, kind));
            mailbox[8 + file] = Some(Piece::WHITE_PAWN);
            mailbox[48 + file] = Some(Piece::BLACK_PAWN);
            mailbox[56 + file] = Some(Piece::new(Color::Black, kind));
            file += 1;
        }

        Self { mailbox }
    }

    /// Creates a [`Position`] with no pieces on it.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
        }
    }

    /// Constructs a [`Position`] from the piece placement field of a FEN string.
    ///
    /// Anything after the first space (side to move, castling, etc.) is ignored.
    /// Uppercase letters are White pieces, lowercase letters are Black pieces.
    ///
    /// The placement is rejected if either side has more than one King or more than
    /// [`MAX_PIECES_PER_SIDE`] pieces.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Position, Piece, Square};
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
    /// assert_eq!(pos.piece_at(Square::E2), Some(Piece::WHITE_PAWN));
    /// assert_eq!(pos.piece_at(Square::E8), Some(Piece::BLACK_KING));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut position = Self::empty();

        let placements = fen.split_ascii_whitespace().next().unwrap_or_default();

        if placements.split('/').count() != 8 {
            bail!("FEN must have piece placements for all 8 ranks. Got {placements:?}");
        }

        // Ranks are listed from the eighth down to the first
        for (rank, row) in placements.split('/').rev().enumerate() {
            let mut file = 0;

            for piece_char in row.chars() {
                if let Some(empty) = piece_char.to_digit(10) {
                    if empty == 0 {
                        bail!("FEN placements cannot skip 0 squares (rank {})", rank + 1);
                    }
                    file += empty as usize;
                    continue;
                }

                let piece = Piece::from_uci(piece_char).with_context(|| {
                    format!("FEN placements must contain piece chars or digits. Got {piece_char:?}")
                })?;

                if file >= 8 {
                    bail!("Too many squares on rank {} of FEN {placements:?}", rank + 1);
                }

                position.place(piece, Square::new(file as u8, rank as u8));
                file += 1;
            }

            if file != 8 {
                bail!(
                    "Rank {} of FEN {placements:?} covers {file} squares instead of 8",
                    rank + 1
                );
            }
        }

        for color in Color::all() {
            let pieces = position.pieces(color).count();
            if pieces > MAX_PIECES_PER_SIDE {
                bail!(
                    "{} has {pieces} pieces, but at most {MAX_PIECES_PER_SIDE} are allowed",
                    color.name()
                );
            }

            let kings = position
                .pieces(color)
                .filter(|(_, piece)| piece.is_king())
                .count();
            if kings > 1 {
                bail!("{} has {kings} kings, but at most 1 is allowed", color.name());
            }
        }

        Ok(position)
    }

    /// Generates the piece placement field of a FEN string for this [`Position`].
    ///
    /// # Example
    /// ```
    /// # use kingfall::Position;
    /// assert_eq!(Position::new().to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    /// ```
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(71);

        for rank in (0..8).rev() {
            let mut empty = 0;

            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty != 0 {
                            fen += &empty.to_string();
                            empty = 0;
                        }
                        fen.push(piece.to_uci());
                    }
                    None => empty += 1,
                }
            }

            if empty != 0 {
                fen += &empty.to_string();
            }

            if rank != 0 {
                fen.push('/');
            }
        }

        fen
    }

    /// Fetches the [`Piece`] on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece on `square`, or `None` if the cell is empty.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Color, Position, Square};
    /// let pos = Position::new();
    /// assert_eq!(pos.color_at(Square::A2), Some(Color::White));
    /// assert_eq!(pos.color_at(Square::A7), Some(Color::Black));
    /// assert_eq!(pos.color_at(Square::A4), None);
    /// ```
    #[inline(always)]
    pub const fn color_at(&self, square: Square) -> Option<Color> {
        match self.mailbox[square.index()] {
            Some(piece) => Some(piece.color()),
            None => None,
        }
    }

    /// Fetches the [`PieceKind`] of the piece on `square`, or `None` if the cell is empty.
    #[inline(always)]
    pub const fn kind_at(&self, square: Square) -> Option<PieceKind> {
        match self.mailbox[square.index()] {
            Some(piece) => Some(piece.kind()),
            None => None,
        }
    }

    /// Returns `true` if there is no piece on `square`.
    #[inline(always)]
    pub const fn is_empty_at(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_none()
    }

    /// Places `piece` on `square`, replacing anything already there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square.index()] = Some(piece);
    }

    /// Removes and returns whatever is on `square`.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()].take()
    }

    /// Returns an iterator over every occupied square and its piece, from A1 to H8.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Returns an iterator over every square occupied by `color`, and its piece.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color() == color)
    }

    /// Fetches the square of `color`'s King, if it is still on the board.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::iter().find(|&square| self.piece_at(square) == Some(king))
    }

    /// Returns `true` if `color` still has a King on the board.
    #[inline(always)]
    pub fn has_king(&self, color: Color) -> bool {
        self.king_square(color).is_some()
    }

    /// Applies `mv` to this position.
    ///
    /// Whatever occupies `mv.from()` (including nothing) overwrites `mv.to()`, and `mv.from()`
    /// is left empty. No legality checking is performed: gate calls to this with
    /// [`Position::is_legal`].
    ///
    /// A Pawn that lands on the farthest rank for its color becomes a Queen of the same color.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Move, Piece, Position, Square};
    /// let mut pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3").unwrap();
    /// pos.make_move(Move::new(Square::A7, Square::A8));
    /// assert_eq!(pos.piece_at(Square::A8), Some(Piece::WHITE_QUEEN));
    /// assert_eq!(pos.piece_at(Square::A7), None);
    /// ```
    pub fn make_move(&mut self, mv: Move) {
        let piece = self.take(mv.from()).map(|piece| {
            if piece.is_pawn() && mv.to().rank() == piece.color().promotion_rank() {
                piece.promoted(PieceKind::Queen)
            } else {
                piece
            }
        });

        self.mailbox[mv.to().index()] = piece;
    }

    /// Copies this position and applies `mv` to the copy, leaving `self` untouched.
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }
}

impl Default for Position {
    /// The standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index.index()]
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Wrapper for [`Position::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for rank in (0..8).rev() {
            board += &format!("{}| ", rank + 1);

            for file in 0..8 {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.to_uci())
                    .unwrap_or('.');

                board.push(occupant);
                board.push(' ');
            }

            board += "\n";
        }
        board += " +";
        board += &"--".repeat(8);
        board += "\n   ";
        for file in 'a'..='h' {
            board.push(file);
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({:?})", self.to_fen())
    }
}
