/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Game termination and turn-aware legality.
mod game;

/// Pseudo-legal move generation for each kind of piece.
mod movegen;

/// The [`Move`] type and move lists.
mod moves;

/// Move-path enumeration, for validating move generation.
mod perft;

/// Colors, piece kinds, and pieces.
mod piece;

/// The 64-cell board.
mod position;

/// Squares and coordinate notation.
mod square;

pub use game::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
