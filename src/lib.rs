/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and game-state detection.
mod board;

/// Command-line interface of the engine.
mod cli;

/// Code related to the engine's functionality, such as command handling.
mod engine;

/// Evaluation of chess positions.
mod eval;

/// Piece-Square tables.
mod psqt;

/// Scores of positions.
mod score;

/// Main engine logic; all search related code.
mod search;

/// Misc utility constants.
mod utils;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use eval::*;
pub use psqt::*;
pub use score::*;
pub use search::*;
pub use utils::*;
