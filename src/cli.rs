/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{Parser, Subcommand};

use crate::{Color, Move, Piece, Position, Square};

/// Command-line interface of the engine.
///
/// The global options set up a position, and the subcommand decides what to do with it.
#[derive(Debug, Clone, Parser)]
#[command(version, about, rename_all = "lower")]
pub struct Cli {
    /// Piece placement to start from, as the first field of a FEN string.
    ///
    /// Defaults to the standard starting position.
    #[arg(short, long, global = true)]
    pub fen: Option<Position>,

    /// Side to move in the starting position.
    #[arg(short, long, global = true, default_value = "white")]
    pub turn: Color,

    /// Comma-separated moves to play from the starting position, such as `e2e4,e7e5`.
    ///
    /// Sides alternate, beginning with `--turn`, and every move must be legal.
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub moves: Vec<Move>,

    /// Number of threads to search with. Defaults to one per logical core.
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: EngineCommand,
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
#[command(rename_all = "lower")]
pub enum EngineCommand {
    /// Run a benchmark with the provided parameters.
    Bench {
        /// If set, the benchmarking results will be printed in a well-formatted table.
        #[arg(short, long, default_value = "false")]
        pretty: bool,

        /// Override the default benchmark depth.
        #[arg(short, long, required = false)]
        depth: Option<usize>,
    },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position.
    Eval {
        /// If set, the contribution of every piece will be printed as well.
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },

    /// Generate and print the piece placement of the current position.
    Fen,

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be sorted in alphabetical order.
        ///
        /// By default, moves are listed in generation order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Outputs the Piece-Square table value for the provided piece at the provided square.
    ///
    /// If no square was provided, the entire table will be printed.
    #[command(aliases = ["psq", "pst"])]
    Psqt {
        /// The piece whose Piece-Square table value(s) to fetch.
        piece: Piece,

        /// Evaluate `piece` at `square`.
        square: Option<Square>,
    },

    /// Search the current position to the supplied depth and print the best move.
    #[command(alias = "go")]
    Search { depth: usize },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kingfall", "display"]).unwrap();
        assert_eq!(cli.fen, None);
        assert_eq!(cli.turn, Color::White);
        assert!(cli.moves.is_empty());
        assert_eq!(cli.threads, None);
        assert_eq!(cli.command, EngineCommand::Display);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "kingfall",
            "search",
            "3",
            "--turn",
            "black",
            "--moves",
            "e7e5,g1f3",
            "--threads",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.command, EngineCommand::Search { depth: 3 });
        assert_eq!(cli.turn, Color::Black);
        assert_eq!(
            cli.moves,
            vec![
                Move::new(Square::E7, Square::E5),
                Move::new(Square::G1, Square::F3)
            ]
        );
        assert_eq!(cli.threads, Some(2));
    }

    #[test]
    fn test_fen_and_psqt_arguments() {
        let cli =
            Cli::try_parse_from(["kingfall", "--fen", "4k3/8/8/8/8/8/8/4K3", "psqt", "N", "d4"])
                .unwrap();

        assert_eq!(cli.fen, Some(Position::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap()));
        assert_eq!(
            cli.command,
            EngineCommand::Psqt {
                piece: Piece::WHITE_KNIGHT,
                square: Some(Square::D4)
            }
        );
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["kingfall", "--fen", "8/8/8", "display"]).is_err());
        assert!(Cli::try_parse_from(["kingfall", "--moves", "e2e2", "display"]).is_err());
        assert!(Cli::try_parse_from(["kingfall", "moves", "z9"]).is_err());
        assert!(Cli::try_parse_from(["kingfall", "search"]).is_err());
    }
}
