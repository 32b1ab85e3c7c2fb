/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use anyhow::{bail, Context, Result};

use crate::{
    perft, splitperft, Cli, Color, EngineCommand, Move, Piece, Position, SearchConfig,
    SearchResult, Searcher, Square, BENCHMARKS, BENCH_DEPTH,
};

/// The Kingfall chess engine.
///
/// Holds a position and the side to move in it, and executes [`EngineCommand`]s against them.
#[derive(Debug)]
pub struct Engine {
    /// The current state of the chess board, as known to the engine.
    position: Position,

    /// Whose turn it is in `position`.
    side: Color,

    /// Runs searches, and keeps count of the nodes they visit.
    searcher: Searcher,
}

impl Engine {
    /// Constructs a new [`Engine`] on the starting position, with White to move.
    pub fn new(searcher: Searcher) -> Self {
        Self {
            position: Position::new(),
            side: Color::White,
            searcher,
        }
    }

    /// Constructs an [`Engine`] from the global command-line options.
    ///
    /// Sets up the `--fen` position (or the starting position) with `--turn` to move, then plays every `--moves` entry.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let searcher = Searcher::with_config(&SearchConfig {
            threads: cli.threads,
        })?;

        let mut engine = Self::new(searcher);
        engine.set_position(cli.fen.unwrap_or_default(), cli.turn);

        for (i, &mv) in cli.moves.iter().enumerate() {
            engine
                .play(mv)
                .with_context(|| format!("Failed to apply move #{} of {:?}", i + 1, cli.moves))?;
        }

        Ok(engine)
    }

    /// The current position.
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The side to move in the current position.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side
    }

    /// Replaces the current position and side to move.
    pub fn set_position(&mut self, position: Position, side: Color) {
        self.position = position;
        self.side = side;
    }

    /// Plays `mv` for the side to move, then passes the turn.
    ///
    /// Fails, leaving the position unchanged, if the game is already over or `mv` is not legal.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        let state = self.position.game_state();
        if state.is_over() {
            bail!("Cannot play {mv}: the game is over ({state})");
        }

        if !self.position.is_legal(mv, self.side) {
            bail!("Illegal move {mv} for {} in {}", self.side.name(), self.position.to_fen());
        }

        self.position.make_move(mv);
        self.side = self.side.opponent();

        Ok(())
    }

    /// Execute a single [`EngineCommand`].
    pub fn execute(&mut self, command: EngineCommand) -> Result<()> {
        match command {
            EngineCommand::Bench { pretty, depth } => self.bench(depth, pretty)?,

            EngineCommand::Display => self.display(),

            EngineCommand::Eval { pretty } => self.eval(pretty),

            EngineCommand::Fen => println!("{} {}", self.position.to_fen(), self.side),

            EngineCommand::Moves { square, sort } => self.moves(square, sort),

            EngineCommand::Perft { depth } => self.perft::<false>(depth),

            EngineCommand::Psqt { piece, square } => self.psqt(piece, square),

            EngineCommand::Search { depth } => {
                self.search(depth);
            }

            EngineCommand::Splitperft { depth } => self.perft::<true>(depth),
        }

        Ok(())
    }

    /// Execute the `bench` command, running a fixed-depth search on a series of positions and displaying the results.
    fn bench(&mut self, depth: Option<usize>, pretty: bool) -> Result<()> {
        let depth = depth.unwrap_or(BENCH_DEPTH);
        let num_tests = BENCHMARKS.len();

        // Discard nodes from any earlier searches
        self.searcher.take_nodes();
        let starttime = Instant::now();

        for (i, (fen, side)) in BENCHMARKS.into_iter().enumerate() {
            println!("Benchmark position {}/{}: {fen} {side}", i + 1, num_tests);

            let position = Position::from_fen(fen)
                .with_context(|| format!("Failed to parse benchmark position {fen:?}"))?;
            self.set_position(position, side);
            self.search(depth);
        }

        // Compute results
        let nodes = self.searcher.take_nodes();
        let elapsed = starttime.elapsed();
        let nps = (nodes as f32 / elapsed.as_secs_f32()) as u64;
        let m_nps = nodes as f32 / elapsed.as_secs_f32() / 1_000_000.0;
        let ms = elapsed.as_millis();

        if pretty {
            println!();
            println!("+--- Benchmark Complete ---+");
            println!("| depth      : {depth:<12}|");
            println!("| threads    : {:<12}|", self.searcher.threads());
            println!("| time (ms)  : {ms:<12}|");
            println!("| nodes      : {nodes:<12}|");
            println!("| nps        : {nps:<12}|");
            println!("| Mnps       : {m_nps:<12.2}|");
            println!("+--------------------------+");
        } else {
            println!("{nodes} nodes {nps} nps");
        }

        // Re-set the internal game state.
        self.set_position(Position::new(), Color::White);

        Ok(())
    }

    /// Executes the `display` command, printing the current position.
    fn display(&self) {
        println!("{}", self.position);
        println!("\n{} to move", self.side.name());
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self, pretty: bool) {
        let evaluator = self.searcher.evaluator();
        if pretty {
            println!("{}", evaluator.breakdown(&self.position));
        } else {
            println!("{}", evaluator.eval(&self.position));
        }
    }

    /// Executes the `moves` command, listing the legal moves of the side to move.
    fn moves(&self, square: Option<Square>, sort: bool) {
        let mut moves = if let Some(square) = square {
            self.position.legal_moves_from(square, self.side)
        } else {
            self.position.legal_moves(self.side)
        };

        if sort {
            moves.sort_by_key(|mv| mv.to_uci());
        }

        // If there are none, print "(none)"
        let moves_string = if moves.is_empty() {
            String::from("(none)")
        } else {
            moves
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{moves_string}");
    }

    /// Executes the `perft` and `splitperft` commands, printing node counts and speed.
    fn perft<const SPLIT: bool>(&self, depth: usize) {
        let now = Instant::now();
        let nodes = if SPLIT {
            splitperft(&self.position, self.side, depth)
        } else {
            perft(&self.position, self.side, depth)
        };
        let elapsed = now.elapsed();

        let nps = nodes as f32 / elapsed.as_secs_f32();
        let m_nps = nps / 1_000_000.0;

        if SPLIT {
            println!();
        }
        println!("{nodes} nodes in {elapsed:?} ({m_nps:.2} Mnps)");
    }

    /// Executes the `psqt` command, printing one square or the whole table for `piece`.
    fn psqt(&self, piece: Piece, square: Option<Square>) {
        let tables = self.searcher.evaluator().tables();

        if let Some(square) = square {
            println!("{}", tables.bonus(piece, square));
        } else {
            println!("{}", tables.table_for(piece));
        }
    }

    /// Searches the current position to `depth`, printing `info` and `bestmove` lines.
    fn search(&self, depth: usize) -> SearchResult {
        let starttime = Instant::now();
        let res = self.searcher.search(&self.position, depth, self.side);
        let elapsed = starttime.elapsed();

        let nps = (res.nodes as f32 / elapsed.as_secs_f32()) as u64;
        let pv = res.bestmove.map(|mv| format!(" pv {mv}")).unwrap_or_default();
        println!(
            "info depth {depth} score {} nodes {} nps {nps} time {}{pv}",
            res.score,
            res.nodes,
            elapsed.as_millis()
        );

        if res.is_forced_loss(self.side) {
            println!("info string {} cannot avoid losing its King", self.side.name());
        }

        match res.bestmove {
            Some(mv) => println!("bestmove {mv}"),
            None => println!("bestmove 0000"),
        }

        res
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Searcher::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn engine(args: &[&str]) -> Result<Engine> {
        let cli = Cli::try_parse_from(args.iter().copied())?;
        Engine::from_cli(&cli)
    }

    #[test]
    fn test_default_engine_is_startpos() {
        let engine = engine(&["kingfall", "display"]).unwrap();
        assert_eq!(*engine.position(), Position::new());
        assert_eq!(engine.side_to_move(), Color::White);
    }

    #[test]
    fn test_moves_alternate_sides() {
        let engine = engine(&["kingfall", "--moves", "e2e4,e7e5,g1f3", "fen"]).unwrap();
        assert_eq!(
            engine.position().to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
        );
        assert_eq!(engine.side_to_move(), Color::Black);
    }

    #[test]
    fn test_illegal_move_is_an_error() {
        // Black may not move first from the default turn
        assert!(engine(&["kingfall", "--moves", "e7e5", "display"]).is_err());
        // Unreachable destination
        assert!(engine(&["kingfall", "--moves", "e2e5", "display"]).is_err());
        // Black may, if told it's Black's turn
        assert!(engine(&["kingfall", "--turn", "b", "--moves", "e7e5", "display"]).is_ok());
    }

    #[test]
    fn test_play_after_game_over_fails() {
        let mut engine = Engine::new(Searcher::new());
        engine.set_position(
            Position::from_fen("k7/8/8/8/8/8/8/R3K3").unwrap(),
            Color::White,
        );

        engine.play(Move::new(Square::A1, Square::A8)).unwrap();
        assert!(engine.position().is_game_over());
        assert!(engine.play(Move::new(Square::E1, Square::E2)).is_err());
    }

    #[test]
    fn test_failed_play_leaves_position_unchanged() {
        let mut engine = Engine::new(Searcher::new());
        assert!(engine.play(Move::new(Square::E2, Square::E5)).is_err());
        assert_eq!(*engine.position(), Position::new());
        assert_eq!(engine.side_to_move(), Color::White);
    }

    #[test]
    fn test_search_uses_side_to_move() {
        let engine = engine(&["kingfall", "--turn", "black", "search", "1"]).unwrap();
        let res = engine.search(1);
        let bestmove = res.bestmove.unwrap();
        assert_eq!(engine.position().color_at(bestmove.from()), Some(Color::Black));
    }

    #[test]
    fn test_execute_commands() {
        let mut engine = engine(&["kingfall", "--threads", "2", "display"]).unwrap();
        engine.execute(EngineCommand::Display).unwrap();
        engine.execute(EngineCommand::Eval { pretty: true }).unwrap();
        engine
            .execute(EngineCommand::Moves {
                square: Some(Square::G1),
                sort: true,
            })
            .unwrap();
        engine.execute(EngineCommand::Perft { depth: 2 }).unwrap();
        engine.execute(EngineCommand::Splitperft { depth: 2 }).unwrap();
        engine
            .execute(EngineCommand::Psqt {
                piece: Piece::BLACK_PAWN,
                square: None,
            })
            .unwrap();
        engine.execute(EngineCommand::Search { depth: 2 }).unwrap();
        assert_eq!(engine.searcher.nodes(), 421);
    }
}
