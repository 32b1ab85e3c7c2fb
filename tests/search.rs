/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use kingfall::{
    Color, Evaluator, GameState, Move, Piece, Position, Score, SearchConfig, Searcher, Square,
    BENCHMARKS,
};

#[test]
fn test_depth_zero_matches_evaluation() {
    let searcher = Searcher::new();
    let evaluator = Evaluator::new();

    for (fen, side) in BENCHMARKS {
        let pos = Position::from_fen(fen).unwrap();
        let res = searcher.search(&pos, 0, side);
        assert_eq!(res.score, evaluator.eval(&pos), "depth 0 on {fen}");
        assert_eq!(res.bestmove, None);
    }
}

#[test]
fn test_startpos_depth_one_plays_an_opening_move() {
    let pos = Position::new();
    let res = Searcher::new().search(&pos, 1, Color::White);

    let bestmove = res.bestmove.unwrap();
    assert!(pos.legal_moves(Color::White).contains(&bestmove));
    assert_eq!(res.score, Evaluator::new().eval(&pos.with_move_made(bestmove)));
}

#[test]
fn test_search_is_deterministic() {
    let searcher = Searcher::new();
    let pooled = Searcher::with_config(&SearchConfig::with_threads(3)).unwrap();

    for (fen, side) in BENCHMARKS.into_iter().take(3) {
        let pos = Position::from_fen(fen).unwrap();
        let first = searcher.search(&pos, 2, side);
        assert_eq!(first, searcher.search(&pos, 2, side), "repeat on {fen}");
        assert_eq!(first, pooled.search(&pos, 2, side), "pooled on {fen}");
    }
}

#[test]
fn test_black_takes_a_hanging_king() {
    // The Black Queen can take the White King along the first rank
    let pos = Position::from_fen("6k1/8/8/8/8/8/8/q3K3").unwrap();
    let res = Searcher::new().search(&pos, 2, Color::Black);

    assert_eq!(res.bestmove, Some(Move::new(Square::A1, Square::E1)));
    assert_eq!(res.score, Score::BLACK_WIN);

    let after = pos.with_move_made(res.bestmove.unwrap());
    assert_eq!(after.game_state(), GameState::BlackWins);
}

#[test]
fn test_white_avoids_losing_its_queen() {
    // The Black Rook attacks the White Queen; every safe Queen move keeps a large lead
    let pos = Position::from_fen("4k3/8/8/8/3r4/8/3Q4/4K3").unwrap();
    let res = Searcher::new().search(&pos, 2, Color::White);
    let bestmove = res.bestmove.unwrap();

    // Capturing the undefended Rook is the best outcome after Black's reply
    assert_eq!(bestmove, Move::new(Square::D2, Square::D4));
    assert!(res.score > Score::DRAW);
}

#[test]
fn test_promotion_through_search() {
    let pos = Position::from_fen("7k/4P3/8/8/8/8/8/K7").unwrap();
    let res = Searcher::new().search(&pos, 1, Color::White);

    assert_eq!(res.bestmove, Some(Move::new(Square::E7, Square::E8)));
    let after = pos.with_move_made(Move::new(Square::E7, Square::E8));
    assert_eq!(after.piece_at(Square::E8), Some(Piece::WHITE_QUEEN));
}

#[test]
fn test_running_node_total() {
    let searcher = Searcher::new();
    let pos = Position::new();

    let a = searcher.search(&pos, 1, Color::White).nodes;
    let b = searcher.search(&pos, 1, Color::Black).nodes;
    assert_eq!(searcher.nodes(), a + b);
    assert_eq!(searcher.take_nodes(), a + b);
    assert_eq!(searcher.nodes(), 0);
}
