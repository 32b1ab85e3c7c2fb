/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::Color;

/// Piece placement of the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// A popular position for debugging move generation.
pub const FEN_KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";

/// Default depth at which to run the benchmark searches.
pub const BENCH_DEPTH: usize = 4;

/// Positions searched by the `bench` command, with the side to move in each.
pub const BENCHMARKS: [(&str, Color); 6] = [
    (FEN_STARTPOS, Color::White),
    (FEN_KIWIPETE, Color::White),
    ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R", Color::White),
    ("rnbqkb1r/pp3ppp/4pn2/2pp4/3P4/2PBPN2/PP3PPP/RNBQK2R", Color::Black),
    ("8/2k5/3p4/p2P1p2/P2P1P2/8/3K4/8", Color::White),
    ("6k1/5ppp/8/8/8/8/1q3PPP/3R2K1", Color::Black),
];
