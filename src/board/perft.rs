/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, Position};

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// Positions in which a King has been captured are not expanded further, and count as a single node.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use kingfall::{perft, Color, Position};
/// assert_eq!(perft(&Position::new(), Color::White, 2), 400);
/// ```
#[inline(always)]
pub fn perft(position: &Position, side: Color, depth: usize) -> u64 {
    perft_generic::<true, false>(position, side, depth)
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable after each
/// move available at the root node.
#[inline(always)]
pub fn splitperft(position: &Position, side: Color, depth: usize) -> u64 {
    perft_generic::<true, true>(position, side, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(
    position: &Position,
    side: Color,
    depth: usize,
) -> u64 {
    // Recursion limit, or a captured King; return 1, since we're fathoming this node.
    if depth == 0 || position.is_game_over() {
        return 1;
    }

    let moves = position.legal_moves(side);

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return moves.len() as u64;
    }

    // Recursively accumulate the nodes from the remaining depths
    moves.into_iter().fold(0, |nodes, mv| {
        let new_nodes =
            perft_generic::<BULK, false>(&position.with_move_made(mv), side.opponent(), depth - 1);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitperft_matches_perft() {
        let pos = Position::from_fen("k7/8/8/8/8/8/8/R3K3").unwrap();
        for depth in 1..=3 {
            assert_eq!(
                splitperft(&pos, Color::White, depth),
                perft(&pos, Color::White, depth)
            );
        }
        assert_eq!(splitperft(&Position::new(), Color::White, 2), 400);
    }

    #[test]
    fn test_bulk_matches_unbulked() {
        let pos = Position::new();
        for depth in 0..=3 {
            assert_eq!(
                perft_generic::<true, false>(&pos, Color::White, depth),
                perft_generic::<false, false>(&pos, Color::White, depth),
            );
        }
    }

    #[test]
    fn test_terminal_position_is_a_leaf() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/R3K3").unwrap();
        assert_eq!(perft(&pos, Color::White, 3), 1);
    }
}
