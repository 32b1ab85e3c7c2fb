/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{Color, Evaluator, Move, Position, Score};

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Number of nodes searched, including the root.
    pub nodes: u64,

    /// Best move found during the search.
    ///
    /// `None` if the position was a leaf, or if no move improved on a loss for the side to move.
    pub bestmove: Option<Move>,

    /// Evaluation of the position after `bestmove` is made, from White's perspective.
    pub score: Score,
}

impl SearchResult {
    /// A leaf node, scored statically.
    #[inline(always)]
    const fn leaf(score: Score) -> Self {
        Self {
            nodes: 1,
            bestmove: None,
            score,
        }
    }

    /// The starting point for `side`'s search at an interior node: a loss, with no move to play.
    #[inline(always)]
    const fn seed(side: Color) -> Self {
        Self {
            nodes: 1,
            bestmove: None,
            score: Score::loss_for(side),
        }
    }

    /// Returns `true` if `side`, the side to move at the root, has no move that avoids losing its King.
    ///
    /// A root that `side` has already won, or a depth-0 search, also has no `bestmove`, but is not a loss.
    #[inline(always)]
    pub const fn is_forced_loss(&self, side: Color) -> bool {
        self.bestmove.is_none() && self.score.0 == Score::loss_for(side).0
    }
}

/// Configuration variables for constructing a [`Searcher`].
///
/// Depth is not part of the configuration: every call to [`Searcher::search`] supplies its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of worker threads to search with.
    ///
    /// If `None`, rayon's global thread pool is used.
    pub threads: Option<usize>,
}

impl SearchConfig {
    /// A configuration that searches on a dedicated pool of `threads` workers.
    #[inline(always)]
    pub const fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
        }
    }
}

/// Executes fixed-depth minimax searches, fanning out across sibling moves in parallel.
///
/// White is the maximizing side and Black is the minimizing side.
/// There is no pruning, so every node up to the requested depth is visited.
#[derive(Debug, Default)]
pub struct Searcher {
    /// Scores the leaves of the search tree.
    evaluator: Evaluator,

    /// Running total of nodes visited by every search since the last [`Searcher::take_nodes`].
    nodes: AtomicU64,

    /// Dedicated workers, if a thread count was configured.
    pool: Option<rayon::ThreadPool>,
}

impl Searcher {
    /// Constructs a new [`Searcher`] that runs on rayon's global thread pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new [`Searcher`] according to `config`, building a thread pool if one was requested.
    pub fn with_config(config: &SearchConfig) -> Result<Self> {
        let pool = config
            .threads
            .map(|threads| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .with_context(|| format!("Failed to build a search pool of {threads} threads"))
            })
            .transpose()?;

        Ok(Self {
            pool,
            ..Default::default()
        })
    }

    /// The evaluator used to score leaves.
    #[inline(always)]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Number of worker threads this searcher fans out across.
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    /// Search `position` to `depth` plies with `side` to move.
    ///
    /// The caller's position is never modified; every move is tried on a copy.
    ///
    /// # Example
    /// ```
    /// # use kingfall::{Color, Position, Searcher};
    /// let searcher = Searcher::new();
    /// let pos = Position::new();
    ///
    /// let res = searcher.search(&pos, 1, Color::White);
    /// let bestmove = res.bestmove.unwrap();
    /// assert!(pos.is_legal(bestmove, Color::White));
    /// assert_eq!(res.nodes, 21);
    /// ```
    pub fn search(&self, position: &Position, depth: usize, side: Color) -> SearchResult {
        let res = match &self.pool {
            Some(pool) => pool.install(|| self.minimax(position, depth, side)),
            None => self.minimax(position, depth, side),
        };

        self.nodes.fetch_add(res.nodes, Ordering::Relaxed);

        res
    }

    /// Total nodes visited by searches since construction or the last call to [`Searcher::take_nodes`].
    #[inline(always)]
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Returns the running node total and resets it to zero.
    #[inline(always)]
    pub fn take_nodes(&self) -> u64 {
        self.nodes.swap(0, Ordering::Relaxed)
    }

    /// Recursive minimax.
    ///
    /// Children are searched in parallel and collected in generation order, then folded sequentially,
    /// so the chosen move among equal scores is always the first one generated.
    fn minimax(&self, position: &Position, depth: usize, side: Color) -> SearchResult {
        if depth == 0 || position.is_game_over() {
            return SearchResult::leaf(self.evaluator.eval(position));
        }

        let moves = position.legal_moves(side);

        let children = moves
            .as_slice()
            .par_iter()
            .map(|&mv| {
                let child = position.with_move_made(mv);
                (mv, self.minimax(&child, depth - 1, side.opponent()))
            })
            .collect::<Vec<_>>();

        children
            .into_iter()
            .fold(SearchResult::seed(side), |mut best, (mv, child)| {
                best.nodes += child.nodes;

                if child.score.is_better_for(side, best.score) {
                    best.score = child.score;
                    best.bestmove = Some(mv);
                }

                best
            })
    }
}
