//! Depth-limited minimax, alpha-beta and quiescence search over any two-player game
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! All three searches walk a single mutable game state, applying a move before each recursive
//! call and reverting it straight after, before any cutoff is taken. Scores are always from the
//! maximizing side's point of view: max nodes and min nodes alternate rather than negating.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::ops;
use std::cmp::{max, min};
use log::{debug, trace};
use chess::{Color, Move, Position};
use crate::config::{Algorithm, SearchConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Score of a position from the maximizing side's point of view
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(i16);

impl Score {
    /// Bound greater than any score a search can return
    pub const INFINITY: Score = Score(10_000);
    /// Score for the maximizing side delivering mate on the spot
    pub const MATE: Score = Score(9_000);
    /// Score for a drawn position
    pub const DRAW: Score = Score(0);

    /// Largest score a static evaluation may report, kept clear of the mate scores
    pub const MAX_STATIC: Score = Score(Score::MATE_BOUND - 1);

    // scores beyond this are mates
    const MATE_BOUND: i16 = 8_000;

    /// Returns the score for checkmating in `n` plies
    pub fn mates_in(n: usize) -> Self {
        Score::MATE - n as i16
    }

    /// Returns the score for being checkmated in `n` plies
    pub fn mated_in(n: usize) -> Self {
        -Score::MATE + n as i16
    }

    /// Returns `true` if the score announces a forced mate for either side
    pub fn is_mate(self) -> bool {
        self.0.abs() > Score::MATE_BOUND && self.0.abs() <= Score::MATE.0
    }

    /// Limits a static score to `±MAX_STATIC` so it can never be read as a mate
    pub fn clamp_static(self) -> Score {
        Score(self.0.max(-Score::MAX_STATIC.0).min(Score::MAX_STATIC.0))
    }

    /// Returns the number of plies to mate, if the score announces one
    pub fn plies_to_mate(self) -> Option<usize> {
        if self.is_mate() {
            Some((Score::MATE.0 - self.0.abs()) as usize)
        } else {
            None
        }
    }

    /// Pulls a mate score found `ply` plies below the root toward zero, so faster mates score
    /// higher and slower mates against us score higher still
    fn at_ply(self, ply: usize) -> Score {
        if self.0 > Score::MATE_BOUND {
            self - ply as i16
        } else if self.0 < -Score::MATE_BOUND {
            self + ply as i16
        } else {
            self
        }
    }
}

impl ops::Neg for Score {
    type Output = Score;

    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl ops::Add<i16> for Score {
    type Output = Score;

    fn add(self, rhs: i16) -> Self {
        Score(self.0 + rhs)
    }
}

impl ops::Sub<i16> for Score {
    type Output = Score;

    fn sub(self, rhs: i16) -> Self {
        Score(self.0 - rhs)
    }
}

impl From<i16> for Score {
    fn from(val: i16) -> Self {
        Score(val)
    }
}

impl From<Score> for i16 {
    fn from(val: Score) -> Self {
        val.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plies_to_mate() {
            Some(n) if self.0 > 0 => write!(f, "#{}", n),
            Some(n) => write!(f, "#-{}", n),
            None => write!(f, "{}", self.0),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A two-player zero-sum game position which can be searched
///
/// Moves are applied and reverted in strict last in, first out order.
pub trait GameState {
    /// A move in the game
    type Move: Copy + fmt::Debug + fmt::Display;

    /// Returns the legal moves for the side to move
    fn legal_moves(&mut self) -> Vec<Self::Move>;

    /// Applies one of the moves returned by [`legal_moves`](#tymethod.legal_moves)
    fn apply(&mut self, mv: Self::Move);

    /// Reverts the last move applied
    fn revert(&mut self);

    /// Returns `true` if the game is over
    fn is_terminal(&mut self) -> bool;

    /// Returns `true` if the side to move is the maximizing side
    fn maximizing(&self) -> bool;

    /// Returns `true` if the position can be judged by its static score
    fn is_quiet(&self) -> bool;

    /// Returns `true` if `mv` cannot change the static score by much, such as a move which
    /// neither captures nor promotes
    fn is_quiet_move(&self, mv: Self::Move) -> bool;
}

/// Scores a game state from the maximizing side's point of view
///
/// A finished game where the maximizing side has delivered mate scores [`Score::MATE`], and one
/// where it has been mated scores `-Score::MATE`.
///
/// [`Score::MATE`]: struct.Score.html#associatedconstant.MATE
pub trait Evaluator<G: GameState + ?Sized> {
    /// Returns the static score of `state`
    fn evaluate(&self, state: &G) -> Score;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// What a search found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Score of the root position
    pub score: Score,
    /// Best move from the root, or `None` if the root was not searched past
    pub best_move: Option<M>,
    /// Number of nodes visited, counting the root
    pub nodes: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Minimax,
    AlphaBeta,
    Quiescence(usize),
}

/// A depth-limited searcher
///
/// ```rust
/// use chess::Position;
/// use stockpig::{Material, Search};
///
/// let mut pos: Position = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse().expect("valid fen");
/// let result = Search::new().alpha_beta(&mut pos, &Material, 2);
/// assert_eq!(result.best_move.map(|mv| mv.to_string()), Some("a1a8".to_owned()));
/// assert!(result.score.is_mate());
/// ```
#[derive(Debug, Default)]
pub struct Search {
    nodes: u64,
}

impl Search {
    /// Creates a new searcher
    pub fn new() -> Search {
        Search { nodes: 0 }
    }

    /// Returns the number of nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Runs the search selected by `config`
    pub fn run<G, E>(&mut self, config: &SearchConfig, state: &mut G, eval: &E)
    -> SearchResult<G::Move>
    where G: GameState, E: Evaluator<G> {
        match config.algorithm {
            Algorithm::Minimax => self.minimax(state, eval, config.depth),
            Algorithm::AlphaBeta => self.alpha_beta(state, eval, config.depth),
            Algorithm::Quiescence => {
                self.quiescence(state, eval, config.depth, config.quiescence_depth)
            }
        }
    }

    /// Searches every move to `depth` plies
    pub fn minimax<G, E>(&mut self, state: &mut G, eval: &E, depth: usize) -> SearchResult<G::Move>
    where G: GameState, E: Evaluator<G> {
        self.root(state, eval, depth, Mode::Minimax)
    }

    /// Searches to `depth` plies, skipping moves which cannot affect the result
    ///
    /// Returns the same score as [`minimax`](#method.minimax) while visiting fewer nodes.
    pub fn alpha_beta<G, E>(&mut self, state: &mut G, eval: &E, depth: usize)
    -> SearchResult<G::Move>
    where G: GameState, E: Evaluator<G> {
        self.root(state, eval, depth, Mode::AlphaBeta)
    }

    /// Searches like [`alpha_beta`](#method.alpha_beta), then keeps searching the moves which are
    /// not quiet for up to `quiescence_depth` more plies
    pub fn quiescence<G, E>(&mut self,
        state: &mut G, eval: &E,
        depth: usize, quiescence_depth: usize)
    -> SearchResult<G::Move>
    where G: GameState, E: Evaluator<G> {
        self.root(state, eval, depth, Mode::Quiescence(quiescence_depth))
    }

    fn root<G, E>(&mut self, state: &mut G, eval: &E, depth: usize, mode: Mode)
    -> SearchResult<G::Move>
    where G: GameState, E: Evaluator<G> {
        self.nodes = 0;

        if depth == 0 {
            let score = match mode {
                Mode::Quiescence(q) => {
                    self.quiesce(state, eval, q, 0, -Score::INFINITY, Score::INFINITY)
                }
                _ => {
                    self.nodes += 1;
                    leaf(state, eval, 0)
                }
            };
            return SearchResult { score, best_move: None, nodes: self.nodes };
        }

        self.nodes += 1;
        if state.is_terminal() {
            let score = leaf(state, eval, 0);
            return SearchResult { score, best_move: None, nodes: self.nodes };
        }

        let maximizing = state.maximizing();
        let mut alpha = -Score::INFINITY;
        let mut beta = Score::INFINITY;
        let mut best = if maximizing { -Score::INFINITY } else { Score::INFINITY };
        let mut best_move = None;

        for mv in state.legal_moves() {
            state.apply(mv);
            let score = match mode {
                Mode::Minimax => self.minimax_node(state, eval, depth - 1, 1),
                Mode::AlphaBeta => {
                    self.alpha_beta_node(state, eval, depth - 1, 1, alpha, beta, None)
                }
                Mode::Quiescence(q) => {
                    self.alpha_beta_node(state, eval, depth - 1, 1, alpha, beta, Some(q))
                }
            };
            state.revert();
            trace!("{:?} {}: {}", mode, mv, score);

            let better = if maximizing { score > best } else { score < best };
            if better || best_move.is_none() {
                best = score;
                best_move = Some(mv);
            }
            if maximizing {
                alpha = max(alpha, best);
            } else {
                beta = min(beta, best);
            }
        }

        debug!("{:?} depth {}: best {:?} score {} nodes {}",
            mode, depth, best_move.map(|mv| mv.to_string()), best, self.nodes);

        SearchResult { score: best, best_move, nodes: self.nodes }
    }

    fn minimax_node<G, E>(&mut self, state: &mut G, eval: &E, depth: usize, ply: usize) -> Score
    where G: GameState, E: Evaluator<G> {
        self.nodes += 1;

        if depth == 0 || state.is_terminal() {
            return leaf(state, eval, ply);
        }

        let maximizing = state.maximizing();
        let mut best = if maximizing { -Score::INFINITY } else { Score::INFINITY };

        for mv in state.legal_moves() {
            state.apply(mv);
            let score = self.minimax_node(state, eval, depth - 1, ply + 1);
            state.revert();

            best = if maximizing { max(best, score) } else { min(best, score) };
        }

        best
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta_node<G, E>(&mut self,
        state: &mut G, eval: &E,
        depth: usize, ply: usize,
        mut alpha: Score, mut beta: Score,
        quiescence: Option<usize>)
    -> Score
    where G: GameState, E: Evaluator<G> {
        if depth == 0 {
            if let Some(q) = quiescence {
                return self.quiesce(state, eval, q, ply, alpha, beta);
            }
        }

        self.nodes += 1;

        if depth == 0 || state.is_terminal() {
            return leaf(state, eval, ply);
        }

        let maximizing = state.maximizing();
        let mut best = if maximizing { -Score::INFINITY } else { Score::INFINITY };

        for mv in state.legal_moves() {
            state.apply(mv);
            let score =
                self.alpha_beta_node(state, eval, depth - 1, ply + 1, alpha, beta, quiescence);
            state.revert();

            if maximizing {
                best = max(best, score);
                if best >= beta {
                    break;
                }
                alpha = max(alpha, best);
            } else {
                best = min(best, score);
                if best <= alpha {
                    break;
                }
                beta = min(beta, best);
            }
        }

        best
    }

    /// From a quiet position only moves which are not quiet are searched, and either side may
    /// instead settle for the static score. Otherwise every move is searched.
    fn quiesce<G, E>(&mut self,
        state: &mut G, eval: &E,
        depth: usize, ply: usize,
        mut alpha: Score, mut beta: Score)
    -> Score
    where G: GameState, E: Evaluator<G> {
        self.nodes += 1;

        if depth == 0 || state.is_terminal() {
            return leaf(state, eval, ply);
        }

        let maximizing = state.maximizing();
        let moves = state.legal_moves();

        let (mut best, moves) = if state.is_quiet() {
            let stand_pat = leaf(state, eval, ply);
            let noisy: Vec<_> = moves.into_iter().filter(|&mv| !state.is_quiet_move(mv)).collect();

            if noisy.is_empty() {
                return stand_pat;
            }
            if maximizing {
                if stand_pat >= beta {
                    return stand_pat;
                }
                alpha = max(alpha, stand_pat);
            } else {
                if stand_pat <= alpha {
                    return stand_pat;
                }
                beta = min(beta, stand_pat);
            }

            (stand_pat, noisy)
        } else {
            (if maximizing { -Score::INFINITY } else { Score::INFINITY }, moves)
        };

        for mv in moves {
            state.apply(mv);
            let score = self.quiesce(state, eval, depth - 1, ply + 1, alpha, beta);
            state.revert();

            if maximizing {
                best = max(best, score);
                if best >= beta {
                    break;
                }
                alpha = max(alpha, best);
            } else {
                best = min(best, score);
                if best <= alpha {
                    break;
                }
                beta = min(beta, best);
            }
        }

        best
    }
}

fn leaf<G, E>(state: &G, eval: &E, ply: usize) -> Score
where G: GameState, E: Evaluator<G> {
    eval.evaluate(state).at_ply(ply)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Chess
//
// White maximizes. A position in check is never quiet, so quiescence searches every evasion.

impl GameState for Position {
    type Move = Move;

    fn legal_moves(&mut self) -> Vec<Move> {
        self.current_moves().to_vec()
    }

    fn apply(&mut self, mv: Move) {
        self.make_move(mv);
    }

    fn revert(&mut self) {
        self.unmake_move();
    }

    fn is_terminal(&mut self) -> bool {
        // nothing is generated once the game is over for any reason
        self.current_moves().is_empty()
    }

    fn maximizing(&self) -> bool {
        self.turn() == Color::White
    }

    fn is_quiet(&self) -> bool {
        !self.is_check()
    }

    fn is_quiet_move(&self, mv: Move) -> bool {
        mv.is_quiet()
    }
}
