//! Session module - one playthrough of a level
//!
//! The core engine exposes individual state transitions; this module strings
//! them together into player turns. A session owns the level plus the
//! per-game bookkeeping (score, remaining moves) and resolves a swap's full
//! cascade as an explicit loop - remove, fall, refill, repeat - returning
//! one record per wave so presentation layers can pace animations against
//! them.

use crunch_core::{Chain, Cookie, CookieColumn, Level, Swap};

/// Where the session stands after the latest turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Moves remain and the target has not been reached
    Playing,
    /// Target score reached
    Complete,
    /// Move budget exhausted short of the target
    OutOfMoves,
}

/// Why a proposed swap was not played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    /// The session is already over
    NotPlayable,
    /// The swap is not in the legal-swap set
    IllegalSwap,
}

impl SwapError {
    pub fn code(self) -> &'static str {
        match self {
            SwapError::NotPlayable => "not_playable",
            SwapError::IllegalSwap => "illegal_swap",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapError::NotPlayable => "session is not accepting moves",
            SwapError::IllegalSwap => "swap would not create a chain",
        }
    }
}

/// One wave of a cascade: what matched, what fell, what was spawned
#[derive(Debug, Clone)]
pub struct CascadeStep {
    /// Matched chains, horizontal before vertical, scores assigned
    pub chains: Vec<Chain>,
    /// Cookies that dropped, per column in hole-encounter order
    pub fallen: Vec<CookieColumn>,
    /// New cookies, per column from top to bottom
    pub spawned: Vec<CookieColumn>,
}

/// Everything that happened in one player turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Cascade waves in resolution order; empty only for a reshuffle turn
    pub steps: Vec<CascadeStep>,
    /// Points earned this turn across all waves
    pub score_delta: u32,
    /// Session status once the turn ended
    pub status: SessionStatus,
}

/// One playthrough: a level plus score and move bookkeeping
#[derive(Debug, Clone)]
pub struct GameSession {
    level: Level,
    score: u32,
    moves_left: u32,
    status: SessionStatus,
}

impl GameSession {
    /// Wrap a level in a fresh session
    ///
    /// Call [`GameSession::begin`] to deal the first board.
    pub fn new(level: Level) -> Self {
        let moves_left = level.maximum_moves();
        Self {
            level,
            score: 0,
            moves_left,
            status: SessionStatus::Playing,
        }
    }

    /// Start (or restart) the game: reset bookkeeping and deal a board
    ///
    /// Returns the newly created cookies for initial rendering.
    pub fn begin(&mut self) -> Vec<Cookie> {
        self.score = 0;
        self.moves_left = self.level.maximum_moves();
        self.status = SessionStatus::Playing;
        self.level.reset_combo_multiplier();
        self.level.shuffle()
    }

    /// The level this session plays
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Points accumulated so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Moves remaining in the budget
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Current session status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Play one turn: apply a legal swap and resolve its full cascade
    ///
    /// Illegal swaps are rejected without consuming a move. On success the
    /// turn runs to completion - every cascade wave resolved, scores
    /// accumulated, combo multiplier reset, legal swaps recomputed, and the
    /// move budget decremented - before the outcome is returned.
    pub fn play(&mut self, swap: &Swap) -> Result<TurnOutcome, SwapError> {
        if self.status != SessionStatus::Playing {
            return Err(SwapError::NotPlayable);
        }
        if !self.level.is_possible_swap(swap) {
            return Err(SwapError::IllegalSwap);
        }

        self.level.perform_swap(swap);

        let mut steps = Vec::new();
        let mut score_delta: u32 = 0;
        loop {
            let chains = self.level.remove_matches();
            if chains.is_empty() {
                break;
            }
            score_delta += chains.iter().map(|chain| chain.score).sum::<u32>();

            let fallen = self.level.fill_holes();
            let spawned = self.level.top_up_cookies();
            steps.push(CascadeStep {
                chains,
                fallen,
                spawned,
            });
        }

        self.score = self.score.saturating_add(score_delta);
        self.end_turn();

        Ok(TurnOutcome {
            steps,
            score_delta,
            status: self.status,
        })
    }

    /// Deal a new board at the cost of one move
    ///
    /// Mirrors the player-facing shuffle action: the board regenerates but
    /// the score stands, and the spent move can end the game.
    pub fn reshuffle(&mut self) -> Result<Vec<Cookie>, SwapError> {
        if self.status != SessionStatus::Playing {
            return Err(SwapError::NotPlayable);
        }
        let cookies = self.level.shuffle();
        self.spend_move();
        Ok(cookies)
    }

    /// Close out a turn: combo reset, swap recomputation, move spend
    fn end_turn(&mut self) {
        self.level.reset_combo_multiplier();
        self.level.detect_possible_swaps();
        self.spend_move();
    }

    fn spend_move(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
        // Reaching the target wins even on the last move
        if self.score >= self.level.target_score() {
            self.status = SessionStatus::Complete;
        } else if self.moves_left == 0 {
            self.status = SessionStatus::OutOfMoves;
        }
    }
}
