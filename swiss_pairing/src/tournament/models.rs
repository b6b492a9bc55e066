//! Tournament data models: players, matches, rounds and placings.

use serde::{Deserialize, Serialize};

use crate::tiebreak::TieBreaker;

use super::config::RetryPolicy;

/// Player ID type, dense `0..n` in roster order
pub type PlayerId = usize;

/// Match score, player 1's component first
pub type Score = [i64; 2];

/// Points awarded to the winner of an auto-resolved match
pub const AUTO_WIN_POINTS: i64 = 3;

/// One round of pairings, every active player appears in exactly one match
pub type Round = Vec<Match>;

/// Tournament participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player<T> {
    /// Stable player id
    pub id: PlayerId,
    /// Participant payload, `None` marks the synthetic bye player
    pub data: Option<T>,
}

impl<T> Player<T> {
    /// Whether this is the synthetic bye player
    pub fn is_bye(&self) -> bool {
        self.data.is_none()
    }
}

/// Which side of a match a player sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    P1,
    P2,
}

/// Result of a scored match from one player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// A pairing between two players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Player 1 id
    pub p1: PlayerId,
    /// Player 2 id
    pub p2: PlayerId,
    /// Submitted score, `None` while the match is pending
    pub score: Option<Score>,
    /// Result assigned without play (bye or drop)
    #[serde(default)]
    pub auto_win: bool,
}

impl Match {
    /// Create a pending match
    pub fn new(p1: PlayerId, p2: PlayerId) -> Self {
        Self {
            p1,
            p2,
            score: None,
            auto_win: false,
        }
    }

    /// Create a scored match
    pub fn scored(p1: PlayerId, p2: PlayerId, score: Score, auto_win: bool) -> Self {
        Self {
            p1,
            p2,
            score: Some(score),
            auto_win,
        }
    }

    /// Whether a score has been submitted
    pub fn is_submitted(&self) -> bool {
        self.score.is_some()
    }

    /// Whether the player takes part in this match
    pub fn involves(&self, player: PlayerId) -> bool {
        self.p1 == player || self.p2 == player
    }

    /// The side the player occupies
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.p1 == player {
            Some(Side::P1)
        } else if self.p2 == player {
            Some(Side::P2)
        } else {
            None
        }
    }

    /// The other player in this match
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.side_of(player).map(|side| match side {
            Side::P1 => self.p2,
            Side::P2 => self.p1,
        })
    }

    /// The player's own score component and the opponent's
    pub fn score_for(&self, player: PlayerId) -> Option<(i64, i64)> {
        let [s1, s2] = self.score?;
        self.side_of(player).map(|side| match side {
            Side::P1 => (s1, s2),
            Side::P2 => (s2, s1),
        })
    }

    /// Win, loss or draw for the player, `None` while pending
    pub fn outcome_for(&self, player: PlayerId) -> Option<Outcome> {
        let (own, other) = self.score_for(player)?;
        Some(match own.cmp(&other) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}

/// Matchmaker input element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingEntry<T> {
    /// Player id
    pub id: PlayerId,
    /// Participant payload, never inspected by the matchmaker
    pub data: Option<T>,
    /// Points accumulated so far
    pub points: i64,
    /// Opponents faced so far, one entry per round
    pub history: Vec<PlayerId>,
    /// Dropped players (and the bye) are paired among themselves
    pub dropped: bool,
}

/// Final ranking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placing<T> {
    /// Player id
    pub id: PlayerId,
    /// Participant payload, returned unmodified
    pub data: Option<T>,
    /// Total points earned during the tournament
    pub points: i64,
    /// Tie-break scores in configured order
    pub tie_break_scores: Vec<i64>,
}

/// Tournament state
///
/// Append-only on `rounds` and on the last `drops` entry. Operations take
/// `&self` and return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament<T> {
    /// Roster including the bye player, if any
    pub players: Vec<Player<T>>,
    /// Rounds played so far, the last one is the current round
    pub rounds: Vec<Round>,
    /// Players dropped during each round, parallel to `rounds`
    pub drops: Vec<Vec<PlayerId>>,
    /// Tie-break cascade, most significant first
    pub tie_breakers: Vec<TieBreaker>,
    /// Matchmaker retry behaviour
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}
