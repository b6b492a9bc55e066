//! # Swiss Pairing
//!
//! Swiss-style tournament pairings, round accounting and tie-break placings.
//!
//! The library is a set of pure transitions over a [`Tournament`] value:
//! every operation borrows the current state and returns a new one, so the
//! caller decides where snapshots live.
//!
//! ## Architecture
//!
//! - **Round accounting** ([`rounds`]): points, opponent history and
//!   round status derived from the recorded matches
//! - **Matchmaker** ([`matchmaker`]): pairs players of equal standing who
//!   have not met yet, restarting from scratch on a dead end
//! - **Tie-break engine** ([`tiebreak`]): cumulative, average win rate,
//!   average opponent win rate, Solkoff and modified mean scores
//! - **Orchestrator** ([`tournament`]): create, submit scores, advance,
//!   drop players, check completion, compute placings
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::Tournament;
//!
//! let tournament = Tournament::new(vec!["Mike", "John", "Paul", "George"]).unwrap();
//! let tournament = tournament.submit_scores(&[(0, 2, 1), (1, 0, 2)]).unwrap();
//! let tournament = tournament.compute_next_round().unwrap();
//! assert_eq!(tournament.round_count(), 2);
//! ```

/// Swiss matchmaker.
pub mod matchmaker;

/// Points, history and round status.
pub mod rounds;

/// Tie-break formulas.
pub mod tiebreak;

/// Tournament state, configuration and transitions.
pub mod tournament;

pub use matchmaker::{Matchmaker, run_matchmaker};
pub use tiebreak::TieBreaker;
pub use tournament::{
    Match, Outcome, PairingEntry, Placing, Player, PlayerId, RetryPolicy, Round, Score,
    Tournament, TournamentConfig, TournamentError, TournamentResult,
};
