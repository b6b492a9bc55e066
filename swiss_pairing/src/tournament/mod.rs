//! Swiss tournament state and its transitions.
//!
//! This module provides:
//! - Tournament creation with automatic bye padding
//! - Score submission for the current round
//! - Round advancement through the matchmaker
//! - Player drops with automatic match resolution
//! - Completion checks and final placings
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::{TieBreaker, Tournament};
//!
//! let mut tournament = Tournament::with_tie_breakers(
//!     vec!["Mike", "John", "Paul", "George"],
//!     vec![TieBreaker::AvgWinRate, TieBreaker::Solkoff],
//! )
//! .unwrap();
//!
//! while !tournament.is_complete() {
//!     if tournament.current_round().is_some_and(|round| round.iter().all(|m| m.is_submitted())) {
//!         tournament = tournament.compute_next_round().unwrap();
//!     }
//!     let pending: Vec<(usize, i64, i64)> = tournament.rounds[tournament.round_count() - 1]
//!         .iter()
//!         .enumerate()
//!         .filter(|(_, m)| !m.is_submitted())
//!         .map(|(idx, _)| (idx, 2, 1))
//!         .collect();
//!     tournament = tournament.submit_scores(&pending).unwrap();
//! }
//!
//! let placings = tournament.compute_placings().unwrap();
//! assert_eq!(placings.len(), 4);
//! ```

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;

pub use config::{RetryPolicy, TournamentConfig};
pub use errors::{TournamentError, TournamentResult};
pub use models::{
    AUTO_WIN_POINTS, Match, Outcome, PairingEntry, Placing, Player, PlayerId, Round, Score, Side,
    Tournament,
};
