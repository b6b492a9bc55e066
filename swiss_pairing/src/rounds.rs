//! Round accounting: points, opponent history and round status.
//!
//! Every active player appears in every round, bye and drop rounds
//! included, so a player missing from a round is reported as
//! [`TournamentError::PlayerNotInRound`] instead of being defaulted.

use crate::tournament::{
    errors::{TournamentError, TournamentResult},
    models::{Match, PlayerId, Round},
};

/// True iff the last round has a match without a score
pub fn has_unsubmitted_matches(rounds: &[Round]) -> bool {
    rounds
        .last()
        .is_some_and(|round| round.iter().any(|m| !m.is_submitted()))
}

/// Locate the player's match in a round
pub fn find_player_match(round: &Round, player: PlayerId) -> Option<(usize, &Match)> {
    round.iter().enumerate().find(|(_, m)| m.involves(player))
}

/// The player's match in every round, in round order
pub fn player_matches(rounds: &[Round], player: PlayerId) -> TournamentResult<Vec<&Match>> {
    rounds
        .iter()
        .enumerate()
        .map(|(round_idx, round)| {
            find_player_match(round, player)
                .map(|(_, m)| m)
                .ok_or(TournamentError::PlayerNotInRound {
                    player,
                    round: round_idx,
                })
        })
        .collect()
}

/// Sum of the player's own score component over all rounds
///
/// Pending matches contribute nothing.
pub fn player_points(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    Ok(player_matches(rounds, player)?
        .into_iter()
        .filter_map(|m| m.score_for(player))
        .map(|(own, _)| own)
        .sum())
}

/// Opponent faced in each round, in round order
pub fn player_history(rounds: &[Round], player: PlayerId) -> TournamentResult<Vec<PlayerId>> {
    Ok(player_matches(rounds, player)?
        .into_iter()
        .filter_map(|m| m.opponent_of(player))
        .collect())
}
