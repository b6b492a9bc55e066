//! Tournament error types.

use thiserror::Error;

use super::models::PlayerId;

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament errors
///
/// Every operation that returns one of these leaves the tournament it was
/// called on untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    /// The targeted match already carries a score
    #[error("Scores for match #{match_index} already submitted")]
    AlreadySubmitted { match_index: usize },

    /// The current round still has matches without a score
    #[error("Current round still has unsubmitted matches")]
    RoundIncomplete,

    /// The player is already recorded in a drops entry
    #[error("Player {0} already dropped")]
    AlreadyDropped(PlayerId),

    /// A tie-break identifier that does not name a known formula
    #[error("Unknown tie-breaker: {0}")]
    UnknownTieBreaker(String),

    /// Round accounting could not find the player's match in a round
    #[error("Invariant violation: player {player} has no match in round {round}")]
    PlayerNotInRound { player: PlayerId, round: usize },

    /// No match at this index in the current round
    #[error("Match not found in current round: {0}")]
    MatchNotFound(usize),

    /// No player with this id in the roster
    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    /// Matchmaker input must be padded to an even length
    #[error("Cannot pair an odd number of players: {0}")]
    OddPlayerCount(usize),

    /// The bounded retry policy ran out of attempts
    #[error("Pairing failed after {attempts} attempts")]
    PairingExhausted { attempts: u32 },

    /// Tournament created without participants
    #[error("Tournament needs at least one participant")]
    NoParticipants,

    /// Configuration error
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl TournamentError {
    /// True for errors that point at malformed tournament state or
    /// configuration rather than a rejected caller request.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            TournamentError::PlayerNotInRound { .. }
                | TournamentError::UnknownTieBreaker(_)
                | TournamentError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TournamentError::AlreadySubmitted { match_index: 2 }.to_string(),
            "Scores for match #2 already submitted"
        );
        assert_eq!(
            TournamentError::PlayerNotInRound { player: 4, round: 1 }.to_string(),
            "Invariant violation: player 4 has no match in round 1"
        );
    }

    #[test]
    fn test_is_corruption() {
        assert!(TournamentError::PlayerNotInRound { player: 0, round: 0 }.is_corruption());
        assert!(TournamentError::UnknownTieBreaker("buchholz".to_string()).is_corruption());
        assert!(!TournamentError::RoundIncomplete.is_corruption());
        assert!(!TournamentError::AlreadyDropped(3).is_corruption());
    }
}
