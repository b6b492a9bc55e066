//! Tie-break scoring engine.
//!
//! Match results are scored 10 for a win, 5 for a draw and 0 for a loss.
//! Formulas that rate an opponent's strength count any auto-resolved match
//! of that opponent as a draw, and a player's own auto-resolved rounds
//! credit no opponent at all.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    rounds::player_matches,
    tournament::{
        errors::{TournamentError, TournamentResult},
        models::{AUTO_WIN_POINTS, Match, Outcome, PlayerId, Round},
    },
};

/// Points for winning a match
pub const WIN_SCORE: i64 = 10;

/// Points for drawing a match
pub const DRAW_SCORE: i64 = 5;

/// Scale of the win-rate formulas, 10000 is a perfect record
pub const WIN_RATE_SCALE: f64 = 10000.0;

/// Tie-break formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum TieBreaker {
    /// Round-weighted wins, early wins count more
    Cumulative,
    /// Own score as a fraction of the maximum, out of 10000
    AvgWinRate,
    /// Mean `AvgWinRate` of the opponents faced
    AvgOpponentWinRate,
    /// Sum of opponents' total scores
    Solkoff,
    /// Solkoff with the outlier opponent(s) removed
    ModifiedMean,
}

impl TieBreaker {
    /// Every formula
    pub const ALL: [TieBreaker; 5] = [
        TieBreaker::Cumulative,
        TieBreaker::AvgWinRate,
        TieBreaker::AvgOpponentWinRate,
        TieBreaker::Solkoff,
        TieBreaker::ModifiedMean,
    ];

    /// Cascade used when none is configured
    pub fn default_cascade() -> Vec<TieBreaker> {
        vec![
            TieBreaker::AvgWinRate,
            TieBreaker::AvgOpponentWinRate,
            TieBreaker::Cumulative,
        ]
    }

    /// Identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreaker::Cumulative => "cumulative",
            TieBreaker::AvgWinRate => "avgWinRate",
            TieBreaker::AvgOpponentWinRate => "avgOpponentWinRate",
            TieBreaker::Solkoff => "solkoff",
            TieBreaker::ModifiedMean => "modifiedMean",
        }
    }

    /// Compute this formula for a player
    pub fn score(&self, rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
        match self {
            TieBreaker::Cumulative => cumulative(rounds, player),
            TieBreaker::AvgWinRate => avg_win_rate(rounds, player),
            TieBreaker::AvgOpponentWinRate => avg_opponent_win_rate(rounds, player),
            TieBreaker::Solkoff => solkoff(rounds, player),
            TieBreaker::ModifiedMean => modified_mean(rounds, player),
        }
    }
}

impl fmt::Display for TieBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TieBreaker {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TieBreaker::ALL
            .into_iter()
            .find(|tie_breaker| tie_breaker.as_str() == s)
            .ok_or_else(|| TournamentError::UnknownTieBreaker(s.to_string()))
    }
}

impl TryFrom<String> for TieBreaker {
    type Error = TournamentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An opponent credited for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opponent {
    pub id: PlayerId,
    pub auto_win: bool,
}

/// 10/5/0 for a win/draw/loss
///
/// A pending match scores as a draw.
pub fn match_score_points(m: &Match, player: PlayerId) -> i64 {
    match m.outcome_for(player) {
        Some(Outcome::Win) => WIN_SCORE,
        Some(Outcome::Loss) => 0,
        Some(Outcome::Draw) | None => DRAW_SCORE,
    }
}

/// Like [`match_score_points`], but an auto-resolved match always counts as a draw
pub fn opponent_match_score_points(m: &Match, player: PlayerId) -> i64 {
    if m.auto_win {
        DRAW_SCORE
    } else {
        match_score_points(m, player)
    }
}

/// Opponent per round, `None` where the player's own match was auto-resolved
pub fn opponents(rounds: &[Round], player: PlayerId) -> TournamentResult<Vec<Option<Opponent>>> {
    Ok(player_matches(rounds, player)?
        .into_iter()
        .map(|m| {
            if m.auto_win {
                return None;
            }
            m.opponent_of(player).map(|id| Opponent {
                id,
                auto_win: m.auto_win,
            })
        })
        .collect())
}

/// Total 10/5/0 score
pub fn player_score(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    Ok(player_matches(rounds, player)?
        .into_iter()
        .map(|m| match_score_points(m, player))
        .sum())
}

/// Total score as seen when rating this player as somebody's opponent
pub fn opponent_score(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    Ok(player_matches(rounds, player)?
        .into_iter()
        .map(|m| opponent_match_score_points(m, player))
        .sum())
}

/// Round-weighted score: a win in round `i` of `R` is worth `10 * (R - i)`
pub fn cumulative(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    let total = rounds.len() as i64;
    Ok(player_matches(rounds, player)?
        .into_iter()
        .enumerate()
        .map(|(idx, m)| {
            let remaining = total - idx as i64;
            let weight = WIN_SCORE * remaining;
            match m.outcome_for(player) {
                Some(Outcome::Win) if m.auto_win => weight - WIN_SCORE,
                Some(Outcome::Win) => weight,
                Some(Outcome::Loss) => 0,
                Some(Outcome::Draw) | None => DRAW_SCORE * remaining,
            }
        })
        .sum())
}

/// Own score over played matches as a rate out of 10000
pub fn avg_win_rate(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    if rounds.is_empty() {
        return Ok(0);
    }

    let won: i64 = player_matches(rounds, player)?
        .into_iter()
        .filter(|m| !m.auto_win)
        .filter_map(|m| m.score_for(player))
        .map(|(own, _)| own)
        .sum();

    Ok(round_half_up(
        won as f64 * WIN_RATE_SCALE / AUTO_WIN_POINTS as f64 / rounds.len() as f64,
    ))
}

/// Mean of the opponents' [`avg_win_rate`]
pub fn avg_opponent_win_rate(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    if rounds.is_empty() {
        return Ok(0);
    }

    let mut total = 0;
    for opponent in opponents(rounds, player)?.into_iter().flatten() {
        total += avg_win_rate(rounds, opponent.id)?;
    }

    Ok(round_half_up(total as f64 / rounds.len() as f64))
}

/// Sum of the opponents' [`opponent_score`]
pub fn solkoff(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    Ok(opponent_scores(rounds, player)?.into_iter().sum())
}

/// Solkoff without the weakest and/or strongest opponent
///
/// A player above the median score loses the weakest opponent, one below
/// it loses the strongest, one exactly on it loses both.
pub fn modified_mean(rounds: &[Round], player: PlayerId) -> TournamentResult<i64> {
    let mut scores = opponent_scores(rounds, player)?;
    scores.sort_unstable();

    let median = rounds.len() as i64 * WIN_SCORE / 2;
    let own = player_score(rounds, player)?;

    match own.cmp(&median) {
        std::cmp::Ordering::Equal => {
            scores.pop();
            if !scores.is_empty() {
                scores.remove(0);
            }
        }
        std::cmp::Ordering::Less => {
            scores.pop();
        }
        std::cmp::Ordering::Greater => {
            if !scores.is_empty() {
                scores.remove(0);
            }
        }
    }

    Ok(scores.into_iter().sum())
}

/// Configured cascade for a player, in order
pub fn tie_break_scores(
    rounds: &[Round],
    tie_breakers: &[TieBreaker],
    player: PlayerId,
) -> TournamentResult<Vec<i64>> {
    tie_breakers
        .iter()
        .map(|tie_breaker| tie_breaker.score(rounds, player))
        .collect()
}

/// One entry per round, 0 for rounds with no credited opponent
fn opponent_scores(rounds: &[Round], player: PlayerId) -> TournamentResult<Vec<i64>> {
    opponents(rounds, player)?
        .into_iter()
        .map(|opponent| match opponent {
            Some(opponent) => opponent_score(rounds, opponent.id),
            None => Ok(0),
        })
        .collect()
}

/// Nearest integer, halves rounded up
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bye_rounds() -> Vec<Round> {
        // player 3 is the bye
        vec![
            vec![
                Match::scored(0, 1, [2, 1], false),
                Match::scored(2, 3, [3, 0], true),
            ],
            vec![
                Match::scored(0, 2, [1, 1], false),
                Match::scored(1, 3, [3, 0], true),
            ],
        ]
    }

    #[test]
    fn test_parse_and_display() {
        for tie_breaker in TieBreaker::ALL {
            assert_eq!(tie_breaker.to_string().parse(), Ok(tie_breaker));
        }
        assert_eq!(
            "buchholz".parse::<TieBreaker>(),
            Err(TournamentError::UnknownTieBreaker("buchholz".to_string()))
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TieBreaker::AvgOpponentWinRate).unwrap();
        assert_eq!(json, "\"avgOpponentWinRate\"");
        let parsed: TieBreaker = serde_json::from_str("\"modifiedMean\"").unwrap();
        assert_eq!(parsed, TieBreaker::ModifiedMean);
        assert!(serde_json::from_str::<TieBreaker>("\"median\"").is_err());
    }

    #[test]
    fn test_match_score_points() {
        let m = Match::scored(0, 1, [2, 1], false);
        assert_eq!(match_score_points(&m, 0), 10);
        assert_eq!(match_score_points(&m, 1), 0);
        assert_eq!(match_score_points(&Match::scored(0, 1, [1, 1], false), 1), 5);
    }

    #[test]
    fn test_opponent_match_score_points_forces_draw() {
        let m = Match::scored(0, 1, [3, 0], true);
        assert_eq!(match_score_points(&m, 0), 10);
        assert_eq!(opponent_match_score_points(&m, 0), 5);
        assert_eq!(opponent_match_score_points(&m, 1), 5);
    }

    #[test]
    fn test_opponents_skip_auto_win_rounds() {
        let rounds = bye_rounds();
        assert_eq!(
            opponents(&rounds, 2).unwrap(),
            vec![
                None,
                Some(Opponent {
                    id: 0,
                    auto_win: false
                })
            ]
        );
    }

    #[test]
    fn test_cumulative_discounts_auto_win() {
        let rounds = bye_rounds();
        // round 0 auto win: 20 - 10, round 1 draw: 5
        assert_eq!(cumulative(&rounds, 2), Ok(15));
        // round 0 win: 20, round 1 draw: 5
        assert_eq!(cumulative(&rounds, 0), Ok(25));
    }

    #[test]
    fn test_avg_win_rate_ignores_auto_win_points() {
        let rounds = bye_rounds();
        // only the drawn match counts: 1 * 10000 / 3 / 2
        assert_eq!(avg_win_rate(&rounds, 2), Ok(1667));
        assert_eq!(avg_win_rate(&rounds, 3), Ok(0));
    }

    #[test]
    fn test_solkoff_with_bye_round() {
        let rounds = bye_rounds();
        // player 0: 10 for the win, 5 for the draw
        assert_eq!(opponent_score(&rounds, 0), Ok(15));
        assert_eq!(solkoff(&rounds, 2), Ok(15));
    }

    #[test]
    fn test_modified_mean_single_round_on_median() {
        let rounds = vec![vec![Match::scored(0, 1, [1, 1], false)]];
        assert_eq!(modified_mean(&rounds, 0), Ok(0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
    }

    #[test]
    fn test_tie_break_scores_order() {
        let rounds = bye_rounds();
        let scores = tie_break_scores(
            &rounds,
            &[TieBreaker::Cumulative, TieBreaker::AvgWinRate],
            0,
        )
        .unwrap();
        assert_eq!(scores, vec![25, 5000]);
    }
}
