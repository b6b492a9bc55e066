//! Tournament configuration.

use serde::{Deserialize, Serialize};

use crate::tiebreak::TieBreaker;

use super::errors::{TournamentError, TournamentResult};

/// How the matchmaker recovers from a dead-end pairing attempt
///
/// Every failed attempt is discarded and the whole round is re-paired with
/// fresh randomness. `Unbounded` never gives up, so a roster whose history
/// admits no valid pairing never terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Retry until a pairing is found
    #[default]
    Unbounded,
    /// Fail with `PairingExhausted` after this many attempts
    Bounded { max_attempts: u32 },
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempts` failures
    pub fn allows_retry(&self, attempts: u32) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Bounded { max_attempts } => attempts < *max_attempts,
        }
    }
}

/// Configuration as written by hand, tie-breakers still unparsed
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    tie_breakers: Option<Vec<String>>,
    #[serde(default)]
    retry_policy: RetryPolicy,
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Tie-break cascade, most significant first
    pub tie_breakers: Vec<TieBreaker>,
    /// Matchmaker retry behaviour
    pub retry_policy: RetryPolicy,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            tie_breakers: TieBreaker::default_cascade(),
            retry_policy: RetryPolicy::Unbounded,
        }
    }
}

impl TournamentConfig {
    /// Configuration with a custom tie-break cascade
    pub fn with_tie_breakers(tie_breakers: Vec<TieBreaker>) -> Self {
        Self {
            tie_breakers,
            ..Self::default()
        }
    }

    /// Cap the number of pairing attempts per round
    pub fn bounded(mut self, max_attempts: u32) -> Self {
        self.retry_policy = RetryPolicy::Bounded { max_attempts };
        self
    }

    /// Parse and validate a JSON configuration
    ///
    /// ```
    /// use swiss_pairing::{TieBreaker, TournamentConfig};
    ///
    /// let config = TournamentConfig::from_json_str(r#"{"tie_breakers": ["solkoff", "cumulative"]}"#)
    ///     .unwrap();
    /// assert_eq!(config.tie_breakers, vec![TieBreaker::Solkoff, TieBreaker::Cumulative]);
    /// ```
    pub fn from_json_str(json: &str) -> TournamentResult<Self> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| TournamentError::InvalidConfig(e.to_string()))?;

        let tie_breakers = match raw.tie_breakers {
            Some(names) => names
                .iter()
                .map(|name| name.parse())
                .collect::<TournamentResult<Vec<TieBreaker>>>()?,
            None => TieBreaker::default_cascade(),
        };

        let config = Self {
            tie_breakers,
            retry_policy: raw.retry_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.tie_breakers.is_empty() {
            return Err(TournamentError::InvalidConfig(
                "At least one tie-breaker is required".to_string(),
            ));
        }

        for (i, tie_breaker) in self.tie_breakers.iter().enumerate() {
            if self.tie_breakers[..i].contains(tie_breaker) {
                return Err(TournamentError::InvalidConfig(format!(
                    "Tie-breaker {tie_breaker} listed more than once"
                )));
            }
        }

        if let RetryPolicy::Bounded { max_attempts: 0 } = self.retry_policy {
            return Err(TournamentError::InvalidConfig(
                "Bounded retry policy needs at least one attempt".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TournamentConfig::default();
        assert_eq!(
            config.tie_breakers,
            vec![
                TieBreaker::AvgWinRate,
                TieBreaker::AvgOpponentWinRate,
                TieBreaker::Cumulative
            ]
        );
        assert_eq!(config.retry_policy, RetryPolicy::Unbounded);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_cascade() {
        let config = TournamentConfig::with_tie_breakers(vec![]);
        assert!(matches!(
            config.validate(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config =
            TournamentConfig::with_tie_breakers(vec![TieBreaker::Solkoff, TieBreaker::Solkoff]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = TournamentConfig::default().bounded(0);
        assert!(config.validate().is_err());
        assert!(TournamentConfig::default().bounded(1).validate().is_ok());
    }

    #[test]
    fn test_retry_policy_allows_retry() {
        assert!(RetryPolicy::Unbounded.allows_retry(u32::MAX));
        let bounded = RetryPolicy::Bounded { max_attempts: 3 };
        assert!(bounded.allows_retry(2));
        assert!(!bounded.allows_retry(3));
    }

    #[test]
    fn test_from_json_str() {
        let config = TournamentConfig::from_json_str(
            r#"{"tie_breakers": ["modifiedMean"], "retry_policy": {"mode": "bounded", "max_attempts": 50}}"#,
        )
        .unwrap();
        assert_eq!(config.tie_breakers, vec![TieBreaker::ModifiedMean]);
        assert_eq!(
            config.retry_policy,
            RetryPolicy::Bounded { max_attempts: 50 }
        );

        let defaults = TournamentConfig::from_json_str("{}").unwrap();
        assert_eq!(defaults, TournamentConfig::default());
    }

    #[test]
    fn test_from_json_str_unknown_tie_breaker() {
        let err = TournamentConfig::from_json_str(r#"{"tie_breakers": ["buchholz"]}"#).unwrap_err();
        assert_eq!(err, TournamentError::UnknownTieBreaker("buchholz".to_string()));
    }

    #[test]
    fn test_from_json_str_malformed() {
        let err = TournamentConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TournamentError::InvalidConfig(_)));
    }
}
