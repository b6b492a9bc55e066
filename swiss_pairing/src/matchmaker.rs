//! Swiss matchmaker.
//!
//! Players are sorted by points (dropped players last) and the top
//! remaining player is repeatedly paired with a random opponent from the
//! highest point group that holds someone they have not faced yet.
//! Dropped players are paired with each other at random. When a player
//! runs out of candidates the whole attempt is thrown away and pairing
//! starts over with fresh randomness, as governed by [`RetryPolicy`].

use rand::{Rng, rngs::ThreadRng};
use std::cmp::Ordering;

use crate::tournament::{
    config::RetryPolicy,
    errors::{TournamentError, TournamentResult},
    models::{AUTO_WIN_POINTS, Match, PairingEntry, Round, Score},
};

/// Random pairing generator
pub struct Matchmaker<R = ThreadRng> {
    /// Random number generator
    rng: R,
    /// What to do when an attempt hits a dead end
    policy: RetryPolicy,
}

impl Matchmaker<ThreadRng> {
    /// Create a matchmaker backed by the thread-local generator
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            rng: rand::rng(),
            policy,
        }
    }
}

impl Default for Matchmaker<ThreadRng> {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<R: Rng> Matchmaker<R> {
    /// Create a matchmaker with a caller-supplied generator
    pub fn with_rng(rng: R, policy: RetryPolicy) -> Self {
        Self { rng, policy }
    }

    /// Pair every entry exactly once
    ///
    /// # Arguments
    ///
    /// * `entries` - Players to pair, padded to an even length with a bye entry
    ///
    /// # Returns
    ///
    /// * `TournamentResult<Round>` - One match per pair, bye and dropped
    ///   pairings already scored
    ///
    /// # Errors
    ///
    /// `OddPlayerCount` for odd input, `PairingExhausted` once a bounded
    /// policy runs out of attempts. Under the unbounded policy a roster with
    /// no valid pairing loops forever.
    pub fn pair<T>(&mut self, entries: &[PairingEntry<T>]) -> TournamentResult<Round> {
        if entries.len() % 2 != 0 {
            return Err(TournamentError::OddPlayerCount(entries.len()));
        }

        let sorted = sort_for_pairing(entries);
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);

            if let Some(round) = self.try_pair(&sorted) {
                log::debug!(
                    "Paired {} players into {} matches after {} attempt(s)",
                    entries.len(),
                    round.len(),
                    attempts
                );
                return Ok(round);
            }

            if !self.policy.allows_retry(attempts) {
                log::warn!("Giving up pairing {} players after {} attempts", entries.len(), attempts);
                return Err(TournamentError::PairingExhausted { attempts });
            }

            log::debug!("Pairing attempt {} reached a dead end, restarting", attempts);
        }
    }

    /// One full pass, `None` if some player is left without a candidate
    fn try_pair<T>(&mut self, sorted: &[&PairingEntry<T>]) -> Option<Round> {
        let mut remaining = sorted.to_vec();
        let mut round = Vec::with_capacity(sorted.len() / 2);

        while !remaining.is_empty() {
            let p1 = remaining.remove(0);
            let partner_idx = self.find_partner(p1, &remaining)?;
            let p2 = remaining.remove(partner_idx);

            let score = initial_score(p1, p2);
            round.push(Match {
                p1: p1.id,
                p2: p2.id,
                score,
                auto_win: score.is_some(),
            });
        }

        Some(round)
    }

    /// Index into `others` of the chosen partner
    fn find_partner<T>(
        &mut self,
        player: &PairingEntry<T>,
        others: &[&PairingEntry<T>],
    ) -> Option<usize> {
        if others.is_empty() {
            return None;
        }

        // sorting put every dropped player last, so only dropped ones remain
        if player.dropped {
            return Some(self.rng.random_range(0..others.len()));
        }

        let mut start = 0;
        while start < others.len() {
            let points = others[start].points;
            let end = others
                .iter()
                .enumerate()
                .skip(start + 1)
                .find(|(_, other)| other.points != points || other.dropped)
                .map_or(others.len(), |(idx, _)| idx);

            let candidates: Vec<usize> = (start..end)
                .filter(|&idx| !player.history.contains(&others[idx].id))
                .collect();

            if !candidates.is_empty() {
                return Some(candidates[self.rng.random_range(0..candidates.len())]);
            }

            start = end;
        }

        None
    }
}

/// Pair entries with the thread-local generator and unbounded retries
pub fn run_matchmaker<T>(entries: &[PairingEntry<T>]) -> TournamentResult<Round> {
    Matchmaker::default().pair(entries)
}

/// Points descending, dropped players after everyone else
pub fn sort_for_pairing<T>(entries: &[PairingEntry<T>]) -> Vec<&PairingEntry<T>> {
    let mut sorted: Vec<&PairingEntry<T>> = entries.iter().collect();
    sorted.sort_by(|a, b| match (a.dropped, b.dropped) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => b.points.cmp(&a.points),
    });
    sorted
}

/// Score assigned at pairing time
///
/// Two dropped players both lose, a dropped player concedes to an active
/// one, and two active players get a pending match.
pub fn initial_score<T>(a: &PairingEntry<T>, b: &PairingEntry<T>) -> Option<Score> {
    match (a.dropped, b.dropped) {
        (true, true) => Some([0, 0]),
        (true, false) => Some([0, AUTO_WIN_POINTS]),
        (false, true) => Some([AUTO_WIN_POINTS, 0]),
        (false, false) => None,
    }
}
