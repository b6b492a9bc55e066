//! Tournament state transitions.
//!
//! Every operation borrows the current state and returns a new
//! [`Tournament`]; on error the caller still holds the unmodified input.

use rand::Rng;

use super::{
    config::TournamentConfig,
    errors::{TournamentError, TournamentResult},
    models::{AUTO_WIN_POINTS, PairingEntry, Placing, Player, PlayerId, Round, Tournament},
};
use crate::{
    matchmaker::Matchmaker,
    rounds::{find_player_match, has_unsubmitted_matches, player_history, player_points},
    tiebreak::{TieBreaker, tie_break_scores},
};

impl<T: Clone> Tournament<T> {
    /// Create a tournament with the default configuration
    ///
    /// ```
    /// use swiss_pairing::Tournament;
    ///
    /// let tournament = Tournament::new(vec!["Mike", "John", "Paul"]).unwrap();
    /// // an odd roster gets a bye player
    /// assert_eq!(tournament.players.len(), 4);
    /// assert_eq!(tournament.rounds[0].len(), 2);
    /// ```
    pub fn new(participants: Vec<T>) -> TournamentResult<Self> {
        Self::with_config(participants, TournamentConfig::default())
    }

    /// Create a tournament with a custom tie-break cascade
    pub fn with_tie_breakers(
        participants: Vec<T>,
        tie_breakers: Vec<TieBreaker>,
    ) -> TournamentResult<Self> {
        Self::with_config(participants, TournamentConfig::with_tie_breakers(tie_breakers))
    }

    /// Create a tournament with round 0 already paired
    ///
    /// # Errors
    ///
    /// `NoParticipants` for an empty roster, `InvalidConfig` if the
    /// configuration does not validate.
    pub fn with_config(participants: Vec<T>, config: TournamentConfig) -> TournamentResult<Self> {
        let mut matchmaker = Matchmaker::new(config.retry_policy);
        Self::create(participants, config, &mut matchmaker)
    }

    /// Like [`Tournament::with_config`], drawing pairings from `rng`
    pub fn with_config_and_rng<R: Rng>(
        participants: Vec<T>,
        config: TournamentConfig,
        rng: &mut R,
    ) -> TournamentResult<Self> {
        let mut matchmaker = Matchmaker::with_rng(rng, config.retry_policy);
        Self::create(participants, config, &mut matchmaker)
    }

    fn create<R: Rng>(
        participants: Vec<T>,
        config: TournamentConfig,
        matchmaker: &mut Matchmaker<R>,
    ) -> TournamentResult<Self> {
        config.validate()?;
        if participants.is_empty() {
            return Err(TournamentError::NoParticipants);
        }

        let mut players: Vec<Player<T>> = participants
            .into_iter()
            .enumerate()
            .map(|(id, data)| Player {
                id,
                data: Some(data),
            })
            .collect();

        let mut drops = vec![Vec::new()];
        if players.len() % 2 != 0 {
            let bye_id = players.len();
            players.push(Player {
                id: bye_id,
                data: None,
            });
            drops[0].push(bye_id);
        }

        let entries: Vec<PairingEntry<&T>> = players
            .iter()
            .map(|player| PairingEntry {
                id: player.id,
                data: player.data.as_ref(),
                points: 0,
                history: Vec::new(),
                dropped: player.is_bye(),
            })
            .collect();
        let first_round = matchmaker.pair(&entries)?;

        log::info!(
            "Created tournament with {} players, {} rounds planned",
            players.len(),
            ceil_log2(players.len())
        );

        Ok(Self {
            players,
            rounds: vec![first_round],
            drops,
            tie_breakers: config.tie_breakers,
            retry_policy: config.retry_policy,
        })
    }

    /// Submit a played result for a match of the current round
    pub fn submit_score(
        &self,
        match_index: usize,
        p1_score: i64,
        p2_score: i64,
    ) -> TournamentResult<Self> {
        self.submit_result(match_index, p1_score, p2_score, false)
    }

    /// Submit a result for a match of the current round
    ///
    /// `auto_win` marks a result assigned without play.
    ///
    /// # Errors
    ///
    /// `MatchNotFound` if the index is outside the current round,
    /// `AlreadySubmitted` if the match already has a score.
    pub fn submit_result(
        &self,
        match_index: usize,
        p1_score: i64,
        p2_score: i64,
        auto_win: bool,
    ) -> TournamentResult<Self> {
        let current = self
            .current_round()
            .ok_or(TournamentError::MatchNotFound(match_index))?;
        let target = current
            .get(match_index)
            .ok_or(TournamentError::MatchNotFound(match_index))?;
        if target.is_submitted() {
            return Err(TournamentError::AlreadySubmitted { match_index });
        }

        let mut next = self.clone();
        if let Some(m) = next
            .rounds
            .last_mut()
            .and_then(|round| round.get_mut(match_index))
        {
            m.score = Some([p1_score, p2_score]);
            m.auto_win = auto_win;
        }
        Ok(next)
    }

    /// Submit several `(match_index, p1_score, p2_score)` results in order
    ///
    /// Stops at the first rejected result.
    pub fn submit_scores(&self, scores: &[(usize, i64, i64)]) -> TournamentResult<Self> {
        scores
            .iter()
            .try_fold(self.clone(), |tournament, &(match_index, p1_score, p2_score)| {
                tournament.submit_score(match_index, p1_score, p2_score)
            })
    }

    /// Pair the next round
    ///
    /// # Errors
    ///
    /// `RoundIncomplete` while the current round has pending matches.
    pub fn compute_next_round(&self) -> TournamentResult<Self> {
        let mut matchmaker = Matchmaker::new(self.retry_policy);
        self.advance(&mut matchmaker)
    }

    /// Like [`Tournament::compute_next_round`], drawing pairings from `rng`
    pub fn compute_next_round_with_rng<R: Rng>(&self, rng: &mut R) -> TournamentResult<Self> {
        let mut matchmaker = Matchmaker::with_rng(rng, self.retry_policy);
        self.advance(&mut matchmaker)
    }

    fn advance<R: Rng>(&self, matchmaker: &mut Matchmaker<R>) -> TournamentResult<Self> {
        if has_unsubmitted_matches(&self.rounds) {
            return Err(TournamentError::RoundIncomplete);
        }

        let entries = self.pairing_entries()?;
        let round = matchmaker.pair(&entries)?;

        let mut next = self.clone();
        next.rounds.push(round);
        next.drops.push(Vec::new());

        log::info!(
            "Paired round {} of {}",
            next.rounds.len(),
            self.max_rounds()
        );
        Ok(next)
    }

    /// Matchmaker input reflecting the current standings
    pub fn pairing_entries(&self) -> TournamentResult<Vec<PairingEntry<&T>>> {
        self.players
            .iter()
            .map(|player| {
                Ok(PairingEntry {
                    id: player.id,
                    data: player.data.as_ref(),
                    points: player_points(&self.rounds, player.id)?,
                    history: player_history(&self.rounds, player.id)?,
                    dropped: self.is_dropped(player.id),
                })
            })
            .collect()
    }

    /// Withdraw a player
    ///
    /// A pending match of the player in the current round is resolved
    /// immediately as an auto win for the opponent.
    ///
    /// # Errors
    ///
    /// `UnknownPlayer` for an id outside the roster, `AlreadyDropped` if
    /// the player withdrew before.
    pub fn drop_player(&self, player: PlayerId) -> TournamentResult<Self> {
        if !self.players.iter().any(|p| p.id == player) {
            return Err(TournamentError::UnknownPlayer(player));
        }
        if self.is_dropped(player) {
            return Err(TournamentError::AlreadyDropped(player));
        }

        let mut next = self.clone();
        match next.drops.last_mut() {
            Some(current_drops) => current_drops.push(player),
            None => next.drops.push(vec![player]),
        }

        let round_idx = self.rounds.len().saturating_sub(1);
        let Some(current) = self.current_round() else {
            return Ok(next);
        };
        let (match_index, m) = find_player_match(current, player).ok_or(
            TournamentError::PlayerNotInRound {
                player,
                round: round_idx,
            },
        )?;

        log::info!("Player {} dropped during round {}", player, round_idx + 1);

        if m.is_submitted() {
            return Ok(next);
        }

        if m.p1 == player {
            next.submit_result(match_index, 0, AUTO_WIN_POINTS, true)
        } else {
            next.submit_result(match_index, AUTO_WIN_POINTS, 0, true)
        }
    }

    /// Whether every planned round has been played and scored
    pub fn is_complete(&self) -> bool {
        self.rounds.len() >= self.max_rounds() && !has_unsubmitted_matches(&self.rounds)
    }

    /// Final ranking, sorted by the tie-break cascade alone
    ///
    /// Points are reported but not compared; with a cascade that does not
    /// follow points (e.g. only `solkoff`) a player with fewer points can
    /// rank higher. Players tied on every tie-breaker keep roster order.
    pub fn compute_placings(&self) -> TournamentResult<Vec<Placing<T>>> {
        let mut placings = self
            .players
            .iter()
            .map(|player| {
                Ok(Placing {
                    id: player.id,
                    data: player.data.clone(),
                    points: player_points(&self.rounds, player.id)?,
                    tie_break_scores: tie_break_scores(
                        &self.rounds,
                        &self.tie_breakers,
                        player.id,
                    )?,
                })
            })
            .collect::<TournamentResult<Vec<_>>>()?;

        placings.sort_by(|a, b| b.tie_break_scores.cmp(&a.tie_break_scores));

        if self.is_complete() {
            log::info!("Computed final placings for {} players", placings.len());
        } else {
            log::debug!("Computed placings for an unfinished tournament");
        }
        Ok(placings)
    }
}

impl<T> Tournament<T> {
    /// The round currently being played
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Number of rounds paired so far
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Rounds needed to finish: `ceil(log2(player count))`
    pub fn max_rounds(&self) -> usize {
        ceil_log2(self.players.len())
    }

    /// Whether the player is recorded in any drops entry
    pub fn is_dropped(&self, player: PlayerId) -> bool {
        self.drops.iter().any(|round_drops| round_drops.contains(&player))
    }

    /// Id of the synthetic bye player, if the roster needed one
    pub fn bye_player(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.is_bye()).map(|p| p.id)
    }
}

/// `ceil(log2(n))` on integers, 0 for `n <= 1`
fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}
