//! Regression fixtures for the tie-break formulas.
//!
//! Six players, four fully scored rounds, no byes or drops.

use swiss_pairing::{
    Match, Player, RetryPolicy, Round, TieBreaker, Tournament,
    tiebreak::{
        avg_opponent_win_rate, avg_win_rate, cumulative, modified_mean, player_score, solkoff,
        tie_break_scores,
    },
};

fn fixture_rounds() -> Vec<Round> {
    vec![
        vec![
            Match::scored(1, 4, [3, 0], false),
            Match::scored(2, 5, [3, 0], false),
            Match::scored(3, 6, [3, 0], false),
        ],
        vec![
            Match::scored(1, 2, [1, 1], false),
            Match::scored(3, 4, [0, 3], false),
            Match::scored(5, 6, [0, 3], false),
        ],
        vec![
            Match::scored(1, 3, [3, 0], false),
            Match::scored(2, 6, [3, 0], false),
            Match::scored(4, 5, [0, 3], false),
        ],
        vec![
            Match::scored(1, 5, [0, 3], false),
            Match::scored(2, 3, [0, 3], false),
            Match::scored(4, 6, [0, 3], false),
        ],
    ]
}

fn fixture_tournament() -> Tournament<String> {
    Tournament {
        players: (1..=6)
            .map(|id| Player {
                id,
                data: Some(format!("player {id}")),
            })
            .collect(),
        rounds: fixture_rounds(),
        drops: vec![Vec::new(); 4],
        tie_breakers: TieBreaker::default_cascade(),
        retry_policy: RetryPolicy::Unbounded,
    }
}

fn per_player<F>(formula: F) -> Vec<i64>
where
    F: Fn(&[Round], usize) -> swiss_pairing::TournamentResult<i64>,
{
    let rounds = fixture_rounds();
    (1..=6)
        .map(|id| formula(&rounds, id).expect("every player plays every round"))
        .collect()
}

#[test]
fn test_player_score() {
    assert_eq!(per_player(player_score), vec![25, 25, 20, 10, 20, 20]);
}

#[test]
fn test_modified_mean() {
    assert_eq!(per_player(modified_mean), vec![65, 65, 45, 60, 45, 40]);
}

#[test]
fn test_solkoff() {
    assert_eq!(per_player(solkoff), vec![75, 85, 80, 85, 80, 75]);
}

#[test]
fn test_cumulative() {
    assert_eq!(per_player(cumulative), vec![75, 75, 50, 30, 30, 40]);
}

#[test]
fn test_avg_win_rate() {
    assert_eq!(
        per_player(avg_win_rate),
        vec![5833, 5833, 5000, 2500, 5000, 5000]
    );
}

#[test]
fn test_avg_opponent_win_rate() {
    assert_eq!(
        per_player(avg_opponent_win_rate),
        vec![4583, 5208, 4792, 5208, 4792, 4583]
    );
}

#[test]
fn test_tie_break_scores_follow_configured_order() {
    let rounds = fixture_rounds();
    let scores = tie_break_scores(
        &rounds,
        &[TieBreaker::Solkoff, TieBreaker::ModifiedMean, TieBreaker::Cumulative],
        2,
    )
    .unwrap();
    assert_eq!(scores, vec![85, 65, 75]);
}

#[test]
fn test_compute_placings() {
    let placings = fixture_tournament().compute_placings().unwrap();

    let ids: Vec<usize> = placings.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1, 3, 5, 6, 4]);

    let points: Vec<i64> = placings.iter().map(|p| p.points).collect();
    assert_eq!(points, vec![7, 7, 6, 6, 6, 3]);

    let scores: Vec<Vec<i64>> = placings.iter().map(|p| p.tie_break_scores.clone()).collect();
    assert_eq!(
        scores,
        vec![
            vec![5833, 5208, 75],
            vec![5833, 4583, 75],
            vec![5000, 4792, 50],
            vec![5000, 4792, 30],
            vec![5000, 4583, 40],
            vec![2500, 5208, 30],
        ]
    );

    // payload carried through untouched
    assert_eq!(placings[0].data.as_deref(), Some("player 2"));
    assert_eq!(placings[5].data.as_deref(), Some("player 4"));
}

#[test]
fn test_placings_ignore_points_when_cascade_does_not_follow_them() {
    let mut tournament = fixture_tournament();
    tournament.tie_breakers = vec![TieBreaker::Solkoff];

    let placings = tournament.compute_placings().unwrap();
    // player 4 has the fewest points but shares the best Solkoff
    assert_eq!(placings[0].tie_break_scores, vec![85]);
    assert!(placings[..2].iter().any(|p| p.id == 4));
    assert_eq!(placings.iter().find(|p| p.id == 4).map(|p| p.points), Some(3));
}
