//! Simulated Swiss tournament.
//!
//! Plays a full tournament with random results, optionally withdrawing
//! players along the way, and prints the final placings.

use anyhow::{Context, Error, bail};
use log::{info, warn};
use pico_args::Arguments;
use rand::{Rng, SeedableRng, rngs::StdRng};
use swiss_pairing::{Placing, Tournament, TournamentConfig, TournamentError};

const HELP: &str = "\
Run a simulated Swiss tournament

USAGE:
  swiss_sim [OPTIONS]

OPTIONS:
  --players      N       Number of participants              [default: 8]
  --config       PATH    JSON tournament configuration       [default: built-in]
  --drop-chance  P       Chance a player withdraws per round [default: 0.0]
  --seed         N       Seed for pairings and results       [default: random]

FLAGS:
  --json                 Print placings as JSON
  -h, --help             Print help information

ENVIRONMENT:
  RUST_LOG               Log filter [default: info]
";

/// Attempts allowed per round when no configuration file is given
const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Possible results of a played match
const RESULTS: [(i64, i64); 5] = [(2, 0), (2, 1), (1, 1), (1, 2), (0, 2)];

struct Args {
    players: usize,
    config: Option<String>,
    drop_chance: f64,
    seed: Option<u64>,
    json: bool,
}

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        players: pargs.opt_value_from_str("--players")?.unwrap_or(8),
        config: pargs.opt_value_from_str("--config")?,
        drop_chance: pargs.opt_value_from_str("--drop-chance")?.unwrap_or(0.0),
        seed: pargs.opt_value_from_str("--seed")?,
        json: pargs.contains("--json"),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    if !(0.0..=1.0).contains(&args.drop_chance) {
        bail!("--drop-chance must be between 0 and 1, got {}", args.drop_chance);
    }

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration {path}"))?;
            TournamentConfig::from_json_str(&json)
                .with_context(|| format!("Invalid configuration {path}"))?
        }
        None => TournamentConfig::default().bounded(DEFAULT_MAX_ATTEMPTS),
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("Simulating {} players with seed {}", args.players, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let placings = simulate(&args, config, &mut rng)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&placings)?);
    } else {
        print_table(&placings);
    }

    Ok(())
}

/// Play every round until the tournament completes or pairing gives up
fn simulate(
    args: &Args,
    config: TournamentConfig,
    rng: &mut StdRng,
) -> Result<Vec<Placing<String>>, Error> {
    let names = (1..=args.players).map(|i| format!("Player {i}")).collect();
    let mut tournament = Tournament::with_config_and_rng(names, config, rng)?;

    loop {
        tournament = withdraw_some(tournament, args.drop_chance, rng)?;
        tournament = play_round(tournament, rng)?;

        if tournament.is_complete() {
            info!("Tournament complete after {} rounds", tournament.round_count());
            break;
        }

        match tournament.compute_next_round_with_rng(rng) {
            Ok(next) => tournament = next,
            Err(TournamentError::PairingExhausted { attempts }) => {
                warn!(
                    "Stopping after round {}: no pairing found in {} attempts",
                    tournament.round_count(),
                    attempts
                );
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(tournament.compute_placings()?)
}

/// Withdraw each active participant with probability `chance`
fn withdraw_some(
    mut tournament: Tournament<String>,
    chance: f64,
    rng: &mut StdRng,
) -> Result<Tournament<String>, Error> {
    if chance <= 0.0 {
        return Ok(tournament);
    }

    let active: Vec<usize> = tournament
        .players
        .iter()
        .filter(|p| !p.is_bye() && !tournament.is_dropped(p.id))
        .map(|p| p.id)
        .collect();

    for id in active {
        if rng.random_bool(chance) {
            tournament = tournament.drop_player(id)?;
        }
    }
    Ok(tournament)
}

/// Random results for every match still pending
fn play_round(tournament: Tournament<String>, rng: &mut StdRng) -> Result<Tournament<String>, Error> {
    let pending: Vec<(usize, i64, i64)> = match tournament.current_round() {
        Some(round) => round
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_submitted())
            .map(|(idx, _)| {
                let (p1, p2) = RESULTS[rng.random_range(0..RESULTS.len())];
                (idx, p1, p2)
            })
            .collect(),
        None => Vec::new(),
    };
    Ok(tournament.submit_scores(&pending)?)
}

fn print_table(placings: &[Placing<String>]) {
    println!("{:>4}  {:<16} {:>6}  Tie-breaks", "Rank", "Player", "Points");
    for (rank, placing) in placings.iter().enumerate() {
        let name = placing.data.as_deref().unwrap_or("(bye)");
        let scores: Vec<String> = placing
            .tie_break_scores
            .iter()
            .map(ToString::to_string)
            .collect();
        println!(
            "{:>4}  {:<16} {:>6}  {}",
            rank + 1,
            name,
            placing.points,
            scores.join(" / ")
        );
    }
}
