use std::cmp::Reverse;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_matchup, MatchScore, PlayerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play per pair of players
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board after every move
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace".
    /// RUST_LOG directives take precedence.
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// A player's results summed over all of its matchups.
#[derive(Default)]
struct Standing {
    games: usize,
    wins: usize,
    ties: usize,
}

// Prints one line per matchup, then every player's totals, best first
fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &[((usize, usize), MatchScore)],
) {
    println!("\nMatchups (first seat vs second seat):\n");
    let mut standings: Vec<Standing> = player_configs.iter().map(|_| Standing::default()).collect();
    for &((i1, i2), score) in match_results {
        println!(
            "  {} vs {}: {} - {} ({} ties)",
            player_configs[i1].nick, player_configs[i2].nick, score.wins[0], score.wins[1], score.ties
        );
        for (idx, wins) in [(i1, score.wins[0]), (i2, score.wins[1])] {
            let standing = &mut standings[idx];
            standing.games += score.num_games();
            standing.wins += wins;
            standing.ties += score.ties;
        }
    }

    println!("\n {:19} | games |  wins |  ties | win %", "player");
    println!("{}", "-".repeat(52));
    let ranked = standings
        .iter()
        .enumerate()
        .sorted_by_key(|(_, standing)| Reverse(standing.wins));
    for (idx, standing) in ranked {
        let win_rate = standing.wins as f32 / standing.games.max(1) as f32 * 100.0;
        println!(
            " {:19} | {:5} | {:5} | {:5} | {:5.1}",
            player_configs[idx].nick, standing.games, standing.wins, standing.ties, win_rate
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let matchups: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut match_results = Vec::with_capacity(matchups.len());
    for (i1, i2) in matchups {
        info!(
            first = %player_configs[i1].nick,
            second = %player_configs[i2].nick,
            "Starting matchup"
        );
        let match_score = play_matchup(
            [&player_configs[i1], &player_configs[i2]],
            args.num_games,
            &mut rng,
            args.show_board,
        )?;
        match_results.push(((i1, i2), match_score));
    }

    if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &match_results);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    // Narration goes to stderr, the results table to stdout
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
