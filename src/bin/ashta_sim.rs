//! Random self-play from the command line.
//!
//! ```text
//! ashta-sim --games 100 --players 4 --teams --seed 7
//! ```

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;

use ashta_engine::{play_games, GameConfig, GameResult, GameSummary, SimConfig};

#[derive(Parser)]
#[command(
    version,
    about = "Play seeded random Ashta Chamma games and report the results",
    long_about = None
)]
struct Args {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Seats per game (2 or 4).
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Play 2 vs 2 teams (needs 4 players).
    #[arg(short, long)]
    teams: bool,

    /// Dice seed.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Abandon a game after this many moves.
    #[arg(short, long, default_value_t = 5_000)]
    max_moves: u32,

    /// Print one JSON line per game instead of the summary.
    #[arg(long)]
    json: bool,
}

fn report(summaries: &[GameSummary]) {
    let mut wins: BTreeMap<String, usize> = BTreeMap::new();
    let mut abandoned = 0;
    for summary in summaries {
        match &summary.result {
            Some(GameResult::Winner(player)) => *wins.entry(player.to_string()).or_default() += 1,
            Some(GameResult::Team { team, .. }) => {
                *wins.entry(format!("Team {}", team.0)).or_default() += 1;
            }
            None => abandoned += 1,
        }
    }

    let total = summaries.len().max(1) as f64;
    for (winner, count) in &wins {
        println!("{winner}: {count} wins ({:.1}%)", 100.0 * *count as f64 / total);
    }
    if abandoned > 0 {
        println!("abandoned: {abandoned}");
    }

    let moves: u32 = summaries.iter().map(|s| s.moves).sum();
    let captures: u32 = summaries.iter().map(|s| s.captures).sum();
    let passes: u32 = summaries.iter().map(|s| s.passes).sum();
    println!(
        "avg moves {:.1}, avg captures {:.1}, avg passes {:.1}",
        f64::from(moves) / total,
        f64::from(captures) / total,
        f64::from(passes) / total
    );
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut game = GameConfig::new(args.players);
    if args.teams {
        game = game.with_team_mode();
    }
    let config = SimConfig::new()
        .with_game(game)
        .with_max_moves(args.max_moves)
        .with_seed(args.seed);

    log::info!("running {} games with {} players", args.games, args.players);
    let summaries = match play_games(&config, args.games) {
        Ok(summaries) => summaries,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        for summary in &summaries {
            match serde_json::to_string(summary) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    } else {
        report(&summaries);
    }
    ExitCode::SUCCESS
}
