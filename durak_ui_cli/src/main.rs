use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};

use args::Args;
use cli_player::CliPlayer;
use durak_core::{player::Player, random_player::RandomPlayer, run_game};
use summary::Summary;

mod args;
mod cli_player;
mod summary;

/// `human` takes seat 0 when given.
fn seat_players<R: Rng>(args: &Args, human: Option<&str>, rng: &mut R) -> Vec<Box<dyn Player>> {
    (0..args.players as usize)
        .map(|id| -> Box<dyn Player> {
            match human {
                Some(name) if id == 0 => Box::new(CliPlayer::new(id, name.to_string())),
                _ => Box::new(RandomPlayer::with_seed(id, rng.gen())),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .init();

    let rules = args.rules();
    rules
        .validate(args.players as usize)
        .context("Invalid table setup")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let human = args.human.then(CliPlayer::ask_name);
    let mut summary = Summary::new(args.players as usize);
    for game in 0..args.games {
        let players = seat_players(&args, human.as_deref(), &mut rng);
        let result = run_game(players, rules.clone(), &mut rng)
            .with_context(|| format!("Game {} failed", game + 1))?;
        log::info!("Game {} finished: {}", game + 1, result);
        if !args.json {
            println!("---------------{}----------------", result);
        }
        summary.record(result);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}
