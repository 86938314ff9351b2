mod backend;
mod config;
mod food;
mod game;
mod grid;
mod score;
mod snake;
mod term;

use std::fs::File;

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::WriteLogger;

use crate::backend::FixedRateClock;
use crate::config::{Args, GameConfig};
use crate::game::{GameContext, SnakeGame};
use crate::score::ScoreLog;
use crate::term::TermManager;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, simplelog::Config::default(), log_file)
        .context("failed to initialize logger")?;

    let config = GameConfig::from(&args);
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting snake, food seed {}, scores go to {}", seed, config.score_file.display());

    // Dropping the game hands the terminal back, on quit and on error alike
    let term = TermManager::open(config.grid)?;
    let ctx = GameContext {
        backend: term,
        clock: FixedRateClock::new(),
        rng: StdRng::seed_from_u64(seed),
        scores: ScoreLog::new(&config.score_file),
    };

    let mut game = SnakeGame::new(&config, ctx)?;
    game.run()?;

    Ok(())
}
