use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::grid::{Grid, GridInt};

pub const DEFAULT_WIDTH: GridInt = 32;
pub const DEFAULT_HEIGHT: GridInt = 24;
pub const DEFAULT_SPEED: u32 = 20;

/// Classic snake on a wrap-around board.
#[derive(Parser, Debug)]
#[command(name = "snake", version, about)]
pub struct Args {
    /// Board width in cells.
    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_WIDTH,
          value_parser = clap::value_parser!(u16).range(2..=200))]
    pub width: GridInt,
    /// Board height in cells.
    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_HEIGHT,
          value_parser = clap::value_parser!(u16).range(2..=200))]
    pub height: GridInt,
    /// Game ticks per second.
    #[arg(long, value_name = "TICKS", default_value_t = DEFAULT_SPEED,
          value_parser = clap::value_parser!(u32).range(1..=120))]
    pub speed: u32,
    /// File finished games are appended to.
    #[arg(long, value_name = "PATH", default_value = "snake_result.txt")]
    pub score_file: PathBuf,
    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Diagnostic log file. The terminal is busy drawing the board.
    #[arg(long, value_name = "PATH", default_value = "snake.log")]
    pub log_file: PathBuf,
    /// Lowest level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid: Grid,
    pub speed: u32,
    pub score_file: PathBuf,
    pub seed: Option<u64>,
}

impl From<&Args> for GameConfig {
    fn from(args: &Args) -> Self {
        GameConfig {
            grid: Grid::new(args.width, args.height),
            speed: args.speed,
            score_file: args.score_file.clone(),
            seed: args.seed,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid: Grid::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            speed: DEFAULT_SPEED,
            score_file: PathBuf::from("snake_result.txt"),
            seed: None,
        }
    }
}
