use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use blockfall::{
    constants::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_TICKS_PER_SECOND},
    GameConfig,
};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    pub width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    pub height: usize,

    /// Game ticks per second
    #[arg(long = "tps", default_value_t = DEFAULT_TICKS_PER_SECOND)]
    pub ticks_per_second: u32,

    /// Seed for a reproducible piece sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            ticks_per_second: self.ticks_per_second,
            seed: self.seed,
        }
    }

    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

pub fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = args.level();

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .init();

    info!("logging initialized at level {level}");
    Ok(())
}
