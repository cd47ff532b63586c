use anyhow::{Result, ensure};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameEngine, parse_script};
use grid_snake::modes::{HeadlessMode, HumanMode};
use log::debug;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a 10x10 grid")]
struct Cli {
    /// How to drive the game
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Headless only: one turn per tick, U/D/L/R or '.' for no turn
    #[arg(long, default_value = "")]
    script: String,

    /// Headless only: number of ticks to play (defaults to the script length)
    #[arg(long)]
    max_ticks: Option<usize>,

    /// Headless only: write JSON lines here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in the terminal with the keyboard
    Human,
    /// Replay a script and print one JSON snapshot per tick
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = GameConfig::default();
    debug!("starting with {config:?}");

    match cli.mode {
        Mode::Human => {
            ensure!(
                cli.script.is_empty() && cli.max_ticks.is_none() && cli.output.is_none(),
                "--script, --max-ticks and --output only apply to --mode headless"
            );
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let script = parse_script(&cli.script)?;
            let engine = match cli.seed {
                Some(seed) => GameEngine::with_seed(config, seed)?,
                None => GameEngine::new(config)?,
            };
            let mut headless_mode = HeadlessMode::new(engine, script, cli.max_ticks);
            headless_mode.run_to(cli.output.as_deref())?;
        }
    }

    Ok(())
}
