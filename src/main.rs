//! # Stagecraft Command Line
//!
//! Generates levels and prints them as the runtime's JSON grid, an ASCII
//! preview or a generation report.

use clap::{Parser, ValueEnum};
use log::{info, warn};
use stagecraft::generation::utils;
use stagecraft::{
    config, AsciiRenderer, GenerationConfig, LevelGenerator, PipelineStage, StageError,
    StageResult,
};
use std::path::PathBuf;

/// Output format for generated levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The grid as a JSON array of rows of tile codes
    Json,
    /// Character preview with a column ruler
    Ascii,
    /// Pass-by-pass summary
    Report,
}

/// Pipeline stage to stop after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StageArg {
    Structure,
    Goal,
    Safety,
    SteppingStones,
    Coins,
}

impl From<StageArg> for PipelineStage {
    fn from(stage: StageArg) -> Self {
        match stage {
            StageArg::Structure => PipelineStage::Structure,
            StageArg::Goal => PipelineStage::Goal,
            StageArg::Safety => PipelineStage::Safety,
            StageArg::SteppingStones => PipelineStage::SteppingStones,
            StageArg::Coins => PipelineStage::Coins,
        }
    }
}

/// Command line arguments for the level generator.
#[derive(Parser, Debug)]
#[command(name = "stagecraft")]
#[command(about = "Deterministic platformer level generator")]
#[command(version)]
struct Args {
    /// Level number to generate (1-based)
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Generate every level from --level up to this one
    #[arg(long)]
    to: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Stop after this pipeline stage
    #[arg(long, value_enum, default_value_t = StageArg::Coins)]
    stage: StageArg,

    /// JSON file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Check structural guarantees and fail on the first violation
    #[arg(long)]
    validate: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> StageResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting stagecraft v{}", stagecraft::VERSION);

    let generation_config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::new(),
    };
    let generator = LevelGenerator::new(generation_config)?;

    let last = args.to.unwrap_or(args.level);
    if last < args.level {
        return Err(StageError::InvalidConfig(format!(
            "--to {} is before --level {}",
            last, args.level
        )));
    }
    if last > config::MAX_LEVEL {
        warn!("levels above {} are not offered by the game", config::MAX_LEVEL);
    }

    let stage = PipelineStage::from(args.stage);
    let renderer = AsciiRenderer::new().with_ruler();

    for level_number in args.level..=last {
        let level = generator.generate_through(level_number, stage)?;

        if args.validate {
            if stage >= PipelineStage::Goal {
                utils::validate_level(&level.grid)?;
                info!("level {level_number} passed validation");
            } else {
                warn!("level {level_number}: nothing to validate before the goal stage");
            }
        }

        match args.format {
            OutputFormat::Json => println!("{}", level.serialized_grid()?),
            OutputFormat::Ascii => {
                println!(
                    "Level {} ({})",
                    level_number, level.report.display_theme
                );
                print!("{}", renderer.render(&level.grid));
            }
            OutputFormat::Report => print!("{}", renderer.render_report(&level.report)),
        }
    }

    Ok(())
}

/// Initializes `env_logger`. `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}
