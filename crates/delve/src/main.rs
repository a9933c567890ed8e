//! Dungeon generator command line
//!
//! Builds options from an optional JSON file plus flags, generates one
//! dungeon and prints it as text or JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use delve_core::{Dungeon, GenerateError, GeneratorOptions};
use log::{error, info};
use thiserror::Error;

/// Rooms-and-mazes dungeon generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a rooms-and-mazes dungeon", long_about = None)]
struct Args {
    /// JSON options file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid height in tiles
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Grid width in tiles
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Seed string; identical seeds give identical dungeons
    #[arg(short = 's', long = "seed")]
    seed: Option<String>,

    /// Number of room placement attempts
    #[arg(short = 't', long = "room-tries")]
    room_tries: Option<u32>,

    /// Widens the room size distribution
    #[arg(short = 'e', long = "extra-room-size")]
    extra_room_size: Option<u32>,

    /// Chance (0-100) that a corridor turns instead of running straight
    #[arg(short = 'w', long = "winding")]
    winding: Option<u32>,

    /// Index given to the first room
    #[arg(long = "start-index", allow_negative_numbers = true)]
    start_index: Option<i64>,

    /// Carve junctions as plain path instead of doors
    #[arg(long = "no-doors")]
    no_doors: bool,

    /// Open redundant connectors with a one-in-N chance
    #[arg(short = 'x', long = "extra-connector-chance")]
    extra_connector_chance: Option<u32>,

    /// Print the dungeon as JSON instead of text
    #[arg(long = "json")]
    json: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode dungeon: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl Args {
    /// Options from the config file (or defaults) with flags applied on top
    fn options(&self) -> Result<GeneratorOptions, CliError> {
        let mut opts = match &self.config {
            Some(path) => load_options(path)?,
            None => GeneratorOptions::default(),
        };

        if let Some(height) = self.height {
            opts.height = height;
        }
        if let Some(width) = self.width {
            opts.width = width;
        }
        if let Some(seed) = &self.seed {
            opts.seed = seed.clone();
        }
        if let Some(tries) = self.room_tries {
            opts.room_tries = tries;
        }
        if let Some(extra) = self.extra_room_size {
            opts.extra_room_size = extra;
        }
        if let Some(winding) = self.winding {
            opts.winding_percent = winding;
        }
        if let Some(index) = self.start_index {
            opts.start_index = index;
        }
        if self.no_doors {
            opts.doors = false;
        }
        if self.extra_connector_chance.is_some() {
            opts.extra_connector_chance = self.extra_connector_chance;
        }

        Ok(opts)
    }
}

fn load_options(path: &Path) -> Result<GeneratorOptions, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let opts = args.options()?;
    info!(
        "generating {}x{} dungeon, seed {:?}",
        opts.width, opts.height, opts.seed
    );

    let dungeon = Dungeon::generate(&opts)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&dungeon)?);
    } else {
        for row in dungeon.glyph_rows() {
            println!("{row}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
