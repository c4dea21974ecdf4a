//! volcloud - synthetic volumetric point cloud generator
//!
//! Samples points uniformly inside a ball, a cube, or a cube with a
//! cylindrical through-hole, optionally with per-point normals, and writes
//! them as PLY, XYZ or NumPy arrays.
//!
//! # Commands
//!
//! - `volcloud generate <SHAPE>` - Sample a point cloud and save it
//! - `volcloud check <SHAPE>` - Validate parameters without sampling
//!
//! # Examples
//!
//! ```text
//! volcloud generate ball --n 2000000 --radius 10
//! volcloud generate cube_hole --side 10 --hole-radius 1 --axis z --normals --format xyz
//! volcloud --config cloud.toml generate
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cloud_core::shape::{HoleAxis, ShapeKind};
use cloud_io::{OutputFormat, Precision};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::GeneratorConfig;
pub use error::{CliError, Result};

/// Synthetic volumetric point cloud generator
#[derive(Parser)]
#[command(name = "volcloud")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file; command-line flags take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a point cloud and write it to disk
    Generate(GenerateArgs),

    /// Validate parameters and report the planned run without sampling
    Check(GenerateArgs),
}

/// Generation parameters; unset flags fall back to the config file or defaults
#[derive(Args, Debug, Default, Clone)]
struct GenerateArgs {
    /// Shape: ball, cube or cube_hole [default: ball]
    shape: Option<ShapeKind>,

    /// Number of points [default: 2000000]
    #[arg(short, long, visible_alias = "N")]
    n: Option<usize>,

    /// Ball radius [default: 10]
    #[arg(long)]
    radius: Option<f64>,

    /// Cube side length [default: 10]
    #[arg(long)]
    side: Option<f64>,

    /// Cylinder hole radius, must be below side/2 [default: 1]
    #[arg(long)]
    hole_radius: Option<f64>,

    /// Cylinder hole axis: x, y or z [default: z]
    #[arg(long)]
    axis: Option<HoleAxis>,

    /// RNG seed [default: 42]
    #[arg(long)]
    seed: Option<u64>,

    /// Output precision: float16, float32 or float64 [default: float32]
    #[arg(long)]
    dtype: Option<Precision>,

    /// Estimate per-point normals
    #[arg(long)]
    normals: bool,

    /// Output format: ply, xyz or npy (npz when normals are stored) [default: ply]
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Output base path; extensions are added per format
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Suppress per-round sampling progress
    #[arg(long)]
    no_progress: bool,
}

impl GenerateArgs {
    /// Overlay the flags that were given onto `config`
    fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(shape) = self.shape {
            config.shape = shape;
        }
        if let Some(n) = self.n {
            config.n = n;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(hole_radius) = self.hole_radius {
            config.hole_radius = hole_radius;
        }
        if let Some(axis) = self.axis {
            config.axis = axis;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dtype) = self.dtype {
            config.dtype = dtype;
        }
        if self.normals {
            config.normals = true;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(out) = &self.out {
            config.out = Some(out.clone());
        }
        if self.no_progress {
            config.progress = false;
        }
        config
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let args = match &cli.command {
        Commands::Generate(args) | Commands::Check(args) => args,
    };
    let mut config = args.apply(base.with_env_override());
    if cli.verbose {
        config.log_level = "debug".to_string();
    }
    config.validate()?;

    init_tracing(&config.log_level);
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Generate(_) => commands::generate::run(&config).map(|_| ()),
        Commands::Check(_) => commands::check::run(&config),
    }
}
