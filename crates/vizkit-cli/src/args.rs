//! Command-line argument definitions for the vizkit CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the model to render; the shared
//! [`StepArgs`] choose how far the model is driven before the scene is
//! exported.

use clap::{Parser, Subcommand};
use log::{LevelFilter, ParseLevelError};

use vizkit_models::{DEFAULT_LAYER_SIZES, DEFAULT_POINT_COUNT};

/// Command-line arguments for the vizkit renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// The model to render.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a feedforward neural network mid forward pass
    Network(NetworkArgs),

    /// Render data points travelling through a decision tree
    Tree(TreeArgs),
}

/// Options shared by every model subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct StepArgs {
    /// Step to render, clamped to the model's last step
    #[arg(short, long, default_value_t = 0)]
    pub step: usize,

    /// Seed for the model's random values
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Render the step as it looks before its animation finishes
    #[arg(long)]
    pub pending: bool,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Neurons per layer, input layer first
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_LAYER_SIZES)]
    pub layers: Vec<usize>,

    /// Position of travelling signals along their connections (0 to 1)
    #[arg(long)]
    pub progress: Option<f64>,

    #[command(flatten)]
    pub run: StepArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TreeArgs {
    /// Number of random data points
    #[arg(long, default_value_t = DEFAULT_POINT_COUNT)]
    pub points: usize,

    #[command(flatten)]
    pub run: StepArgs,
}

impl Args {
    /// The `--log-level` value as a logger filter.
    pub fn log_filter(&self) -> Result<LevelFilter, ParseLevelError> {
        self.log_level.parse()
    }
}

impl Command {
    /// Options shared by every subcommand.
    pub fn run_args(&self) -> &StepArgs {
        match self {
            Command::Network(args) => &args.run,
            Command::Tree(args) => &args.run,
        }
    }
}
