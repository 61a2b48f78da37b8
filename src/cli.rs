use clap::Parser;
use std::path::PathBuf;

use crate::testbench::DEFAULT_MAX_TICKS;

/// Run a tick-level contrast stretch controller over a grayscale image
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input image (any format the image crate decodes)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image path [default: <INPUT stem>.stretched.png]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Tick budget for each pass
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    pub max_ticks: u64,

    /// Run this many back-to-back passes over the same memory
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub passes: u32,

    /// Downscale images that do not fit controller memory
    #[arg(long)]
    pub fit: bool,

    /// Show the original and stretched image in the terminal
    #[arg(short, long)]
    pub show: bool,

    /// Print a report for each pass
    #[arg(short, long)]
    pub verbose: bool,

    /// Print controller signals for every tick
    #[arg(long)]
    pub trace: bool,
}
