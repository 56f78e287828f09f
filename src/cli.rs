use std::path::PathBuf;

use clap::Parser;

use huepick::output::OutputFormat;
use huepick::pipeline::extract::{DEFAULT_MAX_COLORS, DEFAULT_RESIZE_AREA};

/// Extract a swatch palette from an image.
#[derive(Parser, Debug)]
#[command(name = "huepick", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Maximum number of swatches
    #[arg(short = 'k', long = "colors", default_value_t = DEFAULT_MAX_COLORS)]
    pub colors: usize,

    /// Sample the image on a grid when it has more pixels than this (0 = never)
    #[arg(long, default_value_t = DEFAULT_RESIZE_AREA)]
    pub resize_area: u64,

    /// Ignore near-black, near-white and skin-tone colors
    #[arg(long)]
    pub filter: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the palette to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a colored terminal preview of the swatches
    #[arg(long)]
    pub preview: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
