use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels usable as a clap value enum.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "pathlight")]
#[command(about = "A stochastic path tracer for sphere scenes")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "225")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "500")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces per sample
    #[arg(long, default_value = "50")]
    pub max_depth: u32,

    /// Gamma value used when quantizing to 8-bit output
    #[arg(long, default_value = "2.0")]
    pub gamma: f32,

    /// RNG seed for reproducible renders (omit for a fresh image every run)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.ppm, .png, or .exr for HDR linear)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: String,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
