use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "prismpath")]
#[command(about = "A Monte Carlo path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "1200", help = "Image width in pixels")]
    pub width: u32,

    /// Image aspect ratio (width over height)
    #[arg(long, default_value_t = 16.0 / 9.0, help = "Image aspect ratio (width over height)")]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value = "50", help = "Maximum number of ray bounces")]
    pub max_depth: u32,

    /// Base RNG seed; seeds both scene generation and per-pixel sampling
    /// for reproducible renders
    #[arg(long, help = "Base RNG seed for reproducible renders")]
    pub seed: Option<u64>,

    /// Output file path (.ppm for ASCII PPM, .png for 8-bit PNG)
    #[arg(
        short,
        long,
        default_value = "output.ppm",
        help = "Output file path (.ppm for ASCII PPM, .png for 8-bit PNG)"
    )]
    pub output: String,
}
