//! Command line interface.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels usable with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// Everything
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

/// What escaped rays contribute to the image
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BackgroundKind {
    /// No environment contribution; lights alone illuminate the scene
    Black,
    /// White-to-blue gradient sky
    Sky,
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "prismpath")]
#[command(about = "An offline CPU path tracer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800", help = "Image width in pixels")]
    pub width: u32,

    /// Image aspect ratio (width over height)
    #[arg(long, default_value = "1.0", help = "Image aspect ratio (width over height)")]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "200", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value = "25", help = "Maximum number of ray bounces")]
    pub max_depth: u32,

    /// Seed for the random sampler; renders with the same seed are
    /// reproducible byte for byte
    #[arg(long, help = "Seed for the random sampler (random if omitted)")]
    pub seed: Option<u64>,

    /// Background strategy for rays that leave the scene
    #[arg(long, default_value = "black", help = "Background for rays that leave the scene")]
    pub background: BackgroundKind,

    /// Send image to TEV for real-time visualization
    #[arg(long, help = "Send image to TEV for real-time visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(
        short,
        long,
        default_value = "output.png",
        help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)"
    )]
    pub output: String,
}
