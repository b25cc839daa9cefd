use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A direct-lighting ray caster")]
pub struct Args {
    /// Disable anti-aliasing and cast one ray through each pixel center
    #[arg(short, long)]
    pub debug: bool,

    /// Image width in pixels
    #[arg(long, default_value_t = 200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 200)]
    pub height: u32,

    /// Horizontal cells of the anti-aliasing grid
    #[arg(long, default_value_t = 4)]
    pub h_samples: u32,

    /// Vertical cells of the anti-aliasing grid
    #[arg(long, default_value_t = 4)]
    pub v_samples: u32,

    /// Seed for the sample jitter
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Scene description (JSON); the built-in demo scene is used when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image path (.png, .jpg, or any extension the image crate knows)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    pub sequential: bool,

    /// Bucket edge length in pixels for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Print the scene description as JSON and exit without rendering
    #[arg(long)]
    pub print_scene: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings selected by the flags.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.width, self.height)
            .with_antialiasing(!self.debug)
            .with_samples(self.h_samples, self.v_samples)
            .with_seed(self.seed)
            .with_parallel(!self.sequential)
            .with_bucket_size(self.bucket_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_config() {
        let args = Args::parse_from(["prism"]);
        assert_eq!(args.render_config(), RenderConfig::default());
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(args.scene.is_none());
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "prism",
            "-d",
            "--width",
            "320",
            "--height",
            "240",
            "--h-samples",
            "2",
            "--v-samples",
            "3",
            "--seed",
            "7",
            "-s",
            "scene.json",
            "-o",
            "out.jpg",
            "--sequential",
            "--bucket-size",
            "16",
            "--log-level",
            "debug",
        ]);

        let config = args.render_config();
        assert!(!config.antialias);
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!((config.h_samples, config.v_samples), (2, 3));
        assert_eq!(config.seed, 7);
        assert!(!config.parallel);
        assert_eq!(config.bucket_size, 16);
        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(args.output, PathBuf::from("out.jpg"));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
