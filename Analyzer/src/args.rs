// File: args.rs
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dash_manifest::FetchOptions;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum LogLevel {
    Trace = 0, // Designates very fine-grained informational events, extremely verbose.
    Debug = 1, // Designates fine-grained informational events.
    Info = 2, // Designates informational messages.
    Warn = 3, // Designates hazardous situations.
    Error = 4, // Designates very serious errors.
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Manifest Analyzer - DASH playlist analysis tool",
    long_about = "Fetches a DASH MPD manifest and prints a JSON summary of its audio and video streams.",
    after_help = "Example:\n  manifest-analyzer -p https://demo.unified-streaming.com/k8s/features/stable/video/tears-of-steel/tears-of-steel.ism/.mpd"
)]
pub struct Args {
    /// Playlist to analyze: an http(s) URL, a file:// URL or a local path
    #[arg(short, long)]
    pub playlist: String,
    /// Overall deadline in seconds, also used as the HTTP timeout
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout(),
            ..FetchOptions::default()
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn get_log_level_filter(args: &Args) -> LevelFilter {
    // Map the LogLevel enum to the LevelFilter enum
    match args.log_level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}
