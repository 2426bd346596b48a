use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Parse CSS and report selectors, specificity and at-rules",
    long_about = None
)]
pub struct Args {
    #[arg(
        required = true,
        value_name = "PATH",
        help = "CSS files, or HTML files whose <style> elements are analyzed"
    )]
    pub paths: Vec<PathBuf>,

    #[arg(
        long,
        short,
        default_value_t = VerbosityLevel::Quiet,
        value_name = "LEVEL",
        help = "Set the verbosity level"
    )]
    pub verbose: VerbosityLevel,

    #[arg(long, help = "Dump the whole parsed model of each stylesheet")]
    pub dump: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
}

impl std::fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VerbosityLevel::Quiet => write!(f, "quiet"),
            VerbosityLevel::Normal => write!(f, "normal"),
            VerbosityLevel::Verbose => write!(f, "verbose"),
        }
    }
}

impl From<VerbosityLevel> for webanalyst::VerbosityLevel {
    fn from(level: VerbosityLevel) -> Self {
        match level {
            VerbosityLevel::Quiet => webanalyst::VerbosityLevel::Quiet,
            VerbosityLevel::Normal => webanalyst::VerbosityLevel::Normal,
            VerbosityLevel::Verbose => webanalyst::VerbosityLevel::Verbose,
        }
    }
}

impl From<VerbosityLevel> for LevelFilter {
    fn from(level: VerbosityLevel) -> Self {
        match level {
            VerbosityLevel::Quiet => LevelFilter::Error,
            VerbosityLevel::Normal => LevelFilter::Info,
            VerbosityLevel::Verbose => LevelFilter::Debug,
        }
    }
}
