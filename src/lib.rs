#![deny(unsafe_code)]

pub mod analysis;
mod app;
pub mod css;
mod error;
mod utils;

pub use app::{extract_style_tags, Config, Runner, VerbosityLevel};
pub use error::{Error, Result};
