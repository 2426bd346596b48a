#![deny(unsafe_code)]

mod cli;

use clap::Parser as _;

use webanalyst::{Config, Runner};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // RUST_LOG takes precedence over the verbosity flag.
    env_logger::Builder::new()
        .filter_level(args.verbose.into())
        .parse_default_env()
        .init();

    let config = Config {
        paths: args.paths,
        verbosity: args.verbose.into(),
        dump: args.dump,
    };

    Runner::new(config).run()?;
    Ok(())
}
