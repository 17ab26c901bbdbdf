mod cli;
mod config;
mod counts;
mod error;
mod location;
mod output;
mod process;

#[macro_use]
extern crate log;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli().with_context(|| "Error processing command line arguments")?;
    process::compile_sets(&cfg)
}
