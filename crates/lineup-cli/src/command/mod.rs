use clap::{Parser, Subcommand};

pub(crate) use self::optimize::OptimizeMode;

use self::optimize::OptimizeArg;

mod optimize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for the best lineup from a player pool
    Optimize(#[clap(flatten)] OptimizeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Optimize(arg) => optimize::run(&arg)?,
    }
    Ok(())
}
