#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;
use argh::FromArgs;
use core::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs, Debug)]
/// Inspects the memory layout of GPU surfaces
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Describe(commands::describe::DescribeCmd),
    Spans(commands::spans::SpansCmd),
    Offset(commands::offset::OffsetCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli: TopLevel = argh::from_env();

    match cli.command {
        Commands::Describe(cmd) => {
            commands::describe::handle_describe_command(cmd)?;
        }
        Commands::Spans(cmd) => {
            commands::spans::handle_spans_command(cmd)?;
        }
        Commands::Offset(cmd) => {
            commands::offset::handle_offset_command(cmd)?;
        }
    }

    Ok(())
}
