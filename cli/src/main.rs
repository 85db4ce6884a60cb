//! DITA export command-line tool

mod commands;

use clap::{Parser, Subcommand};
use commands::{export, table, validate, ExportArgs, TableCommand, ValidateArgs};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Edit tables in editor snapshots and export them as DITA XML
#[derive(Parser, Debug)]
#[command(name = "dita-export")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a JSON snapshot to a DITA topic
    Export(ExportArgs),

    /// Table edits on a JSON snapshot
    Table {
        #[command(subcommand)]
        command: TableCommand,
    },

    /// Report structural problems in a JSON snapshot
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Export(args) => export(args).map(|()| ExitCode::SUCCESS),
        Command::Table { command } => table(command).map(|()| ExitCode::SUCCESS),
        Command::Validate(args) => validate(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
