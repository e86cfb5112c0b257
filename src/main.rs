//! Main entry point for the popcsq CLI.

use clap::{Args, Parser, Subcommand};

use popcsq::{annotate, common, freqs};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Population allele frequencies and consequence classification"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Population frequency related commands.
    Freqs(Freqs),
    /// Consequence related commands.
    Csq(Csq),
}

/// Parsing of "freqs *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Freqs {
    /// The sub command to run
    #[command(subcommand)]
    command: FreqsCommands,
}

/// Enum supporting the parsing of "freqs *" sub commands.
#[derive(Debug, Subcommand)]
enum FreqsCommands {
    Import(freqs::Args),
}

/// Parsing of "csq *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Csq {
    /// The sub command to run
    #[command(subcommand)]
    command: CsqCommands,
}

/// Enum supporting the parsing of "csq *" sub commands.
#[derive(Debug, Subcommand)]
enum CsqCommands {
    Classify(annotate::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(cli.common.tracing_level())
        .compact()
        .finish();

    // Install collector and go into sub commands.
    tracing::subscriber::with_default(collector, || {
        tracing::info!("popcsq {} startup", common::version());

        match &cli.command {
            Commands::Freqs(cmd) => match &cmd.command {
                FreqsCommands::Import(args) => freqs::run(&cli.common, args)?,
            },
            Commands::Csq(cmd) => match &cmd.command {
                CsqCommands::Classify(args) => annotate::run(&cli.common, args)?,
            },
        }

        tracing::info!("All done. Have a nice day!");

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
