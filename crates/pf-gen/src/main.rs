use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pf_gen::args::ConfigArgs;

mod cmd_config;
mod cmd_gen;
mod cmd_scenarios;

#[derive(Parser)]
#[command(name = "pfgen", about = "Potential failures test data generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset, print its summary and write the output files
    Gen {
        #[command(flatten)]
        args: ConfigArgs,
    },
    /// List scenario presets, built-in and user-defined
    Scenarios {
        /// Generator TOML file whose [scenarios.*] tables are listed too
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Print or save the resolved configuration as TOML
    Config {
        #[command(flatten)]
        args: ConfigArgs,

        /// Write the configuration to this file instead of stdout
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gen { args } => cmd_gen::run(args),
        Commands::Scenarios { config } => cmd_scenarios::run(config),
        Commands::Config { args, save } => cmd_config::run(args, save),
    }
}
