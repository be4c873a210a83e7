//! Snipcheck CLI entry point.

use clap::Parser;
use snipcheck::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Check(args) => cli::run_check(args),
        Commands::Fmt(args) => cli::run_fmt(args),
        Commands::Explain(args) => cli::run_explain(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
