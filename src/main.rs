//! kanafold CLI entry point

use clap::Parser;
use kanafold::cli::{Command, GlobalOptions, args::Cli};
use std::process;
use tracing::Level;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = GlobalOptions {
        config: cli.config,
        color: cli.color,
    };

    let exit_code = match cli.command {
        Command::Normalize { kind, files } => {
            kanafold::cli::normalize::run_normalize(kind, &files, &options)
        }
        Command::Check {
            paths,
            kind,
            format,
        } => kanafold::cli::check::run_check(&paths, kind, format, &options),
        Command::List { kind, format } => kanafold::cli::list::run_list(kind, format, &options),
        Command::Init { force } => match kanafold::cli::init::run_init(force) {
            Ok(outcome) => {
                use kanafold::cli::init::InitOutcome;
                match outcome {
                    InitOutcome::Created => println!("Created kanafold.toml."),
                    InitOutcome::Overwritten => println!("Overwrote kanafold.toml."),
                    InitOutcome::Skipped => {
                        println!("kanafold.toml already exists. Use --force to overwrite it.")
                    }
                }
                kanafold::cli::EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                kanafold::cli::EXIT_ERROR
            }
        },
    };

    process::exit(exit_code);
}
