//! Relative Layout CLI
//!
//! Usage:
//!   relative-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -d, --debug      Solve after every change to report ambiguity early
//!   -e, --equations  Also print the assembled equation system
//!   -v, --verbose    Increase log verbosity (repeatable)
//!   -h, --help       Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use relative_layout::layout::set_debug_mode;
use relative_layout::{solve, LayoutDocument, SolveError};

#[derive(Parser)]
#[command(name = "relative-layout")]
#[command(about = "Solve a relative layout document and print entity bounds")]
struct Cli {
    /// Layout document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Debug mode: solve after every change to the equation system
    #[arg(short, long)]
    debug: bool,

    /// Print the assembled equation system after the bounds
    #[arg(short, long)]
    equations: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if cli.debug {
        set_debug_mode(true);
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let document = match LayoutDocument::parse(&source) {
        Ok(document) => document,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    match solve(document) {
        Ok(solved) => {
            for (entity, bounds) in solved.bounds.iter() {
                println!(
                    "{} {} {} {} {}",
                    entity, bounds.x, bounds.y, bounds.width, bounds.height
                );
            }
            if cli.equations {
                if let Some(system) = solved.layout.system() {
                    println!();
                    print!("{}", system);
                }
            }
        }
        Err(SolveError::Document(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
