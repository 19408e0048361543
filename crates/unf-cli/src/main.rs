//! UNF CLI - compute, combine and inspect Universal Numeric Fingerprints.

use clap::{Parser, Subcommand};
use tracing::Level;

mod commands;
mod output;

use commands::{compose, dataset, inspect, vector};

#[derive(Parser)]
#[command(name = "unf")]
#[command(version)]
#[command(about = "Universal Numeric Fingerprints for data vectors")]
struct Cli {
    /// Only report errors on stderr
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fingerprint one vector, one value per line
    Vector {
        /// Input file (or stdin if not provided)
        input: Option<String>,
        /// Vector type: character, integer, real or unf
        #[arg(short = 't', long = "type", default_value = "character")]
        vector_type: String,
        /// Digits of precision (numeric types) or bytes kept (character)
        #[arg(short, long)]
        digits: Option<i32>,
        /// Algorithm version
        #[arg(short = 'a', long = "algorithm", default_value = "4.1")]
        version: String,
        /// Also print the parsed inputs of a unf vector
        #[arg(long)]
        components: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fingerprint several columns and their composite
    Dataset {
        /// Columns as TYPE:PATH
        #[arg(required = true)]
        columns: Vec<String>,
        /// Algorithm version
        #[arg(short = 'a', long = "algorithm", default_value = "4.1")]
        version: String,
        /// Digits of precision for numeric columns
        #[arg(short = 'n', long)]
        ndigits: Option<i32>,
        /// Bytes kept for character columns
        #[arg(short = 'c', long)]
        cdigits: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Combine UNF strings into one composite fingerprint
    Compose {
        /// UNF strings
        #[arg(required = true)]
        unfs: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the parts of a UNF string
    Inspect {
        /// UNF string
        unf: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(quiet: bool) {
    let level = if quiet { Level::ERROR } else { Level::WARN };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match cli.command {
        Commands::Vector {
            input,
            vector_type,
            digits,
            version,
            components,
            json,
        } => vector::run(input, vector_type, digits, version, components, json),
        Commands::Dataset {
            columns,
            version,
            ndigits,
            cdigits,
            json,
        } => dataset::run(columns, version, ndigits, cdigits, json),
        Commands::Compose { unfs, json } => compose::run(unfs, json),
        Commands::Inspect { unf, json } => inspect::run(unf, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
