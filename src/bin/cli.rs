//! fieldkit CLI
//!
//! Applies one keyed-collection operation to pairs given on the command line.
//!
//! ```text
//! fieldkit-cli -p a=1 -p b=2 -p a=3 get-all a
//! fieldkit-cli -p a=1 -p a=3 put a 9
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fieldkit::{KeyedCollection, Result};
use tracing_subscriber::{fmt, EnvFilter};

type Pairs = KeyedCollection<String, String>;

/// fieldkit CLI
#[derive(Parser, Debug)]
#[command(name = "fieldkit-cli")]
#[command(about = "Inspect and edit key/value pairs through fieldkit")]
#[command(version)]
struct Args {
    /// Treat the input as a unique-key mapping instead of a pair sequence
    #[arg(short, long)]
    mapping: bool,

    /// Input pair as key=value (repeatable, order preserved)
    #[arg(short, long = "pair", value_parser = parse_pair)]
    pairs: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the first value for a key
    Fetch {
        /// The key to look up
        key: String,
    },

    /// Print every value for a key, in order
    GetAll {
        /// The key to look up
        key: String,
    },

    /// Set a key (collapsing duplicates) and print the result
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Remove every occurrence of a key and print the result
    Delete {
        /// The key to delete
        key: String,
    },

    /// Update every occurrence of an existing key and print the result
    Replace {
        /// The key to update
        key: String,

        /// The new value
        value: String,
    },

    /// Print the keys
    Keys,
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

fn print_pairs(collection: &Pairs) {
    for (key, value) in collection.iter() {
        println!("{}={}", key, value);
    }
}

fn run(args: Args) -> Result<()> {
    let input: Pairs = if args.mapping {
        KeyedCollection::PairSequence(args.pairs).into_mapping().into()
    } else {
        KeyedCollection::PairSequence(args.pairs)
    };

    tracing::debug!(pairs = input.len(), mapping = input.is_mapping(), "Loaded input");

    match args.command {
        Commands::Fetch { key } => println!("{}", input.try_fetch(key.as_str())?),
        Commands::GetAll { key } => {
            for value in input.get_all(key.as_str()) {
                println!("{}", value);
            }
        }
        Commands::Put { key, value } => print_pairs(&input.put(key, value)),
        Commands::Delete { key } => print_pairs(&input.delete(key.as_str())),
        Commands::Replace { key, value } => {
            print_pairs(&input.try_replace(key.as_str(), value)?)
        }
        Commands::Keys => {
            for key in input.keys() {
                println!("{}", key);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fieldkit=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
