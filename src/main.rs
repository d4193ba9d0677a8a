use std::process::ExitCode;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use rangesel::{expand_range, range::parser::parse_range, split_filename_index};

/// Expand compact index selections such as `1-10[2-3]`
#[derive(Parser)]
#[command(name = "rangesel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand an integer range string
    Expand {
        /// The range string, e.g. "1,3-5,7:2:11"
        range: String,

        /// Print the parsed tree instead of expanding it
        #[arg(long)]
        tree: bool,
    },

    /// Split a file name from its bracketed index suffix
    File {
        /// The file name, e.g. "data[1,2,3-6]"
        name: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<String, rangesel::range::Error> {
    let int = str::parse::<i64>;
    match command {
        Commands::Expand { range, tree: true } => {
            let nodes = parse_range(&range, int)?;
            Ok(nodes.iter().join(","))
        }
        Commands::Expand { range, tree: false } => Ok(expand_range(&range, int)?.to_string()),
        Commands::File { name } => {
            let (file, indices) = split_filename_index(&name, int)?;
            Ok(match indices {
                Some(indices) => format!("{file}\t{indices}"),
                None => file.to_owned(),
            })
        }
    }
}
