use clap::Parser;
use itertools::Itertools;
use parser::Query;
use std::process;
use tracing::{error, info};

/// Command line arguments for the query inspection tool.
#[derive(Parser, Debug)]
#[command(version, about = "Parse a conjunctive query and print its structure", long_about = None)]
struct Args {
    /// Path of the query file
    #[arg(value_name = "QUERY")]
    query_file: String,
}

fn main() {
    common::init_tracing();

    let args = Args::parse();
    match Query::parse_file(&args.query_file) {
        Ok(query) => {
            info!("Entire query: {query}");
            info!("Head: {}", query.head());
            info!("Body: {}", query.body().iter().join(", "));
        }
        Err(e) => {
            error!("Failed to parse {}: {e}", args.query_file);
            process::exit(1);
        }
    }
}
