use clap::Parser;
use minimizer::minimize;
use parser::Query;
use std::error::Error;
use std::path::Path;
use std::process;
use tracing::{error, info};

/// Command line arguments for the query minimizer.
#[derive(Parser, Debug)]
#[command(version, about = "Minimize a conjunctive query by removing redundant body atoms", long_about = None)]
struct Args {
    /// Path of the query file
    #[arg(value_name = "QUERY")]
    input_file: String,

    /// Path of the output file. If <OUTPUT> is `-` then stdout is used.
    #[arg(value_name = "OUTPUT")]
    output_file: String,
}

fn main() {
    common::init_tracing();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("Minimization failed: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let query = Query::parse_file(&args.input_file)?;
    let minimized = minimize(&query)?;
    info!("{} atom(s) in, {} out", query.body().len(), minimized.body().len());

    let rendered = minimized.to_string();
    if args.output_file == "-" {
        println!("{rendered}");
    } else {
        common::write_output(Path::new(&args.output_file), &rendered)?;
        info!("Minimized query written to {}", args.output_file);
    }
    Ok(())
}
