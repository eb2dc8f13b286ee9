use catalog::Catalog;
use clap::Parser;
use executor::args::Args;
use executor::{build_query_plan, output};
use parser::Query;
use std::error::Error;
use std::path::Path;
use std::process;
use std::rc::Rc;
use tracing::{error, info};

fn main() {
    common::init_tracing();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("Evaluation failed: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let catalog = Rc::new(Catalog::open(args.database_dir())?);
    let query = Query::parse_file(args.input_file())?;
    info!("Evaluating: {query}");

    let mut root = build_query_plan(&query, &catalog)?;
    let rendered = output::dump(root.as_mut())?;

    if args.output_to_stdout() {
        println!("{rendered}");
    } else {
        common::write_output(Path::new(args.output_file()), &rendered)?;
        info!("Results written to {}", args.output_file());
    }
    Ok(())
}
