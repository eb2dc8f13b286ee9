use catalog::Catalog;
use clap::Parser;
use itertools::Itertools;
use std::process;
use tracing::{error, info};

/// Command line arguments for the catalog inspection tool.
#[derive(Parser, Debug)]
#[command(version, about = "Print the schemas declared by a database directory", long_about = None)]
struct Args {
    /// Directory containing schema.txt and the files/ data directory
    #[arg(value_name = "DATABASE")]
    database_dir: String,
}

fn main() {
    common::init_tracing();

    let args = Args::parse();
    let catalog = match Catalog::open(&args.database_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to open catalog: {e}");
            process::exit(1);
        }
    };

    let mut names: Vec<&str> = catalog.relations().collect();
    names.sort_unstable();
    info!("{} relation(s) in {}", names.len(), args.database_dir);
    for name in names {
        let columns = catalog
            .schema(name)
            .map(|schema| schema.iter().join(" "))
            .unwrap_or_default();
        info!("  {name} {columns}  [{}]", catalog.data_path(name).display());
    }
}
