//! Command line arguments for the query evaluator.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate a conjunctive query over a CSV-backed database", long_about = None)]
pub struct Args {
    /// Directory containing schema.txt and the files/ data directory
    #[arg(value_name = "DATABASE")]
    pub database_dir: String,

    /// Path of the query file
    #[arg(value_name = "QUERY")]
    pub input_file: String,

    /// Path of the output file. If <OUTPUT> is `-` then stdout is used.
    #[arg(value_name = "OUTPUT")]
    pub output_file: String,
}

impl Args {
    pub fn database_dir(&self) -> &str {
        &self.database_dir
    }

    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn output_to_stdout(&self) -> bool {
        self.output_file == "-"
    }
}
