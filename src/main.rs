use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::Level;

use sparse_calc::{run, Operation, RunConfig};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(
    about = "sparse-calc - add, subtract or multiply two sparse integer matrices stored as text"
)]
struct Cli {
    /// Operation to perform: add, subtract or multiply
    operation: String,

    /// Left operand file
    path1: PathBuf,

    /// Right operand file
    path2: PathBuf,

    /// Directory the result file is written to
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let operation: Operation = match cli.operation.parse() {
        Ok(operation) => operation,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = RunConfig::new(operation, cli.path1, cli.path2).with_output_dir(cli.output_dir);
    match run(&config) {
        Ok(output) => {
            println!("Result written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
