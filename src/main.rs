use clap::Parser;
use climate_summary::cli::{run, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{}", error);
        process::exit(1);
    }
}
