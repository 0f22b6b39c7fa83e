use crate::cli::args::Cli;
use crate::error::{ProcessingError, Result};
use crate::processors::BatchProcessor;
use crate::writers::ReportWriter;
use std::io::{self, Write};
use tracing::Level;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(&cli, &mut stdout.lock(), &mut stderr.lock())
}

/// Run the whole pipeline against the given output streams.
///
/// The report goes to `out`; per-file diagnostics go to `err`. Fatal
/// conditions are returned and no report is written for them.
pub fn execute<O: Write, E: Write>(cli: &Cli, out: &mut O, err: &mut E) -> Result<()> {
    if cli.files.is_empty() {
        return Err(ProcessingError::NoInputFiles);
    }

    for path in &cli.files {
        writeln!(out, "Opening file: {}", path.display())?;
    }
    out.flush()?;

    let processor = BatchProcessor::new(cli.state_capacity());
    let outcome = processor.process_files(&cli.files, err)?;

    ReportWriter::with_time_zone(cli.time_zone()).write_report(&outcome.table, out)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
