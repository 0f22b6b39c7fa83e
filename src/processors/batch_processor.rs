use crate::error::{ProcessingError, Result};
use crate::models::AccumulatorTable;
use crate::readers::{FileSummary, ObservationReader};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of a run over all input files
#[derive(Debug)]
pub struct BatchOutcome {
    pub table: AccumulatorTable,
    pub files_processed: usize,
    pub files_failed: usize,
    pub totals: FileSummary,
}

/// Feeds input files, in order, into one shared accumulator table.
pub struct BatchProcessor {
    reader: ObservationReader,
    max_states: Option<usize>,
}

impl BatchProcessor {
    pub fn new(max_states: Option<usize>) -> Self {
        Self {
            reader: ObservationReader::new(),
            max_states,
        }
    }

    /// Process every file, writing a one-line diagnostic to `diagnostics` for
    /// each file that cannot be opened or yields no records.
    ///
    /// The table is shared across files and never reset. Fails with
    /// `NoFilesProcessed` if no file succeeded.
    pub fn process_files<W: Write>(
        &self,
        paths: &[PathBuf],
        diagnostics: &mut W,
    ) -> Result<BatchOutcome> {
        let mut table = AccumulatorTable::with_capacity(self.max_states);
        let mut files_processed = 0;
        let mut files_failed = 0;
        let mut totals = FileSummary::default();
        debug!(files = paths.len(), capacity = ?table.capacity(), "Reading input");

        for path in paths {
            match self.reader.process_file(path, &mut table) {
                Ok(summary) => {
                    files_processed += 1;
                    totals.lines_read += summary.lines_read;
                    totals.accepted += summary.accepted;
                    totals.rejected += summary.rejected;
                    totals.dropped += summary.dropped;
                }
                Err(error) => {
                    files_failed += 1;
                    if let ProcessingError::FileProcessing { reason, .. } = &error {
                        debug!(file = %path.display(), %reason, "File failed");
                    }
                    writeln!(diagnostics, "{}", error)?;
                }
            }
        }

        info!(
            files_processed,
            files_failed,
            states = table.len(),
            accepted = totals.accepted,
            rejected = totals.rejected,
            dropped = totals.dropped,
            "Finished reading input"
        );

        if files_processed == 0 {
            return Err(ProcessingError::NoFilesProcessed);
        }

        Ok(BatchOutcome {
            table,
            files_processed,
            files_failed,
            totals,
        })
    }
}
