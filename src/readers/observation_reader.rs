use crate::error::{LineRejection, ProcessingError, Result};
use crate::models::{AccumulatorTable, Observation};
use crate::utils::constants::{
    DEFAULT_BUFFER_SIZE, FIELD_COUNT, LINE_BUFFER_SIZE, MAX_GEOHASH_LEN, MAX_LINE_LENGTH,
    MAX_STATE_CODE_LEN,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{info, trace};
use validator::Validate;

/// Parse one raw TDV line (trailing newline included, if any) into a
/// validated observation.
///
/// Field order: state code, timestamp (ms), geohash, humidity, snow,
/// cloud cover, lightning, pressure, temperature (K).
pub fn parse_line(raw: &str) -> std::result::Result<Observation, LineRejection> {
    if raw.len() >= LINE_BUFFER_SIZE - 1 {
        return Err(LineRejection::TooLong {
            length: raw.len(),
            limit: MAX_LINE_LENGTH,
        });
    }

    let line = raw
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(raw);

    let parts: Vec<&str> = line.split('\t').map(|s| s.trim()).collect();
    if parts.len() != FIELD_COUNT {
        return Err(LineRejection::FieldCount(parts.len()));
    }

    let observation = Observation {
        state_code: parse_text(parts[0], "state code", MAX_STATE_CODE_LEN)?,
        timestamp: parts[1].parse::<u64>().map_err(|_| invalid("timestamp", parts[1]))?,
        geohash: parse_text(parts[2], "geohash", MAX_GEOHASH_LEN)?,
        humidity: parse_real(parts[3], "humidity")?,
        snow: parse_real(parts[4], "snow")?,
        cloud_cover: parse_real(parts[5], "cloud cover")?,
        lightning: parse_real(parts[6], "lightning")?,
        pressure: parse_real(parts[7], "pressure")?,
        temperature: parse_real(parts[8], "temperature")?,
    };

    observation.validate()?;
    Ok(observation)
}

fn invalid(field: &'static str, value: &str) -> LineRejection {
    LineRejection::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> std::result::Result<String, LineRejection> {
    if value.is_empty() || value.chars().count() > max_len || value.contains(char::is_whitespace)
    {
        return Err(invalid(field, value));
    }
    Ok(value.to_string())
}

fn parse_real(value: &str, field: &'static str) -> std::result::Result<f64, LineRejection> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(invalid(field, value)),
    }
}

/// Line counts for one processed input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub lines_read: usize,
    /// Observations folded into the table
    pub accepted: usize,
    /// Lines that failed parsing or validation
    pub rejected: usize,
    /// Valid observations discarded because the table was full
    pub dropped: usize,
}

impl FileSummary {
    pub fn has_records(&self) -> bool {
        self.accepted > 0
    }
}

enum RawLine {
    Line,
    TooLong(usize),
}

/// Read the next line into `buf`, keeping at most `limit` bytes. Longer
/// lines are consumed up to their newline without being stored.
fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> io::Result<Option<RawLine>> {
    buf.clear();
    let mut total = 0;

    loop {
        let (used, done) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let (chunk, done) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (&available[..=end], true),
                None => (available, false),
            };
            if total + chunk.len() <= limit {
                buf.extend_from_slice(chunk);
            }
            (chunk.len(), done)
        };

        reader.consume(used);
        total += used;
        if done {
            break;
        }
    }

    Ok(match total {
        0 => None,
        n if n > limit => Some(RawLine::TooLong(n)),
        _ => Some(RawLine::Line),
    })
}

pub struct ObservationReader {
    buffer_size: usize,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Stream every line of `reader` into `table`. Bad lines are skipped.
    pub fn process_reader<R: BufRead>(
        &self,
        mut reader: R,
        table: &mut AccumulatorTable,
    ) -> io::Result<FileSummary> {
        let mut summary = FileSummary::default();
        let mut buf = Vec::with_capacity(LINE_BUFFER_SIZE);

        while let Some(raw) = read_bounded_line(&mut reader, &mut buf, MAX_LINE_LENGTH)? {
            summary.lines_read += 1;

            let parsed = match raw {
                RawLine::TooLong(length) => Err(LineRejection::TooLong {
                    length,
                    limit: MAX_LINE_LENGTH,
                }),
                RawLine::Line => std::str::from_utf8(&buf)
                    .map_err(|_| LineRejection::Encoding)
                    .and_then(parse_line),
            };

            match parsed {
                Ok(observation) => {
                    if table.record(&observation) {
                        summary.accepted += 1;
                    } else {
                        summary.dropped += 1;
                        trace!(
                            line = summary.lines_read,
                            state = %observation.state_code,
                            "Dropping observation, state table is full"
                        );
                    }
                }
                Err(rejection) => {
                    summary.rejected += 1;
                    trace!(line = summary.lines_read, %rejection, "Skipping line");
                }
            }
        }

        Ok(summary)
    }

    /// Open `path` and fold its observations into `table`.
    ///
    /// Fails if the file cannot be opened or read, or if not a single line was
    /// folded in. Observations already folded in are kept either way.
    pub fn process_file(&self, path: &Path, table: &mut AccumulatorTable) -> Result<FileSummary> {
        let file = File::open(path).map_err(|source| ProcessingError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::with_capacity(self.buffer_size, file);

        let summary = self
            .process_reader(reader, table)
            .map_err(|e| ProcessingError::FileProcessing {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        info!(
            file = %path.display(),
            lines = summary.lines_read,
            accepted = summary.accepted,
            rejected = summary.rejected,
            dropped = summary.dropped,
            "Processed file"
        );

        if !summary.has_records() {
            return Err(ProcessingError::FileProcessing {
                path: path.to_path_buf(),
                reason: "no valid records".to_string(),
            });
        }

        Ok(summary)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
