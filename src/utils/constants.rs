/// Size of the line buffer of the TDV format, counting the newline and terminator.
/// A raw line of `LINE_BUFFER_SIZE - 1` bytes or more is rejected.
pub const LINE_BUFFER_SIZE: usize = 100;

/// Longest raw line (newline included) that is still parsed
pub const MAX_LINE_LENGTH: usize = LINE_BUFFER_SIZE - 2;

/// Fields per TDV record
pub const FIELD_COUNT: usize = 9;

/// Field widths
pub const MAX_STATE_CODE_LEN: usize = 2;
pub const MAX_GEOHASH_LEN: usize = 12;

/// Observation constraints
pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;
pub const MIN_KELVIN: f64 = 0.0;

/// Default number of distinct states tracked
pub const DEFAULT_MAX_STATES: usize = 50;

/// Read buffer for input files
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Temperature conversion
pub const KELVIN_OFFSET: f64 = 273.15;

/// ctime(3) layout used for extrema timestamps
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
