use crate::utils::constants::KELVIN_OFFSET;

/// Convert a temperature in Kelvin to degrees Fahrenheit
pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0
}

/// Truncate a millisecond UNIX timestamp to whole seconds
pub fn millis_to_seconds(millis: u64) -> i64 {
    // u64::MAX / 1000 fits in i64
    (millis / 1000) as i64
}
