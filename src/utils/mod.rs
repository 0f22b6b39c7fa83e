pub mod constants;
pub mod units;

pub use constants::*;
pub use units::{kelvin_to_fahrenheit, millis_to_seconds};
