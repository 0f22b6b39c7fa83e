use crate::models::Observation;
use crate::utils::units::millis_to_seconds;

/// Running `f64` sum with Neumaier compensation, so that hundreds of
/// thousands of additions keep their low-order bits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Running statistics for one state code
#[derive(Debug, Clone, PartialEq)]
pub struct StateAccumulator {
    code: String,
    pub record_count: u64,
    pub sum_temperature: CompensatedSum,
    pub sum_humidity: CompensatedSum,
    pub sum_cloud_cover: CompensatedSum,
    pub lightning_strikes: u64,
    pub snow_records: u64,
    pub max_temperature: f64,
    /// Seconds since the UNIX epoch, 0 until a maximum is recorded
    pub max_temperature_time: i64,
    pub min_temperature: f64,
    /// Seconds since the UNIX epoch, 0 until a minimum is recorded
    pub min_temperature_time: i64,
}

impl StateAccumulator {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            record_count: 0,
            sum_temperature: CompensatedSum::new(),
            sum_humidity: CompensatedSum::new(),
            sum_cloud_cover: CompensatedSum::new(),
            lightning_strikes: 0,
            snow_records: 0,
            max_temperature: f64::NEG_INFINITY,
            max_temperature_time: 0,
            min_temperature: f64::INFINITY,
            min_temperature_time: 0,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Fold one observation into the running statistics.
    ///
    /// Extrema use strict comparisons, so a tie keeps the first observation seen.
    pub fn update(&mut self, observation: &Observation) {
        self.record_count += 1;
        self.sum_temperature.add(observation.temperature);
        self.sum_humidity.add(observation.humidity);
        self.sum_cloud_cover.add(observation.cloud_cover);

        if observation.has_lightning() {
            self.lightning_strikes += 1;
        }
        if observation.has_snow() {
            self.snow_records += 1;
        }

        if observation.temperature > self.max_temperature {
            self.max_temperature = observation.temperature;
            self.max_temperature_time = millis_to_seconds(observation.timestamp);
        }
        if observation.temperature < self.min_temperature {
            self.min_temperature = observation.temperature;
            self.min_temperature_time = millis_to_seconds(observation.timestamp);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Mean humidity in percent. NaN before the first update.
    pub fn average_humidity(&self) -> f64 {
        self.sum_humidity.value() / self.record_count as f64
    }

    /// Mean temperature in Kelvin. NaN before the first update.
    pub fn average_temperature(&self) -> f64 {
        self.sum_temperature.value() / self.record_count as f64
    }

    /// Mean cloud cover in percent. NaN before the first update.
    pub fn average_cloud_cover(&self) -> f64 {
        self.sum_cloud_cover.value() / self.record_count as f64
    }
}
