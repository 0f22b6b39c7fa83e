use validator::Validate;

/// One climate reading taken from a single TDV line
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Observation {
    pub state_code: String,

    /// Milliseconds since the UNIX epoch
    pub timestamp: u64,

    pub geohash: String,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,

    pub snow: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub cloud_cover: f64,

    pub lightning: f64,

    /// Pascals
    pub pressure: f64,

    /// Kelvin
    #[validate(range(min = 0.0))]
    pub temperature: f64,
}

impl Observation {
    pub fn has_snow(&self) -> bool {
        self.snow > 0.0
    }

    pub fn has_lightning(&self) -> bool {
        self.lightning > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Observation {
        Observation {
            state_code: "CA".to_string(),
            timestamp: 1_428_300_000_000,
            geohash: "9prcjqk3yc80".to_string(),
            humidity: 93.0,
            snow: 0.0,
            cloud_cover: 100.0,
            lightning: 0.0,
            pressure: 95644.0,
            temperature: 277.58716,
        }
    }

    #[test]
    fn test_valid_observation() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let mut obs = sample();
        obs.humidity = 0.0;
        obs.cloud_cover = 100.0;
        obs.temperature = 0.0;
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values() {
        let mut obs = sample();
        obs.humidity = 150.0;
        assert!(obs.validate().is_err());

        let mut obs = sample();
        obs.cloud_cover = -5.0;
        assert!(obs.validate().is_err());

        let mut obs = sample();
        obs.temperature = -1.0;
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_indicators() {
        let mut obs = sample();
        assert!(!obs.has_snow());
        assert!(!obs.has_lightning());

        obs.snow = 1.0;
        obs.lightning = 0.5;
        assert!(obs.has_snow());
        assert!(obs.has_lightning());

        // Negative values are not truthy
        obs.snow = -1.0;
        assert!(!obs.has_snow());
    }
}
