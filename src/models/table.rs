use crate::models::{Observation, StateAccumulator};
use std::collections::HashMap;
use tracing::debug;

/// State accumulators in first-seen order, optionally capped at a fixed
/// number of distinct codes.
///
/// Once the cap is reached, observations for unseen codes are dropped;
/// existing accumulators are never evicted or merged.
#[derive(Debug, Clone, Default)]
pub struct AccumulatorTable {
    states: Vec<StateAccumulator>,
    index: HashMap<String, usize>,
    capacity: Option<usize>,
}

impl AccumulatorTable {
    /// Unbounded table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding at most `capacity` states, or unbounded for `None`
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.states.len() >= capacity)
    }

    /// Find the accumulator for `code`, creating it if there is room.
    /// Returns `None` when the code is new and the table is full.
    pub fn find_or_create(&mut self, code: &str) -> Option<&mut StateAccumulator> {
        if let Some(&position) = self.index.get(code) {
            return self.states.get_mut(position);
        }

        if self.is_full() {
            return None;
        }

        let position = self.states.len();
        self.states.push(StateAccumulator::new(code));
        self.index.insert(code.to_string(), position);
        debug!(state = code, slot = position, "Tracking new state");

        self.states.get_mut(position)
    }

    /// Fold an observation into its state's accumulator.
    /// Returns `false` if the observation was dropped because the table is full.
    pub fn record(&mut self, observation: &Observation) -> bool {
        match self.find_or_create(&observation.state_code) {
            Some(accumulator) => {
                accumulator.update(observation);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, code: &str) -> Option<&StateAccumulator> {
        self.index
            .get(code)
            .and_then(|&position| self.states.get(position))
    }

    /// Accumulators in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StateAccumulator> {
        self.states.iter()
    }

    /// State codes in insertion order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|state| state.code())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(code: &str, timestamp: u64, temperature: f64) -> Observation {
        Observation {
            state_code: code.to_string(),
            timestamp,
            geohash: "dn6m9p8r2b3c".to_string(),
            humidity: 40.0,
            snow: 0.0,
            cloud_cover: 20.0,
            lightning: 0.0,
            pressure: 100000.0,
            temperature,
        }
    }

    #[test]
    fn test_find_or_create_reuses_entry() {
        let mut table = AccumulatorTable::new();

        table.find_or_create("TN").unwrap().update(&observation("TN", 0, 280.0));
        table.find_or_create("TN").unwrap().update(&observation("TN", 0, 281.0));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("TN").unwrap().record_count, 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut table = AccumulatorTable::new();
        for code in ["WA", "TN", "CA", "TN", "WA", "AZ"] {
            assert!(table.record(&observation(code, 0, 290.0)));
        }

        let codes: Vec<&str> = table.codes().collect();
        assert_eq!(codes, vec!["WA", "TN", "CA", "AZ"]);
        assert_eq!(table.get("WA").unwrap().record_count, 2);
        assert_eq!(table.get("AZ").unwrap().record_count, 1);
    }

    #[test]
    fn test_capacity_drops_new_codes() {
        let mut table = AccumulatorTable::with_capacity(Some(2));

        assert!(table.record(&observation("CA", 1000, 290.0)));
        assert!(table.record(&observation("TN", 2000, 280.0)));
        assert!(table.is_full());

        // A third code is dropped, not merged
        assert!(!table.record(&observation("WA", 3000, 500.0)));
        assert!(table.find_or_create("WA").is_none());
        assert!(table.get("WA").is_none());

        // Known codes keep accumulating
        assert!(table.record(&observation("CA", 4000, 295.0)));

        assert_eq!(table.len(), 2);
        let ca = table.get("CA").unwrap();
        assert_eq!(ca.record_count, 2);
        assert_eq!(ca.max_temperature, 295.0);
        let tn = table.get("TN").unwrap();
        assert_eq!(tn.record_count, 1);
        assert_eq!(tn.max_temperature, 280.0);
    }

    #[test]
    fn test_many_codes_with_default_capacity() {
        let mut table = AccumulatorTable::with_capacity(Some(50));
        for i in 0..60u32 {
            let code = format!("{}{}", (b'A' + (i / 26) as u8) as char, (b'A' + (i % 26) as u8) as char);
            table.record(&observation(&code, 0, 280.0));
        }

        assert_eq!(table.len(), 50);
        assert!(table.iter().all(|state| state.record_count == 1));
        assert!(table.get("AA").is_some());
        assert!(table.get("BX").is_some());
        assert!(table.get("BY").is_none());
    }

    #[test]
    fn test_unbounded_table() {
        let mut table = AccumulatorTable::with_capacity(None);
        for i in 0..200u32 {
            table.record(&observation(&format!("S{}", i), 0, 280.0));
        }

        assert_eq!(table.len(), 200);
        assert!(!table.is_full());
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let mut table = AccumulatorTable::with_capacity(Some(0));
        assert!(!table.record(&observation("CA", 0, 280.0)));
        assert!(table.is_empty());
    }
}
