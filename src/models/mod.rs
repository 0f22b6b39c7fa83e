pub mod accumulator;
pub mod observation;
pub mod table;

pub use accumulator::{CompensatedSum, StateAccumulator};
pub use observation::Observation;
pub use table::AccumulatorTable;
