pub mod filter;
pub mod conditioner;

pub use filter::LowPassFilter;
pub use conditioner::SignalConditioner;
