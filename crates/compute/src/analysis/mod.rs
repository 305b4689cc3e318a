pub mod statistics;
pub mod trend;

pub use statistics::Statistics;
pub use trend::TrendAnalysis;
