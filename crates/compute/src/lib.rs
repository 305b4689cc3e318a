pub mod analysis;
pub mod metrics;
pub mod summary;
pub mod valuation;

pub use metrics::*;
pub use summary::*;
pub use valuation::*;
