//! Display-ready shapes for the analytics and region views.
//!
//! No decisions are made here beyond formatting; every number comes from
//! `compute`.

pub mod cards;
pub mod format;
pub mod ranking;
pub mod region;
pub mod trend;

pub use cards::*;
pub use format::*;
pub use ranking::*;
pub use region::*;
pub use trend::*;
