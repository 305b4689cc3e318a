pub mod boundary;
pub mod feature_collection;

pub use boundary::*;
pub use feature_collection::*;
