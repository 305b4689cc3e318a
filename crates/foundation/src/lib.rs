pub mod numeric;
pub mod year;

// Foundation crate: small, well-tested primitives only.
pub use numeric::*;
pub use year::*;
