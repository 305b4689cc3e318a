//! Map layer planning for the external tile renderer.
//!
//! The renderer owns sources, layers and hit-testing; this crate decides
//! what to register for a selected year and view mode, and keeps the
//! registration free of leaked layers across re-selections.

pub mod highlight;
pub mod layer;
pub mod plan;
pub mod stack;
pub mod symbology;

pub use highlight::*;
pub use layer::*;
pub use plan::*;
pub use stack::*;
pub use symbology::*;
