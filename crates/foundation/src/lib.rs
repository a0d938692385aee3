pub mod bounds;

// Foundation crate: small, well-tested geographic primitives only.
pub use bounds::*;
