// handlers/mod.rs - HTTP handlers, grouped by access tier.
// Only the public tier exists: there is no role model to gate anything behind.
pub mod public;

pub use public::*;
