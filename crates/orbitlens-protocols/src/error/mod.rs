//! Error types for the OrbitLens protocol layer.

mod fetch;
mod site;

pub use fetch::*;
pub use site::*;
