#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image basic operations module.
pub mod core;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// module containing parallization utilities.
pub mod parallel;

/// ordered transform pipeline.
pub mod pipeline;
