//! Filter operations
//!
//! This module provides filter operations for image processing.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
