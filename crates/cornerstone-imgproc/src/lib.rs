#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// feature detection module.
pub mod features;

/// image filtering module.
pub mod filter;

/// morphological operations module.
pub mod morphology;

/// border handling for filters.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;
