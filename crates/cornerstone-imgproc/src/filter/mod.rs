//! Filter operations
//!
//! This module provides the 1-D kernels and the separable filter used by the
//! gradient and structure tensor stages.

/// Filter errors
mod error;
pub use error::FilterError;

/// Filter kernels
pub mod kernels;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
