//! tt-core: shared foundation for termotables.
//!
//! Contains:
//! - units (uom SI types + constructors for the property symbols)
//! - numeric (finite checks, distinct values, medians)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::{ensure_finite, median, sorted_distinct};
pub use units::*;
