//! Series module
//!
//! Input series, time alignment and return transformation:
//!
//! 1. [`align`] inner-joins the primary and secondary series on timestamp
//! 2. [`to_returns`] converts the aligned levels into percentage returns

mod align;
mod returns;
mod types;

pub use align::align;
pub use returns::{pct_change, to_returns};
pub use types::{AlignedSeries, ReturnPoint, Series, TimePoint};
