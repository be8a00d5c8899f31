//! Lag alignment module
//!
//! For every timestamp, the secondary return at each forward offset up to the
//! maximum lag. This is a pure forward shift: lag 0 is the event day itself.

mod table;

pub use table::LagTable;
