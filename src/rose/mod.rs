//! Wind-rose frequency aggregation.
//!
//! This module turns cleaned observation rows into direction × speed-class
//! frequency tables: compass sector classification and ordering, speed-class
//! scales, the aggregation routine itself, and summary statistics.

pub mod aggregate;
pub mod compass;
pub mod speed;
pub mod types;
pub mod utility;
