//! Row models for the read-only reporting tables
//!
//! All rows are projections of tables and views maintained by upstream ETL.

mod aggregate;
mod category;
mod paper;

pub use aggregate::{AbstractLength, MulticategoryShare, YearCount};
pub use category::{CategoryCount, CategoryMapEntry, CategoryRow};
pub use paper::PaperRecord;
