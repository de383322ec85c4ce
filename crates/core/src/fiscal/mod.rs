//! Fiscal-year bucketing.
//!
//! The club's fiscal year runs from August 1 through July 31 of the
//! following calendar year and is labeled `"startYear/startYear+1"`.

mod year;

pub use year::{current_fiscal_year, fiscal_year_for, parse_label};
