//! Exact frequency counting
//!
//! This module provides the exact per-value frequency table that every
//! batching strategy accumulates into. Unlike probabilistic frequency
//! sketches, the table stores one counter per distinct value; the observation
//! domain is assumed bounded, so memory stays small.
//!
//! # Example
//!
//! ```
//! use streamstats::frequency::FrequencyTable;
//!
//! let table: FrequencyTable<u32> = [5, 5, 5, 2, 2, 9].into_iter().collect();
//!
//! assert_eq!(table.count_of(&5), 3);
//! assert_eq!(table.total(), 6);
//! ```

mod table;

pub use table::FrequencyTable;
