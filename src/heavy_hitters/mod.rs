//! Heavy-hitter detection
//!
//! A heavy hitter is a value whose occurrence count in the stream meets or
//! exceeds a configured threshold. Detection is a predicate over the exact
//! [`FrequencyTable`](crate::frequency::FrequencyTable), evaluated either
//! incrementally (reporting each value the instant it crosses, at most once)
//! or as a single scan over the completed table.

mod detector;

pub use detector::HeavyHitterDetector;
