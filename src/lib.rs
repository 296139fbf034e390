//! # Streamstats
//!
//! Single-pass stream analytics for Rust.
//!
//! Streamstats ingests a finite stream of discrete observations and maintains
//! three analytics over it: exact per-value frequency counts, 25th/50th/75th
//! percentile estimates, and the set of "heavy hitters" whose occurrence
//! count meets a configurable threshold. The interesting part is *how* the
//! stream is sliced: three batching strategies process the same input with
//! different aggregation shapes and accuracy/latency trade-offs.
//!
//! ## Features
//!
//! - **Frequency Counting**: exact, mergeable per-value occurrence counts
//! - **Quantile Estimation**: sort-based (exact) or heap-based (approximate)
//!   policies, selectable per run
//! - **Heavy Hitters**: incremental crossing events with at-most-once
//!   reporting, or a single batch scan; both agree on the final set
//! - **Batching Strategies**: greedy (element-at-a-time), divide-and-conquer
//!   (batches with incremental merge), decrease-and-conquer (samples reduced
//!   to representative medians)
//!
//! ## Quick Start
//!
//! ```rust
//! use streamstats::prelude::*;
//!
//! let config = AnalyzerConfig::new(3);
//! let report = Greedy.run([5u32, 5, 5, 2, 2, 9], &config).unwrap();
//!
//! assert_eq!(report.frequency.count_of(&5), 3);
//! assert_eq!(report.quantiles.p50, 5);
//! assert!(report.heavy_hitters.contains(&5));
//! ```
//!
//! ## Choosing a Strategy
//!
//! All strategies produce identical frequency counts and heavy-hitter sets
//! for the same input; they differ in how quantiles are aggregated:
//!
//! ```rust
//! use streamstats::prelude::*;
//!
//! let stream: Vec<u32> = (0..1000).map(|i| i % 20 + 1).collect();
//! let config = AnalyzerConfig::for_stream_len(stream.len());
//!
//! let greedy = Greedy.run(stream.clone(), &config).unwrap();
//! let divide = DivideAndConquer.run(stream.clone(), &config).unwrap();
//!
//! // slicing never changes the counts
//! assert_eq!(greedy.frequency, divide.frequency);
//! // but the batched pass estimates quantiles over per-batch medians
//! ```
//!
//! The batched strategies compute quantiles over per-slice medians rather
//! than the raw stream, a deliberate median-of-medians style approximation
//! that keeps slices independently processable. The heap-based quantile
//! policy keeps only the upper half of what it sees and is likewise
//! approximate by design.
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization of reports, tables and configs

pub mod error;
pub mod frequency;
pub mod heavy_hitters;
pub mod quantiles;
pub mod strategy;
pub mod traits;

pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::frequency::FrequencyTable;
    pub use crate::heavy_hitters::HeavyHitterDetector;
    pub use crate::quantiles::{QuantilePolicy, Quartiles};
    pub use crate::strategy::{
        AnalyzerConfig, DecreaseAndConquer, DivideAndConquer, Greedy, RunReport, Strategy,
    };
    pub use crate::traits::{QuantileEstimator, StreamCollector};
}

pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use heavy_hitters::HeavyHitterDetector;
pub use quantiles::{QuantilePolicy, Quartiles};
pub use strategy::{AnalyzerConfig, DecreaseAndConquer, DivideAndConquer, Greedy, RunReport, Strategy};
