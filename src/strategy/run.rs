//! Shared run context: accumulators plus the run state machine

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::heavy_hitters::HeavyHitterDetector;
use crate::quantiles::Estimator;
use crate::strategy::{AnalyzerConfig, RunReport};
use crate::traits::{QuantileEstimator, StreamCollector};
use core::fmt::Debug;
use core::hash::Hash;
use std::time::Instant;

/// Phase of one analysis run
///
/// Every run moves through all four phases in order; no transition is skipped
/// or reordered. Once `Done`, the accumulators are consumed into the report
/// and can no longer be mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Configured but not yet started
    Idle,
    /// Consuming the source stream
    Ingesting,
    /// Stream exhausted; computing the result artifacts
    Finalizing,
    /// All three artifacts computed
    Done,
}

/// Accumulators for one analysis run, owned by a single strategy
///
/// Holds the frequency table, the configured quantile estimator and the
/// heavy-hitter detector, and enforces the phase transitions. Strategies
/// differ only in which ingestion methods they call and how they slice the
/// stream; everything after the stream is exhausted is shared.
#[derive(Clone, Debug)]
pub(crate) struct Run<T: Ord + Hash + Clone + Debug> {
    phase: RunPhase,
    threshold: u64,
    frequency: FrequencyTable<T>,
    estimator: Estimator<T>,
    detector: HeavyHitterDetector<T>,
    observations: u64,
    started: Instant,
}

impl<T: Ord + Hash + Clone + Debug> Run<T> {
    /// Validate the configuration and set up empty accumulators (Idle)
    pub(crate) fn new(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            phase: RunPhase::Idle,
            threshold: config.threshold,
            frequency: FrequencyTable::new(),
            estimator: Estimator::for_policy(config.quantile_policy),
            detector: HeavyHitterDetector::new(config.threshold),
            observations: 0,
            started: Instant::now(),
        })
    }

    /// Current phase
    pub(crate) fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Begin ingesting; stamps the start of the measured interval
    pub(crate) fn start(&mut self) {
        assert_eq!(self.phase, RunPhase::Idle, "run already started");
        self.phase = RunPhase::Ingesting;
        self.started = Instant::now();
    }

    /// Greedy path: record, check the threshold, and feed the estimator
    pub(crate) fn ingest_value(&mut self, value: T) {
        debug_assert_eq!(self.phase, RunPhase::Ingesting);
        self.observations += 1;
        let count = self.frequency.record(value.clone());
        self.detector.observe_count(&value, count);
        self.estimator.observe(value);
    }

    /// Sampled path: record and check the threshold against the running
    /// global count; the estimator is fed separately via [`observe_marker`]
    ///
    /// [`observe_marker`]: Self::observe_marker
    pub(crate) fn record_only(&mut self, value: T) {
        debug_assert_eq!(self.phase, RunPhase::Ingesting);
        self.observations += 1;
        let count = self.frequency.record(value.clone());
        self.detector.observe_count(&value, count);
    }

    /// Push one representative order statistic (e.g. a slice median) into the
    /// estimator without touching the frequency table
    pub(crate) fn observe_marker(&mut self, value: T) {
        debug_assert_eq!(self.phase, RunPhase::Ingesting);
        self.estimator.observe(value);
    }

    /// Batched path: merge a per-batch table into the running total and flag
    /// newly crossed heavy hitters
    pub(crate) fn absorb_batch(&mut self, table: &FrequencyTable<T>, len: u64) {
        debug_assert_eq!(self.phase, RunPhase::Ingesting);
        self.observations += len;
        self.frequency.merge(table);
        let crossed = self.detector.sweep(&self.frequency);
        log::trace!(
            "merged batch of {} ({} newly crossed)",
            len,
            crossed.len()
        );
    }

    /// Stream exhausted: compute the three result artifacts
    ///
    /// Fails with [`Error::EmptyInput`] before producing anything when no
    /// observations were ingested; there is no partial-result mode.
    pub(crate) fn finish(mut self, strategy: &'static str) -> Result<RunReport<T>> {
        assert_eq!(self.phase, RunPhase::Ingesting, "run not ingesting");
        self.phase = RunPhase::Finalizing;

        if self.observations == 0 {
            return Err(Error::EmptyInput);
        }

        let quantiles = self.estimator.quartiles()?;
        let heavy_hitters = HeavyHitterDetector::evaluate(&self.frequency, self.threshold);
        debug_assert_eq!(
            &heavy_hitters,
            self.detector.flagged(),
            "incremental and batch heavy-hitter evaluation diverged"
        );

        self.phase = RunPhase::Done;
        let elapsed = self.started.elapsed();
        log::debug!(
            "{} run done: {} observations, {} distinct, {} heavy in {:?}",
            strategy,
            self.observations,
            self.frequency.distinct(),
            heavy_hitters.len(),
            elapsed
        );

        Ok(RunReport {
            strategy,
            frequency: self.frequency,
            quantiles,
            heavy_hitters,
            observations: self.observations,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalyzerConfig {
        AnalyzerConfig::new(3)
    }

    #[test]
    fn test_phases_advance_in_order() {
        let mut run = Run::<i32>::new(&config()).unwrap();
        assert_eq!(run.phase(), RunPhase::Idle);

        run.start();
        assert_eq!(run.phase(), RunPhase::Ingesting);

        run.ingest_value(1);
        let report = run.finish("test").unwrap();
        assert_eq!(report.observations, 1);
    }

    #[test]
    #[should_panic(expected = "run already started")]
    fn test_double_start_panics() {
        let mut run = Run::<i32>::new(&config()).unwrap();
        run.start();
        run.start();
    }

    #[test]
    #[should_panic(expected = "run not ingesting")]
    fn test_finish_before_start_panics() {
        let run = Run::<i32>::new(&config()).unwrap();
        let _ = run.finish("test");
    }

    #[test]
    fn test_empty_run_fails_outright() {
        let mut run = Run::<i32>::new(&config()).unwrap();
        run.start();
        assert_eq!(run.finish("test").unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_invalid_config_rejected_before_idle() {
        let mut bad = config();
        bad.batch_size = 0;
        assert!(Run::<i32>::new(&bad).is_err());
    }

    #[test]
    fn test_marker_does_not_touch_frequency() {
        let mut run = Run::<i32>::new(&config()).unwrap();
        run.start();
        run.record_only(1);
        run.observe_marker(99);

        let report = run.finish("test").unwrap();
        assert_eq!(report.observations, 1);
        assert_eq!(report.frequency.count_of(&99), 0);
    }
}
