//! Threshold-crossing detection over the frequency table

use crate::frequency::FrequencyTable;
use core::fmt::Debug;
use core::hash::Hash;
use std::collections::HashSet;

/// Detects values whose occurrence count meets or exceeds a threshold
///
/// The detector is a predicate over a [`FrequencyTable`], evaluated in one of
/// two modes that must agree on the final set for the same input multiset:
///
/// - **incremental**: [`observe_count`](Self::observe_count) right after each
///   record (or [`sweep`](Self::sweep) right after a batch merge) flags a
///   value the instant its count crosses the threshold, and reports the
///   crossing at most once per value
/// - **batch**: [`evaluate`](Self::evaluate) scans a completed table once
///
/// Membership is monotonic: counts never decrease in this design, so a
/// flagged value stays flagged for the rest of the run.
///
/// # Example
///
/// ```
/// use streamstats::frequency::FrequencyTable;
/// use streamstats::heavy_hitters::HeavyHitterDetector;
///
/// let table: FrequencyTable<u32> = [5, 5, 5, 2, 2, 9].into_iter().collect();
/// let heavy = HeavyHitterDetector::evaluate(&table, 3);
///
/// assert!(heavy.contains(&5));
/// assert_eq!(heavy.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct HeavyHitterDetector<T: Hash + Eq + Clone + Debug> {
    threshold: u64,
    flagged: HashSet<T>,
}

impl<T: Hash + Eq + Clone + Debug> HeavyHitterDetector<T> {
    /// Create a detector with the given threshold
    ///
    /// A threshold of 0 flags every recorded value.
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            flagged: HashSet::new(),
        }
    }

    /// The threshold this detector was built with
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Incremental check after one record: returns true exactly once per
    /// value, the first time its count meets the threshold
    pub fn observe_count(&mut self, value: &T, count: u64) -> bool {
        if count < self.threshold {
            return false;
        }
        let newly_crossed = self.flagged.insert(value.clone());
        if newly_crossed {
            log::debug!("heavy hitter: {:?} reached count {}", value, count);
        }
        newly_crossed
    }

    /// Incremental check after a batch merge: flags every key of the merged
    /// table that now meets the threshold, returning only the newly crossed
    pub fn sweep(&mut self, table: &FrequencyTable<T>) -> Vec<T> {
        let mut crossed = Vec::new();
        for (value, &count) in table.iter() {
            if count >= self.threshold && self.observe_count(value, count) {
                crossed.push(value.clone());
            }
        }
        crossed
    }

    /// Values flagged so far
    pub fn flagged(&self) -> &HashSet<T> {
        &self.flagged
    }

    /// Consume the detector and return the flagged set
    pub fn into_flagged(self) -> HashSet<T> {
        self.flagged
    }

    /// Batch mode: one scan over a completed table
    pub fn evaluate(table: &FrequencyTable<T>, threshold: u64) -> HashSet<T> {
        table
            .iter()
            .filter(|(_, &count)| count >= threshold)
            .map(|(value, _)| value.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StreamCollector;

    fn table(values: &[i32]) -> FrequencyTable<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_evaluate() {
        let table = table(&[5, 5, 5, 2, 2, 9]);

        let heavy = HeavyHitterDetector::evaluate(&table, 3);
        assert_eq!(heavy, [5].into_iter().collect());

        let heavy = HeavyHitterDetector::evaluate(&table, 2);
        assert_eq!(heavy, [5, 2].into_iter().collect());
    }

    #[test]
    fn test_evaluate_empty_table() {
        let table = FrequencyTable::<i32>::new();
        assert!(HeavyHitterDetector::evaluate(&table, 3).is_empty());
    }

    #[test]
    fn test_zero_threshold_flags_everything() {
        let table = table(&[1, 2, 3]);
        let heavy = HeavyHitterDetector::evaluate(&table, 0);
        assert_eq!(heavy.len(), 3);
    }

    #[test]
    fn test_crossing_reported_at_most_once() {
        let mut detector = HeavyHitterDetector::new(2);

        assert!(!detector.observe_count(&7, 1));
        assert!(detector.observe_count(&7, 2)); // first crossing
        assert!(!detector.observe_count(&7, 3)); // re-crossing is silent
        assert!(!detector.observe_count(&7, 4));

        assert_eq!(detector.flagged().len(), 1);
    }

    #[test]
    fn test_incremental_matches_batch() {
        let input = [5, 5, 5, 2, 2, 9, 9, 9, 9];
        let mut detector = HeavyHitterDetector::new(3);
        let mut freq = FrequencyTable::new();

        for value in input {
            let count = freq.record(value);
            detector.observe_count(&value, count);
        }

        assert_eq!(
            detector.into_flagged(),
            HeavyHitterDetector::evaluate(&freq, 3)
        );
    }

    #[test]
    fn test_sweep_reports_only_new_crossings() {
        let mut detector = HeavyHitterDetector::new(3);
        let mut freq = FrequencyTable::new();

        freq.merge(&table(&[5, 5, 5, 2]));
        let crossed = detector.sweep(&freq);
        assert_eq!(crossed, vec![5]);

        freq.merge(&table(&[2, 2, 9]));
        let mut crossed = detector.sweep(&freq);
        crossed.sort_unstable();
        assert_eq!(crossed, vec![2]); // 5 already flagged, 9 below threshold

        assert_eq!(detector.flagged().len(), 2);
    }

    #[test]
    fn test_monotonic_in_threshold() {
        let table = table(&[1, 1, 1, 2, 2, 3]);

        let loose = HeavyHitterDetector::evaluate(&table, 1);
        let tight = HeavyHitterDetector::evaluate(&table, 3);

        assert!(tight.is_subset(&loose));
    }
}
