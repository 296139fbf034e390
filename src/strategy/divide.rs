//! Divide-and-conquer strategy: fixed-size batches, merged incrementally

use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::strategy::{slice_median, AnalyzerConfig, Run, RunReport, Strategy};
use crate::traits::StreamCollector;
use core::fmt::Debug;
use core::hash::Hash;

/// Below this size a slice is counted directly instead of split further.
const TALLY_LEAF: usize = 32;

/// Batch pass with slice size `batch_size`
///
/// Each batch is processed as an independent sub-problem: its frequency table
/// is built by recursively halving the batch and merging the halves (merge is
/// commutative and associative, so the result equals counting the batch
/// directly), then folded into the running total. The batch's median is
/// pushed into a running collection of per-batch estimates, and final
/// quantiles are computed over that collection, NOT over the raw stream.
/// This median-of-medians style estimate trades exactness for batches that
/// can be processed independently.
///
/// # Example
///
/// ```
/// use streamstats::strategy::{AnalyzerConfig, DivideAndConquer, Strategy};
///
/// let config = AnalyzerConfig::new(2).with_batch_size(2);
/// let report = DivideAndConquer.run([1u32, 1, 2, 2, 3, 3], &config).unwrap();
///
/// // frequency counts are exact regardless of batch boundaries
/// assert_eq!(report.frequency.count_of(&1), 2);
/// assert_eq!(report.frequency.count_of(&3), 2);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DivideAndConquer;

/// Count a slice by recursive halving, merging sub-tables on the way up.
///
/// Depth is logarithmic in the slice length, and slices at or below
/// [`TALLY_LEAF`] are counted iteratively, so the call stack stays shallow
/// for any batch size.
fn tally<T: Hash + Eq + Clone + Debug>(values: &[T]) -> FrequencyTable<T> {
    if values.len() <= TALLY_LEAF {
        return values.iter().cloned().collect();
    }
    let (left, right) = values.split_at(values.len() / 2);
    let mut table = tally(left);
    table.merge(&tally(right));
    table
}

impl Strategy for DivideAndConquer {
    fn name(&self) -> &'static str {
        "divide-and-conquer"
    }

    fn run<T, I>(&self, stream: I, config: &AnalyzerConfig) -> Result<RunReport<T>>
    where
        T: Ord + Hash + Clone + Debug,
        I: IntoIterator<Item = T>,
    {
        let mut run = Run::new(config)?;
        run.start();

        let mut batch: Vec<T> = Vec::with_capacity(config.batch_size);
        for value in stream {
            batch.push(value);
            if batch.len() == config.batch_size {
                flush(&mut run, &mut batch);
            }
        }
        if !batch.is_empty() {
            flush(&mut run, &mut batch);
        }

        run.finish(self.name())
    }
}

/// Process one completed batch and clear it for reuse.
fn flush<T: Ord + Hash + Clone + Debug>(run: &mut Run<T>, batch: &mut Vec<T>) {
    let table = tally(batch);
    let median = slice_median(batch);
    run.absorb_batch(&table, batch.len() as u64);
    run.observe_marker(median);
    batch.clear();
}
