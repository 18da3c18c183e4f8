//! Rayon-based parallelisation for batch scoring.
//!
//! Record scoring is independent per record, so batches are mapped with
//! `par_iter`, which keeps output in input order.

use infra_config::ParallelSettings;
use rayon::prelude::*;

/// Records per rayon work item.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum records per rayon work item
    pub batch_size: usize,
    /// Minimum batch length before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: 100,
        }
    }
}

impl From<&ParallelSettings> for ParallelConfig {
    fn from(settings: &ParallelSettings) -> Self {
        Self::new(settings.batch_size, settings.parallel_threshold)
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Maps `(index, item)` pairs, in parallel above the threshold.
///
/// Output order always matches input order.
pub fn map_indexed<T, R, F>(items: &[T], config: &ParallelConfig, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        items
            .par_iter()
            .enumerate()
            .with_min_len(config.batch_size)
            .map(|(i, item)| mapper(i, item))
            .collect()
    } else {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| mapper(i, item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_indexed_sequential_keeps_order() {
        let items: Vec<i32> = (0..10).collect();
        let config = ParallelConfig::new(4, 100);
        let out = map_indexed(&items, &config, |i, &x| (i, x * 2));
        assert_eq!(out[3], (3, 6));
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn test_map_indexed_parallel_keeps_order() {
        let items: Vec<usize> = (0..1_000).collect();
        let config = ParallelConfig::new(16, 10);
        let out = map_indexed(&items, &config, |i, &x| i + x);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(*v, 2 * i);
        }
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1_000));
    }

    #[test]
    fn test_from_settings_floors_batch_size() {
        let settings = ParallelSettings {
            batch_size: 0,
            parallel_threshold: 5,
        };
        let config = ParallelConfig::from(&settings);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.parallel_threshold, 5);
    }
}
