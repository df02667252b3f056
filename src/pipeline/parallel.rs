/*! Ordered parallel map.

[ParMap] pulls `batch_size` items from a source iterator, splits them into contiguous
chunks of `chunksize` items, maps the chunks on a dedicated rayon pool and yields the
results in source order before pulling the next batch.

Workers never share state: each one gets its own chunk and hands back its results, the
order comes from the indexed collect and not from completion order.
!*/
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::error::Error;

/// Sizes of an ordered parallel map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParConfig {
    /// Number of worker threads. `0` lets rayon pick (one per logical core).
    pub threads: usize,
    /// Number of items pulled from the source per round.
    pub batch_size: usize,
    /// Number of items handed to a worker at once.
    pub chunksize: usize,
}

impl ParConfig {
    pub fn new(threads: usize, batch_size: usize, chunksize: usize) -> Self {
        Self {
            threads,
            batch_size,
            chunksize,
        }
    }

    /// `chunksize` items per worker and one chunk per worker per round.
    pub fn chunked(threads: usize, chunksize: usize) -> Self {
        let workers = if threads == 0 {
            rayon::current_num_threads()
        } else {
            threads
        };
        Self::new(threads, workers.saturating_mul(chunksize), chunksize)
    }

    /// Single-threaded configuration, mostly for tests.
    pub fn sequential() -> Self {
        Self::new(1, 1000, 100)
    }

    fn check(&self) -> Result<(), Error> {
        if self.batch_size == 0 || self.chunksize == 0 {
            return Err(Error::InvalidConfig(format!(
                "batch_size and chunksize must be positive (got {} and {})",
                self.batch_size, self.chunksize
            )));
        }
        Ok(())
    }
}

impl Default for ParConfig {
    fn default() -> Self {
        Self::new(1, 5_000_000, 10_000)
    }
}

/// Lazy, order-preserving parallel map over an iterator.
pub struct ParMap<I, F, U> {
    source: I,
    f: F,
    pool: rayon::ThreadPool,
    config: ParConfig,
    current: std::vec::IntoIter<U>,
    nb_batches: usize,
}

impl<I, F, U> ParMap<I, F, U>
where
    I: Iterator,
    I::Item: Send,
    F: Fn(I::Item) -> U + Sync,
    U: Send,
{
    /// Build the map and its worker pool.
    ///
    /// Fails if the pool can't be built or if sizes are zero.
    pub fn new(source: I, f: F, config: ParConfig) -> Result<Self, Error> {
        config.check()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;

        Ok(Self {
            source,
            f,
            pool,
            config,
            current: Vec::new().into_iter(),
            nb_batches: 0,
        })
    }

    /// Process the next batch of the source.
    ///
    /// Returns `false` when the source is exhausted.
    fn fill(&mut self) -> bool {
        let batch: Vec<I::Item> = self.source.by_ref().take(self.config.batch_size).collect();
        if batch.is_empty() {
            return false;
        }

        self.nb_batches += 1;
        debug!(
            "batch {}: {} items on {} threads",
            self.nb_batches,
            batch.len(),
            self.pool.current_num_threads()
        );

        let chunks: Vec<Vec<I::Item>> = batch
            .into_iter()
            .chunks(self.config.chunksize)
            .into_iter()
            .map(|chunk| chunk.collect())
            .collect();

        let f = &self.f;
        let results: Vec<Vec<U>> = self.pool.install(|| {
            chunks
                .into_par_iter()
                .map(|chunk| chunk.into_iter().map(f).collect::<Vec<U>>())
                .collect()
        });

        self.current = results.into_iter().flatten().collect::<Vec<U>>().into_iter();
        true
    }
}

impl<I, F, U> Iterator for ParMap<I, F, U>
where
    I: Iterator,
    I::Item: Send,
    F: Fn(I::Item) -> U + Sync,
    U: Send,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            if !self.fill() {
                return None;
            }
        }
    }
}

/// Shorthand for [ParMap::new].
pub fn par_map<I, F, U>(source: I, f: F, config: ParConfig) -> Result<ParMap<I, F, U>, Error>
where
    I: Iterator,
    I::Item: Send,
    F: Fn(I::Item) -> U + Sync,
    U: Send,
{
    ParMap::new(source, f, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_kept() {
        let config = ParConfig::new(4, 100, 7);
        let res: Vec<usize> = par_map(0..1000usize, |x| x * 2, config).unwrap().collect();
        let expected: Vec<usize> = (0..1000).map(|x| x * 2).collect();
        assert_eq!(res, expected);
    }

    #[test]
    fn test_same_as_sequential() {
        let words: Vec<String> = (0..523).map(|x| format!("word{}", x)).collect();
        let seq: Vec<usize> = par_map(words.clone().into_iter(), |w| w.len(), ParConfig::new(1, 10, 3))
            .unwrap()
            .collect();
        let par: Vec<usize> = par_map(words.into_iter(), |w| w.len(), ParConfig::new(4, 50, 4))
            .unwrap()
            .collect();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_last_batch_smaller() {
        let config = ParConfig::new(2, 3, 2);
        let res: Vec<i32> = par_map(vec![1, 2, 3, 4].into_iter(), |x| x, config)
            .unwrap()
            .collect();
        assert_eq!(res, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_source() {
        let res: Vec<i32> = par_map(std::iter::empty::<i32>(), |x| x, ParConfig::default())
            .unwrap()
            .collect();
        assert!(res.is_empty());
    }

    #[test]
    fn test_zero_sizes() {
        let res = par_map(0..10, |x| x, ParConfig::new(1, 0, 1));
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
        let res = par_map(0..10, |x| x, ParConfig::new(1, 1, 0));
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }
}
