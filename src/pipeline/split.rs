/*! Train/test splitting.

The test set is made of the last `test_size` lines of the (possibly shuffled) corpus, the
train set of the rest. Shuffling is seeded and therefore reproducible.
!*/
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::Error;

/// Split `lines` into `(train, test)`.
///
/// Fails with [Error::InvalidConfig] if `test_size` is bigger than the number of lines.
/// A `test_size` of `0` yields an empty test set.
pub fn split<T>(
    mut lines: Vec<T>,
    test_size: usize,
    shuffle: bool,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>), Error> {
    if test_size > lines.len() {
        return Err(Error::InvalidConfig(format!(
            "test_size ({}) is bigger than the number of lines ({})",
            test_size,
            lines.len()
        )));
    }

    if shuffle {
        let mut rng = StdRng::seed_from_u64(seed);
        lines.shuffle(&mut rng);
    }

    let test = lines.split_off(lines.len() - test_size);
    info!("split: {} train, {} test", lines.len(), test.len());
    Ok((lines, test))
}
