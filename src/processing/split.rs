/*! Train/test splitting

The whole input is loaded in memory.
!*/
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::io::{deserialize, serialize};
use crate::pipeline;

use super::newline_terminated;

/// Split `src` into `dst_train` and `dst_test`, `test_size` lines going to the latter.
pub fn split(
    src: &Path,
    dst_train: &Path,
    dst_test: &Path,
    test_size: usize,
    shuffle: bool,
    seed: u64,
) -> Result<(usize, usize), Error> {
    info!("splitting {:?} (test_size={}, shuffle={}, seed={})", src, test_size, shuffle, seed);
    let lines = deserialize(src)?.collect::<Result<Vec<String>, Error>>()?;
    let (train, test) = pipeline::split(lines, test_size, shuffle, seed)?;

    let nb_train = serialize(dst_train, newline_terminated(train.into_iter().map(Ok)))?;
    let nb_test = serialize(dst_test, newline_terminated(test.into_iter().map(Ok)))?;
    info!("{} train lines, {} test lines", nb_train, nb_test);
    Ok((nb_train, nb_test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let train = dir.path().join("train.txt");
        let test = dir.path().join("test.txt");
        std::fs::write(&src, "1\n2\n3\n4\n5\n").unwrap();

        assert_eq!(split(&src, &train, &test, 2, false, 42).unwrap(), (3, 2));
        assert_eq!(std::fs::read_to_string(&train).unwrap(), "1\n2\n3\n");
        assert_eq!(std::fs::read_to_string(&test).unwrap(), "4\n5\n");
    }

    #[test]
    fn test_split_too_big() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.txt");
        std::fs::write(&src, "1\n2\n").unwrap();
        let res = split(
            &src,
            &dir.path().join("train.txt"),
            &dir.path().join("test.txt"),
            3,
            true,
            42,
        );
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }
}
