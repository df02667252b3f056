/*! JSON and binary corpus files.

JSON is used for enriched corpora and models, binary ("pickle") files for intermediate
corpora passed between pipeline stages. Binary files are [bincode] encoded [Corpora].
!*/
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;
use serde::{de::DeserializeOwned, Serialize};

use crate::corpus::Corpora;
use crate::error::Error;

/// Read a JSON document.
pub fn read_json<T: DeserializeOwned>(src: &Path) -> Result<T, Error> {
    info!("Reading json={:?}", src);
    let br = BufReader::new(File::open(src)?);
    Ok(serde_json::from_reader(br)?)
}

/// Write `value` as a JSON document, replacing `dst` if it exists.
pub fn write_json<T: Serialize + ?Sized>(dst: &Path, value: &T) -> Result<(), Error> {
    info!("Writing json={:?}", dst);
    let mut bw = BufWriter::new(File::create(dst)?);
    serde_json::to_writer(&mut bw, value)?;
    bw.flush()?;
    Ok(())
}

/// Read a binary corpora file.
pub fn read_pickle(src: &Path) -> Result<Corpora, Error> {
    info!("Reading pickle={:?}", src);
    let br = BufReader::new(File::open(src)?);
    Ok(bincode::deserialize_from(br)?)
}

/// Write corpora into a binary file.
pub fn write_pickle(dst: &Path, corpora: &Corpora) -> Result<(), Error> {
    info!("Writing pickle={:?}", dst);
    let mut bw = BufWriter::new(File::create(dst)?);
    bincode::serialize_into(&mut bw, corpora)?;
    bw.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::corpus::{EnrichedPCorpora, EnrichedSentence, PCorpora};

    use super::*;

    fn enriched() -> EnrichedPCorpora {
        let sentence = EnrichedSentence::new(
            vec!["Ég".into(), "fór".into(), ".".into()],
            vec!["fp1en".into(), "sfg1eþ".into(), "pl".into()],
            vec!["ég".into(), "fara".into(), ".".into()],
        )
        .unwrap();
        let mut corpora = EnrichedPCorpora::new();
        corpora.insert("is".to_string(), vec![sentence.clone(), sentence]);
        corpora
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpora.json");

        let corpora = enriched();
        write_json(&path, &corpora).unwrap();
        let back: EnrichedPCorpora = read_json(&path).unwrap();
        assert_eq!(back, corpora);
    }

    #[test]
    fn test_pickle_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpora.pickle");

        let mut plain = PCorpora::new();
        plain.insert("en".to_string(), vec!["a line".into(), "another".into()]);
        plain.insert("is".to_string(), vec!["lína".into(), "".into()]);

        for corpora in [Corpora::from(plain), Corpora::from(enriched())] {
            write_pickle(&path, &corpora).unwrap();
            assert_eq!(read_pickle(&path).unwrap(), corpora);
        }
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"is\": [").unwrap();
        let res: Result<EnrichedPCorpora, _> = read_json(&path);
        assert!(matches!(res, Err(Error::Serde(_))));
    }

    #[test]
    fn test_malformed_pickle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pickle");
        std::fs::write(&path, [7u8, 0, 0]).unwrap();
        assert!(matches!(read_pickle(&path), Err(Error::Binary(_))));
    }
}
