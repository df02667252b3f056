//! Plain text writing.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, info};

use crate::error::Error;

use super::WriterTrait;

/// Writes strings verbatim, adding no delimiter.
pub struct TextWriter<W: Write> {
    handle: BufWriter<W>,
    nb_written: usize,
}

impl TextWriter<File> {
    /// Create (or truncate) `dst`.
    pub fn create(dst: &Path) -> Result<Self, Error> {
        info!("Writing txt={:?}", dst);
        Ok(Self::new(File::create(dst)?))
    }
}

impl<W: Write> TextWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            handle: BufWriter::new(inner),
            nb_written: 0,
        }
    }

    /// Number of items written so far.
    pub fn nb_written(&self) -> usize {
        self.nb_written
    }

    /// Flush and give back the inner writer.
    pub fn into_inner(self) -> Result<W, Error> {
        self.handle
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> WriterTrait for TextWriter<W> {
    type Item = String;

    fn write_single(&mut self, val: &String) -> Result<(), Error> {
        self.handle.write_all(val.as_bytes())?;
        self.nb_written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        debug!("flushing after {} items", self.nb_written);
        Ok(self.handle.flush()?)
    }
}

/// Write every item of `corpus` verbatim into `dst`, in order.
///
/// Stops at the first error, returns the number of items written otherwise.
pub fn serialize<I>(dst: &Path, corpus: I) -> Result<usize, Error>
where
    I: IntoIterator<Item = Result<String, Error>>,
{
    let mut writer = TextWriter::create(dst)?;
    serialize_into(&mut writer, corpus)?;
    writer.close()?;
    Ok(writer.nb_written())
}

/// Same as [serialize] on an already opened writer.
pub fn serialize_into<W, I>(writer: &mut W, corpus: I) -> Result<(), Error>
where
    W: WriterTrait,
    I: IntoIterator<Item = Result<W::Item, Error>>,
{
    for item in corpus {
        writer.write_single(&item?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let items = vec!["a\n", "b", "c\n"]
            .into_iter()
            .map(|s| Ok(s.to_string()));
        let nb = serialize(&path, items).unwrap();
        assert_eq!(nb, 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nbc\n");
    }

    #[test]
    fn test_stops_on_error() {
        let mut writer = TextWriter::new(Vec::new());
        let items: Vec<Result<String, Error>> = vec![
            Ok("first\n".to_string()),
            Err(Error::Custom("broken".to_string())),
            Ok("never\n".to_string()),
        ];
        assert!(serialize_into(&mut writer, items).is_err());
        assert_eq!(writer.nb_written(), 1);
        assert_eq!(writer.into_inner().unwrap(), b"first\n".to_vec());
    }

    #[test]
    fn test_write_trait() {
        let mut writer = TextWriter::new(Vec::new());
        writer
            .write(vec!["x ".to_string(), "y".to_string()])
            .unwrap();
        writer.close().unwrap();
        assert_eq!(writer.into_inner().unwrap(), b"x y".to_vec());
    }

    /// Collects items in memory.
    #[derive(Default)]
    struct Collect(Vec<String>);

    impl WriterTrait for Collect {
        type Item = String;

        fn write_single(&mut self, val: &String) -> Result<(), Error> {
            self.0.push(val.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn test_serialize_into_any_writer() {
        let mut sink = Collect::default();
        let items = vec![Ok("a".to_string()), Ok("b".to_string())];
        serialize_into(&mut sink, items).unwrap();
        assert_eq!(sink.0, vec!["a", "b"]);
    }
}
