/*! Line reading facilities

[LineStream] is a single-pass, file-backed sequence of lines.
It is consumed by value: once iterated it is gone, and there is no way of restarting it.
Materialize it (`collect`) when a stage needs to see the corpus more than once.

Files ending in `.gz` are transparently decompressed.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use flate2::read::MultiGzDecoder;
use log::info;

use crate::error::Error;

/// Lazy, single-pass sequence of lines read from a text source.
///
/// Lines are yielded without their terminator (`\n` or `\r\n`).
pub struct LineStream {
    path: Option<PathBuf>,
    br: Box<dyn BufRead + Send>,
    nb_read: usize,
}

impl LineStream {
    /// Wrap an arbitrary reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            path: None,
            br: Box::new(BufReader::new(reader)),
            nb_read: 0,
        }
    }

    /// Path of the underlying file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of lines yielded so far.
    pub fn nb_read(&self) -> usize {
        self.nb_read
    }

    /// Get next line (read until `\n`), stripping the terminator.
    fn next_line(&mut self) -> Option<Result<String, Error>> {
        let mut s = String::new();
        match self.br.read_line(&mut s) {
            Ok(0) => None,
            Err(e) => Some(Err(Error::Io(e))),
            _ => {
                if s.ends_with('\n') {
                    s.pop();
                    if s.ends_with('\r') {
                        s.pop();
                    }
                }
                self.nb_read += 1;
                Some(Ok(s))
            }
        }
    }
}

impl Iterator for LineStream {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

impl std::fmt::Debug for LineStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStream")
            .field("path", &self.path)
            .field("nb_read", &self.nb_read)
            .finish()
    }
}

/// Open `src` as a lazy line stream.
///
/// Fails with [Error::Io] if the file can't be opened.
pub fn deserialize(src: &Path) -> Result<LineStream, Error> {
    info!("Reading txt={:?}", src);
    let file = File::open(src)?;
    let br: Box<dyn BufRead + Send> = if src.extension().map_or(false, |ext| ext == "gz") {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(LineStream {
        path: Some(src.to_path_buf()),
        br,
        nb_read: 0,
    })
}
