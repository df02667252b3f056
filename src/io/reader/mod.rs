/*! Corpus reading utilities

Plain text files are read lazily, line by line ([LineStream]), RMH TEI-XML files are parsed
whole, one file per work item ([rmh]).
!*/
pub mod rmh;
mod textreader;

pub use rmh::{read_rmh_file, rmh_2_corpus, rmh_files};
pub use textreader::{deserialize, LineStream};
