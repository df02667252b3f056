/*!
# IO utilities

Corpus saving and loading: lazy line streams, RMH XML, JSON and binary corpora, Moses factored text.
!*/
pub mod formats;
pub mod reader;
pub mod writer;

pub use formats::{read_json, read_pickle, write_json, write_pickle};
pub use reader::{deserialize, LineStream};
pub use writer::{serialize, TextWriter};
