/*!
# Corpus writing

[TextWriter] writes lines verbatim, [moses] formats enriched sentences as Moses factored text.
!*/
pub mod moses;
mod textwriter;
mod writertrait;

pub use moses::{get_moses_line, write_moses, Factors};
pub use textwriter::{serialize, serialize_into, TextWriter};
pub use writertrait::WriterTrait;
