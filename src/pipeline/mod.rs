//! Corpus transformations.
//!
//! Every transformation takes a lazy sequence of lines (`Iterator<Item = Result<String, Error>>`)
//! and returns another lazy sequence, so that stages can be chained without materializing the corpus.
//! CPU heavy stages (tokenization, enrichment) run on an ordered parallel map, see [parallel::ParMap].
pub mod dedup;
pub mod enrich;
pub mod escape;
pub mod parallel;
pub mod process;
pub mod split;
pub mod tokenize;
pub mod truecase;
pub mod vocab;

pub use dedup::{deduplicate, KnownLines};
pub use enrich::{enrich, LexiconTagger, Tagger};
pub use escape::escape_moses_chars;
pub use parallel::{par_map, ParConfig, ParMap};
pub use process::{postprocess, preprocess, Processor};
pub use split::split;
pub use tokenize::{detokenize, tokenize, RuleTokenizer, Tokenizer};
pub use truecase::{detruecase, train_truecase, truecase, TruecaseModel};
pub use vocab::{extract_known_tokens, unknown_tokens};
