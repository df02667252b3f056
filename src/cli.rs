//! Command line arguments and parameters management/parsing.
use std::net::SocketAddr;
use std::path::PathBuf;

use structopt::StructOpt;

use crate::error::Error;

#[derive(Debug, StructOpt)]
#[structopt(name = "tunga", about = "corpus preprocessing for machine translation.")]
/// Holds every command that is callable by the `tunga` command.
pub enum Tunga {
    #[structopt(name = "preprocess", about = "Tokenize, truecase and escape lines")]
    Preprocess(Preprocess),
    #[structopt(name = "postprocess", about = "Unescape, detruecase and detokenize lines")]
    Postprocess(Postprocess),
    #[structopt(name = "write_factor", about = "Write an enriched corpus in Moses factored format")]
    WriteFactor(WriteFactor),
    #[structopt(name = "extract_known_tokens", about = "List distinct tokens")]
    ExtractKnownTokens(ExtractKnownTokens),
    #[structopt(name = "unknown_tokens", about = "List tokens absent from a known tokens file")]
    UnknownTokens(UnknownTokens),
    #[structopt(name = "train_truecase", about = "Train a truecasing model")]
    TrainTruecase(TrainTruecase),
    #[structopt(name = "truecase", about = "Truecase lines")]
    Truecase(Truecase),
    #[structopt(name = "detruecase", about = "Detruecase lines (lossy)")]
    Detruecase(Detruecase),
    #[structopt(name = "split", about = "Split lines in train and test sets")]
    Split(Split),
    #[structopt(name = "enrich", about = "Tokenize and tag lines with lemmas and POS")]
    Enrich(Enrich),
    #[structopt(name = "tokenize", about = "Tokenize lines")]
    Tokenize(Tokenize),
    #[structopt(name = "detokenize", about = "Detokenize lines")]
    Detokenize(Detokenize),
    #[structopt(name = "deduplicate", about = "Remove duplicate lines")]
    Deduplicate(Deduplicate),
    #[structopt(name = "pickle_to_json", about = "Convert a binary corpora file to JSON")]
    PickleToJson(PickleToJson),
    #[structopt(name = "json_to_pickle", about = "Convert a JSON corpora file to binary")]
    JsonToPickle(JsonToPickle),
    #[structopt(name = "read_rmh", about = "Extract sentences from a RMH (TEI-XML) directory")]
    ReadRmh(ReadRmh),
    #[structopt(name = "translate", about = "Translate lines through a translation endpoint")]
    Translate(Translate),
    #[structopt(name = "server", about = "Serve preprocessing and translation over HTTP")]
    Server(Server),
}

#[derive(Debug, StructOpt)]
pub struct Preprocess {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
    #[structopt(parse(from_os_str), help = "truecasing model")]
    pub truecase_model: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Postprocess {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
}

#[derive(Debug, StructOpt)]
/// Moses factored output. Supported factors: --form, --lemma, --pos or all three.
pub struct WriteFactor {
    #[structopt(parse(from_os_str), help = "enriched corpora (json)")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
    #[structopt(long = "lemma", help = "write lemmas")]
    pub lemma: bool,
    #[structopt(long = "pos", help = "write POS tags")]
    pub pos: bool,
    #[structopt(long = "form", help = "write surface forms")]
    pub form: bool,
    #[structopt(long = "lines", default_value = "0", help = "only write the first n lines. 0 for all.")]
    pub lines: usize,
    #[structopt(long = "threads", default_value = "1")]
    pub threads: usize,
    #[structopt(long = "chunksize", default_value = "4000")]
    pub chunksize: usize,
}

#[derive(Debug, StructOpt)]
pub struct ExtractKnownTokens {
    #[structopt(parse(from_os_str), help = "tokenized lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination, one token per line")]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct UnknownTokens {
    #[structopt(parse(from_os_str), help = "tokenized lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "known tokens, one per line")]
    pub known: PathBuf,
    #[structopt(parse(from_os_str), help = "destination, one token per line")]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct TrainTruecase {
    #[structopt(parse(from_os_str), help = "tokenized lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "model destination")]
    pub save_to: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
    #[structopt(long = "threads", default_value = "1")]
    pub threads: usize,
}

#[derive(Debug, StructOpt)]
pub struct Truecase {
    #[structopt(parse(from_os_str), help = "tokenized lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(parse(from_os_str), help = "truecasing model")]
    pub load_from: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Detruecase {
    #[structopt(parse(from_os_str), help = "truecased lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Split {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "train set destination")]
    pub output_train: PathBuf,
    #[structopt(parse(from_os_str), help = "test set destination")]
    pub output_test: PathBuf,
    #[structopt(long = "test_size", default_value = "2000")]
    pub test_size: usize,
    #[structopt(long = "shuffle", help = "shuffle before splitting (default)")]
    pub shuffle: bool,
    #[structopt(long = "no-shuffle", help = "keep input order")]
    pub no_shuffle: bool,
    #[structopt(long = "seed", default_value = "42")]
    pub seed: u64,
}

impl Split {
    /// Shuffling is on unless `--no-shuffle` is given.
    pub fn shuffle(&self) -> bool {
        !self.no_shuffle
    }
}

#[derive(Debug, StructOpt)]
pub struct Enrich {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination (json)")]
    pub output: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
    #[structopt(
        long = "lexicon",
        parse(from_os_str),
        help = "tab separated form/tag/lemma lexicon. Tags are guessed without one."
    )]
    pub lexicon: Option<PathBuf>,
    #[structopt(long = "threads", default_value = "1")]
    pub threads: usize,
    #[structopt(long = "chunksize", default_value = "4000", help = "Number of lines to process at once.")]
    pub chunksize: usize,
    #[structopt(
        long = "lines",
        default_value = "0",
        help = "For debugging, limit processing to x lines per corpus. 0 for all."
    )]
    pub lines: usize,
}

#[derive(Debug, StructOpt)]
pub struct Tokenize {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
    #[structopt(long = "threads", default_value = "1")]
    pub threads: usize,
    #[structopt(long = "batch_size", default_value = "5000000")]
    pub batch_size: usize,
    #[structopt(long = "chunksize", default_value = "10000")]
    pub chunksize: usize,
}

#[derive(Debug, StructOpt)]
pub struct Detokenize {
    #[structopt(parse(from_os_str), help = "tokenized lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(help = "language code")]
    pub lang: String,
}

#[derive(Debug, StructOpt)]
pub struct Deduplicate {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(
        long = "digest",
        help = "compare 64-bit digests instead of whole lines (less memory, may drop colliding lines)"
    )]
    pub digest: bool,
}

#[derive(Debug, StructOpt)]
pub struct PickleToJson {
    #[structopt(parse(from_os_str), help = "binary corpora")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination (json)")]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct JsonToPickle {
    #[structopt(parse(from_os_str), help = "json corpora")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination (binary)")]
    pub output: PathBuf,
    #[structopt(long = "enriched", help = "corpora hold enriched sentences")]
    pub enriched: bool,
}

#[derive(Debug, StructOpt)]
pub struct ReadRmh {
    #[structopt(parse(from_os_str), help = "RMH directory")]
    pub dir: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(long = "threads", default_value = "1", help = "Number of threads to use.")]
    pub threads: usize,
    #[structopt(long = "chunksize", default_value = "400", help = "Number of files to process per thread.")]
    pub chunksize: usize,
}

#[derive(Debug, StructOpt)]
pub struct Translate {
    #[structopt(parse(from_os_str), help = "source lines")]
    pub input: PathBuf,
    #[structopt(parse(from_os_str), help = "destination")]
    pub output: PathBuf,
    #[structopt(help = "source language code")]
    pub lang_from: String,
    #[structopt(help = "target language code")]
    pub lang_to: String,
    #[structopt(default_value = "moses", help = "translation model")]
    pub model: String,
    #[structopt(default_value = "https://nlp.cs.ru.is/moses/translateText", help = "translation endpoint")]
    pub url: String,
    #[structopt(long = "batch_size", default_value = "20")]
    pub batch_size: usize,
}

#[derive(Debug, StructOpt)]
pub struct Server {
    #[structopt(long = "debug", help = "detailed error messages")]
    pub debug: bool,
    #[structopt(long = "addr", default_value = "0.0.0.0:5000")]
    pub addr: SocketAddr,
    #[structopt(long = "url", default_value = "https://nlp.cs.ru.is/moses/translateText", help = "translation endpoint")]
    pub url: String,
    #[structopt(long = "batch_size", default_value = "20")]
    pub batch_size: usize,
    #[structopt(
        long = "truecase_model",
        parse(try_from_str = parse_model_arg),
        help = "truecasing model of a language, as lang=path. Can be repeated."
    )]
    pub truecase_models: Vec<(String, PathBuf)>,
}

/// Parse a `lang=path` pair.
pub fn parse_model_arg(arg: &str) -> Result<(String, PathBuf), Error> {
    match arg.split_once('=') {
        Some((lang, path)) if !lang.is_empty() && !path.is_empty() => {
            Ok((lang.to_string(), PathBuf::from(path)))
        }
        _ => Err(Error::InvalidConfig(format!(
            "expected lang=path, got {}",
            arg
        ))),
    }
}
