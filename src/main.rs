//! # Tunga
//!
//! Corpus preprocessing for machine translation.
//!
//! ```sh
//! USAGE:
//!     tunga <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     deduplicate             Remove duplicate lines
//!     detokenize              Detokenize lines
//!     detruecase              Detruecase lines (lossy)
//!     enrich                  Tokenize and tag lines with lemmas and POS
//!     extract_known_tokens    List distinct tokens
//!     json_to_pickle          Convert a JSON corpora file to binary
//!     pickle_to_json          Convert a binary corpora file to JSON
//!     postprocess             Unescape, detruecase and detokenize lines
//!     preprocess              Tokenize, truecase and escape lines
//!     read_rmh                Extract sentences from a RMH (TEI-XML) directory
//!     server                  Serve preprocessing and translation over HTTP
//!     split                   Split lines in train and test sets
//!     tokenize                Tokenize lines
//!     train_truecase          Train a truecasing model
//!     translate               Translate lines through a translation endpoint
//!     truecase                Truecase lines
//!     unknown_tokens          List tokens absent from a known tokens file
//!     write_factor            Write an enriched corpus in Moses factored format
//! ```
use std::collections::HashMap;

use structopt::StructOpt;

use tunga::cli::Tunga;
use tunga::error::Error;
use tunga::io::writer::moses::Factors;
use tunga::pipeline::{ParConfig, TruecaseModel};
use tunga::processing::{convert, dedup, enrich, process, split, tokens, translate, truecase};
use tunga::server::{self, AppState};

#[macro_use]
extern crate log;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Tunga::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        Tunga::Preprocess(p) => {
            process::preprocess(&p.input, &p.output, &p.lang, &p.truecase_model)?;
        }
        Tunga::Postprocess(p) => {
            process::postprocess(&p.input, &p.output, &p.lang)?;
        }
        Tunga::WriteFactor(w) => {
            let factors = Factors::new(w.form, w.pos, w.lemma);
            let config = ParConfig::chunked(w.threads, w.chunksize);
            enrich::write_factor(&w.input, &w.output, &w.lang, factors, config, w.lines)?;
        }
        Tunga::ExtractKnownTokens(e) => {
            tokens::extract_known_tokens(&e.input, &e.output)?;
        }
        Tunga::UnknownTokens(u) => {
            tokens::unknown_tokens(&u.input, &u.known, &u.output)?;
        }
        Tunga::TrainTruecase(t) => {
            info!("[{}] training truecaser", t.lang);
            truecase::train_truecase(&t.input, &t.save_to, t.threads)?;
        }
        Tunga::Truecase(t) => {
            truecase::truecase(&t.input, &t.output, &t.load_from)?;
        }
        Tunga::Detruecase(d) => {
            truecase::detruecase(&d.input, &d.output)?;
        }
        Tunga::Split(s) => {
            split::split(
                &s.input,
                &s.output_train,
                &s.output_test,
                s.test_size,
                s.shuffle(),
                s.seed,
            )?;
        }
        Tunga::Enrich(e) => {
            let config = ParConfig::chunked(e.threads, e.chunksize);
            enrich::enrich(
                &e.input,
                &e.output,
                &e.lang,
                e.lexicon.as_deref(),
                config,
                e.lines,
            )?;
        }
        Tunga::Tokenize(t) => {
            let config = ParConfig::new(t.threads, t.batch_size, t.chunksize);
            tokens::tokenize(&t.input, &t.output, &t.lang, config)?;
        }
        Tunga::Detokenize(d) => {
            tokens::detokenize(&d.input, &d.output, &d.lang)?;
        }
        Tunga::Deduplicate(d) => {
            dedup::dedup(&d.input, &d.output, d.digest)?;
        }
        Tunga::PickleToJson(p) => {
            convert::pickle_to_json(&p.input, &p.output)?;
        }
        Tunga::JsonToPickle(j) => {
            convert::json_to_pickle(&j.input, &j.output, j.enriched)?;
        }
        Tunga::ReadRmh(r) => {
            convert::read_rmh(&r.dir, &r.output, r.threads, r.chunksize)?;
        }
        Tunga::Translate(t) => {
            // the http client is blocking, keep it off the runtime threads
            tokio::task::spawn_blocking(move || {
                translate::translate(
                    &t.input,
                    &t.output,
                    &t.lang_from,
                    &t.lang_to,
                    &t.model,
                    &t.url,
                    t.batch_size,
                )
            })
            .await
            .map_err(|e| Error::Custom(format!("translation task failed: {}", e)))??;
        }
        Tunga::Server(s) => {
            let mut models = HashMap::new();
            for (lang, path) in s.truecase_models {
                info!("[{}] loading truecase model {:?}", lang, path);
                models.insert(lang, TruecaseModel::load(&path)?);
            }
            let state = AppState::new(s.debug, &s.url, s.batch_size, models);
            server::serve(s.addr, state).await?;
        }
    };
    info!("Done.");
    Ok(())
}
