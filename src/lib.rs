/*! # Tunga

Batch corpus preprocessing for machine translation: tokenization, truecasing,
lemma/POS enrichment, deduplication, train/test splitting, format conversion,
Moses factored output and a client for a remote translation endpoint.

Transformations live in [pipeline] and work on lazy sequences of lines,
[processing] wraps them into file level commands.
!*/
pub mod cli;
pub mod client;
pub mod corpus;
pub mod error;
pub mod io;
pub mod lang;
pub mod pipeline;
pub mod processing;
pub mod server;
