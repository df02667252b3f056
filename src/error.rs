//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Binary(bincode::Error),
    Xml(roxmltree::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Http(reqwest::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    /// Translation endpoint answered with a non-success status or a malformed body.
    Upstream(String),
    UnknownLang(String),
    /// Unsupported flag combination or out of range parameter.
    InvalidConfig(String),
    /// Broken structural invariant (e.g. parallel sequences of different lengths).
    Invariant(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Binary(e) => write!(f, "binary corpus error: {}", e),
            Error::Xml(e) => write!(f, "xml error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::Http(e) => write!(f, "http error: {}", e),
            Error::ThreadPool(e) => write!(f, "could not build worker pool: {}", e),
            Error::Upstream(msg) => write!(f, "translation endpoint error: {}", msg),
            Error::UnknownLang(lang) => write!(f, "unknown language: {}", lang),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Invariant(msg) => write!(f, "invariant violated: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Error {
        Error::Binary(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Error {
        Error::Xml(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
