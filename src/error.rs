use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "dump")]
    #[error("malformed event in {path}, line {line}")]
    Dump {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("reading `{0}` requires the ROOT/EDM framework; convert it to an event dump first")]
    FrameworkRequired(String),
    #[error("no event source named by `{0}` can be opened without the `dump` feature")]
    Unsupported(String),
    #[error("no product labelled `{label}` of type {expected}")]
    MissingProduct {
        label: String,
        expected: &'static str,
    },
    #[error("product `{label}` has type {found}, expected {expected}")]
    ProductType {
        label: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("failed to write report")]
    Output(#[source] std::io::Error),
}
