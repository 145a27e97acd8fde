//! Error taxonomy for URL translation.
//!
//! Every failure carries the offending token, driver, or count so callers can
//! report precisely what was wrong with the input. Nothing in this crate
//! retries or degrades: a connection string either translates completely or
//! fails with one of these variants.

use thiserror::Error;

use crate::driver::Driver;

/// Errors that can occur while resolving, parsing, or translating a
/// connection URL.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection URL has no scheme: {url:?}")]
    MissingScheme { url: String },

    #[error("unknown database scheme: {scheme:?}")]
    UnknownScheme { scheme: String },

    #[error("invalid URL syntax: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid percent-encoding in {component}")]
    InvalidEncoding { component: &'static str },

    #[error("path has {got} segment(s), which does not fit the {driver} layout")]
    InvalidPathShape { driver: Driver, got: usize },

    #[error("{component} is not representable in a {driver} connection string")]
    UnsupportedComponent {
        driver: Driver,
        component: &'static str,
    },

    #[error("cannot generate {driver} connection string: {reason}")]
    Generate { driver: Driver, reason: String },

    #[error("no connector registered for driver {driver}")]
    NotRegistered { driver: Driver },

    #[error("connector for {driver} failed")]
    Connect {
        driver: Driver,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
