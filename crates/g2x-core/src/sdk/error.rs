//! SDK error type: load, symbol, and call failures.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading the SDK or calling into it.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("failed to load SDK library {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("SDK library {path} is missing entry point {symbol}")]
    MissingSymbol { path: PathBuf, symbol: String },

    /// A bound entry point returned a nonzero code.
    #[error("{api} failed with return code {code}")]
    Call { api: String, code: i64 },

    /// An argument could not cross the C boundary (e.g. interior NUL).
    #[error("invalid argument for {api}: {reason}")]
    Argument { api: String, reason: String },

    /// A query entry point produced no data.
    #[error("{api} returned no data")]
    Empty { api: String },
}
