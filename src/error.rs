//! Error types for menu generation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// Address does not split into exactly three non-empty segments.
    #[error("malformed group address {address:?}: expected three '/'-separated segments")]
    MalformedAddress { address: String },

    /// Persisting a document failed.
    #[error("failed to store document {reference}")]
    Storage {
        reference: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
