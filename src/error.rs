use std::io;

use thiserror::Error;

/// Errors that can abort an encoding call
///
/// A failing call yields no usable output and is never retried internally;
/// re-invoking the encoder on the same tree is the caller's decision.
#[derive(Debug, Error)]
pub enum Error {
    /// A message hop's byte stream failed mid-read
    #[error("message source read failed")]
    SourceRead(#[from] io::Error),
    /// The base hash factory could not produce an accumulator
    #[error("hash factory failed: {0}")]
    HashFactory(String),
}

/// Result of an encoding call
pub type Result<T> = core::result::Result<T, Error>;
