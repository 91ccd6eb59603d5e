#![forbid(unsafe_code)]
#![deny(missing_docs, unstable_features)]

//! # Sakura
//!
//! A tree hashing encoder in the style of the Sakura coding described in
//! "Sakura: a flexible coding for tree hashing" (<https://keccak.team/files/Sakura.pdf>).
//!
//! The encoder walks an externally built tree of [`Hop`]s (raw message byte
//! streams or chaining nodes with children), frames each node's content so
//! that distinct tree shapes can never produce the same input to the
//! underlying hash function, and feeds every framed node to a fresh
//! accumulator drawn from a pluggable [`Hasher`] factory. Three performance
//! variants are configurable through [`HashingMode`]: kangaroo hopping
//! (inlining a node's first child without an intermediate hash), alignment
//! padding and block interleaving.
//!
//! The framing used here is internally consistent but not guaranteed to be
//! byte-compatible with other implementations of the coding.
//!
//! ## Example
//!
//! ```
//! use sakura::{Encoder, HashingMode, Hop};
//! use sha2::Sha256;
//!
//! let encoder = Encoder::new(HashingMode::with_digest::<Sha256>());
//!
//! let mut root = Hop::chaining(vec![Hop::bytes(*b"ab"), Hop::bytes(*b"cd")]);
//! let digest = encoder.finalize(&mut root).unwrap();
//!
//! assert_eq!(32, digest.len());
//! ```

mod block_size;
mod encoder;
mod error;
mod hop;
mod mode;

pub use self::block_size::BlockSize;
pub use self::encoder::Encoder;
pub use self::error::{Error, Result};
pub use self::hop::Hop;
pub use self::mode::{Hasher, HashingMode};
