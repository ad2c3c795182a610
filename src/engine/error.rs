use rand::rand_core;
use thiserror::Error;

use crate::engine::mode::Mode;

/// Engine Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine Error type. Every variant is terminal for the call that produced it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to build a key from a slice that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// IV or nonce length does not satisfy the mode's requirement.
    #[error("invalid IV/nonce length for {mode}: {len} bytes")]
    InvalidIvLength { mode: Mode, len: usize },

    /// Tag length is not one the mode supports, or does not match the configured length.
    #[error("invalid tag length for {mode}: {len} bytes")]
    InvalidTagLength { mode: Mode, len: usize },

    /// PKCS#7 padding was malformed after ECB/CBC decryption.
    #[error("invalid padding")]
    InvalidPadding,

    /// Ciphertext stealing needs more than one full block of input.
    #[error("CTS input must be longer than one 16-byte block (got {len} bytes)")]
    ShortInputForCts { len: usize },

    /// Computed authentication tag did not match the supplied tag. Ciphertext and/or AAD
    /// has been modified, or the key/nonce is wrong. No plaintext is released.
    #[error("authentication failed (invalid tag)")]
    Integrity,

    /// A parameter the mode needs was not supplied.
    #[error("{mode} requires a {param}")]
    MissingParameter { mode: Mode, param: &'static str },

    /// A parameter was supplied to a mode that has no use for it.
    #[error("{mode} does not take a {param}")]
    UnexpectedParameter { mode: Mode, param: &'static str },

    /// Provided ciphertext that did not match the expected format of the mode of operation.
    #[error("invalid ciphertext length: {len} bytes ({context})")]
    InvalidCiphertext { len: usize, context: &'static str },

    /// Input is longer than the mode can encode (CCM length field, GCM AAD bound).
    #[error("input too long: {len} bytes (maximum {max})")]
    InputTooLong { len: usize, max: u64 },

    /// Attempted to process more than 2^32 - 2 blocks under one GCM nonce.
    #[error("input size caused counter overflow (GCM allows at most 2^32 - 2 blocks per nonce)")]
    CounterOverflow,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// The tag segment of a `ALG/MODE/TAG` string is not a single byte count.
    #[error("invalid tag length segment: {0:?}")]
    InvalidTagSpec(String),

    /// OS RNG failed during random key or IV generation.
    #[error("OS RNG failed")]
    Rng(#[from] rand_core::OsError),
}
