//! 128-bit block primitives. Every mode of operation is written against [`BlockCipher`]
//! and never looks inside a primitive, so ARIA and AES are interchangeable.

pub(crate) mod constants;
mod aes;
mod aria;

pub use aes::Aes;
pub use aria::Aria;

use crate::engine::key::Key;

/// Block size in bytes shared by every supported primitive.
pub const BLOCK_SIZE: usize = 16;

pub type Block = [u8; BLOCK_SIZE];

/// A keyed 128-bit permutation. Implementors expand the key once on construction;
/// block calls take `&self` so one instance can be shared across threads.
pub trait BlockCipher: Send + Sync {
    /// Algorithm name used in logs.
    const NAME: &'static str;

    fn from_key(key: &Key) -> Self
    where
        Self: Sized;

    fn encrypt_block(&self, block: &Block) -> Block;

    fn decrypt_block(&self, block: &Block) -> Block;
}

#[inline(always)]
pub(crate) fn xor_block(state: &mut Block, other: &Block) {
    for (s, o) in state.iter_mut().zip(other) {
        *s ^= o;
    }
}
