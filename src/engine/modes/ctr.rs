use crate::engine::core::{Block, BlockCipher};
use crate::engine::modes::util::{add128, for_each_block, xor_chunks};

/// Counter mode over the full 16-byte IV. Block `i` is XORed with the encryption of
/// `IV + i` taken as a 128-bit big-endian integer, wrapping at 2^128. Blocks are
/// independent, so large inputs are processed on the rayon pool in both directions.
pub fn ctr_apply<B: BlockCipher>(cipher: &B, iv: &Block, input: &[u8]) -> Vec<u8> {
    let mut out = input.to_vec();
    for_each_block(&mut out, |i, chunk| {
        let keystream = cipher.encrypt_block(&add128(iv, i as u128));
        let len = chunk.len();
        let mixed = xor_chunks(&keystream, chunk);
        chunk.copy_from_slice(&mixed[..len]);
    });
    out
}
