//! Full-block (128-bit) cipher feedback. No padding; output length equals input length.

use crate::engine::core::{BLOCK_SIZE, Block, BlockCipher};
use crate::engine::modes::util::{for_each_block, load_block, xor_chunks};

/// Serial: each keystream block is the encryption of the previous ciphertext block.
pub fn cfb_encrypt<B: BlockCipher>(cipher: &B, iv: &Block, plaintext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(plaintext.len());
    let mut feedback = *iv;
    for chunk in plaintext.chunks(BLOCK_SIZE) {
        let ct = xor_chunks(&cipher.encrypt_block(&feedback), chunk);
        out.extend_from_slice(&ct[..chunk.len()]);
        // a short chunk can only be the last one, so a partial feedback is never used
        feedback = ct;
    }
    out
}

/// Parallel: all feedback blocks are ciphertext the caller already has.
pub fn cfb_decrypt<B: BlockCipher>(cipher: &B, iv: &Block, ciphertext: &[u8]) -> Vec<u8> {
    let mut out = ciphertext.to_vec();
    for_each_block(&mut out, |i, chunk| {
        let feedback = if i == 0 {
            *iv
        } else {
            load_block(&ciphertext[(i - 1) * BLOCK_SIZE..i * BLOCK_SIZE])
        };
        let pt = xor_chunks(&cipher.encrypt_block(&feedback), chunk);
        let len = chunk.len();
        chunk.copy_from_slice(&pt[..len]);
    });
    out
}
