use rayon::prelude::*;

use crate::engine::core::{BLOCK_SIZE, Block, BlockCipher};
use crate::engine::modes::util::PARALLEL_THRESHOLD;
use crate::engine::util::xor_in_place;

/// Output feedback. The keystream is the iterated encryption of the IV and never
/// touches the data, so encryption and decryption are the same operation.
pub fn ofb_apply<B: BlockCipher>(cipher: &B, iv: &Block, input: &[u8]) -> Vec<u8> {
    let mut out = keystream(cipher, iv, input.len());

    if input.len() > PARALLEL_THRESHOLD {
        out.par_chunks_mut(BLOCK_SIZE)
            .zip(input.par_chunks(BLOCK_SIZE))
            .for_each(|(ks, data)| xor_in_place(ks, data));
    } else {
        xor_in_place(&mut out, input);
    }
    out
}

/// Serial keystream generation, truncated to `len`.
fn keystream<B: BlockCipher>(cipher: &B, iv: &Block, len: usize) -> Vec<u8> {
    let mut ks = Vec::with_capacity(len.next_multiple_of(BLOCK_SIZE));
    let mut state = *iv;
    while ks.len() < len {
        state = cipher.encrypt_block(&state);
        ks.extend_from_slice(&state);
    }
    ks.truncate(len);
    ks
}
