use rayon::prelude::*;

use crate::engine::core::{BLOCK_SIZE, Block};

pub const PARALLEL_THRESHOLD: usize = 4 * 1024; // process in parallel if input size gt 4 KiB
const GHASH_R: u128 = 0xE100_0000_0000_0000_0000_0000_0000_0000; // reduction constant for GHASH

/// Applies `f(block_index, block)` to every 16-byte chunk of `data`; the last chunk may
/// be short. Runs on the rayon pool above [`PARALLEL_THRESHOLD`].
pub(crate) fn for_each_block<F>(data: &mut [u8], f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if data.len() > PARALLEL_THRESHOLD {
        data.par_chunks_mut(BLOCK_SIZE)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    } else {
        data.chunks_mut(BLOCK_SIZE)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }
}

/// Copies up to 16 bytes of `chunk` into a zero-padded block.
#[inline(always)]
pub(crate) fn load_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[..chunk.len()].copy_from_slice(chunk);
    block
}

/// XORs `chunk` (up to 16 bytes) into a copy of `y`.
#[inline(always)]
pub(crate) fn xor_chunks(y: &Block, chunk: &[u8]) -> Block {
    let mut out = *y;
    for (o, c) in out.iter_mut().zip(chunk) {
        *o ^= c;
    }
    out
}

/// Adds `n` to the whole block as a 128-bit big-endian integer, wrapping at 2^128.
#[inline(always)]
pub(crate) fn add128(block: &Block, n: u128) -> Block {
    u128::from_be_bytes(*block).wrapping_add(n).to_be_bytes()
}

/// Adds `n` to the low 32 bits of the block only, wrapping at 2^32.
#[inline(always)]
pub(crate) fn add32(block: &Block, n: u32) -> Block {
    let mut out = *block;
    let low = u32::from_be_bytes([block[12], block[13], block[14], block[15]]);
    out[12..].copy_from_slice(&low.wrapping_add(n).to_be_bytes());
    out
}

/// Multiplication in GF(2^128) with the GCM bit order. Branchless over the bits of `x`.
#[inline(always)]
pub(crate) fn gf_mul(x: u128, h: u128) -> u128 {
    let mut v = h;
    let mut z = 0u128;
    for i in 0..128 {
        let bit = (x >> (127 - i)) & 1;
        z ^= v & 0u128.wrapping_sub(bit);
        v = mul_x(v);
    }
    z
}

#[inline(always)]
fn mul_x(v: u128) -> u128 {
    // Multiply by x (in the GHASH field representation)
    let lsb = v & 1;
    (v >> 1) ^ (GHASH_R & 0u128.wrapping_sub(lsb))
}

#[cfg(test)]
pub(crate) mod test_util {
    pub fn hex_to_bytes(s: &str) -> Vec<u8> {
        let s: String = s.split_whitespace().collect();
        assert!(s.len() % 2 == 0, "hex string must have even length");
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    pub fn hex_to_arr_16(hex: &str) -> [u8; 16] {
        let v = hex_to_bytes(hex);
        assert_eq!(v.len(), 16);
        let mut out = [0u8; 16];
        out.copy_from_slice(&v);
        out
    }

    // block-mode vectors reuse the inputs of
    // https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf
    pub const PLAINTEXT: [u8; 64] = [
        0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, //
        0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a, //
        0xae, 0x2d, 0x8a, 0x57, 0x1e, 0x03, 0xac, 0x9c, //
        0x9e, 0xb7, 0x6f, 0xac, 0x45, 0xaf, 0x8e, 0x51, //
        0x30, 0xc8, 0x1c, 0x46, 0xa3, 0x5c, 0xe4, 0x11, //
        0xe5, 0xfb, 0xc1, 0x19, 0x1a, 0x0a, 0x52, 0xef, //
        0xf6, 0x9f, 0x24, 0x45, 0xdf, 0x4f, 0x9b, 0x17, //
        0xad, 0x2b, 0x41, 0x7b, 0xe6, 0x6c, 0x37, 0x10, //
    ];

    pub const KEY_128: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, //
        0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c, //
    ];

    pub const KEY_192: [u8; 24] = [
        0x8e, 0x73, 0xb0, 0xf7, 0xda, 0x0e, 0x64, 0x52, //
        0xc8, 0x10, 0xf3, 0x2b, 0x80, 0x90, 0x79, 0xe5, //
        0x62, 0xf8, 0xea, 0xd2, 0x52, 0x2c, 0x6b, 0x7b, //
    ];

    pub const KEY_256: [u8; 32] = [
        0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, //
        0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77, 0x81, //
        0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, //
        0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14, 0xdf, 0xf4, //
    ];

    pub const IV: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, //
        0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, //
    ];

    pub const CTR_IV: [u8; 16] = [
        0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, //
        0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff, //
    ];
}
