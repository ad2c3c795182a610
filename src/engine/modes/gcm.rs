/*
https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38d.pdf

H = block of 0s encrypted with key
start with accumulator s = 0
for each 16-byte block b:
    s = (s ^ b) * H (GF128 multiplication)

where blocks are:
    - all AAD blocks (padded)
    - all ciphertext blocks (padded)
    - one block comprised [len(aad)]_64 || [len(ct)]_64, in bits

final tag = (s ^ encrypt_block(J0))[..t]

where J0 is:
    - nonce || 1u32 for a 12-byte nonce
    - GHASH(nonce (padded) || 0^64 || [len(nonce)]_64) otherwise

payload blocks use counters inc32(J0), inc32(inc32(J0)), ...
*/

use crate::engine::core::{BLOCK_SIZE, Block, BlockCipher};
use crate::engine::error::*;
use crate::engine::mode::Mode;
use crate::engine::modes::util::{add32, for_each_block, gf_mul, load_block, xor_chunks};
use crate::engine::util::ct_eq;

/// Most blocks one nonce can cover: 2^32 - 2.
const MAX_BLOCKS: u64 = (1 << 32) - 2;

/// Incremental GHASH keyed by H.
struct GHash {
    h: u128,
    acc: u128,
}

impl GHash {
    fn new(h: &Block) -> Self {
        Self {
            h: u128::from_be_bytes(*h),
            acc: 0,
        }
    }

    /// Absorbs `data`, zero-padding the last partial block.
    fn update(&mut self, data: &[u8]) {
        for chunk in data.chunks(BLOCK_SIZE) {
            let block = u128::from_be_bytes(load_block(chunk));
            self.acc = gf_mul(self.acc ^ block, self.h);
        }
    }

    fn update_lengths(&mut self, a_bits: u64, b_bits: u64) {
        let mut len = [0u8; BLOCK_SIZE];
        len[..8].copy_from_slice(&a_bits.to_be_bytes());
        len[8..].copy_from_slice(&b_bits.to_be_bytes());
        self.update(&len);
    }

    fn finalize(self) -> Block {
        self.acc.to_be_bytes()
    }
}

/// Keyed state shared by encryption and decryption for one nonce.
struct GcmContext {
    h: Block,
    j0: Block,
}

impl GcmContext {
    fn new<B: BlockCipher>(cipher: &B, nonce: &[u8]) -> Result<Self> {
        Mode::Gcm.check_iv_len(nonce.len())?;
        let h = cipher.encrypt_block(&[0u8; BLOCK_SIZE]);

        let j0 = if nonce.len() == 12 {
            let mut j0 = [0u8; BLOCK_SIZE];
            j0[..12].copy_from_slice(nonce);
            j0[15] = 1;
            j0
        } else {
            let mut ghash = GHash::new(&h);
            ghash.update(nonce);
            ghash.update_lengths(0, bit_len(nonce.len())?);
            ghash.finalize()
        };
        Ok(Self { h, j0 })
    }

    fn tag<B: BlockCipher>(
        &self,
        cipher: &B,
        aad: &[u8],
        ciphertext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>> {
        let mut ghash = GHash::new(&self.h);
        ghash.update(aad);
        ghash.update(ciphertext);
        ghash.update_lengths(bit_len(aad.len())?, bit_len(ciphertext.len())?);

        let s = ghash.finalize();
        Ok(xor_chunks(&cipher.encrypt_block(&self.j0), &s)[..tag_len].to_vec())
    }

    /// CTR over the payload starting at inc32(J0).
    fn apply_keystream<B: BlockCipher>(&self, cipher: &B, input: &[u8]) -> Vec<u8> {
        let mut out = input.to_vec();
        for_each_block(&mut out, |i, chunk| {
            // wraps mod 2^32 as inc32 does; check_len keeps i below 2^32 - 2
            let keystream = cipher.encrypt_block(&add32(&self.j0, i as u32 + 1));
            let len = chunk.len();
            let mixed = xor_chunks(&keystream, chunk);
            chunk.copy_from_slice(&mixed[..len]);
        });
        out
    }
}

fn bit_len(len: usize) -> Result<u64> {
    (len as u64).checked_mul(8).ok_or(Error::InputTooLong {
        len,
        max: u64::MAX / 8,
    })
}

fn check_len(len: usize) -> Result<()> {
    if (len as u64).div_ceil(BLOCK_SIZE as u64) > MAX_BLOCKS {
        return Err(Error::CounterOverflow);
    }
    Ok(())
}

/// GCM encryption. Returns `(ciphertext, tag)`.
pub fn gcm_encrypt<B: BlockCipher>(
    cipher: &B,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    tag_len: usize,
) -> Result<(Vec<u8>, Vec<u8>)> {
    Mode::Gcm.check_tag_len(tag_len)?;
    check_len(plaintext.len())?;

    let ctx = GcmContext::new(cipher, nonce)?;
    let ciphertext = ctx.apply_keystream(cipher, plaintext);
    let tag = ctx.tag(cipher, aad, &ciphertext, tag_len)?;
    Ok((ciphertext, tag))
}

/// GCM decryption. The tag is checked over the ciphertext before anything is decrypted,
/// so a forged message never yields plaintext.
pub fn gcm_decrypt<B: BlockCipher>(
    cipher: &B,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    Mode::Gcm.check_tag_len(tag.len())?;
    check_len(ciphertext.len())?;

    let ctx = GcmContext::new(cipher, nonce)?;
    let expected = ctx.tag(cipher, aad, ciphertext, tag.len())?;
    if !ct_eq(&expected, tag) {
        return Err(Error::Integrity);
    }
    Ok(ctx.apply_keystream(cipher, ciphertext))
}
