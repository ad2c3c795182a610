//! AES (FIPS-197) behind the same [`BlockCipher`] seam as ARIA. The state is stored
//! column-major: byte `4 * col + row`.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::constants::{RCON, SBOX, SBOX_INV};
use super::{Block, BlockCipher, xor_block};
use crate::engine::key::Key;

/// Source index for each output byte of ShiftRows.
const SHIFT: [usize; 16] = [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];

/// Source index for each output byte of InvShiftRows.
const SHIFT_INV: [usize; 16] = [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// AES instance holding 11, 13, or 15 round keys.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes {
    round_keys: Vec<Block>,
}

impl Aes {
    pub fn new(key: &Key) -> Self {
        Self {
            round_keys: expand_key(key.as_bytes()),
        }
    }

    pub fn rounds(&self) -> usize {
        self.round_keys.len() - 1
    }
}

impl BlockCipher for Aes {
    const NAME: &'static str = "AES";

    fn from_key(key: &Key) -> Self {
        Self::new(key)
    }

    fn encrypt_block(&self, block: &Block) -> Block {
        let rk = &self.round_keys;
        let last = rk.len() - 1;
        let mut state = *block;

        xor_block(&mut state, &rk[0]);
        for round_key in &rk[1..last] {
            state = sub_shift(&state, &SBOX, &SHIFT);
            mix_columns(&mut state);
            xor_block(&mut state, round_key);
        }
        state = sub_shift(&state, &SBOX, &SHIFT);
        xor_block(&mut state, &rk[last]);
        state
    }

    fn decrypt_block(&self, block: &Block) -> Block {
        let rk = &self.round_keys;
        let last = rk.len() - 1;
        let mut state = *block;

        xor_block(&mut state, &rk[last]);
        for round_key in rk[1..last].iter().rev() {
            state = sub_shift(&state, &SBOX_INV, &SHIFT_INV);
            xor_block(&mut state, round_key);
            mix_columns_inv(&mut state);
        }
        state = sub_shift(&state, &SBOX_INV, &SHIFT_INV);
        xor_block(&mut state, &rk[0]);
        state
    }
}

/// SubBytes and ShiftRows fused; the two commute.
#[inline(always)]
fn sub_shift(state: &Block, sbox: &[u8; 256], shift: &[usize; 16]) -> Block {
    std::array::from_fn(|i| sbox[state[shift[i]] as usize])
}

/// Multiply by x in GF(2^8), branchless.
#[inline(always)]
fn dbl(a: u8) -> u8 {
    (a << 1) ^ (0x1b & 0u8.wrapping_sub(a >> 7))
}

#[inline(always)]
fn mix_columns(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let (a, b, c, d) = (col[0], col[1], col[2], col[3]);
        col[0] = dbl(a ^ b) ^ b ^ c ^ d;
        col[1] = dbl(b ^ c) ^ c ^ d ^ a;
        col[2] = dbl(c ^ d) ^ d ^ a ^ b;
        col[3] = dbl(d ^ a) ^ a ^ b ^ c;
    }
}

/// InvMixColumns as a pre-multiplication by {04}x^2 + {05} followed by MixColumns.
#[inline(always)]
fn mix_columns_inv(state: &mut Block) {
    for col in state.chunks_exact_mut(4) {
        let u = dbl(dbl(col[0] ^ col[2]));
        let v = dbl(dbl(col[1] ^ col[3]));
        col[0] ^= u;
        col[1] ^= v;
        col[2] ^= u;
        col[3] ^= v;
    }
    mix_columns(state);
}

/// Key schedule over 32-bit big-endian words. Nk words of key give Nk + 6 rounds.
fn expand_key(key: &[u8]) -> Vec<Block> {
    let nk = key.len() / 4;
    let total = (nk + 7) * 4;

    let mut w: Vec<u32> = key
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w.push(w[i - nk] ^ temp);
    }

    let round_keys = w
        .chunks_exact(4)
        .map(|words| {
            let mut rk = [0u8; 16];
            for (dst, word) in rk.chunks_exact_mut(4).zip(words) {
                dst.copy_from_slice(&word.to_be_bytes());
            }
            rk
        })
        .collect();
    w.zeroize();
    round_keys
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(|b| SBOX[b as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::Result;
    use crate::engine::modes::util::test_util::{hex_to_arr_16, hex_to_bytes};

    const PLAINTEXT: &str = "00112233445566778899aabbccddeeff";

    // FIPS-197 Appendix C
    #[test]
    fn fips197_examples() -> Result<()> {
        let cases = [
            (
                "000102030405060708090a0b0c0d0e0f",
                "69c4e0d86a7b0430d8cdb78070b4c55a",
            ),
            (
                "000102030405060708090a0b0c0d0e0f1011121314151617",
                "dda97ca4864cdfe06eaf70a0ec0d7191",
            ),
            (
                "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
                "8ea2b7ca516745bfeafc49904b496089",
            ),
        ];
        for (key, expected) in cases {
            let aes = Aes::new(&Key::try_from_slice(&hex_to_bytes(key))?);
            let ct = aes.encrypt_block(&hex_to_arr_16(PLAINTEXT));
            assert_eq!(ct, hex_to_arr_16(expected), "AES-{} block mismatch", key.len() * 4);
            assert_eq!(aes.decrypt_block(&ct), hex_to_arr_16(PLAINTEXT));
        }
        Ok(())
    }

    #[test]
    fn mix_columns_known_columns() {
        // columns from https://en.wikipedia.org/wiki/Rijndael_MixColumns
        let mut state: Block = [
            0xdb, 0x13, 0x53, 0x45, 0xf2, 0x0a, 0x22, 0x5c, //
            0x01, 0x01, 0x01, 0x01, 0x2d, 0x26, 0x31, 0x4c, //
        ];
        mix_columns(&mut state);
        assert_eq!(
            state,
            [
                0x8e, 0x4d, 0xa1, 0xbc, 0x9f, 0xdc, 0x58, 0x9d, //
                0x01, 0x01, 0x01, 0x01, 0x4d, 0x7e, 0xbd, 0xf8, //
            ]
        );
        mix_columns_inv(&mut state);
        assert_eq!(state[..4], [0xdb, 0x13, 0x53, 0x45]);
    }

    #[test]
    fn shift_tables_are_inverse() {
        for i in 0..16 {
            assert_eq!(SHIFT[SHIFT_INV[i]], i);
        }
    }

    #[test]
    fn round_count_follows_key_size() -> Result<()> {
        assert_eq!(Aes::new(&Key::try_from_slice(&[1u8; 16])?).rounds(), 10);
        assert_eq!(Aes::new(&Key::try_from_slice(&[1u8; 24])?).rounds(), 12);
        assert_eq!(Aes::new(&Key::try_from_slice(&[1u8; 32])?).rounds(), 14);
        Ok(())
    }
}
