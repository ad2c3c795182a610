//! ARIA block cipher as specified in RFC 5794.
//!
//! The state is 16 bytes. Odd rounds use substitution layer SL1 and even rounds SL2,
//! each followed by the involutive diffusion layer A. The last round replaces A with a
//! second round-key addition. 128, 192, and 256-bit keys give 12, 14, and 16 rounds.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::constants::{CK1, CK2, CK3, SB2, SB4, SBOX, SBOX_INV};
use super::{Block, BlockCipher, xor_block};
use crate::engine::key::{Key, KeySize};

/// Inputs XORed into each output byte of the diffusion layer A.
const DIFFUSION: [[usize; 7]; 16] = [
    [3, 4, 6, 8, 9, 13, 14],
    [2, 5, 7, 8, 9, 12, 15],
    [1, 4, 6, 10, 11, 12, 15],
    [0, 5, 7, 10, 11, 13, 14],
    [0, 2, 5, 8, 11, 14, 15],
    [1, 3, 4, 9, 10, 14, 15],
    [0, 2, 7, 9, 10, 12, 13],
    [1, 3, 6, 8, 11, 12, 13],
    [0, 1, 4, 7, 10, 13, 15],
    [0, 1, 5, 6, 11, 12, 14],
    [2, 3, 5, 6, 8, 13, 15],
    [2, 3, 4, 7, 9, 12, 14],
    [1, 2, 6, 7, 9, 11, 12],
    [0, 3, 6, 7, 8, 10, 13],
    [0, 3, 4, 5, 9, 11, 14],
    [1, 2, 4, 5, 8, 10, 15],
];

/// Right-rotation applied to the W words for each group of four round keys
/// (19, 31, then left 61, left 31, left 19 expressed as right rotations).
const KEY_ROTATIONS: [u32; 5] = [19, 31, 67, 97, 109];

/// ARIA instance holding the expanded encryption and decryption round keys.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aria {
    enc_keys: Vec<Block>,
    dec_keys: Vec<Block>,
}

impl Aria {
    /// Expands `key` into round keys. Key length was validated when the [`Key`] was built.
    pub fn new(key: &Key) -> Self {
        let enc_keys = expand_key(key);
        let dec_keys = invert_keys(&enc_keys);
        Self { enc_keys, dec_keys }
    }

    /// Number of rounds: 12, 14, or 16.
    pub fn rounds(&self) -> usize {
        self.enc_keys.len() - 1
    }
}

impl BlockCipher for Aria {
    const NAME: &'static str = "ARIA";

    fn from_key(key: &Key) -> Self {
        Self::new(key)
    }

    #[inline]
    fn encrypt_block(&self, block: &Block) -> Block {
        crypt(block, &self.enc_keys)
    }

    #[inline]
    fn decrypt_block(&self, block: &Block) -> Block {
        crypt(block, &self.dec_keys)
    }
}

/// Encryption and decryption share one round structure; only the key order differs.
#[inline(always)]
fn crypt(input: &Block, round_keys: &[Block]) -> Block {
    let rounds = round_keys.len() - 1;
    let mut state = *input;

    for (i, rk) in round_keys[..rounds - 1].iter().enumerate() {
        state = if i % 2 == 0 {
            odd_round(&state, rk)
        } else {
            even_round(&state, rk)
        };
    }

    // final round: SL2 between two key additions, no diffusion
    xor_block(&mut state, &round_keys[rounds - 1]);
    substitute_even(&mut state);
    xor_block(&mut state, &round_keys[rounds]);
    state
}

/// FO: key addition, SL1, A.
#[inline(always)]
fn odd_round(state: &Block, rk: &Block) -> Block {
    let mut x = *state;
    xor_block(&mut x, rk);
    substitute_odd(&mut x);
    diffuse(&x)
}

/// FE: key addition, SL2, A.
#[inline(always)]
fn even_round(state: &Block, rk: &Block) -> Block {
    let mut x = *state;
    xor_block(&mut x, rk);
    substitute_even(&mut x);
    diffuse(&x)
}

/// SL1 applies SB1, SB2, SB3, SB4 to each group of four bytes.
#[inline(always)]
fn substitute_odd(state: &mut Block) {
    for quad in state.chunks_exact_mut(4) {
        quad[0] = SBOX[quad[0] as usize];
        quad[1] = SB2[quad[1] as usize];
        quad[2] = SBOX_INV[quad[2] as usize];
        quad[3] = SB4[quad[3] as usize];
    }
}

/// SL2 applies SB3, SB4, SB1, SB2: the inverse of SL1.
#[inline(always)]
fn substitute_even(state: &mut Block) {
    for quad in state.chunks_exact_mut(4) {
        quad[0] = SBOX_INV[quad[0] as usize];
        quad[1] = SB4[quad[1] as usize];
        quad[2] = SBOX[quad[2] as usize];
        quad[3] = SB2[quad[3] as usize];
    }
}

/// Diffusion layer A, a 16x16 binary matrix that is its own inverse.
#[inline(always)]
fn diffuse(x: &Block) -> Block {
    let mut out = [0u8; 16];
    for (o, row) in out.iter_mut().zip(DIFFUSION.iter()) {
        *o = row.iter().fold(0, |acc, &j| acc ^ x[j]);
    }
    out
}

fn expand_key(key: &Key) -> Vec<Block> {
    let bytes = key.as_bytes();
    let (ck, rounds) = match key.size() {
        KeySize::Bits128 => ([CK1, CK2, CK3], 12),
        KeySize::Bits192 => ([CK2, CK3, CK1], 14),
        KeySize::Bits256 => ([CK3, CK1, CK2], 16),
    };

    // KL is the first 128 bits, KR the remainder zero-padded to 128 bits
    let mut kl = [0u8; 16];
    let mut kr = [0u8; 16];
    kl.copy_from_slice(&bytes[..16]);
    kr[..bytes.len() - 16].copy_from_slice(&bytes[16..]);

    // W0..W3 via a 3-round Feistel network keyed by the CK constants
    let w0 = kl;
    let mut w1 = odd_round(&w0, &ck[0].to_be_bytes());
    xor_block(&mut w1, &kr);
    let mut w2 = even_round(&w1, &ck[1].to_be_bytes());
    xor_block(&mut w2, &w0);
    let mut w3 = odd_round(&w2, &ck[2].to_be_bytes());
    xor_block(&mut w3, &w1);

    let mut w = [
        u128::from_be_bytes(w0),
        u128::from_be_bytes(w1),
        u128::from_be_bytes(w2),
        u128::from_be_bytes(w3),
    ];

    // ek[i] = W[i mod 4] ^ (W[(i + 1) mod 4] rotated)
    let round_keys = (0..=rounds)
        .map(|i| {
            let rot = KEY_ROTATIONS[i / 4];
            (w[i % 4] ^ w[(i + 1) % 4].rotate_right(rot)).to_be_bytes()
        })
        .collect();

    kl.zeroize();
    kr.zeroize();
    w.zeroize();
    round_keys
}

/// Decryption keys: reversed encryption keys, with A applied to all but the outer two.
fn invert_keys(enc_keys: &[Block]) -> Vec<Block> {
    let n = enc_keys.len() - 1;
    enc_keys
        .iter()
        .rev()
        .enumerate()
        .map(|(i, rk)| if i == 0 || i == n { *rk } else { diffuse(rk) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::Result;
    use crate::engine::modes::util::test_util::{hex_to_arr_16, hex_to_bytes};

    const PLAINTEXT: &str = "00112233445566778899aabbccddeeff";

    // RFC 5794 Appendix A
    #[test]
    fn rfc5794_aria_128() -> Result<()> {
        let key = Key::try_from_slice(&hex_to_bytes("000102030405060708090a0b0c0d0e0f"))?;
        let aria = Aria::new(&key);
        let ct = aria.encrypt_block(&hex_to_arr_16(PLAINTEXT));
        assert_eq!(ct, hex_to_arr_16("d718fbd6ab644c739da95f3be6451778"));
        assert_eq!(aria.decrypt_block(&ct), hex_to_arr_16(PLAINTEXT));
        Ok(())
    }

    #[test]
    fn rfc5794_aria_192() -> Result<()> {
        let key = Key::try_from_slice(&hex_to_bytes(
            "000102030405060708090a0b0c0d0e0f1011121314151617",
        ))?;
        let aria = Aria::new(&key);
        let ct = aria.encrypt_block(&hex_to_arr_16(PLAINTEXT));
        assert_eq!(ct, hex_to_arr_16("26449c1805dbe7aa25a468ce263a9e79"));
        assert_eq!(aria.decrypt_block(&ct), hex_to_arr_16(PLAINTEXT));
        Ok(())
    }

    #[test]
    fn rfc5794_aria_256() -> Result<()> {
        let key = Key::try_from_slice(&hex_to_bytes(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        ))?;
        let aria = Aria::new(&key);
        let ct = aria.encrypt_block(&hex_to_arr_16(PLAINTEXT));
        assert_eq!(ct, hex_to_arr_16("f92bd7c79fb72e2f2b8f80c1972d24fc"));
        assert_eq!(aria.decrypt_block(&ct), hex_to_arr_16(PLAINTEXT));
        Ok(())
    }

    #[test]
    fn round_count_follows_key_size() -> Result<()> {
        assert_eq!(Aria::new(&Key::try_from_slice(&[7u8; 16])?).rounds(), 12);
        assert_eq!(Aria::new(&Key::try_from_slice(&[7u8; 24])?).rounds(), 14);
        assert_eq!(Aria::new(&Key::try_from_slice(&[7u8; 32])?).rounds(), 16);
        Ok(())
    }

    #[test]
    fn diffusion_is_an_involution() {
        let x: Block = std::array::from_fn(|i| (i as u8).wrapping_mul(37) ^ 0x5a);
        assert_eq!(diffuse(&diffuse(&x)), x);
    }

    #[test]
    fn substitution_layers_are_inverse() {
        let original: Block = std::array::from_fn(|i| i as u8 * 17);
        let mut x = original;
        substitute_odd(&mut x);
        assert_ne!(x, original);
        substitute_even(&mut x);
        assert_eq!(x, original);
    }
}
