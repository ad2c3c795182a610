use crate::engine::core::{BLOCK_SIZE, Block, BlockCipher};
use crate::engine::error::*;
use crate::engine::modes::util::{for_each_block, load_block, xor_chunks};
use crate::engine::padding::{pad, unpad};

/// CBC encryption with PKCS#7 padding. Each block depends on the previous ciphertext
/// block, so this runs serially.
pub fn cbc_encrypt<B: BlockCipher>(cipher: &B, iv: &Block, plaintext: &[u8]) -> Vec<u8> {
    let mut buf = pad(plaintext);
    cbc_chain(cipher, iv, &mut buf);
    buf
}

/// CBC decryption followed by PKCS#7 unpadding.
pub fn cbc_decrypt<B: BlockCipher>(cipher: &B, iv: &Block, ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertext {
            len: ciphertext.len(),
            context: "CBC ciphertext not a non-empty multiple of 16 bytes",
        });
    }
    let mut buf = cbc_unchain(cipher, iv, ciphertext);
    unpad(&mut buf)?;
    Ok(buf)
}

/// Encrypts whole blocks of `buf` in place. Also drives ciphertext stealing.
pub(crate) fn cbc_chain<B: BlockCipher>(cipher: &B, iv: &Block, buf: &mut [u8]) -> Block {
    let mut prev = *iv;
    for chunk in buf.chunks_exact_mut(BLOCK_SIZE) {
        prev = cipher.encrypt_block(&xor_chunks(&prev, chunk));
        chunk.copy_from_slice(&prev);
    }
    prev
}

/// Decrypts whole blocks. Every chaining input is already known, so blocks are
/// independent and go to the rayon pool for large inputs.
pub(crate) fn cbc_unchain<B: BlockCipher>(cipher: &B, iv: &Block, ciphertext: &[u8]) -> Vec<u8> {
    let mut buf = ciphertext.to_vec();
    for_each_block(&mut buf, |i, chunk| {
        let prev = if i == 0 {
            iv.as_slice()
        } else {
            &ciphertext[(i - 1) * BLOCK_SIZE..i * BLOCK_SIZE]
        };
        let dec = cipher.decrypt_block(&load_block(chunk));
        chunk.copy_from_slice(&xor_chunks(&dec, prev));
    });
    buf
}
