use crate::engine::core::{BLOCK_SIZE, BlockCipher};
use crate::engine::error::*;
use crate::engine::modes::util::{for_each_block, load_block};
use crate::engine::padding::{pad, unpad};

/// Core ECB encryption. PKCS#7 pads, then encrypts every block independently.
pub fn ecb_encrypt<B: BlockCipher>(cipher: &B, plaintext: &[u8]) -> Vec<u8> {
    let mut buf = pad(plaintext);
    for_each_block(&mut buf, |_, chunk| {
        let enc = cipher.encrypt_block(&load_block(chunk));
        chunk.copy_from_slice(&enc);
    });
    buf
}

/// Core ECB decryption. Input must be a non-empty multiple of 16 bytes ending in valid
/// PKCS#7 padding.
pub fn ecb_decrypt<B: BlockCipher>(cipher: &B, ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertext {
            len: ciphertext.len(),
            context: "ECB ciphertext not a non-empty multiple of 16 bytes",
        });
    }

    let mut buf = ciphertext.to_vec();
    for_each_block(&mut buf, |_, chunk| {
        let dec = cipher.decrypt_block(&load_block(chunk));
        chunk.copy_from_slice(&dec);
    });
    unpad(&mut buf)?;
    Ok(buf)
}
