/*
https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38c.pdf

n = nonce length (7..=13), q = 15 - n bytes hold the payload length
B0 = flags || nonce || [len(P)]_q
     flags = Adata << 6 | ((t - 2) / 2) << 3 | (q - 1)
AAD header = [len(A)] as 2, 6 (ff fe || 32 bit), or 10 (ff ff || 64 bit) bytes, then A,
             zero-padded to a block boundary
MAC  = CBC-MAC over B0 || AAD header || P (zero-padded)
A_i  = (q - 1) || nonce || [i]_q
C    = P ^ E(A_1) || E(A_2) || ...
tag  = MAC[..t] ^ E(A_0)[..t]
*/

use zeroize::Zeroize;

use crate::engine::core::{BLOCK_SIZE, Block, BlockCipher};
use crate::engine::error::*;
use crate::engine::mode::Mode;
use crate::engine::modes::util::{for_each_block, xor_chunks};
use crate::engine::util::ct_eq;

/// CCM encryption. Returns `(ciphertext, tag)`.
pub fn ccm_encrypt<B: BlockCipher>(
    cipher: &B,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    tag_len: usize,
) -> Result<(Vec<u8>, Vec<u8>)> {
    check_params(nonce, plaintext.len(), tag_len)?;

    let mac = cbc_mac(cipher, nonce, aad, plaintext, tag_len);
    let ciphertext = ctr_payload(cipher, nonce, plaintext);
    let tag = finish_tag(cipher, nonce, &mac, tag_len);
    Ok((ciphertext, tag))
}

/// CCM decryption. The payload is decrypted first because the MAC covers the plaintext;
/// on a tag mismatch that buffer is wiped before [`Error::Integrity`] is returned.
pub fn ccm_decrypt<B: BlockCipher>(
    cipher: &B,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    check_params(nonce, ciphertext.len(), tag.len())?;

    let mut plaintext = ctr_payload(cipher, nonce, ciphertext);
    let mac = cbc_mac(cipher, nonce, aad, &plaintext, tag.len());
    let mut expected = finish_tag(cipher, nonce, &mac, tag.len());

    let ok = ct_eq(&expected, tag);
    expected.zeroize();
    if !ok {
        plaintext.zeroize();
        return Err(Error::Integrity);
    }
    Ok(plaintext)
}

fn check_params(nonce: &[u8], payload_len: usize, tag_len: usize) -> Result<()> {
    Mode::Ccm.check_iv_len(nonce.len())?;
    Mode::Ccm.check_tag_len(tag_len)?;

    let q = 15 - nonce.len();
    let max = if q >= 8 { u64::MAX } else { (1u64 << (8 * q)) - 1 };
    if payload_len as u64 > max {
        return Err(Error::InputTooLong {
            len: payload_len,
            max,
        });
    }
    Ok(())
}

/// Counter block `A_i`.
fn counter_block(nonce: &[u8], i: u64) -> Block {
    let q = 15 - nonce.len();
    let mut block = [0u8; BLOCK_SIZE];
    block[0] = (q - 1) as u8;
    block[1..=nonce.len()].copy_from_slice(nonce);
    // q is at most 8, so the counter always fits
    block[BLOCK_SIZE - q..].copy_from_slice(&i.to_be_bytes()[8 - q..]);
    block
}

fn cbc_mac<B: BlockCipher>(
    cipher: &B,
    nonce: &[u8],
    aad: &[u8],
    payload: &[u8],
    tag_len: usize,
) -> Block {
    let q = 15 - nonce.len();

    let mut b0 = [0u8; BLOCK_SIZE];
    b0[0] = (u8::from(!aad.is_empty()) << 6) | (((tag_len - 2) / 2) as u8) << 3 | (q - 1) as u8;
    b0[1..=nonce.len()].copy_from_slice(nonce);
    b0[BLOCK_SIZE - q..].copy_from_slice(&(payload.len() as u64).to_be_bytes()[8 - q..]);

    let mut x = cipher.encrypt_block(&b0);

    if !aad.is_empty() {
        let mut header = encode_aad_len(aad.len());
        header.extend_from_slice(aad);
        for chunk in header.chunks(BLOCK_SIZE) {
            x = cipher.encrypt_block(&xor_chunks(&x, chunk));
        }
    }

    for chunk in payload.chunks(BLOCK_SIZE) {
        x = cipher.encrypt_block(&xor_chunks(&x, chunk));
    }
    x
}

fn encode_aad_len(len: usize) -> Vec<u8> {
    let len = len as u64;
    let mut out = Vec::with_capacity(10);
    if len < 0xff00 {
        out.extend_from_slice(&(len as u16).to_be_bytes());
    } else if len <= u64::from(u32::MAX) {
        out.extend_from_slice(&[0xff, 0xfe]);
        out.extend_from_slice(&(len as u32).to_be_bytes());
    } else {
        out.extend_from_slice(&[0xff, 0xff]);
        out.extend_from_slice(&len.to_be_bytes());
    }
    out
}

/// Payload keystream starts at `A_1`.
fn ctr_payload<B: BlockCipher>(cipher: &B, nonce: &[u8], input: &[u8]) -> Vec<u8> {
    let mut out = input.to_vec();
    for_each_block(&mut out, |i, chunk| {
        let keystream = cipher.encrypt_block(&counter_block(nonce, i as u64 + 1));
        let len = chunk.len();
        let mixed = xor_chunks(&keystream, chunk);
        chunk.copy_from_slice(&mixed[..len]);
    });
    out
}

fn finish_tag<B: BlockCipher>(cipher: &B, nonce: &[u8], mac: &Block, tag_len: usize) -> Vec<u8> {
    let s0 = cipher.encrypt_block(&counter_block(nonce, 0));
    xor_chunks(&s0, mac)[..tag_len].to_vec()
}
