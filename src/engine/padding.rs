//! PKCS#7 padding for the block-aligned modes (ECB and CBC).

use crate::engine::core::BLOCK_SIZE;
use crate::engine::error::{Error, Result};

/// Extend `input` to a multiple of 16 bytes. Each appended byte holds the number of
/// bytes appended; aligned input gains a full block of 0x10.
pub fn pad(input: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - input.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(input.len() + pad_len);
    out.extend_from_slice(input);
    out.resize(input.len() + pad_len, pad_len as u8);
    out
}

/// Remove and validate PKCS#7 padding in place.
pub fn unpad(input: &mut Vec<u8>) -> Result<()> {
    let pad = match input.last() {
        Some(&b) => b as usize,
        None => return Err(Error::InvalidPadding),
    };
    if pad == 0 || pad > BLOCK_SIZE || pad > input.len() {
        return Err(Error::InvalidPadding);
    }

    // inspect every padding byte, no early exit
    let start = input.len() - pad;
    let bad = input[start..]
        .iter()
        .fold(0u8, |acc, &b| acc | (b ^ pad as u8));
    if bad != 0 {
        return Err(Error::InvalidPadding);
    }

    input.truncate(start);
    Ok(())
}
