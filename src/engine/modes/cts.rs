//! CBC with ciphertext stealing, variant CS3: the final two ciphertext blocks are always
//! swapped and the penultimate one is cut to the length of the final plaintext block.
//! Ciphertext is exactly as long as the plaintext, which must exceed one block.

use crate::engine::core::{BLOCK_SIZE, Block, BlockCipher};
use crate::engine::error::*;
use crate::engine::modes::cbc::{cbc_chain, cbc_unchain};
use crate::engine::modes::util::{load_block, xor_chunks};

pub fn cts_encrypt<B: BlockCipher>(cipher: &B, iv: &Block, plaintext: &[u8]) -> Result<Vec<u8>> {
    let (n, r) = split_lengths(plaintext.len())?;

    let mut buf = plaintext.to_vec();
    buf.resize(n * BLOCK_SIZE, 0);
    cbc_chain(cipher, iv, &mut buf);

    // ... C[n-2] | C[n-1] | C[n]  becomes  ... C[n-2] | C[n] | C[n-1][..r]
    let tail = buf.split_off((n - 2) * BLOCK_SIZE);
    buf.extend_from_slice(&tail[BLOCK_SIZE..]);
    buf.extend_from_slice(&tail[..r]);
    Ok(buf)
}

pub fn cts_decrypt<B: BlockCipher>(cipher: &B, iv: &Block, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let (n, r) = split_lengths(ciphertext.len())?;

    let (head, tail) = ciphertext.split_at((n - 2) * BLOCK_SIZE);
    let (last_full, stolen) = tail.split_at(BLOCK_SIZE);
    let chain = match head.len() {
        0 => *iv,
        len => load_block(&head[len - BLOCK_SIZE..]),
    };

    // D(C[n]) = (P[n] | 0..) ^ C[n-1], and the tail of C[n-1] is exactly what was stolen
    let z = cipher.decrypt_block(&load_block(last_full));
    let mut penultimate = z;
    penultimate[..r].copy_from_slice(stolen);

    let mut out = cbc_unchain(cipher, iv, head);
    out.extend_from_slice(&xor_chunks(&cipher.decrypt_block(&penultimate), &chain));
    out.extend_from_slice(&xor_chunks(&z, stolen)[..r]);
    Ok(out)
}

/// Block count and length of the final (possibly full) block.
fn split_lengths(len: usize) -> Result<(usize, usize)> {
    if len <= BLOCK_SIZE {
        return Err(Error::ShortInputForCts { len });
    }
    let n = len.div_ceil(BLOCK_SIZE);
    Ok((n, len - (n - 1) * BLOCK_SIZE))
}

#[cfg(test)]
mod test_cts {
    use super::*;
    use crate::engine::core::Aria;
    use crate::engine::key::Key;
    use crate::engine::modes::cbc::cbc_encrypt;
    use crate::engine::modes::util::test_util::{IV, KEY_128, KEY_192, KEY_256, PLAINTEXT, hex_to_bytes};

    // cross-checked against an independent CBC-CS3 construction over OpenSSL's ARIA-CBC
    #[test]
    fn aria_cts_partial_final_block() -> Result<()> {
        let cases: [(&[u8], &str); 3] = [
            (
                &KEY_128,
                "a9f7b5dccaddf6b43a508169291dd5fb103934265c51b36f2701313975bc27d4\
                 8f17889df5593f49ea36b94a00702a374741691dc6d50e03cd1feba0",
            ),
            (
                &KEY_192,
                "e99e6390083259ecb7be8a6b9e1d116a86978e35c7dbf97db3fbb94e5302cd0d\
                 d4d2fdeacca58a61cea1b3781e2add040262066304a36a9b69902c92",
            ),
            (
                &KEY_256,
                "9b1dba5fccc6d5a59adc17ca70ff65b42c6fb9c8f2b6116a2bdb26ea87af6b47\
                 c676c93b43d08c877015d6e433661f40d1a22f86cc8433bfc6b9521d",
            ),
        ];
        for (key, expected) in cases {
            let aria = Aria::new(&Key::try_from_slice(key)?);
            let encrypted = cts_encrypt(&aria, &IV, &PLAINTEXT[..60])?;
            assert_eq!(hex_to_bytes(expected), encrypted, "ARIA-{} CTS mismatch", key.len() * 8);
            assert_eq!(PLAINTEXT[..60].to_vec(), cts_decrypt(&aria, &IV, &encrypted)?);
        }
        Ok(())
    }

    #[test]
    fn aligned_input_swaps_last_two_blocks() -> Result<()> {
        let expected = hex_to_bytes(
            "a9f7b5dccaddf6b43a508169291dd5fb\
             103934265c51b36f2701313975bc27d4\
             1f8820d556912ebf2f033e459fe2d52a\
             4741691dc6d50e03cd1feba01c65c103",
        );
        let aria = Aria::new(&Key::try_from_slice(&KEY_128)?);
        let encrypted = cts_encrypt(&aria, &IV, &PLAINTEXT)?;
        assert_eq!(expected, encrypted);

        let cbc = cbc_encrypt(&aria, &IV, &PLAINTEXT);
        assert_eq!(encrypted[32..48], cbc[48..64]);
        assert_eq!(encrypted[48..64], cbc[32..48]);
        assert_eq!(PLAINTEXT.to_vec(), cts_decrypt(&aria, &IV, &encrypted)?);
        Ok(())
    }

    #[test]
    fn seventeen_bytes() -> Result<()> {
        let expected = hex_to_bytes("518c06eb1989ea1cb3637eada8cead7ca9");
        let aria = Aria::new(&Key::try_from_slice(&KEY_128)?);
        let encrypted = cts_encrypt(&aria, &IV, &PLAINTEXT[..17])?;
        assert_eq!(expected, encrypted);
        assert_eq!(PLAINTEXT[..17].to_vec(), cts_decrypt(&aria, &IV, &encrypted)?);
        Ok(())
    }

    #[test]
    fn round_trip_every_length() -> Result<()> {
        let aria = Aria::new(&Key::try_from_slice(&KEY_256)?);
        let data: Vec<u8> = (0..100u8).collect();
        for len in 17..=data.len() {
            let ct = cts_encrypt(&aria, &IV, &data[..len])?;
            assert_eq!(ct.len(), len);
            assert_eq!(cts_decrypt(&aria, &IV, &ct)?, data[..len]);
        }
        Ok(())
    }

    #[test]
    fn one_block_or_less_is_rejected() -> Result<()> {
        let aria = Aria::new(&Key::try_from_slice(&KEY_128)?);
        for len in [0usize, 1, 15, 16] {
            let data = vec![0u8; len];
            assert!(matches!(
                cts_encrypt(&aria, &IV, &data),
                Err(Error::ShortInputForCts { len: l }) if l == len
            ));
            assert!(matches!(
                cts_decrypt(&aria, &IV, &data),
                Err(Error::ShortInputForCts { .. })
            ));
        }
        Ok(())
    }
}
