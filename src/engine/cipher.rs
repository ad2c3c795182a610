use crate::engine::core::{Aes, Aria, BLOCK_SIZE, Block, BlockCipher};
use crate::engine::error::Result;
use crate::engine::key::Key;
use crate::engine::mode::Mode;
use crate::engine::modes::*;

/// Provides encryption and decryption in every supported mode over one keyed block
/// primitive. Instantiated with a [Key], which is expanded into round keys once and
/// stored in the instance. The instance is immutable and can be shared across threads.
///
/// ```
/// # fn main() -> aria_modes::Result<()> {
/// use aria_modes::{AriaCipher, Key};
///
/// let key = Key::try_from_slice(b"123456789012345678901234")?;
/// let cipher = AriaCipher::new(&key);
///
/// let (ct, tag) = cipher.encrypt_gcm(b"012345678901", Some(&b"header"[..]), b"hello world", 16)?;
/// let pt = cipher.decrypt_gcm(b"012345678901", Some(&b"header"[..]), &ct, &tag)?;
/// assert_eq!(pt, b"hello world");
/// # Ok(())
/// # }
/// ```
pub struct Cipher<B: BlockCipher> {
    primitive: B,
}

/// [Cipher] over ARIA.
pub type AriaCipher = Cipher<Aria>;
/// [Cipher] over AES.
pub type AesCipher = Cipher<Aes>;

impl<B: BlockCipher> Cipher<B> {
    /// Expands the key and stores the keyed primitive in the returned instance.
    pub fn new(key: &Key) -> Self {
        Self {
            primitive: B::from_key(key),
        }
    }

    /// **Electronic codebook** encryption with PKCS#7 padding.
    ///
    /// Encrypts each 16-byte block entirely independently and chains them together.
    /// **Identical plaintext blocks give identical ciphertext blocks.**
    pub fn encrypt_ecb(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(ecb_encrypt(&self.primitive, plaintext))
    }

    /// **Electronic codebook** decryption. Fails with
    /// [InvalidPadding](crate::Error::InvalidPadding) if the padding is malformed.
    pub fn decrypt_ecb(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        ecb_decrypt(&self.primitive, ciphertext)
    }

    /// **Cipher block chaining** encryption with PKCS#7 padding. Needs a 16-byte IV.
    pub fn encrypt_cbc(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Cbc, iv)?;
        Ok(cbc_encrypt(&self.primitive, &iv, plaintext))
    }

    /// **Cipher block chaining** decryption. Runs in parallel for large inputs.
    pub fn decrypt_cbc(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Cbc, iv)?;
        cbc_decrypt(&self.primitive, &iv, ciphertext)
    }

    /// **Cipher feedback** (128-bit segments) encryption. Output length equals input length.
    pub fn encrypt_cfb(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Cfb, iv)?;
        Ok(cfb_encrypt(&self.primitive, &iv, plaintext))
    }

    pub fn decrypt_cfb(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Cfb, iv)?;
        Ok(cfb_decrypt(&self.primitive, &iv, ciphertext))
    }

    /// **Output feedback** encryption. Decryption is the same operation.
    pub fn encrypt_ofb(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Ofb, iv)?;
        Ok(ofb_apply(&self.primitive, &iv, plaintext))
    }

    pub fn decrypt_ofb(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_ofb(iv, ciphertext)
    }

    /// **Counter mode** encryption.
    ///
    /// The 16-byte IV is the first counter block. For each 16-byte block of plaintext:
    /// 1. The counter block is encrypted using the round keys.
    /// 2. The plaintext block is `XOR`'d with the encrypted counter block.
    /// 3. The whole counter block is incremented as a 128-bit big-endian integer.
    ///
    /// **Important**: the same IV must never be reused with the same key.
    pub fn encrypt_ctr(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Ctr, iv)?;
        Ok(ctr_apply(&self.primitive, &iv, plaintext))
    }

    /// **Counter mode** decryption.
    pub fn decrypt_ctr(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_ctr(iv, ciphertext)
    }

    /// **Ciphertext stealing** (CBC-CS3) encryption. Output length equals input length;
    /// input must be longer than 16 bytes.
    pub fn encrypt_cts(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Cts, iv)?;
        cts_encrypt(&self.primitive, &iv, plaintext)
    }

    pub fn decrypt_cts(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let iv = block_iv(Mode::Cts, iv)?;
        cts_decrypt(&self.primitive, &iv, ciphertext)
    }

    /// **Counter with CBC-MAC** encryption.
    ///
    /// Nonce must be 7 to 13 bytes, tag length one of 4, 6, 8, 10, 12, 14, 16. Optional
    /// additional authenticated data (AAD) is included in the tag but **not encrypted**.
    ///
    /// Returns `(ciphertext, tag)`.
    pub fn encrypt_ccm(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
        tag_len: usize,
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        ccm_encrypt(&self.primitive, nonce, aad.unwrap_or_default(), plaintext, tag_len)
    }

    /// **Counter with CBC-MAC** decryption.
    ///
    /// Returns:
    /// - plaintext if the tag was authenticated.
    /// - [Integrity](crate::Error::Integrity) error if the computed tag did not match.
    ///   No plaintext is released.
    pub fn decrypt_ccm(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>> {
        ccm_decrypt(&self.primitive, nonce, aad.unwrap_or_default(), ciphertext, tag)
    }

    /// **Galois/counter mode** encryption.
    ///
    /// Encrypts using counter mode and generates a cryptographic tag to verify the
    /// message has not been modified. Any non-empty nonce is accepted; 12 bytes is the
    /// standard length. Tag length is 4 to 16 bytes.
    ///
    /// Returns `(ciphertext, tag)`.
    pub fn encrypt_gcm(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        plaintext: &[u8],
        tag_len: usize,
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        gcm_encrypt(&self.primitive, nonce, aad.unwrap_or_default(), plaintext, tag_len)
    }

    /// **Galois/counter mode** decryption.
    ///
    /// Returns:
    /// - plaintext if the tag was authenticated and decryption was successful.
    /// - [Integrity](crate::Error::Integrity) error if computed tag did not match input tag.
    /// - [CounterOverflow](crate::Error::CounterOverflow) error if more than 2^32 - 2 blocks were provided.
    pub fn decrypt_gcm(
        &self,
        nonce: &[u8],
        aad: Option<&[u8]>,
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>> {
        gcm_decrypt(&self.primitive, nonce, aad.unwrap_or_default(), ciphertext, tag)
    }
}

impl<B: BlockCipher> std::fmt::Debug for Cipher<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("algorithm", &B::NAME)
            .finish_non_exhaustive()
    }
}

/// Checks a 16-byte IV for the block-chained and stream modes.
fn block_iv(mode: Mode, iv: &[u8]) -> Result<Block> {
    mode.check_iv_len(iv.len())?;
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(iv);
    Ok(block)
}
