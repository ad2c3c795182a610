//! ARIA (RFC 5794) and AES block ciphers with the ECB, CBC, CFB, OFB, CTR, CTS, CCM and
//! GCM modes of operation. Modes with independent blocks run on the rayon pool for
//! inputs above 4 KiB.
//!
//! Use [`encrypt`]/[`decrypt`] with a [`CipherSpec`] for one-shot calls, or build a
//! [`Cipher`] from a [`Key`] to reuse expanded round keys across messages.

mod engine;

pub use engine::{
    Aes, AesCipher, Algorithm, Aria, AriaCipher, BLOCK_SIZE, Block, BlockCipher, Cipher,
    CipherSpec, Error, Key, KeySize, Mode, Result, Sealed, decrypt, encrypt, pad, random_iv,
    unpad,
};
