//! One-shot entry points. [`encrypt`] and [`decrypt`] check which parameters were
//! supplied against the [`CipherSpec`], key the selected primitive, and dispatch to the
//! mode. This is the only place that knows every algorithm and mode.

use tracing::{debug, warn};

use crate::engine::cipher::Cipher;
use crate::engine::core::{Aes, Aria, BlockCipher};
use crate::engine::error::{Error, Result};
use crate::engine::key::Key;
use crate::engine::mode::{Algorithm, CipherSpec, Mode};

/// Output of [`encrypt`]. `tag` is set for CCM and GCM only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub tag: Option<Vec<u8>>,
}

/// Encrypts `plaintext` as described by `spec`.
///
/// `iv` is required by every mode except ECB, which rejects one. `aad` is accepted
/// by CCM and GCM only; `None` and an empty slice are equivalent.
///
/// ```
/// # fn main() -> aria_modes::Result<()> {
/// use aria_modes::{CipherSpec, decrypt, encrypt};
///
/// let spec = CipherSpec::default(); // ARIA/GCM, 16-byte tag
/// let key = b"123456789012345678901234";
/// let iv: &[u8] = b"1234567890123456";
///
/// let sealed = encrypt(&spec, key, Some(iv), Some(&b"0123456789012345"[..]), b"hello world")?;
/// let tag = sealed.tag.as_deref();
/// let opened = decrypt(&spec, key, Some(iv), Some(&b"0123456789012345"[..]), &sealed.ciphertext, tag)?;
/// assert_eq!(opened, b"hello world");
/// # Ok(())
/// # }
/// ```
pub fn encrypt(
    spec: &CipherSpec,
    key: &[u8],
    iv: Option<&[u8]>,
    aad: Option<&[u8]>,
    plaintext: &[u8],
) -> Result<Sealed> {
    let key = Key::try_from_slice(key).inspect_err(|e| warn!(%spec, error = %e, "rejected key"))?;
    check_presence(spec.mode, iv, aad)?;

    debug!(
        algorithm = %spec.algorithm,
        mode = %spec.mode,
        len = plaintext.len(),
        aad_len = aad.map_or(0, <[u8]>::len),
        "encrypt"
    );

    match spec.algorithm {
        Algorithm::Aria => seal(&Cipher::<Aria>::new(&key), spec, iv, aad, plaintext),
        Algorithm::Aes => seal(&Cipher::<Aes>::new(&key), spec, iv, aad, plaintext),
    }
    .inspect_err(|e| warn!(%spec, error = %e, "encryption failed"))
}

/// Decrypts `ciphertext` as described by `spec`. CCM and GCM need `tag`, whose length
/// must equal `spec.tag_len`; a mismatch between tag and data is [`Error::Integrity`]
/// and releases no plaintext.
pub fn decrypt(
    spec: &CipherSpec,
    key: &[u8],
    iv: Option<&[u8]>,
    aad: Option<&[u8]>,
    ciphertext: &[u8],
    tag: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let key = Key::try_from_slice(key).inspect_err(|e| warn!(%spec, error = %e, "rejected key"))?;
    check_presence(spec.mode, iv, aad)?;
    check_tag(spec, tag)?;

    debug!(
        algorithm = %spec.algorithm,
        mode = %spec.mode,
        len = ciphertext.len(),
        aad_len = aad.map_or(0, <[u8]>::len),
        "decrypt"
    );

    let result = match spec.algorithm {
        Algorithm::Aria => open(&Cipher::<Aria>::new(&key), spec.mode, iv, aad, ciphertext, tag),
        Algorithm::Aes => open(&Cipher::<Aes>::new(&key), spec.mode, iv, aad, ciphertext, tag),
    };
    match &result {
        // no detail on authentication failures
        Err(Error::Integrity) => debug!(%spec, "authentication failed"),
        Err(e) => warn!(%spec, error = %e, "decryption failed"),
        Ok(_) => {}
    }
    result
}

fn check_presence(mode: Mode, iv: Option<&[u8]>, aad: Option<&[u8]>) -> Result<()> {
    let err = if mode.requires_iv() && iv.is_none() {
        Some(Error::MissingParameter {
            mode,
            param: "IV/nonce",
        })
    } else if !mode.requires_iv() && iv.is_some() {
        Some(Error::UnexpectedParameter { mode, param: "IV" })
    } else if !mode.is_aead() && aad.is_some() {
        Some(Error::UnexpectedParameter { mode, param: "AAD" })
    } else {
        None
    };

    match err {
        Some(e) => {
            warn!(%mode, error = %e, "rejected parameters");
            Err(e)
        }
        None => Ok(()),
    }
}

fn check_tag(spec: &CipherSpec, tag: Option<&[u8]>) -> Result<()> {
    let mode = spec.mode;
    let err = match tag {
        None if mode.is_aead() => Some(Error::MissingParameter { mode, param: "tag" }),
        Some(_) if !mode.is_aead() => Some(Error::UnexpectedParameter { mode, param: "tag" }),
        Some(t) if t.len() != spec.tag_len => Some(Error::InvalidTagLength { mode, len: t.len() }),
        _ => None,
    };

    match err {
        Some(e) => {
            warn!(%spec, error = %e, "rejected tag");
            Err(e)
        }
        None => Ok(()),
    }
}

fn seal<B: BlockCipher>(
    cipher: &Cipher<B>,
    spec: &CipherSpec,
    iv: Option<&[u8]>,
    aad: Option<&[u8]>,
    plaintext: &[u8],
) -> Result<Sealed> {
    let iv = iv.unwrap_or_default();
    let ciphertext = match spec.mode {
        Mode::Ecb => cipher.encrypt_ecb(plaintext)?,
        Mode::Cbc => cipher.encrypt_cbc(iv, plaintext)?,
        Mode::Cfb => cipher.encrypt_cfb(iv, plaintext)?,
        Mode::Ofb => cipher.encrypt_ofb(iv, plaintext)?,
        Mode::Ctr => cipher.encrypt_ctr(iv, plaintext)?,
        Mode::Cts => cipher.encrypt_cts(iv, plaintext)?,
        Mode::Ccm => {
            let (ciphertext, tag) = cipher.encrypt_ccm(iv, aad, plaintext, spec.tag_len)?;
            return Ok(Sealed {
                ciphertext,
                tag: Some(tag),
            });
        }
        Mode::Gcm => {
            let (ciphertext, tag) = cipher.encrypt_gcm(iv, aad, plaintext, spec.tag_len)?;
            return Ok(Sealed {
                ciphertext,
                tag: Some(tag),
            });
        }
    };
    Ok(Sealed {
        ciphertext,
        tag: None,
    })
}

fn open<B: BlockCipher>(
    cipher: &Cipher<B>,
    mode: Mode,
    iv: Option<&[u8]>,
    aad: Option<&[u8]>,
    ciphertext: &[u8],
    tag: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let iv = iv.unwrap_or_default();
    let tag = tag.unwrap_or_default();
    match mode {
        Mode::Ecb => cipher.decrypt_ecb(ciphertext),
        Mode::Cbc => cipher.decrypt_cbc(iv, ciphertext),
        Mode::Cfb => cipher.decrypt_cfb(iv, ciphertext),
        Mode::Ofb => cipher.decrypt_ofb(iv, ciphertext),
        Mode::Ctr => cipher.decrypt_ctr(iv, ciphertext),
        Mode::Cts => cipher.decrypt_cts(iv, ciphertext),
        Mode::Ccm => cipher.decrypt_ccm(iv, aad, ciphertext, tag),
        Mode::Gcm => cipher.decrypt_gcm(iv, aad, ciphertext, tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"123456789012345678901234";
    const IV: &[u8] = b"1234567890123456";
    const AAD: &[u8] = b"0123456789012345";

    fn iv_for(mode: Mode) -> Option<&'static [u8]> {
        match mode {
            Mode::Ecb => None,
            Mode::Ccm | Mode::Gcm => Some(&IV[..12]),
            _ => Some(IV),
        }
    }

    fn aad_for(mode: Mode) -> Option<&'static [u8]> {
        mode.is_aead().then_some(AAD)
    }

    #[test]
    fn every_mode_and_algorithm_round_trips() -> Result<()> {
        let message = b"The quick brown fox jumps over the lazy dog";
        for algorithm in [Algorithm::Aria, Algorithm::Aes] {
            for mode in Mode::ALL {
                let spec = CipherSpec::new(algorithm, mode);
                let sealed = encrypt(&spec, KEY, iv_for(mode), aad_for(mode), message)?;
                assert_eq!(sealed.tag.is_some(), mode.is_aead(), "{spec}");
                let opened = decrypt(
                    &spec,
                    KEY,
                    iv_for(mode),
                    aad_for(mode),
                    &sealed.ciphertext,
                    sealed.tag.as_deref(),
                )?;
                assert_eq!(opened, message, "{spec} round trip");
            }
        }
        Ok(())
    }

    #[test]
    fn missing_and_unexpected_parameters() {
        let cbc = CipherSpec::new(Algorithm::Aria, Mode::Cbc);
        assert!(matches!(
            encrypt(&cbc, KEY, None, None, b"x"),
            Err(Error::MissingParameter { mode: Mode::Cbc, .. })
        ));
        assert!(matches!(
            encrypt(&cbc, KEY, Some(IV), Some(AAD), b"x"),
            Err(Error::UnexpectedParameter { param: "AAD", .. })
        ));
        assert!(matches!(
            decrypt(&cbc, KEY, Some(IV), None, &[0u8; 16], Some(&[0u8; 16][..])),
            Err(Error::UnexpectedParameter { param: "tag", .. })
        ));

        let ecb = CipherSpec::new(Algorithm::Aria, Mode::Ecb);
        assert!(matches!(
            encrypt(&ecb, KEY, Some(IV), None, b"x"),
            Err(Error::UnexpectedParameter { param: "IV", .. })
        ));

        let gcm = CipherSpec::default();
        assert!(matches!(
            decrypt(&gcm, KEY, Some(IV), None, b"x", None),
            Err(Error::MissingParameter { param: "tag", .. })
        ));
        assert!(matches!(
            decrypt(&gcm, KEY, Some(IV), None, b"x", Some(&[0u8; 12][..])),
            Err(Error::InvalidTagLength { len: 12, .. })
        ));
    }

    #[test]
    fn key_is_checked_first() {
        let cbc = CipherSpec::new(Algorithm::Aria, Mode::Cbc);
        assert!(matches!(
            encrypt(&cbc, b"short", None, None, b"x"),
            Err(Error::InvalidKeyLength { len: 5 })
        ));
    }

    #[test]
    fn configured_tag_length_applies() -> Result<()> {
        let spec: CipherSpec = "ARIA/CCM/8".parse()?;
        let sealed = encrypt(&spec, KEY, Some(&IV[..12]), None, b"payload")?;
        let tag = sealed.tag.as_deref().unwrap_or_default();
        assert_eq!(tag.len(), 8);
        assert_eq!(decrypt(&spec, KEY, Some(&IV[..12]), None, &sealed.ciphertext, Some(tag))?, b"payload");
        Ok(())
    }
}
