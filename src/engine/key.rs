//! Defines the [`Key`] struct, which holds a valid 128, 192, or 256-bit block cipher key.
//! Keys can be randomly generated or constructed from an existing byte slice.

use std::fmt;

use rand::TryRngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::engine::error::{Error, Result};

/// Supported key sizes. For ARIA these select 12, 14, or 16 rounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Key length in bytes.
    pub fn byte_len(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// Contains a valid key. Can be instantiated with a random key, or built from a slice
/// of bytes that is 16, 24, or 32 bytes long. Key bytes are wiped on drop.
///
/// A `Key` is required to instantiate a [Cipher](crate::Cipher).
///
/// ## Examples
/// ```
/// # fn main() -> aria_modes::Result<()> {
/// use aria_modes::{Key, KeySize};
///
/// // Instantiate random keys:
/// let rk_128 = Key::rand_key_128()?;
/// let rk_256 = Key::random(KeySize::Bits256)?;
/// assert_eq!(rk_256.size(), KeySize::Bits256);
///
/// // Instantiate keys from slice (ASCII works as well as random bytes):
/// let key = Key::try_from_slice(b"123456789012345678901234")?;
/// assert_eq!(key.size(), KeySize::Bits192);
/// assert_eq!(key.as_bytes(), b"123456789012345678901234");
///
/// // Anything that is not 16, 24, or 32 bytes returns an InvalidKeyLength error:
/// assert!(Key::try_from_slice(&[0u8; 20]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Generate a random 128-bit key. Returns Error if OsRng fails.
    pub fn rand_key_128() -> Result<Self> {
        Self::random(KeySize::Bits128)
    }

    /// Generate a random 192-bit key. Returns Error if OsRng fails.
    pub fn rand_key_192() -> Result<Self> {
        Self::random(KeySize::Bits192)
    }

    /// Generate a random 256-bit key. Returns Error if OsRng fails.
    pub fn rand_key_256() -> Result<Self> {
        Self::random(KeySize::Bits256)
    }

    /// Generate a random key of the given size.
    pub fn random(size: KeySize) -> Result<Self> {
        let bytes = match size {
            KeySize::Bits128 => {
                let mut k = [0u8; 16];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K128(k)
            }
            KeySize::Bits192 => {
                let mut k = [0u8; 24];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K192(k)
            }
            KeySize::Bits256 => {
                let mut k = [0u8; 32];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K256(k)
            }
        };
        Ok(Self { bytes })
    }

    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeyLength error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidKeyLength { len: bytes.len() };
        let bytes = match bytes.len() {
            16 => KeyBytes::K128(bytes.try_into().map_err(|_| invalid())?),
            24 => KeyBytes::K192(bytes.try_into().map_err(|_| invalid())?),
            32 => KeyBytes::K256(bytes.try_into().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(Self { bytes })
    }

    /// Returns a reference to the internal key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }

    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Bits128,
            KeyBytes::K192(_) => KeySize::Bits192,
            KeyBytes::K256(_) => KeySize::Bits256,
        }
    }
}

// key bytes never reach logs or panic messages
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_lengths() {
        for len in [0usize, 1, 15, 17, 20, 23, 25, 31, 33, 64] {
            let bytes = vec![0u8; len];
            assert!(
                matches!(Key::try_from_slice(&bytes), Err(Error::InvalidKeyLength { len: l }) if l == len),
                "length {len} should be rejected"
            );
        }
    }

    #[test]
    fn random_keys_have_requested_size() -> Result<()> {
        for size in [KeySize::Bits128, KeySize::Bits192, KeySize::Bits256] {
            let key = Key::random(size)?;
            assert_eq!(key.size(), size);
            assert_eq!(key.as_bytes().len(), size.byte_len());
        }
        Ok(())
    }

    #[test]
    fn debug_hides_key_bytes() -> Result<()> {
        let key = Key::try_from_slice(&[0xAB; 16])?;
        let printed = format!("{key:?}");
        assert!(!printed.contains("171"), "debug output leaked key bytes: {printed}");
        assert!(!printed.to_lowercase().contains("ab, "));
        Ok(())
    }
}
