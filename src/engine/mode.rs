//! Per-call configuration: which primitive, which mode, and the AEAD tag length.

use std::fmt;
use std::str::FromStr;

use crate::engine::error::{Error, Result};

/// Mode of operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    Cts,
    Ccm,
    Gcm,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::Ecb,
        Mode::Cbc,
        Mode::Cfb,
        Mode::Ofb,
        Mode::Ctr,
        Mode::Cts,
        Mode::Ccm,
        Mode::Gcm,
    ];

    pub fn requires_iv(self) -> bool {
        self != Mode::Ecb
    }

    /// CCM and GCM produce and verify an authentication tag.
    pub fn is_aead(self) -> bool {
        matches!(self, Mode::Ccm | Mode::Gcm)
    }

    /// IV or nonce length used when one has to be generated.
    pub fn default_iv_len(self) -> usize {
        match self {
            Mode::Ecb => 0,
            Mode::Ccm | Mode::Gcm => 12,
            _ => 16,
        }
    }

    pub fn check_iv_len(self, len: usize) -> Result<()> {
        let ok = match self {
            Mode::Ecb => false,
            Mode::Gcm => len > 0,
            Mode::Ccm => (7..=13).contains(&len),
            _ => len == 16,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidIvLength { mode: self, len })
        }
    }

    /// CCM tags are even lengths 4..=16, GCM tags any length 4..=16.
    pub fn check_tag_len(self, len: usize) -> Result<()> {
        let ok = match self {
            Mode::Ccm => (4..=16).contains(&len) && len % 2 == 0,
            Mode::Gcm => (4..=16).contains(&len),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidTagLength { mode: self, len })
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
            Mode::Cts => "CTS",
            Mode::Ccm => "CCM",
            Mode::Gcm => "GCM",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// Block primitive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    Aria,
    Aes,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Aria => "ARIA",
            Algorithm::Aes => "AES",
        })
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARIA" => Ok(Algorithm::Aria),
            "AES" => Ok(Algorithm::Aes),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Algorithm, mode, and tag length for one call. Parses from and prints as
/// `ALG/MODE` or `ALG/MODE/TAGLEN`, e.g. `ARIA/GCM` or `ARIA/CCM/12`.
///
/// ```
/// # fn main() -> aria_modes::Result<()> {
/// use aria_modes::{Algorithm, CipherSpec, Mode};
///
/// let spec: CipherSpec = "aria/ccm/12".parse()?;
/// assert_eq!(spec.algorithm, Algorithm::Aria);
/// assert_eq!(spec.mode, Mode::Ccm);
/// assert_eq!(spec.tag_len, 12);
/// assert_eq!(spec.to_string(), "ARIA/CCM/12");
/// assert_eq!(CipherSpec::default().to_string(), "ARIA/GCM");
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CipherSpec {
    pub algorithm: Algorithm,
    pub mode: Mode,
    /// Tag length in bytes. Only consulted by CCM and GCM.
    pub tag_len: usize,
}

impl CipherSpec {
    pub const DEFAULT_TAG_LEN: usize = 16;

    pub fn new(algorithm: Algorithm, mode: Mode) -> Self {
        Self {
            algorithm,
            mode,
            tag_len: Self::DEFAULT_TAG_LEN,
        }
    }

    pub fn with_tag_len(mut self, tag_len: usize) -> Self {
        self.tag_len = tag_len;
        self
    }
}

impl Default for CipherSpec {
    fn default() -> Self {
        Self::new(Algorithm::Aria, Mode::Gcm)
    }
}

impl fmt::Display for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.algorithm, self.mode)?;
        if self.mode.is_aead() && self.tag_len != Self::DEFAULT_TAG_LEN {
            write!(f, "/{}", self.tag_len)?;
        }
        Ok(())
    }
}

impl FromStr for CipherSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, '/');
        let algorithm = parts.next().unwrap_or_default().parse()?;
        let mode: Mode = parts
            .next()
            .ok_or_else(|| Error::UnknownMode(String::new()))?
            .parse()?;

        let mut spec = CipherSpec::new(algorithm, mode);
        if let Some(tag) = parts.next() {
            let len: usize = tag
                .trim()
                .parse()
                .map_err(|_| Error::InvalidTagSpec(tag.to_string()))?;
            mode.check_tag_len(len)?;
            spec.tag_len = len;
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iv_rules_per_mode() {
        assert!(Mode::Ecb.check_iv_len(16).is_err());
        for mode in [Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr, Mode::Cts] {
            assert!(mode.check_iv_len(16).is_ok());
            assert!(mode.check_iv_len(12).is_err());
            assert!(mode.check_iv_len(0).is_err());
        }
        assert!(Mode::Gcm.check_iv_len(0).is_err());
        assert!(Mode::Gcm.check_iv_len(1).is_ok());
        assert!(Mode::Gcm.check_iv_len(60).is_ok());
        assert!(Mode::Ccm.check_iv_len(6).is_err());
        assert!(Mode::Ccm.check_iv_len(7).is_ok());
        assert!(Mode::Ccm.check_iv_len(13).is_ok());
        assert!(Mode::Ccm.check_iv_len(14).is_err());
    }

    #[test]
    fn tag_rules_per_mode() {
        for len in [4, 6, 8, 10, 12, 14, 16] {
            assert!(Mode::Ccm.check_tag_len(len).is_ok());
        }
        for len in [0, 2, 5, 7, 15, 18] {
            assert!(Mode::Ccm.check_tag_len(len).is_err());
        }
        for len in 4..=16 {
            assert!(Mode::Gcm.check_tag_len(len).is_ok());
        }
        assert!(Mode::Gcm.check_tag_len(3).is_err());
        assert!(Mode::Gcm.check_tag_len(17).is_err());
        assert!(Mode::Cbc.check_tag_len(16).is_err());
    }

    #[test]
    fn parse_specs() -> Result<()> {
        assert_eq!("ARIA/GCM".parse::<CipherSpec>()?, CipherSpec::default());
        assert_eq!(
            "aes/cbc".parse::<CipherSpec>()?,
            CipherSpec::new(Algorithm::Aes, Mode::Cbc)
        );
        assert_eq!("ARIA/CCM/8".parse::<CipherSpec>()?.tag_len, 8);

        assert!(matches!(
            "DES/CBC".parse::<CipherSpec>(),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            "ARIA/XTS".parse::<CipherSpec>(),
            Err(Error::UnknownMode(_))
        ));
        assert!(matches!("ARIA".parse::<CipherSpec>(), Err(Error::UnknownMode(_))));
        assert!(matches!(
            "ARIA/CCM/5".parse::<CipherSpec>(),
            Err(Error::InvalidTagLength { .. })
        ));
        Ok(())
    }

    #[test]
    fn malformed_tag_segment() {
        let err = "ARIA/GCM/abc".parse::<CipherSpec>().unwrap_err();
        assert!(matches!(&err, Error::InvalidTagSpec(t) if t == "abc"));
        assert!(matches!(
            "ARIA/GCM/16/1".parse::<CipherSpec>(),
            Err(Error::InvalidTagSpec(t)) if t == "16/1"
        ));
        assert!(matches!(
            "ARIA/CCM/".parse::<CipherSpec>(),
            Err(Error::InvalidTagSpec(_))
        ));
    }

    #[test]
    fn display_round_trips() -> Result<()> {
        for mode in Mode::ALL {
            let spec = CipherSpec::new(Algorithm::Aria, mode);
            assert_eq!(spec.to_string().parse::<CipherSpec>()?, spec);
        }
        let short = CipherSpec::new(Algorithm::Aes, Mode::Gcm).with_tag_len(12);
        assert_eq!(short.to_string(), "AES/GCM/12");
        assert_eq!(short.to_string().parse::<CipherSpec>()?, short);
        Ok(())
    }
}
