use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::engine::error::Result;

/// Fresh random IV or nonce of `len` bytes from the OS RNG.
pub fn random_iv(len: usize) -> Result<Vec<u8>> {
    let mut iv = vec![0u8; len];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

/// Constant-time equality. Every byte pair is folded into one accumulator before the
/// single comparison at the end, so timing does not depend on where a mismatch sits.
/// Length is treated as public.
#[inline(never)]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b) {
        acc |= x ^ y;
    }
    std::hint::black_box(acc) == 0
}

#[inline(always)]
pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ct_eq_matches_slice_equality() {
        let a = [1u8, 2, 3, 4];
        assert!(ct_eq(&a, &[1, 2, 3, 4]));
        assert!(!ct_eq(&a, &[1, 2, 3, 5]));
        assert!(!ct_eq(&a, &[0, 2, 3, 4]));
        assert!(!ct_eq(&a, &[1, 2, 3]));
        assert!(ct_eq(&[], &[]));
    }

    #[test]
    fn random_iv_has_requested_length() -> Result<()> {
        assert_eq!(random_iv(12)?.len(), 12);
        assert_eq!(random_iv(16)?.len(), 16);
        Ok(())
    }
}
