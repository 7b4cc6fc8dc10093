#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! CMAC subkey generation (NIST SP 800-38B Section 6.1)
//!
//! ```text
//! L  = CIPH_K(0^128)
//! K1 = dbl(L)
//! K2 = dbl(K1)
//! ```
//!
//! where `dbl` is multiplication by `x` in GF(2^128) modulo
//! `x^128 + x^7 + x^2 + x + 1`.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::{AES_BLOCK_SIZE, AesCipher, Block};

/// Reduction constant for a 128-bit block cipher (`x^7 + x^2 + x + 1`).
pub const RB: u8 = 0x87;

/// The three derived values `L`, `K1` and `K2`.
///
/// Computed once per key and zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Subkeys {
    l: Block,
    k1: Block,
    k2: Block,
}

impl Subkeys {
    /// Derive the subkeys for a keyed cipher.
    pub(crate) fn generate(cipher: &AesCipher) -> Self {
        let mut l = [0u8; AES_BLOCK_SIZE];
        cipher.encrypt_block(&mut l);

        let k1 = dbl(&l);
        let k2 = dbl(&k1);

        Self { l, k1, k2 }
    }

    /// `L = CIPH_K(0^128)`
    #[must_use]
    pub fn l(&self) -> &Block {
        &self.l
    }

    /// Subkey applied to a complete final block.
    #[must_use]
    pub fn k1(&self) -> &Block {
        &self.k1
    }

    /// Subkey applied to a padded final block.
    #[must_use]
    pub fn k2(&self) -> &Block {
        &self.k2
    }
}

impl std::fmt::Debug for Subkeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subkeys")
            .field("l", &"[REDACTED]")
            .field("k1", &"[REDACTED]")
            .field("k2", &"[REDACTED]")
            .finish()
    }
}

/// Double a block in GF(2^128).
///
/// Shifts the 128-bit big-endian value left by one and, if the bit shifted out
/// was set, folds it back in with `RB`. The fold is applied through a mask so
/// there is no branch on key-derived data.
#[inline]
pub fn dbl(block: &Block) -> Block {
    let mut result = [0u8; AES_BLOCK_SIZE];
    let mut carry = 0u8;

    for (out, &byte) in result.iter_mut().zip(block.iter()).rev() {
        *out = (byte << 1) | carry;
        carry = byte >> 7;
    }

    // carry now holds the original MSB: 0x00 or 0xff after negation
    let mask = carry.wrapping_neg();
    result[AES_BLOCK_SIZE - 1] ^= RB & mask;

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4493 Section 4, subkey generation for K = 2b7e1516 28aed2a6 abf71588 09cf4f3c
    #[test]
    fn test_rfc4493_subkeys() {
        let cipher = AesCipher::new(&hex!("2b7e151628aed2a6abf7158809cf4f3c")).unwrap();
        let subkeys = Subkeys::generate(&cipher);

        assert_eq!(subkeys.l(), &hex!("7df76b0c1ab899b33e42f047b91b546f"));
        assert_eq!(subkeys.k1(), &hex!("fbeed618357133667c85e08f7236a8de"));
        assert_eq!(subkeys.k2(), &hex!("f7ddac306ae266ccf90bc11ee46d513b"));
    }

    // NIST SP 800-38B D.2 (AES-192)
    #[test]
    fn test_aes192_subkeys() {
        let cipher =
            AesCipher::new(&hex!("8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b")).unwrap();
        let subkeys = Subkeys::generate(&cipher);

        assert_eq!(subkeys.k1(), &hex!("448a5b1c93514b273ee6439dd4daa296"));
        assert_eq!(subkeys.k2(), &hex!("8914b63926a2964e7dcc873ba9b5452c"));
    }

    #[test]
    fn test_dbl_without_carry() {
        let mut input = [0u8; 16];
        input[15] = 0x01;
        let mut expected = [0u8; 16];
        expected[15] = 0x02;
        assert_eq!(dbl(&input), expected);
    }

    #[test]
    fn test_dbl_carries_across_bytes() {
        let mut input = [0u8; 16];
        input[15] = 0x80;
        let mut expected = [0u8; 16];
        expected[14] = 0x01;
        assert_eq!(dbl(&input), expected);
    }

    #[test]
    fn test_dbl_reduces_when_msb_set() {
        let mut input = [0u8; 16];
        input[0] = 0x80;
        let mut expected = [0u8; 16];
        expected[15] = RB;
        assert_eq!(dbl(&input), expected);
    }

    #[test]
    fn test_dbl_all_ones() {
        let input = [0xffu8; 16];
        let mut expected = [0xffu8; 16];
        expected[15] = 0xfe ^ RB;
        assert_eq!(dbl(&input), expected);
    }

    #[test]
    fn test_debug_is_redacted() {
        let cipher = AesCipher::new(&[0x11u8; 16]).unwrap();
        let subkeys = Subkeys::generate(&cipher);
        let rendered = format!("{subkeys:?}");

        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains(&format!("{:?}", subkeys.k1())));
    }
}
