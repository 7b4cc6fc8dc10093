#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! AES-CMAC-PRF-128 (RFC 4615)
//!
//! A PRF with a variable-length key. A 128-bit key is used as-is; any other
//! length (including zero) is first compressed into one with
//!
//! ```text
//! K' = AES-CMAC(0^128, K)
//! ```
//!
//! and the message is then authenticated with AES-128-CMAC under `K'`.

use tracing::instrument;
use zeroize::Zeroize;

use super::{Cmac, MacComputer, MacTag};
use crate::error::Result;
use crate::security::secure_compare;

/// Key length the PRF operates on after derivation.
pub const PRF_KEY_LEN: usize = 16;

/// AES-CMAC-PRF-128 engine.
///
/// Every operation forwards to an AES-128 [`Cmac`] keyed with the (possibly
/// derived) 128-bit key.
#[derive(Clone, Debug)]
pub struct CmacPrf128 {
    inner: Cmac,
}

impl CmacPrf128 {
    /// Create a PRF engine from a key of any length.
    ///
    /// # Errors
    /// The derivation runs CMAC under a fixed valid key, so this only fails if
    /// the underlying engine rejects the derived 16-byte key.
    #[instrument(level = "debug", skip(key), fields(key_len = key.len(), derived = key.len() != PRF_KEY_LEN))]
    pub fn new(key: &[u8]) -> Result<Self> {
        let mut derived = derive_key(key)?;
        let inner = Cmac::new(&derived);
        derived.zeroize();

        Ok(Self { inner: inner? })
    }

    /// The 128-bit key actually used for the MAC (the derived key when the
    /// input key was not 16 bytes).
    #[must_use]
    pub fn key(&self) -> &[u8] {
        self.inner.key()
    }
}

/// Normalize a variable-length key to 128 bits.
///
/// # Errors
/// Propagates engine construction errors for the all-zero key, which cannot
/// occur for a 16-byte key.
pub fn derive_key(key: &[u8]) -> Result<[u8; PRF_KEY_LEN]> {
    if key.len() == PRF_KEY_LEN {
        let mut out = [0u8; PRF_KEY_LEN];
        out.copy_from_slice(key);
        return Ok(out);
    }

    Cmac::new(&[0u8; PRF_KEY_LEN])?.digest(Some(key))
}

impl MacComputer for CmacPrf128 {
    type Tag = MacTag;

    const NAME: &'static str = "AES-CMAC-PRF-128";

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.inner.update(data)?;
        Ok(self)
    }

    fn digest(&mut self, data: Option<&[u8]>) -> Result<MacTag> {
        self.inner.digest(data)
    }

    fn finalize(&self) -> MacTag {
        self.inner.finalize()
    }

    fn is_finalized(&self) -> bool {
        self.inner.is_finalized()
    }
}

impl PartialEq for CmacPrf128 {
    fn eq(&self, other: &Self) -> bool {
        secure_compare(&self.finalize(), &other.finalize())
    }
}

impl Eq for CmacPrf128 {}
