//! AES-CMAC-96 (RFC 4494)
//!
//! The full 128-bit AES-CMAC is computed and only the first 96 bits are
//! returned. Truncation happens at the output boundary; verification and
//! equality compare the 12-byte tags.

use tracing::instrument;

use super::{Cmac, MacComputer, MacTag, MacTag96};
use crate::cipher::CmacAlgorithm;
use crate::error::Result;
use crate::security::secure_compare;

/// Length of the truncated tag in bytes.
pub const CMAC_96_TAG_LEN: usize = 12;

/// AES-CMAC truncated to 96 bits.
#[derive(Clone, Debug)]
pub struct Cmac96 {
    inner: Cmac,
}

impl Cmac96 {
    /// Create a new CMAC-96 engine. Key rules are those of [`Cmac::new`].
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` unless the key is 16, 24 or 32 bytes.
    #[instrument(level = "debug", skip(key), fields(key_len = key.len()))]
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self { inner: Cmac::new(key)? })
    }

    /// The key this engine was created with.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        self.inner.key()
    }

    /// AES variant in use.
    #[must_use]
    pub fn algorithm(&self) -> CmacAlgorithm {
        self.inner.algorithm()
    }
}

fn truncate(tag: &MacTag) -> MacTag96 {
    let mut out = [0u8; CMAC_96_TAG_LEN];
    out.copy_from_slice(&tag[..CMAC_96_TAG_LEN]);
    out
}

impl MacComputer for Cmac96 {
    type Tag = MacTag96;

    const NAME: &'static str = "AES-CMAC-96";

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.inner.update(data)?;
        Ok(self)
    }

    fn digest(&mut self, data: Option<&[u8]>) -> Result<MacTag96> {
        Ok(truncate(&self.inner.digest(data)?))
    }

    fn finalize(&self) -> MacTag96 {
        truncate(&self.inner.finalize())
    }

    fn is_finalized(&self) -> bool {
        self.inner.is_finalized()
    }
}

impl PartialEq for Cmac96 {
    fn eq(&self, other: &Self) -> bool {
        secure_compare(&self.finalize(), &other.finalize())
    }
}

impl Eq for Cmac96 {}
