//! Master key storage.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::CmacAlgorithm;
use crate::error::Result;

/// A validated AES key of 16, 24 or 32 bytes.
///
/// Key bytes are zeroized on drop and never appear in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: Vec<u8>,
}

impl MasterKey {
    /// Copy and validate `key`.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` unless the key is 16, 24 or 32 bytes long.
    pub fn new(key: &[u8]) -> Result<Self> {
        CmacAlgorithm::from_key_len(key.len())?;
        Ok(Self { bytes: key.to_vec() })
    }

    /// The raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the key in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True only once the key has been zeroized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for MasterKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}
