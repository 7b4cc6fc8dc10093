#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! AES block cipher adapter
//!
//! CMAC only ever needs the forward direction of AES with a fixed key and no
//! padding: a single ECB block for subkey generation, and CBC chaining with an
//! all-zero IV for the message blocks. The actual AES implementation comes from
//! the RustCrypto `aes` crate; this module selects AES-128/192/256 from the key
//! length and exposes just those two operations.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::{CmacError, Result};

/// AES block size in bytes. Fixed at 128 bits for every AES key length.
pub const AES_BLOCK_SIZE: usize = 16;

/// A single 128-bit block.
pub type Block = [u8; AES_BLOCK_SIZE];

/// AES variant selected by the key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmacAlgorithm {
    /// AES-128 (16-byte key)
    Aes128,
    /// AES-192 (24-byte key)
    Aes192,
    /// AES-256 (32-byte key)
    Aes256,
}

impl CmacAlgorithm {
    /// Select the AES variant for a key of `len` bytes.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` unless `len` is 16, 24 or 32.
    pub fn from_key_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            actual => Err(CmacError::InvalidKeyLength { actual }),
        }
    }

    /// Key length in bytes.
    #[must_use]
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Human-readable algorithm name, e.g. `AES-128-CMAC`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes128 => "AES-128-CMAC",
            Self::Aes192 => "AES-192-CMAC",
            Self::Aes256 => "AES-256-CMAC",
        }
    }
}

impl std::fmt::Display for CmacAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyed AES encryptor for one of the three key lengths.
#[derive(Clone)]
pub(crate) enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    /// Key the cipher. The key length picks the AES variant.
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        let invalid = |_| CmacError::InvalidKeyLength { actual: key.len() };

        Ok(match CmacAlgorithm::from_key_len(key.len())? {
            CmacAlgorithm::Aes128 => Self::Aes128(Aes128::new_from_slice(key).map_err(invalid)?),
            CmacAlgorithm::Aes192 => Self::Aes192(Aes192::new_from_slice(key).map_err(invalid)?),
            CmacAlgorithm::Aes256 => Self::Aes256(Aes256::new_from_slice(key).map_err(invalid)?),
        })
    }

    pub(crate) fn algorithm(&self) -> CmacAlgorithm {
        match self {
            Self::Aes128(_) => CmacAlgorithm::Aes128,
            Self::Aes192(_) => CmacAlgorithm::Aes192,
            Self::Aes256(_) => CmacAlgorithm::Aes256,
        }
    }

    /// ECB-encrypt one block in place.
    pub(crate) fn encrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(c) => c.encrypt_block(block.into()),
            Self::Aes192(c) => c.encrypt_block(block.into()),
            Self::Aes256(c) => c.encrypt_block(block.into()),
        }
    }

    /// One CBC step: `chain = E_K(chain XOR block)`.
    pub(crate) fn chain_block(&self, chain: &mut Block, block: &Block) {
        xor_in_place(chain, block);
        self.encrypt_block(chain);
    }

    /// CBC-chain every full block of `blocks` into `chain`.
    ///
    /// `blocks.len()` must be a multiple of the block size; a trailing partial
    /// block is never touched.
    pub(crate) fn chain_blocks(&self, chain: &mut Block, blocks: &[u8]) {
        debug_assert_eq!(blocks.len() % AES_BLOCK_SIZE, 0);
        for block in blocks.chunks_exact(AES_BLOCK_SIZE) {
            xor_in_place(chain, block);
            self.encrypt_block(chain);
        }
    }
}

/// XOR `other` into `block` byte by byte.
#[inline(always)]
pub(crate) fn xor_in_place(block: &mut Block, other: &[u8]) {
    for (b, o) in block.iter_mut().zip(other.iter()) {
        *b ^= o;
    }
}
