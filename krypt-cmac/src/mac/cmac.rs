#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: CMAC block cipher mode arithmetic.
// - Fixed 16-byte AES block size arithmetic
// - Index calculations bounded by the pending-block length
#![allow(clippy::arithmetic_side_effects)]

//! CMAC (Cipher-based Message Authentication Code)
//!
//! AES-CMAC as specified in NIST SP 800-38B and RFC 4493. The key length
//! (16, 24 or 32 bytes) selects AES-128, AES-192 or AES-256; the tag is
//! always 128 bits.
//!
//! The engine is streaming: [`MacComputer::update`] may be called any number
//! of times and every block that is known not to be the final one is
//! CBC-chained immediately. The final block (1 to 16 bytes, or nothing for the
//! empty message) is held back, because whether it is masked with `K1` or
//! padded and masked with `K2` depends on whether more data follows. Memory use
//! is therefore constant: one block of pending input plus the chaining value.
//!
//! Finalization is terminal. The tag is memoized, so repeated
//! [`MacComputer::finalize`] calls return the same value, while any attempt to
//! add data afterwards fails with [`CmacError::AlreadyFinalized`].
//!
//! # Example
//! ```
//! use krypt_cmac::{Cmac, MacComputer};
//!
//! # fn main() -> krypt_cmac::Result<()> {
//! let key = [0x2bu8; 16];
//! let mut mac = Cmac::new(&key)?;
//! mac.update(b"first part, ")?.update(b"second part")?;
//! let tag = mac.finalize();
//!
//! let mut check = Cmac::new(&key)?;
//! check.verify(&tag, Some(b"first part, second part"))?;
//! # Ok(())
//! # }
//! ```

use std::cell::OnceCell;

use tracing::{debug, instrument};
use zeroize::Zeroize;

use super::{MacComputer, MacTag};
use crate::cipher::{AES_BLOCK_SIZE, AesCipher, Block, CmacAlgorithm, xor_in_place};
use crate::error::{CmacError, Result};
use crate::key::MasterKey;
use crate::security::secure_compare;
use crate::subkey::Subkeys;

/// First padding byte: a single `1` bit followed by zeros.
const PADDING_START: u8 = 0x80;

/// Streaming AES-CMAC engine.
///
/// `Cmac` is `Send` but not `Sync`: the memoized tag lives in a `OnceCell` so
/// that equality comparisons (which only see `&self`) can finalize.
#[derive(Clone)]
pub struct Cmac {
    key: MasterKey,
    cipher: AesCipher,
    subkeys: Subkeys,
    /// CBC chaining value, `C_0 = 0^128`
    chain: Block,
    /// Deferred tail of the message
    pending: Block,
    pending_len: usize,
    tag: OnceCell<MacTag>,
}

impl Cmac {
    /// Create a new CMAC engine keyed with a 16, 24 or 32 byte AES key.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` for any other key length.
    #[instrument(level = "debug", skip(key), fields(key_len = key.len()))]
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = MasterKey::new(key)?;
        let cipher = AesCipher::new(key.as_bytes())?;
        let subkeys = Subkeys::generate(&cipher);

        Ok(Self {
            key,
            cipher,
            subkeys,
            chain: [0u8; AES_BLOCK_SIZE],
            pending: [0u8; AES_BLOCK_SIZE],
            pending_len: 0,
            tag: OnceCell::new(),
        })
    }

    /// The key this engine was created with.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        self.key.as_bytes()
    }

    /// The derived subkeys `L`, `K1` and `K2`.
    #[must_use]
    pub fn subkeys(&self) -> &Subkeys {
        &self.subkeys
    }

    /// AES variant in use, selected by the key length.
    #[must_use]
    pub fn algorithm(&self) -> CmacAlgorithm {
        self.cipher.algorithm()
    }

    /// Number of message bytes received but not yet chained (0..=16).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending_len
    }

    /// Mask the final block with `K1` (complete) or pad it and mask with `K2`,
    /// then run the last CBC step.
    fn compute_tag(&self) -> MacTag {
        let mut last = [0u8; AES_BLOCK_SIZE];

        if self.pending_len == AES_BLOCK_SIZE {
            last = self.pending;
            xor_in_place(&mut last, self.subkeys.k1());
        } else {
            // 0..=15 pending bytes, including the empty message
            last[..self.pending_len].copy_from_slice(&self.pending[..self.pending_len]);
            last[self.pending_len] = PADDING_START;
            xor_in_place(&mut last, self.subkeys.k2());
        }

        let mut tag = self.chain;
        self.cipher.chain_block(&mut tag, &last);
        last.zeroize();

        debug!(algorithm = %self.algorithm(), "CMAC tag computed");
        tag
    }
}

impl MacComputer for Cmac {
    type Tag = MacTag;

    const NAME: &'static str = "AES-CMAC";

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        if data.is_empty() {
            return Ok(self);
        }
        if self.is_finalized() {
            return Err(CmacError::AlreadyFinalized);
        }

        // Top up the pending block first.
        let take = (AES_BLOCK_SIZE - self.pending_len).min(data.len());
        let (head, rest) = data.split_at(take);
        self.pending[self.pending_len..self.pending_len + take].copy_from_slice(head);
        self.pending_len += take;

        if rest.is_empty() {
            return Ok(self);
        }

        // More input follows, so the pending block is not the last one.
        self.cipher.chain_block(&mut self.chain, &self.pending);

        // Chain everything except the final 1..=16 bytes.
        let keep = match rest.len() % AES_BLOCK_SIZE {
            0 => AES_BLOCK_SIZE,
            partial => partial,
        };
        let (full_blocks, tail) = rest.split_at(rest.len() - keep);
        self.cipher.chain_blocks(&mut self.chain, full_blocks);

        self.pending.zeroize();
        self.pending[..keep].copy_from_slice(tail);
        self.pending_len = keep;

        Ok(self)
    }

    fn digest(&mut self, data: Option<&[u8]>) -> Result<MacTag> {
        if let Some(data) = data {
            if self.is_finalized() {
                return Err(CmacError::AlreadyFinalized);
            }
            self.update(data)?;
        }
        Ok(self.finalize())
    }

    fn finalize(&self) -> MacTag {
        *self.tag.get_or_init(|| self.compute_tag())
    }

    fn is_finalized(&self) -> bool {
        self.tag.get().is_some()
    }
}

impl PartialEq for Cmac {
    fn eq(&self, other: &Self) -> bool {
        secure_compare(&self.finalize(), &other.finalize())
    }
}

impl Eq for Cmac {}

impl Drop for Cmac {
    fn drop(&mut self) {
        self.chain.zeroize();
        self.pending.zeroize();
        if let Some(tag) = self.tag.get_mut() {
            tag.zeroize();
        }
    }
}

impl std::fmt::Debug for Cmac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmac")
            .field("algorithm", &self.algorithm())
            .field("key", &self.key)
            .field("pending_len", &self.pending_len)
            .field("finalized", &self.is_finalized())
            .finish_non_exhaustive()
    }
}
