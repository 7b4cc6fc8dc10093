#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Message Authentication Codes
//!
//! Provides AES-CMAC (RFC 4493), AES-CMAC-96 (RFC 4494) and AES-CMAC-PRF-128
//! (RFC 4615). All three implement [`MacComputer`], so streaming, encoding and
//! verification behave identically across them.

pub mod cmac;
pub mod cmac96;
pub mod prf128;

pub use cmac::Cmac;
pub use cmac96::Cmac96;
pub use prf128::CmacPrf128;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tracing::{instrument, warn};

use crate::error::{CmacError, Result};
use crate::security::secure_compare;

/// Full-length CMAC tag (128 bits).
pub type MacTag = [u8; 16];

/// Truncated CMAC-96 tag.
pub type MacTag96 = [u8; 12];

/// Common interface of the CMAC constructions.
///
/// Implementors provide streaming input, finalization and terminal-state
/// tracking; hex/Base64 encodings and constant-time verification are derived
/// from [`MacComputer::digest`].
pub trait MacComputer {
    /// Tag produced by this construction.
    type Tag: AsRef<[u8]> + Copy;

    /// Algorithm name used in log events.
    const NAME: &'static str;

    /// Feed more message data. Empty input is always accepted as a no-op.
    ///
    /// # Errors
    /// `AlreadyFinalized` if non-empty data arrives after the tag was produced.
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Optionally feed `data`, then finalize and return the tag.
    ///
    /// With `None` after finalization this returns the memoized tag.
    ///
    /// # Errors
    /// `AlreadyFinalized` if `data` is `Some` (even empty) after finalization.
    fn digest(&mut self, data: Option<&[u8]>) -> Result<Self::Tag>;

    /// Finalize without additional data. Idempotent.
    fn finalize(&self) -> Self::Tag;

    /// Whether the tag has been produced.
    fn is_finalized(&self) -> bool;

    /// [`MacComputer::digest`] as lowercase hex.
    ///
    /// # Errors
    /// Same as [`MacComputer::digest`].
    fn hexdigest(&mut self, data: Option<&[u8]>) -> Result<String> {
        Ok(hex::encode(self.digest(data)?))
    }

    /// [`MacComputer::digest`] as padded standard Base64.
    ///
    /// # Errors
    /// Same as [`MacComputer::digest`].
    fn base64digest(&mut self, data: Option<&[u8]>) -> Result<String> {
        Ok(BASE64_STANDARD.encode(self.digest(data)?))
    }

    /// Compute the tag (after optionally feeding `data`) and compare it with
    /// `tag` in constant time.
    ///
    /// # Errors
    /// `TagMismatch` if the tags differ in any bit or in length, or any error
    /// of [`MacComputer::digest`].
    fn verify(&mut self, tag: &[u8], data: Option<&[u8]>) -> Result<()> {
        let computed = self.digest(data)?;
        if secure_compare(tag, computed.as_ref()) {
            Ok(())
        } else {
            warn!(algorithm = Self::NAME, tag_len = tag.len(), "MAC tag verification failed");
            Err(CmacError::TagMismatch)
        }
    }
}

/// Byte-sink adapter so readers can be streamed with `std::io::copy`.
macro_rules! impl_io_write {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::io::Write for $ty {
                fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                    MacComputer::update(self, buf)?;
                    Ok(buf.len())
                }

                fn flush(&mut self) -> std::io::Result<()> {
                    Ok(())
                }
            }
        )+
    };
}

impl_io_write!(Cmac, Cmac96, CmacPrf128);

/// One-shot AES-CMAC.
///
/// # Errors
/// `InvalidKeyLength` unless the key is 16, 24 or 32 bytes.
#[instrument(level = "debug", skip(key, data), fields(key_len = key.len(), data_len = data.len()))]
pub fn cmac(key: &[u8], data: &[u8]) -> Result<MacTag> {
    Cmac::new(key)?.digest(Some(data))
}

/// One-shot AES-CMAC-96.
///
/// # Errors
/// `InvalidKeyLength` unless the key is 16, 24 or 32 bytes.
#[instrument(level = "debug", skip(key, data), fields(key_len = key.len(), data_len = data.len()))]
pub fn cmac_96(key: &[u8], data: &[u8]) -> Result<MacTag96> {
    Cmac96::new(key)?.digest(Some(data))
}

/// One-shot AES-CMAC-PRF-128. Accepts keys of any length.
///
/// # Errors
/// Never fails for well-formed input; the `Result` mirrors the other helpers.
#[instrument(level = "debug", skip(key, data), fields(key_len = key.len(), data_len = data.len()))]
pub fn cmac_prf_128(key: &[u8], data: &[u8]) -> Result<MacTag> {
    CmacPrf128::new(key)?.digest(Some(data))
}

/// Verify an AES-CMAC tag over `data` in constant time.
///
/// # Errors
/// `TagMismatch` if the tag is wrong, `InvalidKeyLength` for a bad key.
#[instrument(level = "debug", skip(key, data, tag), fields(key_len = key.len(), data_len = data.len()))]
pub fn verify_cmac(key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
    Cmac::new(key)?.verify(tag, Some(data))
}
