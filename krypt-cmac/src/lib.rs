#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # krypt-cmac
//!
//! AES-based message authentication codes:
//!
//! - **AES-CMAC** (NIST SP 800-38B, RFC 4493) with 128-, 192- or 256-bit keys
//! - **AES-CMAC-96** (RFC 4494), the CMAC tag truncated to 96 bits
//! - **AES-CMAC-PRF-128** (RFC 4615), a PRF accepting keys of any length
//!
//! Every engine streams its input in constant memory, produces a raw, hex or
//! Base64 tag, and verifies received tags in constant time.
//!
//! ```
//! use krypt_cmac::{Cmac, CmacError, MacComputer};
//!
//! let key = [0x2bu8; 16];
//! let mut mac = Cmac::new(&key)?;
//! mac.update(b"header")?.update(b"payload")?;
//! let tag = mac.finalize();
//!
//! let mut check = Cmac::new(&key)?;
//! check.verify(&tag, Some(b"headerpayload"))?;
//! # Ok::<(), CmacError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`self-test`** - Power-up known-answer tests for every construction
//!   (see `self_test`)

pub mod cipher;
pub mod error;
pub mod key;
pub mod logging;
pub mod mac;
pub mod security;
pub mod subkey;


pub use cipher::{AES_BLOCK_SIZE, Block, CmacAlgorithm};
pub use error::{CmacError, Result};
pub use key::MasterKey;
pub use mac::cmac96::CMAC_96_TAG_LEN;
pub use mac::prf128::{PRF_KEY_LEN, derive_key};
pub use mac::{
    Cmac, Cmac96, CmacPrf128, MacComputer, MacTag, MacTag96, cmac, cmac_96, cmac_prf_128,
    verify_cmac,
};
pub use security::secure_compare;
pub use subkey::Subkeys;
