//! Error types for the krypt-cmac crate.

/// Errors that can occur while computing or verifying a CMAC tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CmacError {
    /// The key is not 16, 24 or 32 bytes long.
    #[error("Invalid key length: {actual} bytes (key must be 128, 192, or 256 bits long)")]
    InvalidKeyLength {
        /// The actual length of the key provided.
        actual: usize,
    },

    /// Data was supplied after the tag had already been produced.
    #[error("CMAC has already been finalized")]
    AlreadyFinalized,

    /// The candidate tag does not match the computed tag.
    #[error("MAC tag verification failed, the tags do not match")]
    TagMismatch,
}

impl From<CmacError> for std::io::Error {
    fn from(err: CmacError) -> Self {
        std::io::Error::other(err)
    }
}

/// Result type alias for krypt-cmac operations.
pub type Result<T> = std::result::Result<T, CmacError>;
