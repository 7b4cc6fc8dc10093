#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Constant-time comparison for MAC tags
//!
//! Tag verification must not reveal how many leading bytes of a forged tag
//! were correct. Comparison of equal-length inputs goes through
//! `subtle::ConstantTimeEq`, which inspects every byte pair without
//! short-circuiting. Lengths are public (tag sizes are fixed per algorithm),
//! so a length mismatch returns `false` immediately.

use subtle::{Choice, ConstantTimeEq};

/// Constant-time equality of two byte slices.
///
/// Returns `false` at once if the lengths differ. For equal lengths the
/// running time does not depend on where, or whether, the inputs differ.
#[must_use]
pub fn secure_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    bool::from(ct_eq_fixed(a, b))
}

/// Constant-time equality of two equal-length slices as a `Choice`.
#[inline]
fn ct_eq_fixed(a: &[u8], b: &[u8]) -> Choice {
    debug_assert_eq!(a.len(), b.len());
    a.ct_eq(b)
}
