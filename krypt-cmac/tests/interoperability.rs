#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(clippy::indexing_slicing)]
//! Cross-library compatibility against the RustCrypto `cmac` crate.
//!
//! Both implementations are driven with the same keys and messages; tags must
//! match byte for byte for every AES key size.

use aes::{Aes128, Aes192, Aes256};
use cmac::Mac;
use krypt_cmac::{Cmac, Cmac96, CmacPrf128, MacComputer};
use proptest::prelude::*;

fn reference_128(key: &[u8], data: &[u8]) -> [u8; 16] {
    let mut mac = <cmac::Cmac<Aes128> as Mac>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().into()
}

fn reference_192(key: &[u8], data: &[u8]) -> [u8; 16] {
    let mut mac = <cmac::Cmac<Aes192> as Mac>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().into()
}

fn reference_256(key: &[u8], data: &[u8]) -> [u8; 16] {
    let mut mac = <cmac::Cmac<Aes256> as Mac>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().into()
}

fn reference(key: &[u8], data: &[u8]) -> [u8; 16] {
    match key.len() {
        16 => reference_128(key, data),
        24 => reference_192(key, data),
        32 => reference_256(key, data),
        other => panic!("unsupported key length {other}"),
    }
}

// ============================================================================
// Fixed inputs
// ============================================================================

#[test]
fn test_matches_reference_for_all_key_sizes() {
    let message: Vec<u8> = (0u8..=255).collect();

    for key_len in [16usize, 24, 32] {
        let key: Vec<u8> = (0..key_len).map(|i| (i as u8).wrapping_mul(7)).collect();
        for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100, 256] {
            let ours = Cmac::new(&key).unwrap().digest(Some(&message[..len])).unwrap();
            assert_eq!(ours, reference(&key, &message[..len]), "key {key_len}, msg {len}");
        }
    }
}

#[test]
fn test_cmac_96_is_reference_prefix() {
    let key = [0x42u8; 16];
    let data = b"interoperability check for the truncated tag";

    let ours = Cmac96::new(&key).unwrap().digest(Some(data)).unwrap();
    assert_eq!(&ours[..], &reference_128(&key, data)[..12]);
}

#[test]
fn test_prf_key_derivation_matches_reference() {
    // K' = AES-CMAC(0^128, K), then AES-CMAC(K', M)
    let key = b"a key that is not sixteen bytes long";
    let data = b"prf input";

    let derived = reference_128(&[0u8; 16], key);
    let expected = reference_128(&derived, data);

    let mut prf = CmacPrf128::new(key).unwrap();
    assert_eq!(prf.key(), &derived);
    assert_eq!(prf.digest(Some(data)).unwrap(), expected);
}

#[test]
fn test_reference_tag_verifies() {
    let key = [0x0fu8; 32];
    let data = vec![0xEEu8; 1000];
    let tag = reference_256(&key, &data);

    let mut mac = Cmac::new(&key).unwrap();
    for piece in data.chunks(77) {
        mac.update(piece).unwrap();
    }
    assert!(mac.verify(&tag, None).is_ok());
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// AES-128 tags agree with the reference implementation
    #[test]
    fn aes_128_matches_reference(
        key in prop::array::uniform16(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let ours = Cmac::new(&key).unwrap().digest(Some(&data)).unwrap();
        prop_assert_eq!(ours, reference_128(&key, &data));
    }

    /// AES-192 tags agree with the reference implementation
    #[test]
    fn aes_192_matches_reference(
        key in prop::collection::vec(any::<u8>(), 24),
        data in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let ours = Cmac::new(&key).unwrap().digest(Some(&data)).unwrap();
        prop_assert_eq!(ours, reference_192(&key, &data));
    }

    /// AES-256 tags agree with the reference implementation
    #[test]
    fn aes_256_matches_reference(
        key in prop::array::uniform32(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let ours = Cmac::new(&key).unwrap().digest(Some(&data)).unwrap();
        prop_assert_eq!(ours, reference_256(&key, &data));
    }

    /// The PRF with arbitrary-length keys agrees with CMAC-under-derived-key
    #[test]
    fn prf_matches_reference(
        key in prop::collection::vec(any::<u8>(), 0..64),
        data in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let derived: [u8; 16] = if key.len() == 16 {
            key.as_slice().try_into().unwrap()
        } else {
            reference_128(&[0u8; 16], &key)
        };
        let ours = CmacPrf128::new(&key).unwrap().digest(Some(&data)).unwrap();
        prop_assert_eq!(ours, reference_128(&derived, &data));
    }
}
