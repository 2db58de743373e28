use crypto::digest::Digest;
use crypto::sha2::Sha256;
use serde::Serialize;

use crate::error::KpAbeError;

/// Derives the 32-byte symmetric key for a group element.
///
/// The element is canonicalized to its serde byte encoding and hashed with
/// SHA-256. Equal elements produce identical keys, so the encryptor and the
/// decryptor arrive at the same key from independently computed copies of
/// the KEM secret.
pub fn key_from_element<T: Serialize>(element: &T) -> Result<[u8; 32], KpAbeError> {
    let bytes = bincode::serialize(element)?;
    let mut sha = Sha256::new();
    sha.input(&bytes);
    let mut key = [0u8; 32];
    sha.result(&mut key);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rabe_bn::G1;
    use rand::Rng;

    #[test]
    fn test_key_length_and_content() {
        let element: G1 = rand::thread_rng().gen();
        let key = key_from_element(&element).unwrap();
        assert_eq!(key.len(), 32);
        assert_ne!(key, [0u8; 32]);
    }

    #[test]
    fn test_equal_elements_equal_keys() {
        let element: G1 = rand::thread_rng().gen();
        let copy = element.clone();
        assert_eq!(
            key_from_element(&element).unwrap(),
            key_from_element(&copy).unwrap()
        );
    }

    #[test]
    fn test_distinct_elements_distinct_keys() {
        let mut rng = rand::thread_rng();
        let one: G1 = rng.gen();
        let other: G1 = rng.gen();
        assert_ne!(
            key_from_element(&one).unwrap(),
            key_from_element(&other).unwrap()
        );
    }
}
