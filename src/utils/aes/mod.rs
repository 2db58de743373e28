use crypto::buffer::{BufferResult, ReadBuffer, WriteBuffer};
use crypto::{aes, blockmodes, buffer};
use serde::Serialize;

use crate::error::KpAbeError;
use crate::utils::hash::key_from_element;

// The IV is fixed by the wire contract. With CBC this means a key must
// never be reused across messages; the scheme derives a fresh KEM element
// per encryption.
const IV: [u8; 16] = [0u8; 16];

/// Key Encapsulation Mechanism (encryption function).
///
/// Seals `plaintext` under a key derived from the KEM element `msg` using
/// AES-256-CBC with PKCS#7 padding.
pub fn encrypt_symmetric<T: Serialize>(msg: &T, plaintext: &[u8]) -> Result<Vec<u8>, KpAbeError> {
    let key = key_from_element(msg)?;
    encrypt_aes(plaintext, &key)
}

/// Key Encapsulation Mechanism (decryption function).
pub fn decrypt_symmetric<T: Serialize>(msg: &T, ciphertext: &[u8]) -> Result<Vec<u8>, KpAbeError> {
    let key = key_from_element(msg)?;
    decrypt_aes(ciphertext, &key)
}

/// Encrypt a buffer with the given key using AES-256/CBC/Pkcs encryption.
fn encrypt_aes(data: &[u8], key: &[u8]) -> Result<Vec<u8>, KpAbeError> {
    let mut encryptor =
        aes::cbc_encryptor(aes::KeySize::KeySize256, key, &IV, blockmodes::PkcsPadding);

    let mut final_result = Vec::<u8>::new();
    let mut read_buffer = buffer::RefReadBuffer::new(data);
    let mut buf = [0; 4096];
    let mut write_buffer = buffer::RefWriteBuffer::new(&mut buf);

    loop {
        let result = encryptor.encrypt(&mut read_buffer, &mut write_buffer, true)?;
        final_result.extend(
            write_buffer
                .take_read_buffer()
                .take_remaining()
                .iter()
                .cloned(),
        );
        match result {
            BufferResult::BufferUnderflow => break,
            BufferResult::BufferOverflow => {}
        }
    }

    Ok(final_result)
}

/// Decrypt a buffer with the given key using AES-256/CBC/Pkcs encryption.
fn decrypt_aes(encrypted_data: &[u8], key: &[u8]) -> Result<Vec<u8>, KpAbeError> {
    let mut decryptor =
        aes::cbc_decryptor(aes::KeySize::KeySize256, key, &IV, blockmodes::PkcsPadding);

    let mut final_result = Vec::<u8>::new();
    let mut read_buffer = buffer::RefReadBuffer::new(encrypted_data);
    let mut buf = [0; 4096];
    let mut write_buffer = buffer::RefWriteBuffer::new(&mut buf);

    loop {
        let result = decryptor.decrypt(&mut read_buffer, &mut write_buffer, true)?;
        final_result.extend(
            write_buffer
                .take_read_buffer()
                .take_remaining()
                .iter()
                .cloned(),
        );
        match result {
            BufferResult::BufferUnderflow => break,
            BufferResult::BufferOverflow => {}
        }
    }

    Ok(final_result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rabe_bn::G1;
    use rand::Rng;

    #[test]
    fn test_round_trip() {
        let secret: G1 = rand::thread_rng().gen();
        let plaintext =
            String::from("dance like no one's watching, encrypt like everyone is!").into_bytes();
        let ciphertext = encrypt_symmetric(&secret, &plaintext).unwrap();
        assert_eq!(decrypt_symmetric(&secret, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_round_trip_empty() {
        let secret: G1 = rand::thread_rng().gen();
        let ciphertext = encrypt_symmetric(&secret, &[]).unwrap();
        assert_eq!(decrypt_symmetric(&secret, &ciphertext).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_deterministic_ciphertext() {
        // fixed IV: equal element and message give bit-identical output
        let secret: G1 = rand::thread_rng().gen();
        let plaintext = b"interop";
        let first = encrypt_symmetric(&secret, plaintext).unwrap();
        let second = encrypt_symmetric(&secret, plaintext).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_padding_to_block_size() {
        let secret: G1 = rand::thread_rng().gen();
        let ciphertext = encrypt_symmetric(&secret, b"x").unwrap();
        assert_eq!(ciphertext.len(), 16);
    }
}
