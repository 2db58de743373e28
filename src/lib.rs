//! Key-policy attribute-based encryption for Rust.
//!
//! This library implements the Goyal-Pandey-Sahai-Waters (GPSW) scheme:
//! ciphertexts are labeled with a set of integer attributes and secret
//! keys are bound to monotone access policies of `and`/`or` gates over
//! those attributes. A key decrypts a ciphertext iff the ciphertext's
//! attribute set satisfies the key's policy tree.
//!
//! Group arithmetic is provided by [`rabe_bn`]; the curve parameters are
//! compiled into that crate, so all participants operate on the same
//! groups without exchanging or configuring parameters. Messages are
//! sealed with AES-256-CBC under a key derived from the KEM element by
//! SHA-256 over its canonical byte encoding.
//!
//! The symmetric layer uses a fixed all-zero IV and carries no integrity
//! tag. This is part of the wire contract; it is not safe to reuse a KEM
//! element for more than one message, and callers must treat decrypted
//! output as unauthenticated.
//!
//! All types are plain owned values and every operation is a pure
//! function of its inputs and fresh randomness, so the algorithms may be
//! called concurrently and keys shared freely across threads.
//!
//! # Examples
//!
//! ```
//! use kpabe::schemes::gpsw06::{setup, keygen, encrypt, decrypt};
//! use kpabe::utils::policy::pest::{parse, PolicyLanguage};
//!
//! let (pk, msk) = setup(&[1, 2, 3, 4, 5]);
//! let policy = parse("(1 or 2) and (3 or 4)", PolicyLanguage::HumanPolicy).unwrap();
//! let sk = keygen(&msk, &policy).unwrap();
//! let ct = encrypt(&pk, &[1, 3], "Hello World!").unwrap();
//! assert_eq!(decrypt(&sk, &ct).unwrap(), "Hello World!");
//! ```
pub mod error;
pub mod schemes;
pub mod utils;
