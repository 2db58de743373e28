//! `GPSW06` scheme by Vipul Goyal, Omkant Pandey, Amit Sahai and Brent Waters.
//!
//! * Developped by Vipul Goyal, Omkant Pandey, Amit Sahai, Brent Waters, "Attribute-Based Encryption for Fine-Grained Access Control of Encrypted Data"
//! * Published in: Proceedings of the 13th ACM Conference on Computer and Communications Security
//! * Available from: <https://eprint.iacr.org/2006/309.pdf>
//! * Type: encryption (key-policy attribute-based)
//! * Setting: bilinear groups
//!
//! Ciphertexts are labeled with a set of integer attributes, secret keys
//! are bound to a monotone access policy. A key decrypts a ciphertext iff
//! the ciphertext's attribute set satisfies the key's policy tree. The
//! message itself is sealed with a symmetric cipher under a key derived
//! from the KEM element `pk^k`; the symmetric layer carries no integrity
//! tag, so a garbled decryption is the caller's to detect.
//!
//! # Examples
//!
//! ```
//! use kpabe::schemes::gpsw06::*;
//! use kpabe::utils::policy::pest::{parse, PolicyLanguage};
//! let (pk, msk) = setup(&[1, 2, 3, 4, 5]);
//! let policy = parse("(1 or 2) and (3 or 4)", PolicyLanguage::HumanPolicy).unwrap();
//! let sk = keygen(&msk, &policy).unwrap();
//! let ct = encrypt(&pk, &[1, 3], "Hello World!").unwrap();
//! assert_eq!(decrypt(&sk, &ct).unwrap(), "Hello World!");
//! ```
use std::collections::BTreeMap;

use rabe_bn::{Fr, Group, G1};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::KpAbeError;
use crate::utils::aes::{decrypt_symmetric, encrypt_symmetric};
use crate::utils::policy::PolicyNode;
use crate::utils::secretsharing::{gen_shares_policy, satisfying_attributes};

/// A GPSW06 Public Key (PK).
///
/// `p_i` holds one group element per attribute of the universe fixed at
/// [`setup`]; `pk` is the blinded generator the KEM secret is built from.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Gpsw06PublicKey {
    pk: G1,
    p_i: BTreeMap<u32, G1>,
}

/// A GPSW06 Master Key (MSK), held by the key authority only.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Gpsw06MasterKey {
    mk: Fr,
    s_i: BTreeMap<u32, Fr>,
}

/// A GPSW06 Secret User Key (SK), bound to an access policy.
///
/// Owns its policy tree; cloning a key deep-copies both the tree and the
/// per-leaf scalars, and a shared key may be used by concurrent
/// [`decrypt`] calls.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Gpsw06SecretKey {
    policy: PolicyNode,
    d_i: BTreeMap<u32, Fr>,
}

/// A GPSW06 Ciphertext (CT).
///
/// `c_w` carries the per-attribute decryption parameters, `ct` the
/// symmetric ciphertext of the message.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Gpsw06Ciphertext {
    c_w: BTreeMap<u32, G1>,
    ct: Vec<u8>,
}

impl Gpsw06SecretKey {
    /// The access policy this key is bound to.
    pub fn policy(&self) -> &PolicyNode {
        &self.policy
    }
}

impl Gpsw06Ciphertext {
    /// The attribute set this ciphertext was encrypted under.
    pub fn attributes(&self) -> Vec<u32> {
        self.c_w.keys().cloned().collect()
    }
}

/// The setup algorithm. Generates a [`Gpsw06PublicKey`] and a
/// [`Gpsw06MasterKey`] over the given attribute universe.
pub fn setup(attributes: &[u32]) -> (Gpsw06PublicKey, Gpsw06MasterKey) {
    let mut rng = rand::thread_rng();
    let mk: Fr = rng.gen();
    let g: G1 = rng.gen();
    let mut p_i: BTreeMap<u32, G1> = BTreeMap::new();
    let mut s_i: BTreeMap<u32, Fr> = BTreeMap::new();
    for attr in attributes {
        let si: Fr = rng.gen();
        p_i.insert(*attr, g * si);
        s_i.insert(*attr, si);
    }
    // the generator itself is not part of the shared parameters
    let pk = Gpsw06PublicKey { pk: g * mk, p_i };
    let msk = Gpsw06MasterKey { mk, s_i };
    (pk, msk)
}

/// The key generation algorithm. Derives a decryption key bound to
/// `policy` by sharing the master scalar over the tree.
///
/// # Arguments
///
/// * `msk` - A Master Key (MSK), generated by the function [`setup`]
/// * `policy` - An access policy over attributes of the universe
pub fn keygen(msk: &Gpsw06MasterKey, policy: &PolicyNode) -> Result<Gpsw06SecretKey, KpAbeError> {
    policy.validate()?;
    let shares = gen_shares_policy(msk.mk, policy);
    let mut d_i: BTreeMap<u32, Fr> = BTreeMap::new();
    for (attr, share) in shares {
        let si = msk
            .s_i
            .get(&attr)
            .ok_or(KpAbeError::UnknownAttribute(attr))?;
        d_i.insert(attr, share * si.inverse().unwrap());
    }
    Ok(Gpsw06SecretKey {
        policy: policy.clone(),
        d_i,
    })
}

/// Creates a fresh KEM secret for `attributes`: the per-attribute
/// decryption parameters `Cw` and the secret element `Cs = pk^k`.
///
/// The ephemeral scalar `k` never leaves this function.
pub fn create_secret(
    pk: &Gpsw06PublicKey,
    attributes: &[u32],
) -> Result<(BTreeMap<u32, G1>, G1), KpAbeError> {
    let k: Fr = rand::thread_rng().gen();
    let mut cs = pk.pk * k;
    // normalized so that both sides hash identical canonical bytes
    cs.normalize();
    let mut c_w: BTreeMap<u32, G1> = BTreeMap::new();
    for attr in attributes {
        let pi = pk
            .p_i
            .get(attr)
            .ok_or(KpAbeError::UnknownAttribute(*attr))?;
        c_w.insert(*attr, *pi * k);
    }
    Ok((c_w, cs))
}

/// Recovers the KEM secret from `Cw` with a key whose policy `attributes`
/// satisfies.
///
/// Combining `Cw[a]^(D_a * coeff_a)` over a satisfying leaf subset yields
/// `g^(k * Σ share_a * coeff_a) = pk^k`, the encryptor's secret.
pub fn recover_secret(
    sk: &Gpsw06SecretKey,
    c_w: &BTreeMap<u32, G1>,
    attributes: &[u32],
) -> Result<G1, KpAbeError> {
    let sat = satisfying_attributes(&sk.policy, attributes, Fr::one());
    if sat.is_empty() {
        return Err(KpAbeError::Unsatisfiable);
    }
    let mut cs = G1::zero();
    for (attr, coeff) in sat {
        let di = sk
            .d_i
            .get(&attr)
            .ok_or(KpAbeError::UnknownAttribute(attr))?;
        let ci = c_w
            .get(&attr)
            .ok_or(KpAbeError::UnknownAttribute(attr))?;
        cs = cs + (*ci * (*di * coeff));
    }
    // normalized so that both sides hash identical canonical bytes
    cs.normalize();
    Ok(cs)
}

/// Encrypts `message` under an attribute set (hybrid KEM + AES).
///
/// # Arguments
///
/// * `pk` - A Public Key (PK), generated by the function [`setup`]
/// * `attributes` - The attribute set the ciphertext is labeled with
/// * `message` - The plaintext message
pub fn encrypt(
    pk: &Gpsw06PublicKey,
    attributes: &[u32],
    message: &str,
) -> Result<Gpsw06Ciphertext, KpAbeError> {
    let (c_w, cs) = create_secret(pk, attributes)?;
    // trailing NUL, recovered as a C-style string on decryption
    let mut plaintext = message.as_bytes().to_vec();
    plaintext.push(0u8);
    let ct = encrypt_symmetric(&cs, &plaintext)?;
    Ok(Gpsw06Ciphertext { c_w, ct })
}

/// Decrypts a ciphertext with a key whose policy the ciphertext's
/// attribute set satisfies.
///
/// Fails with [`KpAbeError::Unsatisfiable`] when the attribute set does
/// not satisfy the key's policy.
pub fn decrypt(sk: &Gpsw06SecretKey, ct: &Gpsw06Ciphertext) -> Result<String, KpAbeError> {
    let attributes = ct.attributes();
    let cs = recover_secret(sk, &ct.c_w, &attributes)?;
    let plaintext = decrypt_symmetric(&cs, &ct.ct)?;
    let end = plaintext
        .iter()
        .position(|byte| *byte == 0u8)
        .unwrap_or(plaintext.len());
    Ok(String::from_utf8(plaintext[..end].to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::policy::pest::{parse, PolicyLanguage};

    fn or_and_policy() -> PolicyNode {
        parse("(1 or 2) and (3 or 4)", PolicyLanguage::HumanPolicy).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_first_branch() {
        let (pk, msk) = setup(&[1, 2, 3, 4, 5]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let ct = encrypt(&pk, &[1, 3], "Hello World!").unwrap();
        assert_eq!(decrypt(&sk, &ct).unwrap(), "Hello World!");
    }

    #[test]
    fn test_encrypt_decrypt_second_branch() {
        let (pk, msk) = setup(&[1, 2, 3, 4, 5]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let ct = encrypt(&pk, &[2, 4], "abc").unwrap();
        assert_eq!(decrypt(&sk, &ct).unwrap(), "abc");
    }

    #[test]
    fn test_unsatisfied_attribute_set() {
        let (pk, msk) = setup(&[1, 2, 3, 4, 5]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let ct = encrypt(&pk, &[1], "secret").unwrap();
        assert!(matches!(decrypt(&sk, &ct), Err(KpAbeError::Unsatisfiable)));
    }

    #[test]
    fn test_empty_message() {
        let (pk, msk) = setup(&[1, 2, 3, 4]);
        let policy = parse("1 or 2", PolicyLanguage::HumanPolicy).unwrap();
        let sk = keygen(&msk, &policy).unwrap();
        let ct = encrypt(&pk, &[1], "").unwrap();
        assert_eq!(decrypt(&sk, &ct).unwrap(), "");
    }

    #[test]
    fn test_threshold_gate_needs_all() {
        let (pk, msk) = setup(&[1, 2, 3, 4]);
        let policy = parse("1 and 2 and 3", PolicyLanguage::HumanPolicy).unwrap();
        let sk = keygen(&msk, &policy).unwrap();
        let partial = encrypt(&pk, &[1, 2], "nope").unwrap();
        assert!(matches!(
            decrypt(&sk, &partial),
            Err(KpAbeError::Unsatisfiable)
        ));
        let full = encrypt(&pk, &[1, 2, 3], "x").unwrap();
        assert_eq!(decrypt(&sk, &full).unwrap(), "x");
    }

    #[test]
    fn test_secret_recovery() {
        let (pk, msk) = setup(&[1, 2, 3, 4]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let (c_w, cs_enc) = create_secret(&pk, &[1, 3]).unwrap();
        let cs_dec = recover_secret(&sk, &c_w, &[1, 3]).unwrap();
        assert_eq!(cs_enc, cs_dec);
    }

    #[test]
    fn test_secret_recovery_unsatisfied() {
        let (pk, msk) = setup(&[1, 2, 3, 4]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let (c_w, _) = create_secret(&pk, &[1]).unwrap();
        assert!(matches!(
            recover_secret(&sk, &c_w, &[1]),
            Err(KpAbeError::Unsatisfiable)
        ));
    }

    #[test]
    fn test_keygen_covers_all_leafs() {
        let (_, msk) = setup(&[1, 2, 3, 4]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let leaf_attrs: Vec<u32> = sk.d_i.keys().cloned().collect();
        assert_eq!(leaf_attrs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_keygen_unknown_attribute() {
        let (_, msk) = setup(&[1, 2]);
        let policy = parse("1 or 7", PolicyLanguage::HumanPolicy).unwrap();
        assert!(matches!(
            keygen(&msk, &policy),
            Err(KpAbeError::UnknownAttribute(7))
        ));
    }

    #[test]
    fn test_keygen_rejects_duplicate_leafs() {
        let (_, msk) = setup(&[1, 2]);
        let policy = parse("1 and 1", PolicyLanguage::HumanPolicy).unwrap();
        assert!(matches!(
            keygen(&msk, &policy),
            Err(KpAbeError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_encrypt_unknown_attribute() {
        let (pk, _) = setup(&[1, 2]);
        assert!(matches!(
            encrypt(&pk, &[1, 9], "m"),
            Err(KpAbeError::UnknownAttribute(9))
        ));
    }

    #[test]
    fn test_setup_is_randomized() {
        let universe = [1, 2, 3];
        let (pk_a, msk_a) = setup(&universe);
        let (pk_b, msk_b) = setup(&universe);
        assert_ne!(pk_a, pk_b);
        assert_ne!(msk_a, msk_b);
    }

    #[test]
    fn test_json_policy_language() {
        let (pk, msk) = setup(&[1, 2, 3, 4, 5]);
        let policy = parse(
            r#"{"name": "and", "children": [{"name": "or", "children": [{"name": "1"}, {"name": "2"}]}, {"name": "or", "children": [{"name": "3"}, {"name": "4"}]}]}"#,
            PolicyLanguage::JsonPolicy,
        )
        .unwrap();
        let sk = keygen(&msk, &policy).unwrap();
        let ct = encrypt(&pk, &[2, 3], "json").unwrap();
        assert_eq!(decrypt(&sk, &ct).unwrap(), "json");
    }

    #[test]
    fn test_key_survives_serialization() {
        let (pk, msk) = setup(&[1, 2, 3, 4]);
        let sk = keygen(&msk, &or_and_policy()).unwrap();
        let serialized = serde_json::to_string(&sk).unwrap();
        let deserialized: Gpsw06SecretKey = serde_json::from_str(&serialized).unwrap();
        let ct = encrypt(&pk, &[2, 3], "round trip").unwrap();
        assert_eq!(decrypt(&deserialized, &ct).unwrap(), "round trip");
    }
}
