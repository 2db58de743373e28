use std::cmp;
use std::string::FromUtf8Error;

use crypto::symmetriccipher::SymmetricCipherError;
use pest::error::{Error as PestError, LineColLocation};
use thiserror::Error;

use crate::utils::policy::pest::human::Rule as HumanRule;
use crate::utils::policy::pest::json::Rule as JsonRule;

/// Errors raised by the KP-ABE core.
///
/// [`KpAbeError::Unsatisfiable`] is the only domain error: decryption was
/// attempted with an attribute set that does not satisfy the key's access
/// policy. Everything else is a malformed input or a backend failure.
#[derive(Error, Debug)]
pub enum KpAbeError {
    /// The attribute set does not satisfy the decryption key's policy.
    #[error("attributes do not satisfy the access policy")]
    Unsatisfiable,
    /// An attribute is missing from the parameter map it was looked up in.
    #[error("unknown attribute {0}")]
    UnknownAttribute(u32),
    /// The access policy is structurally invalid or could not be parsed.
    #[error("invalid access policy: {0}")]
    InvalidPolicy(String),
    /// Canonical element encoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The symmetric cipher backend rejected the operation.
    #[error("symmetric cipher error: {0}")]
    SymmetricCipher(String),
    /// The decrypted bytes do not form a valid UTF-8 message.
    #[error("plaintext is not valid UTF-8: {0}")]
    Utf8(String),
    #[error("io error: {0}")]
    Io(String),
}

fn pest_line<R: pest::RuleType>(error: &PestError<R>) -> usize {
    match error.line_col.to_owned() {
        LineColLocation::Pos((line, _)) => line,
        LineColLocation::Span((start_line, _), (end_line, _)) => cmp::max(start_line, end_line),
    }
}

impl From<PestError<HumanRule>> for KpAbeError {
    fn from(error: PestError<HumanRule>) -> Self {
        KpAbeError::InvalidPolicy(format!("policy parse error in line {}", pest_line(&error)))
    }
}

impl From<PestError<JsonRule>> for KpAbeError {
    fn from(error: PestError<JsonRule>) -> Self {
        KpAbeError::InvalidPolicy(format!("json policy parse error in line {}", pest_line(&error)))
    }
}

impl From<bincode::Error> for KpAbeError {
    fn from(error: bincode::Error) -> Self {
        KpAbeError::Serialization(error.to_string())
    }
}

impl From<SymmetricCipherError> for KpAbeError {
    fn from(error: SymmetricCipherError) -> Self {
        KpAbeError::SymmetricCipher(format!("{:?}", error))
    }
}

impl From<FromUtf8Error> for KpAbeError {
    fn from(error: FromUtf8Error) -> Self {
        KpAbeError::Utf8(error.to_string())
    }
}

impl From<serde_json::Error> for KpAbeError {
    fn from(error: serde_json::Error) -> Self {
        KpAbeError::Serialization(error.to_string())
    }
}

impl From<std::io::Error> for KpAbeError {
    fn from(error: std::io::Error) -> Self {
        KpAbeError::Io(error.to_string())
    }
}
