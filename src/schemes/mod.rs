//! Implemented schemes.
//!
//! Currently those are:
//! * GPSW06 KP-ABE
//!
pub mod gpsw06;
