// ABOUTME: SSH key capabilities for the keypairs service.
// ABOUTME: Public key validation, key pair generation, and SHA256 fingerprints.

pub mod error;
pub mod fingerprint;
pub mod key;

#[cfg(test)]
mod testdata;

pub use error::{Result, SshError};
pub use fingerprint::{compute_fingerprint, fingerprint_of};
pub use key::{generate_keypair, parse_public_key, GeneratedKeypair, KeyType, ParsedPublicKey};
