// ABOUTME: SSH public key fingerprint computation.
// ABOUTME: SHA256 over the key's wire encoding, rendered as colon-separated hex.

use crate::error::{Result, SshError};
use crate::key::parse_public_key;
use sha2::{Digest, Sha256};
use ssh_key::PublicKey;

/// Compute the SHA256 fingerprint of a public key.
///
/// The digest covers the SSH wire format of the key (algorithm name followed by
/// the algorithm-specific fields, each length-prefixed), the same bytes that sit
/// base64-encoded in an OpenSSH public key line. The comment is not part of it.
///
/// # Returns
/// 32 lowercase hex pairs joined by `:` (95 characters).
///
/// # Errors
/// Returns `SshError::SerializeKey` if the key cannot be encoded.
pub fn compute_fingerprint(public_key: &PublicKey) -> Result<String> {
    let wire_data = public_key.to_bytes().map_err(SshError::SerializeKey)?;

    let mut hasher = Sha256::new();
    hasher.update(&wire_data);
    let hash = hasher.finalize();

    Ok(hash
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":"))
}

/// Parse an OpenSSH public key line and fingerprint it.
///
/// # Errors
/// Returns `SshError::InvalidPublicKey` if the line does not parse.
pub fn fingerprint_of(public_key: &str) -> Result<String> {
    parse_public_key(public_key)?.fingerprint()
}
