// ABOUTME: SSH public key parsing and fresh key pair generation.
// ABOUTME: Imported keys are validated here; generated keys are rendered in OpenSSH format.

use crate::error::{Result, SshError};
use crate::fingerprint::compute_fingerprint;
use ssh_key::{Algorithm, EcdsaCurve, LineEnding, PrivateKey, PublicKey};
use std::fmt;
use std::str::FromStr;

/// Key algorithms the service is willing to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyType {
    #[default]
    Ed25519,
    Rsa,
    EcdsaP256,
}

impl KeyType {
    /// OpenSSH algorithm name, as it appears at the start of a public key line.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "ssh-ed25519",
            KeyType::Rsa => "ssh-rsa",
            KeyType::EcdsaP256 => "ecdsa-sha2-nistp256",
        }
    }

    fn algorithm(&self) -> Algorithm {
        match self {
            KeyType::Ed25519 => Algorithm::Ed25519,
            KeyType::Rsa => Algorithm::Rsa { hash: None },
            KeyType::EcdsaP256 => Algorithm::Ecdsa {
                curve: EcdsaCurve::NistP256,
            },
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = SshError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssh-ed25519" | "ed25519" => Ok(KeyType::Ed25519),
            "ssh-rsa" | "rsa" => Ok(KeyType::Rsa),
            "ecdsa-sha2-nistp256" | "ecdsa" | "p256" => Ok(KeyType::EcdsaP256),
            other => Err(SshError::UnsupportedKeyType(other.to_string())),
        }
    }
}

/// A public key that passed validation.
#[derive(Debug, Clone)]
pub struct ParsedPublicKey {
    key: PublicKey,
}

impl ParsedPublicKey {
    /// Algorithm name (e.g. `ssh-rsa`).
    pub fn algorithm(&self) -> String {
        self.key.algorithm().as_str().to_string()
    }

    pub fn comment(&self) -> &str {
        self.key.comment()
    }

    pub fn fingerprint(&self) -> Result<String> {
        compute_fingerprint(&self.key)
    }
}

/// Parse an OpenSSH one-line public key (`<type> <base64> [comment]`).
///
/// Rejects unknown type prefixes, malformed base64 payloads, and payloads whose
/// wire encoding does not describe a valid key of the named type.
///
/// # Errors
/// Returns `SshError::InvalidPublicKey` with the parser's reason.
pub fn parse_public_key(raw: &str) -> Result<ParsedPublicKey> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SshError::invalid_public_key("key is empty"));
    }
    if trimmed.contains('\n') {
        return Err(SshError::invalid_public_key("expected a single line"));
    }

    let key = PublicKey::from_openssh(trimmed).map_err(SshError::invalid_public_key)?;
    Ok(ParsedPublicKey { key })
}

/// A freshly generated key pair, rendered for hand-off to the caller.
#[derive(Clone)]
pub struct GeneratedKeypair {
    /// OpenSSH one-line public key.
    pub public_key: String,
    /// OpenSSH PEM private key. Shown to the caller once, never stored.
    pub private_key: String,
    pub fingerprint: String,
    pub key_type: KeyType,
}

impl fmt::Debug for GeneratedKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKeypair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("fingerprint", &self.fingerprint)
            .field("key_type", &self.key_type)
            .finish()
    }
}

/// Generate a new key pair of the requested type from the thread-local CSPRNG.
///
/// # Errors
/// Returns `SshError::GenerateKey` if the underlying generator fails, or
/// `SshError::SerializeKey` if the result cannot be encoded.
pub fn generate_keypair(key_type: KeyType) -> Result<GeneratedKeypair> {
    let private_key = PrivateKey::random(&mut rand::thread_rng(), key_type.algorithm())
        .map_err(SshError::GenerateKey)?;

    let private_pem = private_key
        .to_openssh(LineEnding::LF)
        .map_err(SshError::SerializeKey)?;
    let public_key = private_key.public_key();
    let public_line = public_key.to_openssh().map_err(SshError::SerializeKey)?;
    let fingerprint = compute_fingerprint(public_key)?;

    Ok(GeneratedKeypair {
        public_key: public_line,
        private_key: private_pem.as_str().to_owned(),
        fingerprint,
        key_type,
    })
}
