// ABOUTME: Pure validation of keypair names and imported public key material.
// ABOUTME: No I/O; errors are ValidationError variants surfaced to the caller as-is.

use crate::error::ValidationError;
use keypairs_ssh::{parse_public_key, ParsedPublicKey};

/// Longest accepted keypair name, in characters.
pub const MAX_NAME_LEN: usize = 255;

fn is_safe_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | ' ')
}

/// Check a keypair name.
///
/// Blank names are rejected first, then names longer than [`MAX_NAME_LEN`]
/// characters, then names with anything outside `[A-Za-z0-9_.\- ]`.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }

    let mut found: Vec<char> = name.chars().filter(|c| !is_safe_name_char(*c)).collect();
    if !found.is_empty() {
        found.sort_unstable();
        found.dedup();
        return Err(ValidationError::InvalidNameChars {
            found: found.into_iter().collect(),
        });
    }

    Ok(())
}

/// Check imported public key material and return its parsed form.
pub fn validate_public_key(raw: &str) -> Result<ParsedPublicKey, ValidationError> {
    parse_public_key(raw).map_err(ValidationError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_safe_names() {
        let longest = "x".repeat(255);
        for name in ["a", "create_test", "my key.v2", "A-Z_0-9", longest.as_str()] {
            assert_eq!(validate_name(name), Ok(()), "{name:?} should be valid");
        }
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("\t\n"), Err(ValidationError::EmptyName));
    }

    #[test]
    fn rejects_256_chars() {
        assert_eq!(
            validate_name(&"a".repeat(256)),
            Err(ValidationError::NameTooLong { len: 256, max: 255 })
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 255 characters of 2 bytes each: within the limit, but not in the safe set
        let err = validate_name(&"é".repeat(255)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNameChars { .. }));
    }

    #[test]
    fn rejects_path_separators() {
        assert_eq!(
            validate_name("test/keypair"),
            Err(ValidationError::InvalidNameChars {
                found: "/".to_string()
            })
        );
        assert!(validate_name("..\\etc").is_err());
    }

    #[test]
    fn reports_each_offending_char_once() {
        let err = validate_name("a/b/c:d").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNameChars {
                found: "/:".to_string()
            }
        );
    }

    #[test]
    fn rejects_malformed_public_key() {
        let err = validate_public_key("ssh-what negative").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPublicKey { .. }));
    }
}
