use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const ITERATIONS: u32 = 10_000;

/// Hash a plaintext password. Output is base64(salt || derived key) with a
/// fresh random salt, so hashing the same password twice gives different
/// encodings.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    if plain.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(plain.as_bytes(), &salt, ITERATIONS, &mut key);

    let mut out = Vec::with_capacity(SALT_LEN + KEY_LEN);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&key);
    Ok(BASE64.encode(out))
}

/// Check a plaintext against a stored hash. The salt is the first 16 bytes
/// of the decoded value. Malformed stored values fail closed.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Ok(bytes) = BASE64.decode(stored) else {
        return false;
    };
    if bytes.len() != SALT_LEN + KEY_LEN {
        return false;
    }

    let (salt, expected) = bytes.split_at(SALT_LEN);
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(plain.as_bytes(), salt, ITERATIONS, &mut key);
    key[..] == *expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn same_password_hashes_differently_but_both_verify() {
        let password = "repeatable";
        let first = hash_password(password).expect("first hash");
        let second = hash_password(password).expect("second hash");
        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn verify_fails_closed_on_malformed_hash() {
        assert!(!verify_password("anything", "not base64 at all!!!"));
        // valid base64, wrong length
        let short = BASE64.encode([0u8; 8]);
        assert!(!verify_password("anything", &short));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = hash_password("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
