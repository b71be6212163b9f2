//! Passcode hashing and validation
//!
//! The passcode is never kept in the config as plaintext. Registration stores
//! an Argon2id PHC string and every unlock attempt is checked against it with
//! the constant-time verifier from the `argon2` crate.

use std::fmt;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{LockError, Result};

/// Minimum passcode length, in characters
pub const MIN_PASSCODE_LENGTH: usize = 4;

/// Check a candidate passcode at registration time
///
/// Length is the only strength rule.
pub fn validate_new_passcode(candidate: &str) -> bool {
    candidate.chars().count() >= MIN_PASSCODE_LENGTH
}

/// Argon2id hash of the registered passcode, in PHC string format
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasscodeHash(String);

impl PasscodeHash {
    /// Wrap an existing PHC string, rejecting anything that does not parse
    pub fn from_phc(phc: impl Into<String>) -> Result<Self> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|e| LockError::CorruptHash(e.to_string()))?;
        Ok(Self(phc))
    }

    /// The PHC string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check an entered passcode against this hash
    ///
    /// Cost parameters are read back from the PHC string, so hashes made with
    /// any [`PasscodeHasher`] verify here.
    pub fn verify(&self, entered: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(&self.0).map_err(|e| LockError::CorruptHash(e.to_string()))?;
        let entered = Zeroizing::new(entered.as_bytes().to_vec());
        Ok(Argon2::default().verify_password(&entered, &parsed).is_ok())
    }
}

impl TryFrom<String> for PasscodeHash {
    type Error = LockError;

    fn try_from(phc: String) -> Result<Self> {
        Self::from_phc(phc)
    }
}

impl From<PasscodeHash> for String {
    fn from(hash: PasscodeHash) -> Self {
        hash.0
    }
}

impl fmt::Debug for PasscodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasscodeHash(<redacted>)")
    }
}

/// Produces [`PasscodeHash`] values with fixed Argon2id cost parameters
#[derive(Clone, Debug)]
pub struct PasscodeHasher {
    params: Params,
}

impl Default for PasscodeHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasscodeHasher {
    /// Create a hasher with custom cost parameters
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Cheapest parameters argon2 accepts. Only for tests.
    pub fn insecure_fast() -> Self {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .unwrap_or_default();
        Self { params }
    }

    /// Hash a new passcode with a fresh random salt
    pub fn hash(&self, passcode: &str) -> Result<PasscodeHash> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let passcode = Zeroizing::new(passcode.as_bytes().to_vec());

        let phc = argon2
            .hash_password(&passcode, &salt)
            .map_err(|e| LockError::Hash(e.to_string()))?
            .to_string();

        Ok(PasscodeHash(phc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_passcode() {
        assert!(!validate_new_passcode(""));
        assert!(!validate_new_passcode("abc"));
        assert!(validate_new_passcode("abcd"));
        assert!(validate_new_passcode("correct horse"));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        // Three characters, nine bytes
        assert!(!validate_new_passcode("日本語"));
        assert!(validate_new_passcode("日本語!"));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasscodeHasher::insecure_fast();
        let hash = hasher.hash("1234").unwrap();

        assert!(hash.verify("1234").unwrap());
        assert!(!hash.verify("4321").unwrap());
        assert!(!hash.verify("").unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasscodeHasher::insecure_fast();
        let a = hasher.hash("1234").unwrap();
        let b = hasher.hash("1234").unwrap();
        assert_ne!(a.as_str(), b.as_str());
        assert!(a.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_from_phc_rejects_garbage() {
        assert!(matches!(
            PasscodeHash::from_phc("1234"),
            Err(LockError::CorruptHash(_))
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let hash = PasscodeHasher::insecure_fast().hash("1234").unwrap();
        let debug = format!("{:?}", hash);
        assert!(!debug.contains("argon2"));
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let hash = PasscodeHasher::insecure_fast().hash("abcd").unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        let parsed: PasscodeHash = serde_json::from_str(&json).unwrap();
        assert!(parsed.verify("abcd").unwrap());

        assert!(serde_json::from_str::<PasscodeHash>("\"plaintext\"").is_err());
    }
}
