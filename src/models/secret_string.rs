//! SecretString - in-memory holder for the seed phrase and other secrets.
//!
//! Content lives in locked, guarded memory (`secrets::SecretVec`) and never
//! shows up in `Debug` output or serialized form. Temporary copies handed out
//! by [`SecretString::to_str`] are zeroized on drop.
use std::{fmt, sync::Mutex};

use secrets::SecretVec;
use serde::{Serialize, Serializer};
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
#[error("Secret is not valid UTF-8")]
pub struct InvalidSecretEncoding;

pub struct SecretString(Mutex<SecretVec<u8>>);

impl SecretString {
    pub fn new(s: &str) -> Self {
        Self::from_utf8_bytes(s.as_bytes())
    }

    /// Moves raw secret bytes into protected memory. The input buffer is
    /// zeroized regardless of the outcome.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, InvalidSecretEncoding> {
        let bytes = Zeroizing::new(bytes);
        std::str::from_utf8(&bytes).map_err(|_| InvalidSecretEncoding)?;
        Ok(Self::from_utf8_bytes(&bytes))
    }

    fn from_utf8_bytes(bytes: &[u8]) -> Self {
        let secret_vec = SecretVec::new(bytes.len(), |buffer| {
            buffer.copy_from_slice(bytes);
        });
        Self(Mutex::new(secret_vec))
    }

    fn with_secret_vec<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SecretVec<u8>) -> R,
    {
        let guard = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&guard)
    }

    /// Runs `f` with a borrowed view of the secret, without copying it.
    pub fn as_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        self.with_secret_vec(|secret_vec| {
            let bytes = secret_vec.borrow();
            // content is validated as UTF-8 on construction
            f(std::str::from_utf8(&bytes).unwrap_or_default())
        })
    }

    /// Returns a copy of the secret that is zeroized when dropped.
    pub fn to_str(&self) -> Zeroizing<String> {
        self.as_str(|s| Zeroizing::new(s.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.as_str(|s| s.trim().is_empty())
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        self.as_str(|s| Self::new(s))
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str(|a| {
            other.as_str(|b| {
                a.len() == b.len()
                    && subtle::ConstantTimeEq::ct_eq(a.as_bytes(), b.as_bytes()).into()
            })
        })
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SecretString(REDACTED)")
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("REDACTED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_new_exposes_content_through_closure() {
        let secret = SecretString::new("test test junk");
        secret.as_str(|s| assert_eq!(s, "test test junk"));
    }

    #[test]
    fn test_from_bytes_accepts_utf8() {
        let secret =
            SecretString::from_bytes(b"https://discord.com/api/webhooks/1".to_vec()).unwrap();
        assert_eq!(&*secret.to_str(), "https://discord.com/api/webhooks/1");
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        assert!(SecretString::from_bytes(vec![0xff, 0xfe, 0xfd]).is_err());
    }

    #[test]
    fn test_is_empty_treats_whitespace_as_empty() {
        assert!(SecretString::new("").is_empty());
        assert!(SecretString::new(" \n").is_empty());
        assert!(!SecretString::new("value").is_empty());
    }

    #[test]
    fn test_equality() {
        assert_eq!(SecretString::new("same"), SecretString::new("same"));
        assert_ne!(SecretString::new("same"), SecretString::new("other"));
        assert_ne!(SecretString::new("same"), SecretString::new("same-but-longer"));
    }

    #[test]
    fn test_debug_and_serialize_are_redacted() {
        let secret = SecretString::new("seed phrase words");

        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, "SecretString(REDACTED)");

        let serialized = serde_json::to_string(&secret).unwrap();
        assert_eq!(serialized, "\"REDACTED\"");
    }

    #[test]
    fn test_clone_is_independent_and_equal() {
        let secret = SecretString::new("cloned");
        let copy = secret.clone();
        drop(secret);
        assert_eq!(&*copy.to_str(), "cloned");
    }

    #[test]
    fn test_shared_across_threads() {
        let secret = Arc::new(SecretString::new("shared"));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let secret = secret.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    secret.as_str(|s| assert_eq!(s, "shared"));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
