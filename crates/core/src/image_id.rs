//! Image identifiers.

use crate::MAX_IMAGE_ID_LEN;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an image record.
///
/// Ids are either caller-supplied (restricted to `[A-Za-z0-9_-]`) or
/// generated from 128 bits of randomness. The charset restriction doubles
/// as path safety: a valid id can never name anything outside the storage
/// directory.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageId(String);

impl ImageId {
    /// Generate a new random image id (v4 UUID, 32 lowercase hex chars).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse and validate a caller-supplied id.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.is_empty() {
            return Err(crate::Error::InvalidImageId("id is empty".to_string()));
        }
        if s.len() > MAX_IMAGE_ID_LEN {
            return Err(crate::Error::InvalidImageId(format!(
                "id exceeds {MAX_IMAGE_ID_LEN} characters"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(crate::Error::InvalidImageId(format!(
                "id may only contain letters, digits, '_' and '-': {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageId {
    type Error = crate::Error;

    fn try_from(s: String) -> crate::Result<Self> {
        Self::parse(&s)
    }
}

impl From<ImageId> for String {
    fn from(id: ImageId) -> Self {
        id.0
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid_and_unique() {
        let a = ImageId::generate();
        let b = ImageId::generate();
        assert_ne!(a, b);
        assert!(ImageId::parse(a.as_str()).is_ok());
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn parse_accepts_charset() {
        for id in ["abc-123", "A_b-C", "0", "x".repeat(64).as_str()] {
            assert!(ImageId::parse(id).is_ok(), "should accept {id:?}");
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        for id in ["", "has space", "a/b", "../etc", "dot.dot", "x".repeat(65).as_str()] {
            assert!(ImageId::parse(id).is_err(), "should reject {id:?}");
        }
    }

    #[test]
    fn serde_roundtrip_validates() {
        let id: ImageId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(id.as_str(), "abc-123");
        assert!(serde_json::from_str::<ImageId>("\"a b\"").is_err());
    }
}
