use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Content-addressed 32-byte BLAKE3 digest used for excerpt hashes and any
/// other place the engine needs to detect that an upstream document changed
/// since it was last read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 32]);

#[derive(Debug, thiserror::Error)]
pub enum ContentHashError {
    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),
}

impl ContentHash {
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, ContentHashError> {
        let bytes = hex_decode(s).map_err(ContentHashError::InvalidHex)?;
        if bytes.len() != 32 {
            return Err(ContentHashError::InvalidLength(bytes.len()));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Hash the JSON encoding of any sequence of serializable parts, in
    /// order. Used whenever an entity's identity or an excerpt digest is
    /// derived from several logical fields at once.
    pub fn hash_parts<T: Serialize>(parts: &[&T]) -> Result<Self, serde_json::Error> {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(&serde_json::to_vec(part)?);
        }
        Ok(Self(*hasher.finalize().as_bytes()))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({}…)", &self.to_hex()[..12])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…", &self.to_hex()[..12])
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContentHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(s: &str) -> Result<Vec<u8>, String> {
    if s.len() % 2 != 0 {
        return Err("odd-length hex string".into());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}
