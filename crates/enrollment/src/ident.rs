use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use serde::{Deserialize, Serialize};

const ID_LEN: usize = 24;
const COUNTER_MASK: u32 = 0x00ff_ffff;

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn process_nonce() -> &'static [u8; 5] {
    static NONCE: OnceLock<[u8; 5]> = OnceLock::new();
    NONCE.get_or_init(rand::random)
}

/// Opaque document identifier assigned by the stores.
///
/// Encoded as 24 lowercase hex characters: a 4-byte creation timestamp (seconds), a 5-byte
/// per-process nonce and a 3-byte counter, all big-endian.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process_nonce());
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        Self(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Parse a client supplied identifier, rejecting anything that is not 24 hex characters.
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        if raw.len() != ID_LEN || !raw.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(InvalidIdentifier {
                raw: raw.to_string(),
            });
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Identifier rejected before reaching a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier '{raw}'")]
pub struct InvalidIdentifier {
    pub raw: String,
}
