//! Resource identifiers in the store's native format.
//!
//! An identifier is 12 bytes rendered as 24 lowercase hex characters. Input is
//! accepted in either case; anything else is rejected before a query is built.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Number of raw bytes in an identifier.
pub const ID_BYTES: usize = 12;

/// Length of the hex rendering.
pub const ID_HEX_LEN: usize = ID_BYTES * 2;

/// Returned when a string is not a well-formed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID format is incorrect")]
pub struct InvalidId;

/// A validated resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_BYTES]);

impl ObjectId {
    /// Returns true if `s` can be parsed into an identifier.
    pub fn is_valid(s: &str) -> bool {
        s.len() == ID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parse a hex string, rejecting empty, short, long and non-hex input.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        if !Self::is_valid(s) {
            return Err(InvalidId);
        }

        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidId)?;
        Ok(Self(bytes))
    }

    /// Generate a fresh identifier.
    ///
    /// Layout: 4-byte big-endian timestamp (seconds), 5 bytes fixed per process,
    /// 3-byte counter. Identifiers generated later compare greater within the
    /// same second, so ordering by identifier approximates insertion order.
    pub fn generate() -> Self {
        static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
        static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as u32;
        let process = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen());
        let count = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..0x00ff_ffff)))
            .fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; ID_BYTES];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Raw bytes.
    pub fn bytes(&self) -> [u8; ID_BYTES] {
        self.0
    }

    /// Lowercase hex rendering, as stored in documents.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
