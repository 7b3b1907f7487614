//! Cosmos DB account key handling
//!
//! The account key is held as an [`AccountKey`]: a `secrecy` wrapper around
//! [`KeyMaterial`]. The bytes are zeroed on drop, `Debug` prints a redacted
//! marker, and the raw key is only reachable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use cosmos_gateway::config::account_key;
//! use secrecy::ExposeSecret;
//!
//! let key = account_key("C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==");
//! assert!(!key.expose_secret().is_blank());
//! assert!(!format!("{key:?}").contains("C2y6"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Raw account key text
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial(String);

impl CloneableSecret for KeyMaterial {}
impl DebugSecret for KeyMaterial {}
impl SerializableSecret for KeyMaterial {}

impl KeyMaterial {
    /// True if the key is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Copies the key out for handing to the SDK credential
    pub(crate) fn reveal(&self) -> String {
        self.0.clone()
    }
}

impl From<String> for KeyMaterial {
    fn from(s: String) -> Self {
        KeyMaterial(s)
    }
}

impl PartialEq<str> for KeyMaterial {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for KeyMaterial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(KeyMaterial)
    }
}

/// Account key as carried in configuration
pub type AccountKey = Secret<KeyMaterial>;

/// Wraps key text into an [`AccountKey`]
pub fn account_key(value: impl Into<String>) -> AccountKey {
    Secret::new(KeyMaterial(value.into()))
}
