//! Newtype IDs for type-safe identifiers.
//!
//! Product ids come from the catalog document; card and quiz ids are minted
//! locally when a discovery view is built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CardId);
define_id!(QuizId);

impl ProductId {
    /// Build an id from a raw JSON value.
    ///
    /// Strings are trimmed, integers are rendered in decimal. Anything else,
    /// or an empty string, yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| Self(s.to_string()))
            }
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Generate a unique ID from the clock, a process counter and random bits.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    let noise: u32 = rand::random();

    format!("{:x}-{:x}-{:08x}", timestamp, counter, noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_generation() {
        let id1 = QuizId::generate();
        let id2 = QuizId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_from_json() {
        assert_eq!(ProductId::from_json(&json!("A1")), Some(ProductId::new("A1")));
        assert_eq!(ProductId::from_json(&json!(42)), Some(ProductId::new("42")));
        assert_eq!(ProductId::from_json(&json!("  ")), None);
        assert_eq!(ProductId::from_json(&json!(null)), None);
        assert_eq!(ProductId::from_json(&json!({"id": 1})), None);
    }

    #[test]
    fn test_id_ordering_is_lexicographic() {
        assert!(ProductId::new("9") > ProductId::new("10"));
        assert!(ProductId::new("B1") > ProductId::new("A1"));
    }
}
