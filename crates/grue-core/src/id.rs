use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocabulary::normalize_key;

/// Canonical identifier of a game object (e.g. `lamp_brass`).
///
/// IDs are normalised on construction (trimmed, lowercased, inner whitespace
/// collapsed) so lookups never depend on the caller's casing. Ordering is
/// plain string ordering, which gives the parser its deterministic
/// ID-ascending tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Create an object ID from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(normalize_key(id.as_ref()))
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The words of the ID, split on underscores, hyphens and spaces.
    ///
    /// `lamp_brass` yields `["lamp", "brass"]`.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(['_', '-', ' '])
            .filter(|w| !w.is_empty())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Canonical identifier of a verb (e.g. `take`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VerbId(String);

impl VerbId {
    /// Create a verb ID from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(normalize_key(id.as_ref()))
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VerbId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VerbId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<VerbId> for String {
    fn from(id: VerbId) -> Self {
        id.0
    }
}

impl Borrow<str> for VerbId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_normalized() {
        assert_eq!(ObjectId::new("  Lamp_Brass "), ObjectId::new("lamp_brass"));
        assert_eq!(VerbId::new("TAKE").as_str(), "take");
    }

    #[test]
    fn object_id_words() {
        let id = ObjectId::new("lamp_brass");
        assert_eq!(id.words().collect::<Vec<_>>(), vec!["lamp", "brass"]);
    }

    #[test]
    fn ids_order_alphabetically() {
        let mut ids = vec![ObjectId::new("sword_silver"), ObjectId::new("sword_rusty")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "sword_rusty");
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&VerbId::new("take")).unwrap();
        assert_eq!(json, "\"take\"");
        let id: ObjectId = serde_json::from_str("\"Lantern\"").unwrap();
        assert_eq!(id.as_str(), "lantern");
    }
}
