//! Identifier Resolution - Store Keys and Legacy Ids
//!
//! Records created before the store issued its own keys carry a
//! self-assigned string id. Both schemes stay addressable.

use serde::{Deserialize, Serialize};

use crate::model::{IngredientPreset, Label};

/// Length of a store-generated key in hex characters.
pub const STORE_KEY_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum LookupKey {
    /// Match against the store's primary key (lowercase hex).
    PrimaryKey(String),
    /// Match against the record's legacy `id` attribute.
    Legacy(String),
}

impl LookupKey {
    /// Classify a caller-supplied id. Never fails: anything that is not a
    /// store key is treated as a legacy id.
    pub fn resolve(id: &str) -> Self {
        if is_store_key(id) {
            LookupKey::PrimaryKey(id.to_ascii_lowercase())
        } else {
            LookupKey::Legacy(id.to_string())
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, LookupKey::PrimaryKey(_))
    }

    pub fn matches<R: Addressable + ?Sized>(&self, record: &R) -> bool {
        match self {
            LookupKey::PrimaryKey(key) => record.store_id().eq_ignore_ascii_case(key),
            LookupKey::Legacy(id) => record.legacy_id() == Some(id.as_str()),
        }
    }
}

pub fn resolve_lookup(id: &str) -> LookupKey {
    LookupKey::resolve(id)
}

fn is_store_key(id: &str) -> bool {
    id.len() == STORE_KEY_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Records reachable under either id scheme.
pub trait Addressable {
    fn store_id(&self) -> &str;
    fn legacy_id(&self) -> Option<&str>;
}

impl Addressable for IngredientPreset {
    fn store_id(&self) -> &str {
        &self.id
    }

    fn legacy_id(&self) -> Option<&str> {
        // Records from the earlier scheme kept their string id in `id`.
        legacy_or_id(self.legacy_id.as_deref(), &self.id)
    }
}

impl Addressable for Label {
    fn store_id(&self) -> &str {
        &self.id
    }

    fn legacy_id(&self) -> Option<&str> {
        legacy_or_id(self.legacy_id.as_deref(), &self.id)
    }
}

fn legacy_or_id<'a>(legacy_id: Option<&'a str>, id: &'a str) -> Option<&'a str> {
    legacy_id
        .filter(|l| !l.is_empty())
        .or(Some(id))
        .filter(|l| !l.is_empty())
}

/// Find the record a caller-supplied id refers to. A blank id addresses nothing.
pub fn find_by_id<'a, R: Addressable>(records: &'a [R], id: &str) -> Option<&'a R> {
    if id.trim().is_empty() {
        return None;
    }
    let key = LookupKey::resolve(id);
    records.iter().find(|r| key.matches(*r))
}
