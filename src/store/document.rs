//! The persisted document shape.
//!
//! Exactly three named collections, each an ordered sequence. The store
//! knows this shape and nothing about the records inside; slot contents
//! stay as raw `serde_json::Value`s and every domain repository decodes
//! its own slot. The `customers` slot in particular is never constructed
//! here - whatever the file holds is carried through each save untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selects one of the three top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Banks,
    Customers,
    Users,
}

/// The canonical three-slot document.
///
/// Field order is the key order written to disk: `banks`, `customers`,
/// `users`. A missing slot reads as an empty sequence; an unknown key or a
/// non-array slot fails the parse, so unrecognised files are never adopted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default)]
    pub banks: Vec<Value>,
    #[serde(default)]
    pub customers: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
}

impl Document {
    pub fn slot(&self, slot: Slot) -> &Vec<Value> {
        match slot {
            Slot::Banks => &self.banks,
            Slot::Customers => &self.customers,
            Slot::Users => &self.users,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Vec<Value> {
        match slot {
            Slot::Banks => &mut self.banks,
            Slot::Customers => &mut self.customers,
            Slot::Users => &mut self.users,
        }
    }
}

/// Classify raw file contents.
///
/// Accepts the canonical three-slot object, or - once, at load - the
/// legacy shape: a bare array of bank records, adopted as the `banks`
/// slot. Anything else comes back as a description of what was wrong,
/// which the store turns into a `CorruptStore` error.
pub(crate) fn parse(text: &str) -> std::result::Result<Document, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| format!("not valid JSON: {err}"))?;

    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|err| format!("object root is not the three-slot document: {err}")),
        Value::Array(records) => {
            if records.iter().all(looks_like_bank) {
                Ok(Document {
                    banks: records,
                    ..Document::default()
                })
            } else {
                Err("array root is not a sequence of bank records".to_string())
            }
        }
        _ => Err("root is neither an object nor an array".to_string()),
    }
}

fn looks_like_bank(value: &Value) -> bool {
    value.get("id").is_some_and(Value::is_number)
        && value.get("name").is_some_and(Value::is_string)
}
