use serde::{Deserialize, Serialize};

/// A registered banking institution.
///
/// Owned by exactly one bank-role user through `userid` - a foreign key,
/// never a nested object. The customer-id list is insertion-ordered,
/// duplicate-free, and omitted from the file when empty. Field names are
/// the on-disk wire contract and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: i64,
    #[serde(rename = "userid")]
    pub user_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customers: Vec<i64>,
}
