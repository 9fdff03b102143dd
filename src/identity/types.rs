use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator on a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bank,
    Customer,
}

impl Role {
    /// Map a user-supplied role string. Only a case-insensitive `"bank"`
    /// yields the bank role; everything else registers a customer.
    pub fn parse(input: &str) -> Role {
        if input.eq_ignore_ascii_case("bank") {
            Role::Bank
        } else {
            Role::Customer
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Bank => write!(f, "bank"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

/// A registered account.
///
/// The password is stored verbatim. The field names are the on-disk wire
/// contract and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: Role,
}
