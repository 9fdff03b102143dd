//! Crate-wide error taxonomy.
//!
//! Repositories produce these kinds on their own operations; services pass
//! them through without translating them into different kinds; the session
//! driver is the only boundary where one becomes a printed line. Only
//! [`Error::CorruptStore`] and an I/O failure during the initial load are
//! fatal to the process - everything else returns control to the menu.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The database file exists but is neither the canonical three-slot
    /// object nor a legacy bank array, or a record inside a slot does not
    /// decode. The file is never overwritten in this state.
    #[error("unrecognised database content at {path}: {detail}")]
    CorruptStore { path: PathBuf, detail: String },

    /// Filesystem read or write failed.
    #[error("database I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A lookup by id, username or owner found nothing.
    #[error("{what} not found")]
    NotFound { what: String },

    /// User registration collided on an existing username.
    #[error("username '{username}' is already taken")]
    DuplicateUsername { username: String },

    /// Bank name collision under case-insensitive comparison.
    #[error("a bank named '{name}' already exists")]
    DuplicateName { name: String },

    /// A customer id is already present in the bank's customer sequence.
    #[error("customer {customer_id} is already attached to bank {bank_id}")]
    DuplicateCustomer { bank_id: i64, customer_id: i64 },

    /// Bank name empty, too short or too long after trimming.
    #[error("invalid bank name: {reason}")]
    InvalidName { reason: String },

    /// A non-positive id was supplied.
    #[error("invalid id: {id}")]
    InvalidId { id: i64 },

    /// Login failure. Covers both an unknown username and a wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound { what: what.into() }
    }

    /// True when the error is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Serialisation failures surface as I/O: they can only happen while
    /// encoding a record or the document for a write.
    pub(crate) fn encoding(err: serde_json::Error) -> Self {
        Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }
}
