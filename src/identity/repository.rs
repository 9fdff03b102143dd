//! Users-slot repository.

use std::sync::Arc;

use serde_json::Value;

use super::types::{Role, User};
use crate::error::{Error, Result};
use crate::store::{FileStore, Slot};

pub struct UserRepository {
    store: Arc<FileStore>,
}

impl UserRepository {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }

    /// Append a new user with a fresh id.
    ///
    /// Fails with [`Error::DuplicateUsername`] when an existing user has
    /// the same username (case-sensitive). Returns the stored record.
    pub fn create(&self, username: &str, password: &str, role: Role) -> Result<User> {
        for record in self.store.read(Slot::Users) {
            if self.decode(&record)?.username == username {
                return Err(Error::DuplicateUsername {
                    username: username.to_string(),
                });
            }
        }

        let user = User {
            id: self.store.allocate_id(Slot::Users),
            username: username.to_string(),
            password: password.to_string(),
            role,
        };
        let record = serde_json::to_value(&user).map_err(Error::encoding)?;
        self.store.mutate(Slot::Users, |users| {
            users.push(record);
            Ok(())
        })?;
        Ok(user)
    }

    /// Linear scan by exact, case-sensitive username.
    pub fn get_by_username(&self, username: &str) -> Result<User> {
        for record in self.store.read(Slot::Users) {
            let user = self.decode(&record)?;
            if user.username == username {
                return Ok(user);
            }
        }
        Err(Error::not_found(format!("user '{username}'")))
    }

    fn decode(&self, record: &Value) -> Result<User> {
        serde_json::from_value(record.clone()).map_err(|err| Error::CorruptStore {
            path: self.store.path().to_path_buf(),
            detail: format!("user record does not decode: {err}"),
        })
    }
}
