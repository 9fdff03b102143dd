//! Registration and login rules over the users repository.

use super::repository::UserRepository;
use super::types::{Role, User};
use crate::error::{Error, Result};

pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Register a new account.
    ///
    /// The role string maps case-insensitively: `"bank"` becomes a bank
    /// operator, anything else a customer. No other validation happens
    /// here.
    pub fn register(&self, username: &str, password: &str, role: &str) -> Result<User> {
        self.repo.create(username, password, Role::parse(role))
    }

    /// Authenticate by exact password comparison.
    ///
    /// An unknown username and a wrong password both surface as
    /// [`Error::InvalidCredentials`].
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = match self.repo.get_by_username(username) {
            Ok(user) => user,
            Err(err) if err.is_not_found() => return Err(Error::InvalidCredentials),
            Err(err) => return Err(err),
        };

        if user.password != password {
            return Err(Error::InvalidCredentials);
        }
        Ok(user)
    }
}
