//! Identity domain - account records and authentication
//!
//! Users live in the `users` slot of the shared store. The repository
//! enforces username uniqueness and id assignment; the service maps role
//! strings and collapses every login failure into one credential error.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::UserRepository;
pub use service::UserService;
pub use types::{Role, User};
