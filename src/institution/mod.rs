//! Institution domain - banks and who owns them
//!
//! Banks live in the `banks` slot of the shared store, one per operator,
//! referencing the owning user by id. The repository is a thin layer of
//! scans and slot mutations; the service adds the naming rules (trimmed,
//! 2-20 characters, case-insensitively unique) and positive-id checks.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::BankRepository;
pub use service::BankService;
pub use types::Bank;
