//! Validation rules layered over the banks repository.

use super::repository::BankRepository;
use super::types::Bank;
use crate::error::{Error, Result};

/// Bounds on a bank name, counted in characters after trimming.
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 20;

pub struct BankService {
    repo: BankRepository,
}

impl BankService {
    pub fn new(repo: BankRepository) -> Self {
        Self { repo }
    }

    /// Create an institution for `user_id`.
    ///
    /// The name is trimmed before the length check; uniqueness is
    /// case-insensitive even though the stored name keeps its case.
    /// Whether `user_id` names a bank-role user is the caller's contract -
    /// the driver only reaches this after authenticating one.
    pub fn create_bank(&self, user_id: i64, name: &str) -> Result<Bank> {
        let name = validate_name(name)?;
        match self.repo.get_by_name(&name) {
            Ok(_) => return Err(Error::DuplicateName { name }),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
        self.repo.create(user_id, &name)
    }

    pub fn get_bank(&self, id: i64) -> Result<Bank> {
        check_id(id)?;
        self.repo.get_by_id(id)
    }

    /// The bank owned by a user, if any.
    pub fn get_by_owner(&self, user_id: i64) -> Result<Bank> {
        check_id(user_id)?;
        self.repo.get_by_owner(user_id)
    }

    pub fn get_all_banks(&self) -> Result<Vec<Bank>> {
        self.repo.get_all()
    }

    pub fn update_bank(&self, id: i64, name: &str) -> Result<Bank> {
        check_id(id)?;
        let name = validate_name(name)?;
        self.repo.update(id, &name)
    }

    pub fn delete_bank(&self, id: i64) -> Result<()> {
        check_id(id)?;
        self.repo.delete(id)
    }

    pub fn add_customer(&self, bank_id: i64, customer_id: i64) -> Result<()> {
        check_id(bank_id)?;
        check_id(customer_id)?;
        self.repo.add_customer(bank_id, customer_id)
    }

    pub fn remove_customer(&self, bank_id: i64, customer_id: i64) -> Result<()> {
        check_id(bank_id)?;
        check_id(customer_id)?;
        self.repo.remove_customer(bank_id, customer_id)
    }

    pub fn get_customers(&self, bank_id: i64) -> Result<Vec<i64>> {
        check_id(bank_id)?;
        self.repo.get_customers(bank_id)
    }

    pub fn count_customers(&self, bank_id: i64) -> Result<usize> {
        check_id(bank_id)?;
        self.repo.count_customers(bank_id)
    }
}

fn check_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(Error::InvalidId { id });
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if length < NAME_MIN {
        return Err(Error::InvalidName {
            reason: format!("'{trimmed}' is shorter than {NAME_MIN} characters after trimming"),
        });
    }
    if length > NAME_MAX {
        return Err(Error::InvalidName {
            reason: format!("'{trimmed}' is longer than {NAME_MAX} characters"),
        });
    }
    Ok(trimmed.to_string())
}
