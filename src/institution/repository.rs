//! Banks-slot repository.
//!
//! Pure functions over the `banks` slot plus an allocated id. Lookups scan
//! a defensive copy; mutations run inside [`FileStore::mutate`] so the
//! document is rewritten exactly once per successful operation.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::types::Bank;
use crate::error::{Error, Result};
use crate::store::{FileStore, Slot};

pub struct BankRepository {
    store: Arc<FileStore>,
}

impl BankRepository {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }

    /// Append a new bank with a fresh id. The caller has validated the
    /// name and the owner.
    pub fn create(&self, user_id: i64, name: &str) -> Result<Bank> {
        let bank = Bank {
            id: self.store.allocate_id(Slot::Banks),
            user_id,
            name: name.to_string(),
            customers: Vec::new(),
        };
        let record = serde_json::to_value(&bank).map_err(Error::encoding)?;
        self.store.mutate(Slot::Banks, |banks| {
            banks.push(record);
            Ok(())
        })?;
        Ok(bank)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Bank> {
        self.find(|bank| bank.id == id)?
            .ok_or_else(|| Error::not_found(format!("bank {id}")))
    }

    /// At most one bank exists per owner; the first match wins.
    pub fn get_by_owner(&self, user_id: i64) -> Result<Bank> {
        self.find(|bank| bank.user_id == user_id)?
            .ok_or_else(|| Error::not_found(format!("bank owned by user {user_id}")))
    }

    /// Name comparison folds to lowercase; the stored name keeps its case.
    pub fn get_by_name(&self, name: &str) -> Result<Bank> {
        let wanted = name.to_lowercase();
        self.find(|bank| bank.name.to_lowercase() == wanted)?
            .ok_or_else(|| Error::not_found(format!("bank named '{name}'")))
    }

    /// Defensive copy of every bank, in insertion order.
    pub fn get_all(&self) -> Result<Vec<Bank>> {
        let path = self.store.path();
        self.store
            .read(Slot::Banks)
            .iter()
            .map(|record| decode(path, record))
            .collect()
    }

    /// Replace a bank's name. An empty `new_name` leaves the stored name
    /// as it is; no other field is ever touched here.
    pub fn update(&self, id: i64, new_name: &str) -> Result<Bank> {
        let path = self.store.path();
        self.store.mutate(Slot::Banks, |banks| {
            for record in banks.iter_mut() {
                let mut bank = decode(path, record)?;
                if bank.id == id {
                    if !new_name.is_empty() {
                        bank.name = new_name.to_string();
                    }
                    *record = serde_json::to_value(&bank).map_err(Error::encoding)?;
                    return Ok(bank);
                }
            }
            Err(Error::not_found(format!("bank {id}")))
        })
    }

    /// Remove a bank by id, preserving the relative order of the rest.
    pub fn delete(&self, id: i64) -> Result<()> {
        let path = self.store.path();
        self.store.mutate(Slot::Banks, |banks| {
            let mut index = None;
            for (i, record) in banks.iter().enumerate() {
                if decode(path, record)?.id == id {
                    index = Some(i);
                    break;
                }
            }
            match index {
                Some(i) => {
                    banks.remove(i);
                    Ok(())
                }
                None => Err(Error::not_found(format!("bank {id}"))),
            }
        })
    }

    /// Attach a customer id to a bank. The sequence stays duplicate-free
    /// and insertion-ordered.
    pub fn add_customer(&self, bank_id: i64, customer_id: i64) -> Result<()> {
        self.modify_customers(bank_id, |customers| {
            if customers.contains(&customer_id) {
                return Err(Error::DuplicateCustomer {
                    bank_id,
                    customer_id,
                });
            }
            customers.push(customer_id);
            Ok(())
        })
    }

    pub fn remove_customer(&self, bank_id: i64, customer_id: i64) -> Result<()> {
        self.modify_customers(bank_id, |customers| {
            let before = customers.len();
            customers.retain(|&existing| existing != customer_id);
            if customers.len() == before {
                return Err(Error::not_found(format!(
                    "customer {customer_id} in bank {bank_id}"
                )));
            }
            Ok(())
        })
    }

    pub fn get_customers(&self, bank_id: i64) -> Result<Vec<i64>> {
        Ok(self.get_by_id(bank_id)?.customers)
    }

    pub fn count_customers(&self, bank_id: i64) -> Result<usize> {
        Ok(self.get_by_id(bank_id)?.customers.len())
    }

    fn find(&self, matches: impl Fn(&Bank) -> bool) -> Result<Option<Bank>> {
        let path = self.store.path();
        for record in self.store.read(Slot::Banks) {
            let bank = decode(path, &record)?;
            if matches(&bank) {
                return Ok(Some(bank));
            }
        }
        Ok(None)
    }

    fn modify_customers(
        &self,
        bank_id: i64,
        edit: impl FnOnce(&mut Vec<i64>) -> Result<()>,
    ) -> Result<()> {
        let path = self.store.path();
        self.store.mutate(Slot::Banks, |banks| {
            let mut index = None;
            for (i, record) in banks.iter().enumerate() {
                if decode(path, record)?.id == bank_id {
                    index = Some(i);
                    break;
                }
            }
            let Some(i) = index else {
                return Err(Error::not_found(format!("bank {bank_id}")));
            };

            let mut bank = decode(path, &banks[i])?;
            edit(&mut bank.customers)?;
            banks[i] = serde_json::to_value(&bank).map_err(Error::encoding)?;
            Ok(())
        })
    }
}

fn decode(path: &Path, record: &Value) -> Result<Bank> {
    serde_json::from_value(record.clone()).map_err(|err| Error::CorruptStore {
        path: path.to_path_buf(),
        detail: format!("bank record does not decode: {err}"),
    })
}
