use thiserror::Error;

use super::form::{FormErrors, InvestorForm, field_number, validate_form};
use super::record::{Investor, InvestorPatch};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("investor {0} not found")]
    NotFound(u64),
    #[error("invalid investor form")]
    Invalid(FormErrors),
}

/// Table of investor records. `list` is always ordered by `code`.
pub trait RecordStore {
    fn list(&self) -> Vec<Investor>;
    fn insert(&mut self, form: InvestorForm) -> Result<Investor, StoreError>;
    fn update(&mut self, id: u64, patch: InvestorPatch) -> Result<Investor, StoreError>;
    fn delete(&mut self, id: u64) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Investor>,
    next_id: u64,
    next_code: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Investor, StoreError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Vec<Investor> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.code);
        records
    }

    fn insert(&mut self, form: InvestorForm) -> Result<Investor, StoreError> {
        let errors = validate_form(&form);
        if !errors.is_empty() {
            return Err(StoreError::Invalid(errors));
        }

        self.next_id += 1;
        self.next_code += 1;
        let record = Investor {
            id: self.next_id,
            code: self.next_code,
            name: form.name.trim().to_string(),
            capital: field_number(&form.capital).unwrap_or(0.0),
            maintenance: field_number(&form.maintenance).unwrap_or(0.0),
            active: true,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: u64, patch: InvestorPatch) -> Result<Investor, StoreError> {
        let record = self.find_mut(id)?;
        patch.apply(record);
        Ok(record.clone())
    }

    fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
