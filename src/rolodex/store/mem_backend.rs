use super::backend::{authorize, Backend, BackendResult, Rejection, Validator};
use crate::auth::Credential;
use crate::model::{PendingEdit, Record, RecordId};
use std::cell::RefCell;

/// In-process backend for tests and embedding.
///
/// Ids are sequential integers starting at 1. Uses `RefCell` for the failure
/// switch so that `fetch_all` can consume it through `&self`.
pub struct MemBackend {
    records: Vec<Record>,
    next_id: u64,
    token: Option<String>,
    validator: Validator,
    fail_next: RefCell<Option<Vec<String>>>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            token: None,
            validator: Validator::default(),
            fail_next: RefCell::new(None),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend. Records without an id get the next sequential one.
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        for mut record in records {
            if record.id.is_none() {
                record.id = Some(self.assign_id());
            }
            self.records.push(record);
        }
        self
    }

    /// Require this bearer token on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Makes the next request of any kind fail with these errors.
    pub fn fail_next(&self, errors: Vec<String>) {
        *self.fail_next.borrow_mut() = Some(errors);
    }

    /// What the backend currently holds, bypassing any cache.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn assign_id(&mut self) -> RecordId {
        let id = RecordId::from(self.next_id);
        self.next_id += 1;
        id
    }

    fn precheck(&self, credential: &Credential) -> BackendResult<()> {
        if let Some(errors) = self.fail_next.borrow_mut().take() {
            return Err(Rejection::new(errors));
        }
        authorize(self.token.as_deref(), credential)
    }

    fn position(&self, id: &RecordId) -> BackendResult<usize> {
        self.records
            .iter()
            .position(|r| r.has_id(id))
            .ok_or_else(|| Rejection::single(format!("Record {} not found", id)))
    }
}

impl Backend for MemBackend {
    fn fetch_all(&self, credential: &Credential) -> BackendResult<Vec<Record>> {
        self.precheck(credential)?;
        Ok(self.records.clone())
    }

    fn create(&mut self, credential: &Credential, draft: &PendingEdit) -> BackendResult<Record> {
        self.precheck(credential)?;
        let mut record = draft.clone().into_record();
        self.validator.validate(&record)?;

        record.id = Some(self.assign_id());
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, credential: &Credential, record: &Record) -> BackendResult<Record> {
        self.precheck(credential)?;
        let id = record
            .id
            .as_ref()
            .ok_or_else(|| Rejection::single("Record id is required"))?;
        let pos = self.position(id)?;
        self.validator.validate(record)?;

        self.records[pos] = record.clone();
        Ok(record.clone())
    }

    fn delete(&mut self, credential: &Credential, id: &RecordId) -> BackendResult<()> {
        self.precheck(credential)?;
        let pos = self.position(id)?;
        self.records.remove(pos);
        Ok(())
    }
}
