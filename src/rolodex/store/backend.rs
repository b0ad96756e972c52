use crate::auth::Credential;
use crate::model::{PendingEdit, Record, RecordId};
use std::fmt;

/// A backend refusal: one human-readable message per problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub errors: Vec<String>,
}

impl Rejection {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn single(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

pub type BackendResult<T> = std::result::Result<T, Rejection>;

/// The remote collaborator that owns the records.
///
/// The record store never talks to a backend directly: commands call the
/// backend, wait for the answer, and only then mutate the store. Every call
/// carries the caller's bearer credential untouched.
pub trait Backend {
    /// Bulk fetch, in the backend's order.
    fn fetch_all(&self, credential: &Credential) -> BackendResult<Vec<Record>>;

    /// Persists a new record and returns it with its assigned id.
    fn create(&mut self, credential: &Credential, draft: &PendingEdit) -> BackendResult<Record>;

    /// Replaces a saved record and returns the server-side version.
    fn update(&mut self, credential: &Credential, record: &Record) -> BackendResult<Record>;

    /// Removes a saved record.
    fn delete(&mut self, credential: &Credential, id: &RecordId) -> BackendResult<()>;
}

/// Field validation shared by the bundled backends.
///
/// Mirrors what a typical REST backend answers with: one message per required
/// field that is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    required_fields: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            required_fields: vec!["first_name".to_string()],
        }
    }
}

impl Validator {
    pub fn new(required_fields: Vec<String>) -> Self {
        Self { required_fields }
    }

    pub fn validate(&self, record: &Record) -> BackendResult<()> {
        let errors: Vec<String> = self
            .required_fields
            .iter()
            .filter(|field| record.get(field).is_none_or(|v| v.trim().is_empty()))
            .map(|field| format!("{} can't be blank", field))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Rejection::new(errors))
        }
    }
}

/// Checks a presented credential against an expected token, if one is set.
pub(crate) fn authorize(expected: Option<&str>, credential: &Credential) -> BackendResult<()> {
    match expected {
        Some(token) if credential.token() != token => Err(Rejection::single("Unauthorized")),
        _ => Ok(()),
    }
}
