use super::backend::{authorize, Backend, BackendResult, Rejection, Validator};
use crate::auth::Credential;
use crate::model::{PendingEdit, Record, RecordId};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Backend persisting records as a JSON array in a single file.
///
/// This is the CLI's local stand-in for a remote service: each request reads
/// the file, applies the change and writes it back atomically (temp file then
/// rename). Failures, including I/O, come back as a [`Rejection`] exactly like a
/// remote error would. New records get UUID v4 ids.
pub struct JsonFileBackend {
    path: PathBuf,
    token: Option<String>,
    validator: Validator,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            token: None,
            validator: Validator::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BackendResult<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(io_rejection)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| Rejection::single(format!("Corrupt data file: {}", e)))
    }

    fn write(&self, records: &[Record]) -> BackendResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(io_rejection)?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| Rejection::single(format!("Could not encode records: {}", e)))?;

        // Atomic write
        let tmp_file = dir.join(format!(".records-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(io_rejection)?;
        fs::rename(&tmp_file, &self.path).map_err(io_rejection)?;
        Ok(())
    }

    fn position(records: &[Record], id: &RecordId) -> BackendResult<usize> {
        records
            .iter()
            .position(|r| r.has_id(id))
            .ok_or_else(|| Rejection::single(format!("Record {} not found", id)))
    }
}

fn io_rejection(err: std::io::Error) -> Rejection {
    Rejection::single(format!("Storage error: {}", err))
}

impl Backend for JsonFileBackend {
    fn fetch_all(&self, credential: &Credential) -> BackendResult<Vec<Record>> {
        authorize(self.token.as_deref(), credential)?;
        self.read()
    }

    fn create(&mut self, credential: &Credential, draft: &PendingEdit) -> BackendResult<Record> {
        authorize(self.token.as_deref(), credential)?;
        let mut record = draft.clone().into_record();
        self.validator.validate(&record)?;

        let mut records = self.read()?;
        record.id = Some(RecordId::new(Uuid::new_v4().to_string()));
        records.push(record.clone());
        self.write(&records)?;
        Ok(record)
    }

    fn update(&mut self, credential: &Credential, record: &Record) -> BackendResult<Record> {
        authorize(self.token.as_deref(), credential)?;
        let id = record
            .id
            .as_ref()
            .ok_or_else(|| Rejection::single("Record id is required"))?;

        let mut records = self.read()?;
        let pos = Self::position(&records, id)?;
        self.validator.validate(record)?;

        records[pos] = record.clone();
        self.write(&records)?;
        Ok(record.clone())
    }

    fn delete(&mut self, credential: &Credential, id: &RecordId) -> BackendResult<()> {
        authorize(self.token.as_deref(), credential)?;
        let mut records = self.read()?;
        let pos = Self::position(&records, id)?;
        records.remove(pos);
        self.write(&records)
    }
}
