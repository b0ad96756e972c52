//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all rolodex operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the session state: the [`RecordStore`], the backend and the
//!   credential source. There is no global store; a facade is one session.
//! - **Dispatches** to the appropriate command function
//! - **Resolves a credential** for every backend request
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or formatting
//!
//! ## Generic Over Backend and Filter
//!
//! `RolodexApi<B: Backend, F: SearchFilter>`:
//! - Production: `RolodexApi<JsonFileBackend>`
//! - Testing: `RolodexApi<MemBackend>`
//!
//! The filter defaults to [`NameFilter`].

use crate::auth::{Credential, CredentialSource, StaticCredential};
use crate::commands;
use crate::error::Result;
use crate::model::{PendingEdit, Record, RecordId};
use crate::search::{NameFilter, SearchFilter};
use crate::store::backend::Backend;
use crate::store::RecordStore;

/// The main API facade for rolodex operations.
pub struct RolodexApi<B: Backend, F: SearchFilter = NameFilter> {
    store: RecordStore<F>,
    backend: B,
    credentials: Box<dyn CredentialSource>,
}

impl<B: Backend> RolodexApi<B, NameFilter> {
    /// A session with the default name filter and no credential.
    pub fn new(backend: B) -> Self {
        Self::with_parts(
            backend,
            RecordStore::new(),
            Box::new(StaticCredential::new(Credential::anonymous())),
        )
    }
}

impl<B: Backend, F: SearchFilter> RolodexApi<B, F> {
    pub fn with_parts(
        backend: B,
        store: RecordStore<F>,
        credentials: Box<dyn CredentialSource>,
    ) -> Self {
        Self {
            store,
            backend,
            credentials,
        }
    }

    pub fn with_credentials(mut self, credentials: Box<dyn CredentialSource>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Initial bulk fetch of the session.
    pub fn load_records(&mut self) -> Result<commands::CmdResult> {
        let credential = self.credentials.credential()?;
        commands::load::run(&mut self.store, &self.backend, &credential)
    }

    /// Explicit refresh; same request as the initial load.
    pub fn refresh(&mut self) -> Result<commands::CmdResult> {
        self.load_records()
    }

    pub fn create_record(&mut self, draft: &PendingEdit) -> Result<commands::CmdResult> {
        let credential = self.credentials.credential()?;
        commands::create::run(&mut self.store, &mut self.backend, &credential, draft)
    }

    pub fn update_record(&mut self, record: &Record) -> Result<commands::CmdResult> {
        let credential = self.credentials.credential()?;
        commands::update::run(&mut self.store, &mut self.backend, &credential, record)
    }

    pub fn delete_record(&mut self, id: &RecordId) -> Result<commands::CmdResult> {
        let credential = self.credentials.credential()?;
        commands::delete::run(&mut self.store, &mut self.backend, &credential, id)
    }

    pub fn search(&mut self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&mut self.store, query)
    }

    pub fn focus(&mut self, id: &RecordId) -> Result<commands::CmdResult> {
        commands::focus::run(&mut self.store, id)
    }

    /// Opens an edit form: focuses the record and stages a draft seeded from it.
    pub fn edit_draft(&mut self, id: &RecordId) -> Result<PendingEdit> {
        let record = self.store.focus(id)?;
        Ok(PendingEdit::from_record(record))
    }

    pub fn store(&self) -> &RecordStore<F> {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
