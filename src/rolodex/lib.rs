//! # Rolodex
//!
//! A client-side cache of contact records kept in step with a remote backend.
//!
//! ## Architecture
//!
//! - [`store::RecordStore`] holds every record fetched this session (`all`), the
//!   subset the user is looking at (`view`), and the record open in a detail form
//!   (`focused`).
//! - [`search::NameFilter`] decides which records belong in the view. It is a
//!   fuzzy, word-order independent match over the name fields.
//! - [`lifecycle::RequestLifecycle`] tracks one backend request from `Idle` to
//!   `Fulfilled` or `Rejected`. The cache changes only on `Fulfilled`, so it never
//!   shows data the backend did not confirm.
//! - [`store::backend::Backend`] is the seam to the remote service. Two are
//!   bundled: [`store::mem_backend::MemBackend`] for tests and
//!   [`store::fs_backend::JsonFileBackend`] for the CLI.
//! - [`api::RolodexApi`] ties one session together and is what a UI talks to.
//!
//! ## Example
//!
//! ```
//! use rolodex::api::RolodexApi;
//! use rolodex::model::{PendingEdit, Record};
//! use rolodex::store::mem_backend::MemBackend;
//!
//! let backend = MemBackend::new().with_records(vec![
//!     Record::new().with_field("first_name", "John").with_field("last_name", "Smith"),
//! ]);
//! let mut api = RolodexApi::new(backend);
//! api.load_records().unwrap();
//!
//! let mut draft = PendingEdit::new();
//! draft.set("first_name", "Ann").set("last_name", "Lee");
//! api.create_record(&draft).unwrap();
//!
//! let found = api.search("smiht john").unwrap();
//! assert_eq!(found.listed_records.len(), 1);
//! ```

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod search;
pub mod store;
