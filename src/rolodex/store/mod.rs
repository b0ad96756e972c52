//! # Storage Layer
//!
//! Two very different things live here, kept apart on purpose:
//!
//! 1. **The cache**: [`RecordStore`], an in-memory mirror of the records the
//!    backend holds. It is what the UI reads.
//! 2. **The backend seam**: the [`Backend`](backend::Backend) trait, standing for
//!    the remote service that owns the records.
//!
//! ## Confirmed Mutations Only
//!
//! The cache is never updated speculatively. A command sends the change to the
//! backend, waits for the answer (see [`crate::lifecycle`]) and only a confirmed
//! answer is applied to the cache:
//!
//! | backend call | on confirmation                    |
//! |--------------|------------------------------------|
//! | `fetch_all`  | [`RecordStore::load`]              |
//! | `create`     | [`RecordStore::apply_create`]      |
//! | `update`     | [`RecordStore::apply_update`]      |
//! | `delete`     | [`RecordStore::apply_delete`]      |
//!
//! ## Cache Slots
//!
//! - `all`: every record, in backend order, new records appended.
//! - `view`: `all` filtered by the current query. Updates and deletes edit it in
//!   place; only `load` and `set_query` recompute it.
//! - `focused`: the record open in a detail or edit form.
//!
//! There is no locking. All mutation goes through `&mut self`, which is the
//! single-writer rule the cache relies on.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-process backend for tests and embedding.
//! - [`fs_backend::JsonFileBackend`]: JSON file on disk, used by the CLI.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
mod record_store;

pub use record_store::RecordStore;

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Record;

    /// Builds a loaded [`RecordStore`] from short name pairs.
    pub struct StoreFixture {
        pub store: RecordStore,
        next_id: u64,
        records: Vec<Record>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(),
                next_id: 1,
                records: Vec::new(),
            }
        }

        pub fn with_person(mut self, first: &str, last: &str) -> Self {
            let record = Record::with_id(self.next_id)
                .with_field("first_name", first)
                .with_field("last_name", last);
            self.next_id += 1;
            self.records.push(record);
            self
        }

        pub fn with_people(mut self, count: usize) -> Self {
            for i in 0..count {
                let first = format!("Person{}", i + 1);
                self = self.with_person(&first, "Test");
            }
            self
        }

        /// Loads the accumulated records into the store.
        pub fn loaded(mut self) -> Self {
            self.store.load(self.records.clone());
            self
        }

        pub fn records(&self) -> &[Record] {
            &self.records
        }
    }
}
