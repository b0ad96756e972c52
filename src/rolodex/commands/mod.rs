//! # Command Layer
//!
//! This module contains the **core business logic** of rolodex. Each command lives
//! in its own submodule and implements pure Rust functions that operate on the
//! record cache and a backend.
//!
//! ## The Confirmation Pattern
//!
//! Every command that changes data follows the same three steps:
//!
//! 1. Send the change to the [`Backend`](crate::store::backend::Backend) through
//!    [`dispatch`](crate::lifecycle::dispatch), which walks a fresh
//!    [`RequestLifecycle`](crate::lifecycle::RequestLifecycle) to a terminal state.
//! 2. [`settle`](crate::lifecycle::RequestLifecycle::settle) it against the
//!    `CmdResult`: a rejection turns into error messages and stops there.
//! 3. Only a confirmed payload reaches the [`RecordStore`](crate::store::RecordStore).
//!
//! A rejected request is not an `Err`. It is an ordinary outcome for the user to
//! read, so the command returns `Ok` with error-level messages. `Err` is kept for
//! broken invariants and local failures.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. This struct carries:
//! - `affected_records`: records created, changed, removed or focused
//! - `listed_records`: records to display (the current view)
//! - `messages`: structured messages with levels (info, success, warning, error)
//!
//! ## Command Modules
//!
//! - [`load`]: Bulk fetch into the cache (also used to refresh)
//! - [`create`]: Save a new record
//! - [`update`]: Save changes to an existing record
//! - [`delete`]: Remove a record
//! - [`search`]: Filter the view by a name query
//! - [`focus`]: Select the record shown in a detail form

use crate::lifecycle::Notifier;
use crate::model::Record;
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod focus;
pub mod load;
pub mod search;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    /// Whether any error-level message was produced (e.g. a backend rejection).
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

impl Notifier for CmdResult {
    fn notify(&mut self, message: CmdMessage) {
        self.add_message(message);
    }
}
