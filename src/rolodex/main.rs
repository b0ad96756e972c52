//! # Rolodex CLI
//!
//! The binary is thin: argument definitions live in `args.rs`, the handlers and
//! terminal rendering in `cli/`. Everything they call is the UI-agnostic
//! `rolodex` library.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  CLI (args.rs, cli/)                          │
//! │  - clap parsing, logging setup, printing      │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │  API facade (api.rs)                          │
//! │  - owns the RecordStore, backend, credentials │
//! └───────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌───────────────────────────────────────────────┐
//! │  Commands (commands/*)                        │
//! │  - request lifecycle, cache updates           │
//! └───────────────────────────────────────────────┘
//! ```

mod args;
mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
