//! # CLI Layer
//!
//! This module is **one possible UI client** for rolodex; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides the process exit code
//! - Handles argument parsing
//! - Installs the tracing subscriber
//!
//! Every invocation is one short session: build a [`RolodexApi`] over the JSON
//! data file, run the initial load, then run the requested command against the
//! cache. A rejected request prints its error messages and exits with status 1.

mod print;

use crate::args::{Cli, Commands};
use clap::Parser;
use print::{print_full_record, print_messages, print_records};
use rolodex::api::{CmdResult, RolodexApi};
use rolodex::auth::EnvCredential;
use rolodex::config::RolodexConfig;
use rolodex::error::{Result, RolodexError};
use rolodex::model::{PendingEdit, RecordId};
use rolodex::search::NameFilter;
use rolodex::store::backend::Validator;
use rolodex::store::fs_backend::JsonFileBackend;
use rolodex::store::RecordStore;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: RolodexApi<JsonFileBackend>,
    config: RolodexConfig,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = RolodexConfig::load(&data_dir)?;
    init_logging(cli.verbose, &config.log_level);
    debug!(data_dir = %data_dir.display(), "Starting rolodex");

    let mut ctx = init_context(&data_dir, config);

    let command = cli.command.unwrap_or(Commands::List { search: None });
    if let Commands::Config = command {
        return handle_config(&ctx.config);
    }

    let loaded = ctx.api.load_records()?;
    if loaded.has_errors() {
        print_messages(&loaded.messages);
        return Ok(ExitCode::FAILURE);
    }

    let result = match command {
        Commands::List { search } => handle_list(&mut ctx, loaded, search.as_deref())?,
        Commands::Show { id } => handle_show(&mut ctx, &id)?,
        Commands::Add { set } => handle_add(&mut ctx, set)?,
        Commands::Edit { id, set, unset } => handle_edit(&mut ctx, &id, set, unset)?,
        Commands::Delete { id } => handle_delete(&mut ctx, &id)?,
        Commands::Search { terms } => handle_list(&mut ctx, loaded, Some(&terms.join(" ")))?,
        Commands::Config => CmdResult::default(),
    };

    Ok(if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    directories::ProjectDirs::from("com", "rolodex", "rolodex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RolodexError::Api("Could not determine a data directory".to_string()))
}

/// `--verbose` forces debug; otherwise `RUST_LOG`, then the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(data_dir: &Path, config: RolodexConfig) -> AppContext {
    let backend = JsonFileBackend::new(config.data_path(data_dir))
        .with_validator(Validator::new(config.required_fields.clone()));
    let store = RecordStore::with_filter(NameFilter::from_config(&config));
    let credentials = EnvCredential::new(config.token_env.clone()).or_anonymous();

    AppContext {
        api: RolodexApi::with_parts(backend, store, Box::new(credentials)),
        config,
    }
}

fn handle_list(ctx: &mut AppContext, loaded: CmdResult, query: Option<&str>) -> Result<CmdResult> {
    let result = match query {
        Some(q) => ctx.api.search(q)?,
        None => loaded,
    };
    print_messages(&result.messages);
    print_records(&result.listed_records);
    Ok(result)
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<CmdResult> {
    let result = ctx.api.focus(&RecordId::from(id))?;
    for record in &result.affected_records {
        print_full_record(record);
    }
    Ok(result)
}

fn handle_add(ctx: &mut AppContext, assignments: Vec<(String, String)>) -> Result<CmdResult> {
    let mut draft = PendingEdit::new();
    for (field, value) in assignments {
        draft.set(field, value);
    }
    let result = ctx.api.create_record(&draft)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    assignments: Vec<(String, String)>,
    cleared: Vec<String>,
) -> Result<CmdResult> {
    if assignments.is_empty() && cleared.is_empty() {
        return Err(RolodexError::Api(
            "Nothing to change: pass --set FIELD=VALUE or --unset FIELD".to_string(),
        ));
    }

    let mut draft = ctx.api.edit_draft(&RecordId::from(id))?;
    for (field, value) in assignments {
        draft.set(field, value);
    }
    for field in cleared {
        draft.unset(field);
    }

    let result = ctx.api.update_record(&draft.into_record())?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<CmdResult> {
    let result = ctx.api.delete_record(&RecordId::from(id))?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_config(config: &RolodexConfig) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}
