use clap::{Parser, Subcommand};
use rolodex::model::ID_FIELD;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rolodex")]
#[command(about = "Contacts from the command line, cached and searchable", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " ", env!("GIT_HASH")))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding rolodex.toml and the data file
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List contacts
    #[command(alias = "ls")]
    List {
        /// Only show contacts whose name matches
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show every field of one contact
    #[command(alias = "v")]
    Show {
        /// Id of the contact
        id: String,
    },

    /// Add a contact
    #[command(alias = "n")]
    Add {
        /// Field assignments (e.g. --set first_name=Ann --set email=ann@example.com)
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        set: Vec<(String, String)>,
    },

    /// Change fields of a contact
    #[command(alias = "e")]
    Edit {
        /// Id of the contact
        id: String,

        /// Field assignments (e.g. --set phone=555-0100)
        #[arg(short = 's', long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Fields to clear
        #[arg(long, value_name = "FIELD", value_parser = parse_field_name)]
        unset: Vec<String>,
    },

    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Id of the contact
        id: String,
    },

    /// Search contacts by name (typos and word order are tolerated)
    Search {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{}`", raw))?;
    let field = parse_field_name(field).map_err(|e| format!("{} in `{}`", e, raw))?;
    Ok((field, value.to_string()))
}

/// A data field name: non-blank and not the reserved id key.
pub fn parse_field_name(raw: &str) -> Result<String, String> {
    let field = raw.trim();
    if field.is_empty() {
        return Err("missing field name".to_string());
    }
    if field == ID_FIELD {
        return Err("the id is assigned by the backend and cannot be changed".to_string());
    }
    Ok(field.to_string())
}
