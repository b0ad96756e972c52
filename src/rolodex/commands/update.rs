use crate::auth::Credential;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RolodexError};
use crate::lifecycle::{dispatch, Operation};
use crate::model::Record;
use crate::search::SearchFilter;
use crate::store::backend::Backend;
use crate::store::RecordStore;
use tracing::{info, warn};

/// Sends an edited record and applies the server's version once confirmed.
///
/// If the backend confirms a record the cache does not hold, the cache is left
/// alone and a warning is added; the command still succeeds.
pub fn run<B: Backend, F: SearchFilter>(
    store: &mut RecordStore<F>,
    backend: &mut B,
    credential: &Credential,
    record: &Record,
) -> Result<CmdResult> {
    if record.id.is_none() {
        return Err(RolodexError::MissingId);
    }

    let lifecycle = dispatch(Operation::Update, || backend.update(credential, record))?;

    let mut result = CmdResult::default();
    let Some(confirmed) = lifecycle.settle(&mut result)? else {
        return Ok(result);
    };

    match store.apply_update(confirmed.clone()) {
        Ok(()) => {
            info!(target: "rolodex::commands", id = ?confirmed.id, "record updated");
            result.add_message(CmdMessage::success(format!(
                "Record updated: {}",
                confirmed.display_name()
            )));
            result.affected_records.push(confirmed);
        }
        Err(RolodexError::RecordNotFound(id)) => {
            warn!(target: "rolodex::commands", id = %id, "confirmed update for uncached record");
            result.add_message(CmdMessage::warning(format!(
                "Record {} not found locally",
                id
            )));
        }
        Err(e) => return Err(e),
    }
    Ok(result)
}
