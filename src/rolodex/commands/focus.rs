use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::RecordId;
use crate::search::SearchFilter;
use crate::store::RecordStore;

/// Puts a cached record in the focused slot (the detail/edit form).
pub fn run<F: SearchFilter>(store: &mut RecordStore<F>, id: &RecordId) -> Result<CmdResult> {
    let record = store.focus(id)?.clone();
    Ok(CmdResult::default().with_affected_records(vec![record]))
}
