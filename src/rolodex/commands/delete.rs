use crate::auth::Credential;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lifecycle::{dispatch, Operation};
use crate::model::RecordId;
use crate::search::SearchFilter;
use crate::store::backend::Backend;
use crate::store::RecordStore;
use tracing::info;

pub fn run<B: Backend, F: SearchFilter>(
    store: &mut RecordStore<F>,
    backend: &mut B,
    credential: &Credential,
    id: &RecordId,
) -> Result<CmdResult> {
    let lifecycle = dispatch(Operation::Delete, || backend.delete(credential, id))?;

    let mut result = CmdResult::default();
    if lifecycle.settle(&mut result)?.is_some() {
        let cached = store.get(id).cloned();
        store.apply_delete(id);
        info!(target: "rolodex::commands", id = %id, "record deleted");

        let label = cached
            .as_ref()
            .map(|r| r.display_name())
            .unwrap_or_else(|| format!("#{}", id));
        result.add_message(CmdMessage::success(format!("Record deleted: {}", label)));
        result.affected_records.extend(cached);
    }
    Ok(result)
}
