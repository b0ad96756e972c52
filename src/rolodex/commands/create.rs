use crate::auth::Credential;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lifecycle::{dispatch, Operation};
use crate::model::PendingEdit;
use crate::search::SearchFilter;
use crate::store::backend::Backend;
use crate::store::RecordStore;
use tracing::info;

pub fn run<B: Backend, F: SearchFilter>(
    store: &mut RecordStore<F>,
    backend: &mut B,
    credential: &Credential,
    draft: &PendingEdit,
) -> Result<CmdResult> {
    let lifecycle = dispatch(Operation::Create, || backend.create(credential, draft))?;

    let mut result = CmdResult::default();
    if let Some(record) = lifecycle.settle(&mut result)? {
        store.apply_create(record.clone())?;
        info!(target: "rolodex::commands", id = ?record.id, "record created");
        result.add_message(CmdMessage::success(format!(
            "Record created: {}",
            record.display_name()
        )));
        result.affected_records.push(record);
    }
    Ok(result)
}
