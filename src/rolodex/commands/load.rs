use crate::auth::Credential;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::lifecycle::{dispatch, Operation};
use crate::search::SearchFilter;
use crate::store::backend::Backend;
use crate::store::RecordStore;

/// Fetches every record and, once confirmed, replaces the cache with them.
///
/// Running it again is an explicit refresh. A rejected fetch leaves whatever
/// the cache held before untouched.
pub fn run<B: Backend, F: SearchFilter>(
    store: &mut RecordStore<F>,
    backend: &B,
    credential: &Credential,
) -> Result<CmdResult> {
    let lifecycle = dispatch(Operation::Load, || backend.fetch_all(credential))?;

    let mut result = CmdResult::default();
    if let Some(records) = lifecycle.settle(&mut result)? {
        store.load(records);
        result.listed_records = store.view().to_vec();
    }
    Ok(result)
}
