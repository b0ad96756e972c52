use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::SearchFilter;
use crate::store::RecordStore;

/// Narrows the view to records matching `query`. Purely local: no backend call.
pub fn run<F: SearchFilter>(store: &mut RecordStore<F>, query: &str) -> Result<CmdResult> {
    let listed = store.set_query(query).to_vec();

    let mut result = CmdResult::default();
    if listed.is_empty() && !store.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No records match \"{}\"",
            query.trim()
        )));
    }
    Ok(result.with_listed_records(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::StoreFixture;

    #[test]
    fn lists_matches_in_cache_order() {
        let mut store = StoreFixture::new()
            .with_person("John", "Smith")
            .with_person("Ann", "Lee")
            .with_person("Jon", "Smyth")
            .loaded()
            .store;

        let result = run(&mut store, "smith john").unwrap();
        let names: Vec<String> = result
            .listed_records
            .iter()
            .map(|r| r.display_name())
            .collect();
        assert_eq!(names, vec!["John Smith", "Jon Smyth"]);
        assert_eq!(store.view().len(), 2);
    }

    #[test]
    fn empty_query_lists_everything() {
        let mut store = StoreFixture::new().with_people(3).loaded().store;
        run(&mut store, "zzz").unwrap();
        let result = run(&mut store, "").unwrap();
        assert_eq!(result.listed_records.len(), 3);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn reports_when_nothing_matches() {
        let mut store = StoreFixture::new().with_person("Ann", "Lee").loaded().store;
        let result = run(&mut store, "  xavier ").unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages[0].content, "No records match \"xavier\"");
    }
}
