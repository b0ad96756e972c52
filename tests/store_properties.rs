use proptest::prelude::*;
use rolodex::model::{Record, RecordId};
use rolodex::search::{NameFilter, SearchFilter};
use rolodex::store::RecordStore;

const NAMES: &[&str] = &[
    "ann", "bob", "john", "jon", "smith", "smyth", "lee", "walken", "christopher", "mary",
];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(|s| s.to_string())
}

fn records(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((name(), name()), 0..max).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (first, last))| {
                Record::with_id(i as u64 + 1)
                    .with_field("first_name", first)
                    .with_field("last_name", last)
            })
            .collect()
    })
}

fn query() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::collection::vec(name(), 0..3).prop_map(|words| words.join(" ")),
        1 => prop::sample::select(vec!["   ", ",,", " - ", "\t.\n"]).prop_map(|s| s.to_string()),
    ]
}

fn ids(records: &[Record]) -> Vec<RecordId> {
    records.iter().filter_map(|r| r.id.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn load_shows_everything(input in records(12)) {
        let mut store = RecordStore::new();
        store.load(input.clone());
        prop_assert_eq!(store.all(), input.as_slice());
        prop_assert_eq!(store.view(), input.as_slice());
    }

    #[test]
    fn filter_is_an_ordered_subset(input in records(12), q in query()) {
        let filter = NameFilter::default();
        let filtered = filter.filter(&q, &input);
        let mut cursor = input.iter();
        for record in &filtered {
            prop_assert!(cursor.any(|r| r == record), "out of order or foreign record");
        }
        if filter.is_identity(&q) {
            prop_assert_eq!(filtered, input);
        }
    }

    #[test]
    fn view_tracks_query_after_create(input in records(12), q in query(), extra in (name(), name())) {
        let mut store = RecordStore::new();
        store.load(input);
        store.set_query(q);

        let record = Record::with_id(1000u64)
            .with_field("first_name", extra.0)
            .with_field("last_name", extra.1);
        store.apply_create(record).unwrap();

        let expected = store.search_filter().filter(store.query(), store.all());
        prop_assert_eq!(store.view(), expected.as_slice());

        let all_ids = ids(store.all());
        for id in ids(store.view()) {
            prop_assert!(all_ids.contains(&id));
        }
    }

    #[test]
    fn create_appends_to_all(input in records(12), q in query()) {
        let mut store = RecordStore::new();
        store.load(input.clone());
        store.set_query(q);

        let record = Record::with_id(1000u64).with_field("first_name", "zed");
        store.apply_create(record.clone()).unwrap();

        prop_assert_eq!(store.len(), input.len() + 1);
        prop_assert_eq!(&store.all()[..input.len()], input.as_slice());
        prop_assert_eq!(store.all().last(), Some(&record));
    }

    #[test]
    fn delete_is_idempotent(input in records(12), pick in 0usize..16) {
        let mut store = RecordStore::new();
        store.load(input.clone());
        let id = RecordId::from(pick as u64);

        store.apply_delete(&id);
        let once: Vec<Record> = store.all().to_vec();
        let removed_again = store.apply_delete(&id);

        prop_assert!(!removed_again);
        prop_assert_eq!(store.all(), once.as_slice());
        prop_assert!(store.get(&id).is_none());
        prop_assert!(store.view().iter().all(|r| !r.has_id(&id)));
    }

    #[test]
    fn update_keeps_positions(input in records(12), pick in 0usize..12, q in query()) {
        prop_assume!(!input.is_empty());
        let target = input[pick % input.len()].clone();

        let mut store = RecordStore::new();
        store.load(input.clone());
        store.set_query(q);
        let view_before = ids(store.view());

        let mut changed = target.clone();
        changed.set("email", Some("someone@example.com".to_string()));
        store.apply_update(changed.clone()).unwrap();

        prop_assert_eq!(ids(store.all()), ids(&input));
        prop_assert_eq!(ids(store.view()), view_before.clone());

        let id = target.id.clone().unwrap();
        prop_assert_eq!(store.get(&id), Some(&changed));
        if view_before.contains(&id) {
            prop_assert!(store.view().contains(&changed));
        }
    }
}
