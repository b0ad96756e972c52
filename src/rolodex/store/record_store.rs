use crate::error::{Result, RolodexError};
use crate::model::{Record, RecordId};
use crate::search::{NameFilter, SearchFilter};
use tracing::{debug, info};

/// The canonical cache (`all`) and the filtered view derived from it.
///
/// Every mutating method is the local half of a confirmed backend call; nothing
/// here talks to a backend. Generic over the [`SearchFilter`] so the matching
/// algorithm stays out of the cache.
#[derive(Debug, Clone)]
pub struct RecordStore<F: SearchFilter = NameFilter> {
    all: Vec<Record>,
    view: Vec<Record>,
    loaded: bool,
    query: String,
    focused: Option<Record>,
    filter: F,
}

impl Default for RecordStore<NameFilter> {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore<NameFilter> {
    pub fn new() -> Self {
        Self::with_filter(NameFilter::default())
    }
}

impl<F: SearchFilter> RecordStore<F> {
    pub fn with_filter(filter: F) -> Self {
        Self {
            all: Vec::new(),
            view: Vec::new(),
            loaded: false,
            query: String::new(),
            focused: None,
            filter,
        }
    }

    // --- Read access ---

    pub fn all(&self) -> &[Record] {
        &self.all
    }

    pub fn view(&self) -> &[Record] {
        &self.view
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn focused(&self) -> Option<&Record> {
        self.focused.as_ref()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.all.iter().find(|r| r.has_id(id))
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn search_filter(&self) -> &F {
        &self.filter
    }

    // --- Confirmed mutations ---

    /// Replaces the cache wholesale after a confirmed bulk fetch.
    ///
    /// The query resets to empty, so the view is the full list. The focused
    /// record survives only if its id came back.
    pub fn load(&mut self, records: Vec<Record>) {
        self.query.clear();
        self.view = records.clone();
        self.all = records;
        self.loaded = true;

        self.focused = self
            .focused
            .take()
            .and_then(|f| f.id.and_then(|id| self.get(&id).cloned()));

        info!(target: "rolodex::store", count = self.all.len(), "cache loaded");
    }

    /// Appends a record the backend just created and focuses it.
    ///
    /// It joins the view only if it matches the current query.
    pub fn apply_create(&mut self, record: Record) -> Result<()> {
        if record.id.is_none() {
            return Err(RolodexError::MissingId);
        }

        if self.filter.is_identity(&self.query) || self.filter.matches(&self.query, &record) {
            self.view.push(record.clone());
        }
        self.all.push(record.clone());
        debug!(target: "rolodex::store", id = ?record.id, "record appended");
        self.focused = Some(record);
        Ok(())
    }

    /// Replaces a record in place after a confirmed update.
    ///
    /// Not finding the id in `all` is reported as [`RolodexError::RecordNotFound`]
    /// and leaves everything untouched. The view entry is replaced only if the
    /// view holds that id; a filtered-out record stays filtered out.
    pub fn apply_update(&mut self, record: Record) -> Result<()> {
        let id = record.id.clone().ok_or(RolodexError::MissingId)?;

        let slot = self
            .all
            .iter_mut()
            .find(|r| r.has_id(&id))
            .ok_or_else(|| RolodexError::RecordNotFound(id.clone()))?;
        *slot = record.clone();

        if let Some(slot) = self.view.iter_mut().find(|r| r.has_id(&id)) {
            *slot = record.clone();
        }
        if self.focused.as_ref().is_some_and(|f| f.has_id(&id)) {
            self.focused = Some(record);
        }

        debug!(target: "rolodex::store", id = %id, "record replaced");
        Ok(())
    }

    /// Drops every entry with this id from `all` and the view.
    ///
    /// Idempotent: an unknown id is a no-op. Returns whether anything was removed.
    pub fn apply_delete(&mut self, id: &RecordId) -> bool {
        let before = self.all.len();
        self.all.retain(|r| !r.has_id(id));
        self.view.retain(|r| !r.has_id(id));

        if self.focused.as_ref().is_some_and(|f| f.has_id(id)) {
            self.focused = None;
        }

        let removed = self.all.len() != before;
        debug!(target: "rolodex::store", id = %id, removed, "record removed");
        removed
    }

    // --- Local view state ---

    /// Sets the search query and recomputes the view from `all`.
    pub fn set_query(&mut self, query: impl Into<String>) -> &[Record] {
        self.query = query.into();
        self.view = self.filter.filter(&self.query, &self.all);
        &self.view
    }

    /// Puts a cached record into the focused slot.
    pub fn focus(&mut self, id: &RecordId) -> Result<&Record> {
        let record = self
            .get(id)
            .cloned()
            .ok_or_else(|| RolodexError::RecordNotFound(id.clone()))?;
        Ok(&*self.focused.insert(record))
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }
}
