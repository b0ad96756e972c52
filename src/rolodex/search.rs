//! # Name Search
//!
//! Typo-tolerant matching of a free-text query against the name-bearing fields
//! of a [`Record`]. The store only ever talks to the [`SearchFilter`] trait, so the
//! algorithm below can be swapped out without touching the cache.
//!
//! ## Matching Rules
//!
//! Both the query and the record's name fields are normalized with [`tokenize`]:
//! lowercased and split on anything that is not alphanumeric.
//!
//! A query token matches a name token when either:
//! - the name token starts with it (the user is still typing), or
//! - their [`edit_distance`] is within [`tolerance`] for the query token's length.
//!
//! A record matches when:
//! 1. **Token set**: every query token matches a *distinct* name token. Word order
//!    is irrelevant, so "smith john" finds John Smith.
//! 2. **Concatenation**: or the query with separators removed matches some
//!    ordering of the name tokens glued together ("johnsmith", "smithjon").
//!
//! ## Tolerance
//!
//! | query token length | edits allowed |
//! |--------------------|---------------|
//! | 1-3                | 0             |
//! | 4-7                | 1             |
//! | 8+                 | 2             |
//!
//! The table is further capped by the configured `max_typos`.
//!
//! An empty query (no tokens at all) is the identity: every record is returned.
//! Matches always keep the relative order of the input.

use crate::config::RolodexConfig;
use crate::model::{Record, DEFAULT_NAME_FIELDS};

/// Orderings of name tokens are enumerated up to this many tokens.
const MAX_PERMUTED_TOKENS: usize = 4;

/// Narrow, function-shaped search interface used by the record store.
pub trait SearchFilter {
    /// Whether a single record matches `query`.
    ///
    /// Only meaningful when [`is_identity`](SearchFilter::is_identity) is false
    /// for `query`; callers check that first.
    fn matches(&self, query: &str, record: &Record) -> bool;

    /// Whether `query` selects everything. Blank and punctuation-only queries
    /// have no tokens and count as empty.
    fn is_identity(&self, query: &str) -> bool {
        tokenize(query).is_empty()
    }

    /// Returns the matching records in input order; an identity query returns all of them.
    fn filter(&self, query: &str, records: &[Record]) -> Vec<Record> {
        if self.is_identity(query) {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| self.matches(query, record))
            .cloned()
            .collect()
    }
}

impl<F> SearchFilter for F
where
    F: Fn(&str, &Record) -> bool,
{
    fn matches(&self, query: &str, record: &Record) -> bool {
        self(query, record)
    }
}

/// Lowercases and splits text on non-alphanumeric characters.
///
/// Unlike a full-text tokenizer, short tokens are kept: "Al" and "Li" are names.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Number of edits allowed for a query token of `len` characters.
pub fn tolerance(len: usize, max_typos: usize) -> usize {
    let allowed = match len {
        0..=3 => 0,
        4..=7 => 1,
        _ => 2,
    };
    allowed.min(max_typos)
}

/// Optimal string alignment distance: insertions, deletions, substitutions and
/// adjacent transpositions each cost one edit.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());
    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    let mut d = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(d[i - 2][j - 2] + 1);
            }
            d[i][j] = best;
        }
    }

    d[n][m]
}

/// The default [`SearchFilter`]: fuzzy token matching over configured name fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    name_fields: Vec<String>,
    max_typos: usize,
}

impl Default for NameFilter {
    fn default() -> Self {
        Self {
            name_fields: DEFAULT_NAME_FIELDS.iter().map(|f| f.to_string()).collect(),
            max_typos: 2,
        }
    }
}

impl NameFilter {
    pub fn new(name_fields: Vec<String>, max_typos: usize) -> Self {
        Self {
            name_fields,
            max_typos,
        }
    }

    pub fn from_config(config: &RolodexConfig) -> Self {
        Self::new(config.name_fields.clone(), config.max_typos)
    }

    pub fn name_fields(&self) -> &[String] {
        &self.name_fields
    }

    fn name_tokens(&self, record: &Record) -> Vec<String> {
        self.name_fields
            .iter()
            .filter_map(|field| record.get(field))
            .flat_map(tokenize)
            .collect()
    }

    fn token_matches(&self, query: &str, name: &str) -> bool {
        name.starts_with(query)
            || edit_distance(query, name) <= tolerance(query.chars().count(), self.max_typos)
    }

    fn matches_tokens(&self, query: &[String], record: &Record) -> bool {
        let names = self.name_tokens(record);
        if names.is_empty() {
            return false;
        }

        let mut used = vec![false; names.len()];
        if self.assign(query, &names, &mut used) {
            return true;
        }

        let joined_query = query.concat();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        orderings(&name_refs)
            .into_iter()
            .any(|order| self.token_matches(&joined_query, &order.concat()))
    }

    /// Finds a distinct name token for every query token, backtracking on conflicts.
    fn assign(&self, query: &[String], names: &[String], used: &mut [bool]) -> bool {
        let Some((first, rest)) = query.split_first() else {
            return true;
        };

        for (i, name) in names.iter().enumerate() {
            if !used[i] && self.token_matches(first, name) {
                used[i] = true;
                if self.assign(rest, names, used) {
                    return true;
                }
                used[i] = false;
            }
        }
        false
    }
}

impl SearchFilter for NameFilter {
    fn matches(&self, query: &str, record: &Record) -> bool {
        let tokens = tokenize(query);
        !tokens.is_empty() && self.matches_tokens(&tokens, record)
    }

    fn filter(&self, query: &str, records: &[Record]) -> Vec<Record> {
        if self.is_identity(query) {
            return records.to_vec();
        }
        let tokens = tokenize(query);
        records
            .iter()
            .filter(|record| self.matches_tokens(&tokens, record))
            .cloned()
            .collect()
    }
}

fn orderings<'a>(tokens: &[&'a str]) -> Vec<Vec<&'a str>> {
    if tokens.len() <= 1 || tokens.len() > MAX_PERMUTED_TOKENS {
        return vec![tokens.to_vec()];
    }

    let mut out = Vec::new();
    for i in 0..tokens.len() {
        let mut rest = tokens.to_vec();
        let head = rest.remove(i);
        for mut tail in orderings(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}
