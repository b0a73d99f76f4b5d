use crate::index::types::IndexEntry;
use crate::query::executor::{Hits, Matches};
use crate::query::parser::Query;

/// Case-folded copies of the searchable fields of one entry
#[derive(Debug, Clone)]
pub(crate) struct FoldedEntry {
    pub title: String,
    pub text: String,
    pub page: String,
}

impl FoldedEntry {
    fn fold(entry: &IndexEntry) -> Self {
        Self {
            title: fold_case(&entry.title),
            text: fold_case(&entry.text),
            page: fold_case(&entry.page),
        }
    }
}

/// Lowercase char by char. `str::to_lowercase` writes a word-final sigma as
/// `ς`, which would stop `LOGΣ` from matching `logσ`.
pub(crate) fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Immutable, ordered documentation search index.
///
/// Built once by [`crate::index::load_index`]; every accessor is read-only,
/// so a shared reference can be handed to any number of threads.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    binding: Option<String>,
    entries: Vec<IndexEntry>,
    folded: Vec<FoldedEntry>,
}

impl SearchIndex {
    pub(crate) fn new(binding: Option<String>, entries: Vec<IndexEntry>) -> Self {
        let folded = entries.iter().map(FoldedEntry::fold).collect();
        Self {
            binding,
            entries,
            folded,
        }
    }

    /// Name of the JavaScript variable the index was assigned to, if any
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in file order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, i: usize) -> Option<&IndexEntry> {
        self.entries.get(i)
    }

    pub(crate) fn folded(&self, i: usize) -> &FoldedEntry {
        &self.folded[i]
    }

    /// Distinct page names in first-seen order
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(|e| e.page.as_str())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Entries sharing `location`, in file order
    pub fn at_location<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        self.entries.iter().filter(move |e| e.location == location)
    }

    /// Entries whose title or text contains `term`, ignoring case.
    ///
    /// The returned iterator is lazy and borrows the index; calling this again
    /// with the same term yields the same sequence.
    pub fn query<'a>(&'a self, term: &str) -> Matches<'a> {
        Matches::new(self, term)
    }

    /// Run a parsed query (term, filters and limit).
    pub fn search<'a>(&'a self, query: &Query) -> Hits<'a> {
        Hits::for_query(self, query)
    }
}
