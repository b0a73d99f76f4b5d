//! Query execution over a loaded [`SearchIndex`].
//!
//! Execution is a single forward scan in file order. Both iterators are lazy
//! and hold nothing but a cursor and the folded needle, so they are cheap to
//! create again for the same term.

use crate::index::reader::{fold_case, SearchIndex};
use crate::index::types::IndexEntry;
use crate::query::parser::{Query, QueryFilters};
use memchr::memmem::Finder;
use std::ops::Range;

/// Which field of an entry produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Text,
}

/// A matching entry plus where the term was found
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a> {
    /// Position of the entry in the index
    pub index: usize,
    pub entry: &'a IndexEntry,
    /// None for filter-only queries
    pub field: Option<MatchField>,
    /// Byte range of the match in the original field, when it can be mapped
    /// back from the case-folded text
    pub span: Option<Range<usize>>,
}

/// Text context around a hit, split for highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub before: String,
    pub matched: String,
    pub after: String,
}

impl Snippet {
    pub fn to_plain(&self) -> String {
        format!("{}{}{}", self.before, self.matched, self.after)
    }
}

const ELLIPSIS: char = '…';

impl<'a> Hit<'a> {
    /// The line of `text` that contains the match, cut to about `width`
    /// characters centred on the match. Title and filter-only hits show the
    /// first non-empty line of text instead.
    pub fn snippet(&self, width: usize) -> Option<Snippet> {
        let text = self.entry.text.as_str();
        if text.trim().is_empty() {
            return None;
        }

        let span = match (self.field, &self.span) {
            (Some(MatchField::Text), Some(span)) => span.clone(),
            _ => {
                let line = text.lines().find(|l| !l.trim().is_empty())?.trim();
                return Some(Snippet {
                    before: String::new(),
                    matched: String::new(),
                    after: truncate_end(line, width),
                });
            }
        };

        let line_start = memchr::memrchr(b'\n', &text.as_bytes()[..span.start]).map_or(0, |i| i + 1);
        let line_end = memchr::memchr(b'\n', &text.as_bytes()[span.end..])
            .map_or(text.len(), |i| span.end + i);

        let matched = &text[span.clone()];
        let budget = width.saturating_sub(matched.chars().count());
        let before_budget = budget / 2;
        let after_budget = budget - before_budget;

        Some(Snippet {
            before: truncate_start(&text[line_start..span.start], before_budget),
            matched: matched.to_string(),
            after: truncate_end(&text[span.end..line_end], after_budget),
        })
    }
}

/// Keep the last `max` chars of `s`, marking a cut with an ellipsis
fn truncate_start(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let skip = count - (max - 1);
    std::iter::once(ELLIPSIS).chain(s.chars().skip(skip)).collect()
}

/// Keep the first `max` chars of `s`, marking a cut with an ellipsis
fn truncate_end(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    s.chars()
        .take(max - 1)
        .chain(std::iter::once(ELLIPSIS))
        .collect()
}

/// Locate `needle` (already folded) in `original`, given its folded copy.
///
/// The span is only reported when it maps onto the same text in the
/// original string; some characters change byte length when lowercased.
fn locate(finder: &Finder<'_>, original: &str, folded: &str) -> Option<Option<Range<usize>>> {
    let start = finder.find(folded.as_bytes())?;
    let end = start + finder.needle().len();

    let mapped = (original.len() == folded.len()
        && original.is_char_boundary(start)
        && original.is_char_boundary(end)
        && fold_case(&original[start..end]).as_bytes() == finder.needle())
    .then_some(start..end);

    Some(mapped)
}

/// Lazy sequence of [`Hit`]s in index order
#[derive(Clone)]
pub struct Hits<'a> {
    index: &'a SearchIndex,
    finder: Option<Finder<'static>>,
    filters: QueryFilters,
    folded_page: Option<String>,
    limit: usize,
    emitted: usize,
    pos: usize,
    exhausted: bool,
}

impl<'a> Hits<'a> {
    fn new(index: &'a SearchIndex, term: &str, filters: QueryFilters, limit: usize) -> Self {
        let folded_term = fold_case(term);
        let finder = (!folded_term.is_empty())
            .then(|| Finder::new(folded_term.as_bytes()).into_owned());

        // An empty term only makes sense as a filter listing
        let exhausted = finder.is_none() && !filters.has_any();

        tracing::trace!(term, ?filters, limit, "executing query");

        Self {
            index,
            finder,
            folded_page: filters.page.as_deref().map(fold_case),
            filters,
            limit,
            emitted: 0,
            pos: 0,
            exhausted,
        }
    }

    pub(crate) fn for_query(index: &'a SearchIndex, query: &Query) -> Self {
        Self::new(
            index,
            &query.term,
            query.filters.clone(),
            query.options.limit,
        )
    }

    fn passes_filters(&self, i: usize, entry: &IndexEntry) -> bool {
        if let Some(category) = &self.filters.category {
            if &entry.category != category {
                return false;
            }
        }
        if let Some(page) = &self.folded_page {
            if !self.index.folded(i).page.contains(page.as_str()) {
                return false;
            }
        }
        true
    }

    fn evaluate(&self, i: usize, entry: &'a IndexEntry) -> Option<Hit<'a>> {
        if !self.passes_filters(i, entry) {
            return None;
        }

        let Some(finder) = &self.finder else {
            return Some(Hit {
                index: i,
                entry,
                field: None,
                span: None,
            });
        };

        let folded = self.index.folded(i);
        if let Some(span) = locate(finder, &entry.title, &folded.title) {
            return Some(Hit {
                index: i,
                entry,
                field: Some(MatchField::Title),
                span,
            });
        }
        locate(finder, &entry.text, &folded.text).map(|span| Hit {
            index: i,
            entry,
            field: Some(MatchField::Text),
            span,
        })
    }
}

impl<'a> Iterator for Hits<'a> {
    type Item = Hit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let index = self.index;
        let entries = index.entries();
        while self.pos < entries.len() {
            if self.limit != 0 && self.emitted >= self.limit {
                break;
            }

            let i = self.pos;
            self.pos += 1;

            if let Some(hit) = self.evaluate(i, &entries[i]) {
                self.emitted += 1;
                return Some(hit);
            }
        }

        self.exhausted = true;
        None
    }
}

impl std::iter::FusedIterator for Hits<'_> {}

/// Lazy sequence of entries whose title or text contains a term
#[derive(Clone)]
pub struct Matches<'a> {
    hits: Hits<'a>,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(index: &'a SearchIndex, term: &str) -> Self {
        Self {
            hits: Hits::new(index, term, QueryFilters::default(), 0),
        }
    }

    /// Same scan, yielding match positions as well
    pub fn hits(self) -> Hits<'a> {
        self.hits
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a IndexEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.hits.next().map(|hit| hit.entry)
    }
}

impl std::iter::FusedIterator for Matches<'_> {}
