//! Decoding of `search_index.js` payloads.
//!
//! Documentation generators write the index as a JavaScript assignment:
//!
//! ```text
//! var documenterSearchIndex = {"docs":
//! [{"location":"","page":"Home","title":"Home","text":"...","category":"page"}, ...]
//! }
//! ```
//!
//! The loader strips the assignment, decodes the JSON object and only then
//! builds the [`SearchIndex`], so malformed input never yields a partial index.

use crate::error::{IndexError, Result};
use crate::index::reader::SearchIndex;
use crate::index::types::IndexDocument;
use memmap2::Mmap;
use regex::Regex;
use std::fs::File;
use std::path::Path;
use std::sync::LazyLock;

static BINDING_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*")
        .expect("binding prefix pattern is valid")
});

/// Split an optional `var name =` prefix and trailing `;` off the payload.
fn split_binding(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();

    let (binding, rest) = match BINDING_PREFIX.captures(trimmed) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            (caps.get(1).map(|m| m.as_str()), &trimmed[whole..])
        }
        None => (None, trimmed),
    };

    let payload = rest.trim_end();
    let payload = payload.strip_suffix(';').unwrap_or(payload).trim_end();
    (binding, payload)
}

/// Load a search index from its serialized form.
///
/// Accepts the generator's `var <binding> = {...}` file as well as the bare
/// `{"docs": [...]}` object.
pub fn load_index(raw: &str) -> Result<SearchIndex> {
    let (binding, payload) = split_binding(raw);

    let document: IndexDocument =
        serde_json::from_str(payload).map_err(IndexError::from_json)?;

    tracing::debug!(
        binding = binding.unwrap_or("<none>"),
        entries = document.docs.len(),
        "decoded search index"
    );

    Ok(SearchIndex::new(binding.map(str::to_string), document.docs))
}

/// Memory-map `path` and load it with [`load_index`].
pub fn load_index_file(path: &Path) -> Result<SearchIndex> {
    let io_err = |source: std::io::Error| IndexError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();

    // Zero-length maps are rejected on some platforms
    if len == 0 {
        return load_index("");
    }

    let mmap = unsafe { Mmap::map(&file).map_err(io_err)? };
    let raw = std::str::from_utf8(&mmap).map_err(|e| {
        let (line, column) = position_of(&mmap[..e.valid_up_to()]);
        IndexError::malformed(line, column, format!("invalid UTF-8: {e}"))
    })?;

    let index = load_index(raw)?;
    tracing::info!(path = %path.display(), entries = index.len(), "loaded search index");
    Ok(index)
}

/// 1-based line and column just past `prefix`
fn position_of(prefix: &[u8]) -> (usize, usize) {
    let line = 1 + memchr::memchr_iter(b'\n', prefix).count();
    let column = match memchr::memrchr(b'\n', prefix) {
        Some(nl) => prefix.len() - nl,
        None => prefix.len() + 1,
    };
    (line, column)
}
