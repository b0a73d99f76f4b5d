//! # docsift - documentation index search
//!
//! docsift loads the `search_index.js` file a documentation generator emits
//! next to a built site and answers case-insensitive substring queries
//! against it, from the terminal or as a library.
//!
//! ## Architecture
//!
//! - [`index`] - Loading the index file and the immutable [`SearchIndex`]
//! - [`query`] - Query parsing and lazy execution
//! - [`output`] - Result formatting (colored text, JSON)
//! - [`utils`] - Configuration and index discovery
//! - [`error`] - Load-time errors
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::index::load_index_file;
//! use std::path::Path;
//!
//! let index = load_index_file(Path::new("docs/build/search_index.js")).unwrap();
//!
//! for entry in index.query("stan") {
//!     println!("{} › {}", entry.page, entry.title);
//! }
//! ```
//!
//! The index never changes after loading, so queries are restartable and a
//! shared `&SearchIndex` can serve any number of readers.

pub mod error;
pub mod index;
pub mod logging;
pub mod output;
pub mod query;
pub mod utils;

pub use error::IndexError;
pub use index::{load_index, load_index_file, Category, IndexEntry, SearchIndex};
pub use query::{parse_query, Query};
