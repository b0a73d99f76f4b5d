pub mod loader;
pub mod reader;
pub mod stats;
pub mod types;

pub use loader::{load_index, load_index_file};
pub use reader::SearchIndex;
pub use types::*;
