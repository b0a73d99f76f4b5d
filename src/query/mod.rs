pub mod executor;
pub mod parser;

pub use executor::{Hit, Hits, MatchField, Matches, Snippet};
pub use parser::{parse_query, parse_query_with, Query, QueryFilters, QueryOptions};
