use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of documented entity an entry describes.
///
/// Generators emit more kinds than the four common ones (types, macros,
/// constants, ...). Those are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Page,
    Section,
    Method,
    Function,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
            Category::Method => "method",
            Category::Function => "function",
            Category::Other(s) => s,
        }
    }

    /// Parse a user-supplied category name (case-insensitive).
    pub fn parse_filter(name: &str) -> Self {
        Category::from(name.to_lowercase())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "page" => Category::Page,
            "section" => Category::Section,
            "method" => Category::Method,
            "function" => Category::Function,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// URI fragment, `path[#anchor]`
    pub location: String,
    /// Display name of the containing page
    pub page: String,
    /// Section or symbol title; may be empty for whole-page entries
    pub title: String,
    /// Indexed prose; `null` or a missing key loads as ""
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    pub category: Category,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl IndexEntry {
    /// Part of the location before `#`
    pub fn page_path(&self) -> &str {
        match self.location.split_once('#') {
            Some((path, _)) => path,
            None => &self.location,
        }
    }

    /// Part of the location after `#`, if non-empty
    pub fn anchor(&self) -> Option<&str> {
        self.location
            .split_once('#')
            .map(|(_, anchor)| anchor)
            .filter(|a| !a.is_empty())
    }

    /// Resolve the location against a documentation base URL
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.location)
    }

    /// Title to show for this entry (falls back to the page name)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.page
        } else {
            &self.title
        }
    }
}

/// Top-level shape of the index payload
#[derive(Debug, Deserialize)]
pub(crate) struct IndexDocument {
    pub docs: Vec<IndexEntry>,
}
