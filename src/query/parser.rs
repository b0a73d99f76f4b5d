use crate::index::types::Category;

/// Default number of results for a search
pub const DEFAULT_LIMIT: usize = 100;

/// Parsed query representation
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Text matched against titles and bodies (verbatim apart from case)
    pub term: String,
    pub filters: QueryFilters,
    pub options: QueryOptions,
}

impl Query {
    /// Plain term query with no filters
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            filters: QueryFilters::default(),
            options: QueryOptions::default(),
        }
    }

    /// True when there is neither a search term nor a filter
    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty() && !self.filters.has_any()
    }
}

/// Query filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilters {
    /// Category filter (category:function, cat:section)
    pub category: Option<Category>,
    /// Page name filter, case-insensitive substring (page:home)
    pub page: Option<String>,
}

impl QueryFilters {
    /// Check if any filter is set
    pub fn has_any(&self) -> bool {
        self.category.is_some() || self.page.is_some()
    }
}

/// Query options
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Maximum results, 0 = unlimited
    pub limit: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Parse a query string into a Query structure
pub fn parse_query(input: &str) -> Query {
    parse_query_with(input, QueryOptions::default())
}

/// Parse with caller-supplied option defaults (e.g. a configured limit);
/// options in the query string override them.
pub fn parse_query_with(input: &str, defaults: QueryOptions) -> Query {
    let mut parser = QueryParser::new(input, defaults);
    parser.parse()
}

/// Query parser
struct QueryParser<'a> {
    input: &'a str,
    pos: usize,
    fragments: Vec<String>,
    filters: QueryFilters,
    options: QueryOptions,
}

impl<'a> QueryParser<'a> {
    fn new(input: &'a str, options: QueryOptions) -> Self {
        Self {
            input,
            pos: 0,
            fragments: Vec::new(),
            filters: QueryFilters::default(),
            options,
        }
    }

    fn parse(&mut self) -> Query {
        loop {
            self.skip_whitespace();
            if self.is_eof() {
                break;
            }

            if self.peek_char() == Some('"') {
                let phrase = self.parse_quoted();
                if !phrase.is_empty() {
                    self.fragments.push(phrase);
                }
                continue;
            }

            let word = self.parse_word();
            if !self.try_apply_filter(word) {
                self.fragments.push(word.to_string());
            }
        }

        Query {
            term: self.fragments.join(" "),
            filters: self.filters.clone(),
            options: self.options.clone(),
        }
    }

    /// Apply `key:value` if `key` is a known filter. Returns false when the
    /// word should be searched for instead.
    fn try_apply_filter(&mut self, word: &str) -> bool {
        let Some((key, value)) = word.split_once(':') else {
            return false;
        };

        match key.to_lowercase().as_str() {
            "category" | "cat" => {
                let value = self.filter_value(value);
                if value.is_empty() {
                    return false;
                }
                self.filters.category = Some(Category::parse_filter(&value));
                true
            }
            "page" => {
                let value = self.filter_value(value);
                if value.is_empty() {
                    return false;
                }
                self.filters.page = Some(value);
                true
            }
            "top" => match value.parse::<usize>() {
                Ok(n) => {
                    self.options.limit = n;
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Value of a `key:value` word; `key:"Getting Started"` reads the quoted
    /// text that follows.
    fn filter_value(&mut self, value: &str) -> String {
        if value.is_empty() && self.peek_char() == Some('"') {
            self.parse_quoted()
        } else {
            value.trim_matches('"').to_string()
        }
    }

    /// Read a word up to whitespace, stopping before a quote that directly
    /// follows `key:` so the quoted value can be read separately.
    fn parse_word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                break;
            }
            if ch == '"' && self.input[start..self.pos].ends_with(':') {
                break;
            }
            self.advance();
        }
        &self.input[start..self.pos]
    }

    /// Read a `"..."` phrase; an unterminated quote runs to end of input.
    fn parse_quoted(&mut self) -> String {
        self.consume_char('"');
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch == '"' {
                break;
            }
            self.advance();
        }
        let phrase = self.input[start..self.pos].to_string();
        self.consume_char('"');
        phrase
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn consume_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
