//! Output formatting for search results

use crate::query::executor::{Hit, MatchField, Snippet};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Width of the text excerpt printed under each hit
pub const SNIPPET_WIDTH: usize = 100;

/// How result locations are printed
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Prefix locations with this URL
    pub base_url: Option<String>,
    /// Print an excerpt of the entry text under each hit
    pub snippets: bool,
}

impl OutputOptions {
    fn location(&self, hit: &Hit<'_>) -> String {
        match &self.base_url {
            Some(base) => hit.entry.url(base),
            None if hit.entry.location.is_empty() => "/".to_string(),
            None => hit.entry.location.clone(),
        }
    }
}

/// Print hits, one per line, with the matched part of the title highlighted
pub fn print_hits<W: WriteColor>(out: &mut W, hits: &[Hit<'_>], opts: &OutputOptions) -> io::Result<()> {
    for hit in hits {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", opts.location(hit))?;
        out.reset()?;
        write!(out, "  {} › ", hit.entry.page)?;

        match (hit.field, &hit.span) {
            (Some(MatchField::Title), Some(span)) => {
                print_highlighted(out, &hit.entry.title, span.start, span.end)?;
            }
            _ => {
                out.set_color(ColorSpec::new().set_bold(true))?;
                write!(out, "{}", hit.entry.display_title())?;
                out.reset()?;
            }
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, " [{}]", hit.entry.category)?;
        out.reset()?;

        if opts.snippets {
            if let Some(snippet) = hit.snippet(SNIPPET_WIDTH) {
                print_snippet(out, &snippet)?;
            }
        }
    }

    Ok(())
}

/// Print a title with the match highlighted
fn print_highlighted<W: WriteColor>(out: &mut W, content: &str, start: usize, end: usize) -> io::Result<()> {
    let safe_start = start.min(content.len());
    let safe_end = end.min(content.len());

    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", &content[..safe_start])?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "{}", &content[safe_start..safe_end])?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", &content[safe_end..])?;
    out.reset()
}

fn print_snippet<W: WriteColor>(out: &mut W, snippet: &Snippet) -> io::Result<()> {
    write!(out, "    {}", snippet.before)?;
    if !snippet.matched.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", snippet.matched)?;
        out.reset()?;
    }
    writeln!(out, "{}", snippet.after)
}

/// Print only locations, once each (for -l flag)
pub fn print_locations<W: WriteColor>(out: &mut W, hits: &[Hit<'_>], opts: &OutputOptions) -> io::Result<()> {
    let mut seen = std::collections::HashSet::new();

    for hit in hits {
        let location = opts.location(hit);
        if seen.insert(location.clone()) {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            writeln!(out, "{}", location)?;
            out.reset()?;
        }
    }

    Ok(())
}

/// Print the number of hits (for -c flag)
pub fn print_count<W: Write>(out: &mut W, hits: &[Hit<'_>]) -> io::Result<()> {
    writeln!(out, "{}", hits.len())
}

#[derive(Serialize)]
struct JsonHit<'a> {
    index: usize,
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    page: &'a str,
    title: &'a str,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    text: &'a str,
}

/// Print hits as a JSON array
pub fn print_json<W: Write>(out: &mut W, hits: &[Hit<'_>], opts: &OutputOptions) -> io::Result<()> {
    let rows: Vec<JsonHit<'_>> = hits
        .iter()
        .map(|hit| JsonHit {
            index: hit.index,
            location: &hit.entry.location,
            url: opts.base_url.as_deref().map(|base| hit.entry.url(base)),
            page: &hit.entry.page,
            title: &hit.entry.title,
            category: hit.entry.category.as_str(),
            field: hit.field.map(|f| match f {
                MatchField::Title => "title",
                MatchField::Text => "text",
            }),
            text: &hit.entry.text,
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)
}
