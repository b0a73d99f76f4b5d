use crate::index::reader::SearchIndex;
use crate::index::types::Category;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Aggregate figures about a loaded index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub binding: Option<String>,
    pub entries: usize,
    pub pages: usize,
    /// Per-category counts, in first-seen order
    pub categories: Vec<(Category, usize)>,
    pub empty_text: usize,
    pub text_bytes: usize,
}

impl IndexStats {
    pub fn collect(index: &SearchIndex) -> Self {
        let mut categories: Vec<(Category, usize)> = Vec::new();
        let mut empty_text = 0;
        let mut text_bytes = 0;

        for entry in index.entries() {
            match categories.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((entry.category.clone(), 1)),
            }
            if entry.text.trim().is_empty() {
                empty_text += 1;
            }
            text_bytes += entry.text.len();
        }

        Self {
            binding: index.binding().map(str::to_string),
            entries: index.len(),
            pages: index.pages().len(),
            categories,
            empty_text,
            text_bytes,
        }
    }
}

/// Display index statistics
pub fn show_stats(index: &SearchIndex, index_path: &Path) -> Result<()> {
    let stats = IndexStats::collect(index);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index file:       {}", index_path.display());
    println!(
        "Binding:          {}",
        stats.binding.as_deref().unwrap_or("(none)")
    );
    println!("Entries:          {}", stats.entries);
    println!("Pages:            {}", stats.pages);
    println!("Empty text:       {}", stats.empty_text);
    println!("Text size:        {}", format_size(stats.text_bytes as u64));

    println!();
    println!("Entries by category:");
    for (category, count) in &stats.categories {
        println!("  {:15} {}", category.as_str(), count);
    }

    Ok(())
}

/// List pages with their entry counts
pub fn list_pages(index: &SearchIndex) -> Result<()> {
    for page in index.pages() {
        let count = index.entries().iter().filter(|e| e.page == page).count();
        println!("{:30} {}", page, count);
    }
    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
