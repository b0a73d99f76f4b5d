use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use docsift::index::stats::{list_pages, show_stats};
use docsift::index::{load_index_file, SearchIndex};
use docsift::output::{self, OutputOptions};
use docsift::query::{parse_query_with, Hit, QueryOptions};
use docsift::utils::{resolve_index_path, AppConfig};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use termcolor::{ColorChoice, StandardStream};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Search a generated documentation search index from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    #[command(flatten)]
    search: SearchFlags,

    /// Path to search_index.js (or a directory to look in)
    #[arg(short, long, global = true)]
    index: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    color: Option<ColorArg>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search titles and text
    Search {
        /// Query: words, "phrases", category:<kind>, page:<name>, top:<n>
        #[arg(required = true)]
        query: Vec<String>,

        #[command(flatten)]
        search: SearchFlags,
    },
    /// Show index statistics
    Stats,
    /// List pages with entry counts
    Pages,
    /// Validate the index file
    Check,
}

#[derive(Args, Clone, Default)]
struct SearchFlags {
    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Only print matching locations
    #[arg(short = 'l', long = "locations")]
    locations: bool,

    /// Only print the number of matches
    #[arg(short = 'c', long = "count")]
    count: bool,

    /// Do not print text excerpts
    #[arg(long)]
    no_snippets: bool,

    /// Prefix locations with this documentation URL
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl ColorArg {
    fn from_config(value: &str) -> Self {
        match value {
            "always" => ColorArg::Always,
            "never" => ColorArg::Never,
            _ => ColorArg::Auto,
        }
    }

    fn choice(self) -> ColorChoice {
        match self {
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
            ColorArg::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
            ColorArg::Auto => ColorChoice::Never,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    docsift::logging::init_logging(cli.verbose);

    if cli.command.is_none() && cli.query.is_empty() {
        anyhow::bail!("No query given. Try `docsift <QUERY>` or `docsift --help`");
    }

    let config = AppConfig::load()?;
    let index_path = resolve_index_path(cli.index.as_deref(), &config)?;
    let color = cli
        .color
        .unwrap_or_else(|| ColorArg::from_config(&config.color))
        .choice();

    match cli.command {
        Some(Commands::Search { query, search }) => {
            let index = open_index(&index_path)?;
            run_search(&index, &query.join(" "), &search, &config, color)?;
        }
        Some(Commands::Stats) => {
            let index = open_index(&index_path)?;
            show_stats(&index, &index_path)?;
        }
        Some(Commands::Pages) => {
            let index = open_index(&index_path)?;
            list_pages(&index)?;
        }
        Some(Commands::Check) => {
            let index = open_index(&index_path)?;
            println!("{}: {} entries", index_path.display(), index.len());
        }
        None => {
            let index = open_index(&index_path)?;
            run_search(&index, &cli.query.join(" "), &cli.search, &config, color)?;
        }
    }

    Ok(())
}

fn open_index(path: &Path) -> Result<SearchIndex> {
    load_index_file(path).with_context(|| format!("Cannot load {}", path.display()))
}

fn run_search(
    index: &SearchIndex,
    input: &str,
    flags: &SearchFlags,
    config: &AppConfig,
    color: ColorChoice,
) -> Result<()> {
    let query = parse_query_with(
        input,
        QueryOptions {
            limit: config.default_limit,
        },
    );
    if query.is_empty() {
        anyhow::bail!("Query is empty");
    }

    let hits: Vec<Hit<'_>> = index.search(&query).collect();
    tracing::debug!(term = %query.term, hits = hits.len(), "search finished");

    let opts = OutputOptions {
        base_url: flags.base_url.clone().or_else(|| config.base_url.clone()),
        snippets: !flags.no_snippets,
    };

    let mut stdout = StandardStream::stdout(color);
    if flags.json {
        output::print_json(&mut stdout, &hits, &opts)?;
    } else if flags.count {
        output::print_count(&mut stdout, &hits)?;
    } else if flags.locations {
        output::print_locations(&mut stdout, &hits, &opts)?;
    } else {
        output::print_hits(&mut stdout, &hits, &opts)?;
    }

    Ok(())
}
