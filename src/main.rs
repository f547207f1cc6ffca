//! CLI entry point for site-content

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_content::commands::list::ListOptions;
use site_content::commands::show::ShowFormat;
use site_content::content::Field;
use site_content::helpers::{SortOrder, DEFAULT_PER_PAGE};

#[derive(Parser)]
#[command(name = "site-content")]
#[command(version)]
#[command(about = "Inspect the blog content of the marketing site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Include unpublished posts
        #[arg(long)]
        drafts: bool,

        /// Keep posts whose title, description or category contains this
        #[arg(short, long)]
        search: Option<String>,

        /// Order of the listing (latest, oldest, title)
        #[arg(long, default_value_t = SortOrder::Latest)]
        sort: SortOrder,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Posts per page
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: usize,
    },

    /// Show a single post
    Show {
        /// Slug of the post (file name without .md)
        slug: String,

        /// Category the post lives in; searched for when omitted
        #[arg(long)]
        category: Option<String>,

        /// Allow unpublished or broken posts
        #[arg(long)]
        drafts: bool,

        /// Render the body to HTML
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the post record as JSON
        #[arg(long)]
        json: bool,

        /// Comma separated fields to load (e.g. "title,date,content")
        #[arg(short, long)]
        fields: Option<String>,
    },

    /// Print the effective site configuration
    Config,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "site_content=debug,info"
    } else {
        "site_content=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    let site = site_content::Site::new(&base_dir);
    tracing::debug!("Reading content from {:?}", site.posts_dir);

    match cli.command {
        Commands::List {
            r#type,
            category,
            drafts,
            search,
            sort,
            page,
            per_page,
        } => {
            let options = ListOptions {
                category,
                drafts,
                search,
                sort,
                page,
                per_page,
            };
            site_content::commands::list::run(&site, &r#type, &options)?;
        }

        Commands::Show {
            slug,
            category,
            drafts,
            html,
            json,
            fields,
        } => {
            let fields = match fields {
                Some(list) => Field::parse_list(&list),
                None => site_content::commands::show::default_fields(),
            };
            let format = if json {
                ShowFormat::Json
            } else if html {
                ShowFormat::Html
            } else {
                ShowFormat::Text
            };
            site_content::commands::show::run(
                &site,
                &slug,
                category.as_deref(),
                drafts,
                &fields,
                format,
            )?;
        }

        Commands::Config => {
            site_content::commands::config::run(&site)?;
        }

        Commands::Version => {
            println!("site-content version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
