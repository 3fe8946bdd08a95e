//! CLI entry point for folio

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands;
use folio_rs::content::{Difficulty, Domain};
use folio_rs::query::Query;
use folio_rs::Site;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Content layer for a blog and coding-challenge portfolio", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every post of a domain, newest first
    #[command(alias = "ls")]
    List {
        #[arg(value_enum)]
        domain: Domain,
    },

    /// List tags with their counts
    Tags {
        #[arg(value_enum)]
        domain: Domain,
    },

    /// List challenge platforms with their counts
    Platforms,

    /// List challenge counts per difficulty
    Difficulties,

    /// Search and filter posts
    #[command(alias = "s")]
    Search {
        #[arg(value_enum)]
        domain: Domain,

        /// Text to look for in titles, summaries, bodies, tags and platforms
        text: Option<String>,

        /// Only posts with this exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only challenges from this platform
        #[arg(short, long)]
        platform: Option<String>,

        /// Only challenges of this difficulty (1-5)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Keep only the newest N results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the newest posts of a domain
    Latest {
        #[arg(value_enum)]
        domain: Domain,
    },

    /// Show a single post
    Show {
        #[arg(value_enum)]
        domain: Domain,

        slug: String,
    },

    /// Show posts related to a post
    Related {
        slug: String,

        #[arg(long, value_enum, default_value = "articles")]
        domain: Domain,
    },

    /// Validate every content file
    Check,

    /// Create a new article or challenge
    New {
        #[arg(value_enum)]
        domain: Domain,

        /// Title of the new post
        title: String,

        /// Short description
        #[arg(short, long)]
        summary: Option<String>,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Challenge platform
        #[arg(short, long)]
        platform: Option<String>,

        /// Challenge difficulty (1-5)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Comma separated solution languages
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
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
        None => std::env::current_dir()?,
    };
    let json = cli.json;

    match cli.command {
        Commands::List { domain } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, domain, json)?;
        }

        Commands::Tags { domain } => {
            let site = Site::new(&base_dir)?;
            commands::list::tags(&site, domain, json)?;
        }

        Commands::Platforms => {
            let site = Site::new(&base_dir)?;
            commands::list::platforms(&site, json)?;
        }

        Commands::Difficulties => {
            let site = Site::new(&base_dir)?;
            commands::list::difficulties(&site, json)?;
        }

        Commands::Search {
            domain,
            text,
            tag,
            platform,
            difficulty,
            limit,
        } => {
            let site = Site::new(&base_dir)?;
            let query = Query {
                search: text,
                tag,
                platform,
                difficulty,
                limit,
            };
            commands::search::run(&site, domain, &query, json)?;
        }

        Commands::Latest { domain } => {
            let site = Site::new(&base_dir)?;
            commands::search::latest(&site, domain, json)?;
        }

        Commands::Show { domain, slug } => {
            let site = Site::new(&base_dir)?;
            commands::show::run(&site, domain, &slug, json)?;
        }

        Commands::Related { slug, domain } => {
            let site = Site::new(&base_dir)?;
            commands::show::related(&site, domain, &slug, json)?;
        }

        Commands::Check => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Checking content in {:?}", base_dir);
            commands::check::run(&site)?;
        }

        Commands::New {
            domain,
            title,
            summary,
            tags,
            platform,
            difficulty,
            languages,
        } => {
            let site = Site::new(&base_dir)?;
            let post = commands::new::NewPost {
                title,
                summary,
                tags,
                platform,
                difficulty,
                languages,
            };
            let path =
                commands::new::create_post(&site, domain, &post, Local::now().date_naive())?;
            println!("Created: {:?}", path);
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
