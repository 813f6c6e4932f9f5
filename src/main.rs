//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Markdown articles for a personal portfolio site", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Slug (file name) for the article, derived from the title by default
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List articles, newest first
    List {
        /// Print the slugs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one article record as JSON
    Show {
        /// Slug of the article
        slug: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a preview server that renders articles on request
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let path = commands::new::create_article(&folio, &title, slug.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::List { json } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            commands::list::run(&folio, json)?;
        }

        Commands::Show { slug } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            commands::list::show(&folio, &slug)?;
        }

        Commands::Generate { watch } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate()?;
            println!("Generated successfully!");

            if watch {
                tokio::task::spawn_blocking(move || commands::generate::watch(&folio)).await??;
            }
        }

        Commands::Serve { port, ip } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port).await?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
