//! CLI entry point for demo-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use demo_site::commands::list::ListSource;

#[derive(Parser)]
#[command(name = "demo-site")]
#[command(version)]
#[command(about = "Blog, users and routing playground demos served with axum", long_about = None)]
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
    /// Initialize a new site with a sample post and users schema
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new markdown post
    New {
        /// Title of the new post
        title: String,

        /// Author written to the front matter
        #[arg(short, long)]
        author: Option<String>,
    },

    /// List blog posts
    List {
        /// Which store to list
        #[arg(short, long, value_enum, default_value = "all")]
        source: ListSource,

        /// Print only the markdown post ids
        #[arg(long, conflicts_with = "source")]
        ids: bool,
    },

    /// Resolve a post id and print it
    Show {
        /// Post id (markdown file stem or remote numeric id)
        id: String,
    },

    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "demo_site=debug,tower_http=debug,info"
    } else {
        "demo_site=info,tower_http=info"
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
            demo_site::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, author } => {
            let site = demo_site::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = site.new_post(&title, author.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List { source, ids } => {
            let site = demo_site::Site::new(&base_dir)?;
            if ids {
                demo_site::commands::list::run_ids(&site).await?;
            } else {
                demo_site::commands::list::run(&site, source).await?;
            }
        }

        Commands::Show { id } => {
            let site = demo_site::Site::new(&base_dir)?;
            demo_site::commands::show::run(&site, &id).await?;
        }

        Commands::Serve { port, ip } => {
            let site = demo_site::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            demo_site::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("demo-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
