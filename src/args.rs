use clap::{Parser, Subcommand};
use haus_head::{Result, Site};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "haus-head")]
#[command(about = "Resolve, render and audit page metadata for the HAUS site")]
#[command(version)]
pub struct Args {
    /// Site configuration JSON file (brand, defaults, index policy)
    #[arg(long, global = true)]
    pub site: Option<PathBuf>,

    /// Route table JSON file (defaults to the built-in HAUS routes)
    #[arg(long, global = true)]
    pub routes: Option<PathBuf>,

    /// Public origin used for canonical links
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered routes and their robots directive
    List,

    /// Print the resolved metadata for a route as JSON
    Resolve {
        /// Route path, e.g. /about
        route: String,
    },

    /// Print the head tags for a route
    Render {
        /// Route path, e.g. /about
        route: String,

        /// Print a full document shell instead of just the head tags
        #[arg(long)]
        document: bool,
    },

    /// Check the route table for metadata problems
    Lint,

    /// Write one head fragment per route into a directory
    Export {
        /// Output directory
        dir: PathBuf,
    },

    /// Load every route from a running site and compare its head
    Audit {
        /// Origin of the deployed site, e.g. http://localhost:3000
        #[arg(value_name = "BASE_URL")]
        target: String,

        /// Number of concurrent browser sessions
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,

        /// WebDriver URL (WEBDRIVER_URL overrides this)
        #[arg(long)]
        webdriver: Option<String>,

        /// Per-page timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

/// Build the site from the global options
pub fn build_site(args: &Args) -> Result<Site> {
    let mut site = Site::haus();

    if let Some(path) = &args.site {
        ::log::info!("Loading site configuration from {}", path.display());
        site = site.with_config_file(path)?;
    }
    if let Some(path) = &args.routes {
        ::log::info!("Loading routes from {}", path.display());
        site = site.with_routes_file(path)?;
    }
    if let Some(base_url) = &args.base_url {
        site = site.with_base_url(base_url)?;
    }

    Ok(site)
}
