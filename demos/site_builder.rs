use clap::Parser;
use haus_head::{PageMetadataConfig, RouteRegistry, Site};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Route to render
    #[arg(short, long, default_value = "/")]
    route: String,

    /// JSON site configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Path to JSON site configuration file
    #[arg(long)]
    config_file: Option<String>,

    /// Public origin for canonical links
    #[arg(short, long)]
    base_url: Option<String>,

    /// Add an extra route at this path before rendering
    #[arg(long)]
    extra_route: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    let mut site = Site::haus();

    // Apply configuration from file if specified
    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {}", config_file);
        site = site.with_config_file(config_file)?;
    }

    // Apply configuration from string if specified (overrides file config)
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        site = site.with_config_str(&config_str)?;
    }

    if let Some(base_url) = args.base_url {
        println!("Using base URL: {}", base_url);
        site = site.with_base_url(&base_url)?;
    }

    if let Some(extra_route) = args.extra_route {
        let mut registry: RouteRegistry = site.registry().clone();
        registry.register(
            &extra_route,
            PageMetadataConfig::new("Open House", "Tour homes for sale this weekend with HAUS agents.")
                .with_keywords(["open house", "home tours"]),
        )?;
        site = site.with_routes(registry);
    }

    for warning in site.lint() {
        println!("lint: {}", warning);
    }

    let body = format!("<h1>{}</h1>", args.route);
    println!("{}", site.render_document(&args.route, &body)?);

    Ok(())
}
