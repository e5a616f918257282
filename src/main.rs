use clap::Parser;
use haus_head::audit::AuditReport;
use haus_head::{AuditConfig, Result, Site};
use std::process::ExitCode;

mod args;
use args::{Args, Command, build_site};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let site = match build_site(&args) {
        Ok(site) => site,
        Err(e) => {
            ::log::error!("Failed to load site: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&site, args.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs a command; `Ok(false)` means it ran but found problems
async fn run(site: &Site, command: Command) -> Result<bool> {
    match command {
        Command::List => {
            for (route, metadata) in site.resolve_all() {
                println!("{:<16} {}", route, metadata.robots);
            }
            Ok(true)
        }
        Command::Resolve { route } => {
            let metadata = site.resolve(&route)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            Ok(true)
        }
        Command::Render { route, document } => {
            if document {
                print!("{}", site.render_document(&route, "")?);
            } else {
                println!("{}", site.render_head(&route)?);
            }
            Ok(true)
        }
        Command::Lint => {
            let warnings = site.lint();
            for warning in &warnings {
                println!("{}", warning);
            }
            ::log::info!("{} lint warnings", warnings.len());
            Ok(warnings.is_empty())
        }
        Command::Export { dir } => {
            for path in site.export(&dir)? {
                println!("{}", path.display());
            }
            Ok(true)
        }
        Command::Audit {
            target,
            concurrency,
            webdriver,
            timeout,
        } => {
            let mut config = AuditConfig::new(&target).with_timeout_secs(timeout);
            config.max_concurrency = concurrency;
            if let Some(webdriver) = webdriver {
                config.webdriver_url = webdriver;
            }
            audit(site, &config).await
        }
    }
}

async fn audit(site: &Site, config: &AuditConfig) -> Result<bool> {
    println!("Note: auditing requires a WebDriver server (e.g., ChromeDriver).");

    let mut rx = site.audit(config).await?;
    let start_time = std::time::Instant::now();
    let mut failures = 0;
    let mut audited = 0;

    while let Some(report) = rx.recv().await {
        audited += 1;
        if !report.is_ok() {
            failures += 1;
        }
        print_report(&report);
    }

    ::log::info!(
        "Audit complete - {} routes in {:.2} seconds",
        audited,
        start_time.elapsed().as_secs_f64()
    );
    println!("{} of {} routes passed", audited - failures, audited);
    Ok(failures == 0)
}

fn print_report(report: &AuditReport) {
    if let Some(error) = &report.error {
        println!("FAIL {} ({})", report.route, error);
        return;
    }
    if report.mismatches.is_empty() {
        println!("ok   {}", report.route);
        return;
    }

    println!("FAIL {}", report.route);
    for mismatch in &report.mismatches {
        println!(
            "     {}: expected {:?}, found {:?}",
            mismatch.field, mismatch.expected, mismatch.found
        );
    }
}
