use crate::audit::{AuditReport, audit_html};
use crate::config::AuditConfig;
use crate::error::Result;
use crate::metadata::ResolvedMetadata;
use crate::utils;
use fantoccini::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::time::timeout;
use url::Url;

type AuditJob = (String, ResolvedMetadata);

/// Starts an async audit of the given routes and returns a receiver that
/// yields one report per route. The receiver closes once every route is done.
///
/// # Arguments
///
/// * `config` - Audit configuration (base URL, WebDriver, concurrency)
/// * `pages` - Routes paired with the metadata they are expected to serve
pub async fn start(
    config: &AuditConfig,
    pages: Vec<AuditJob>,
) -> Result<mpsc::Receiver<AuditReport>> {
    let base_url = Url::parse(&config.base_url)?;
    ::log::info!("Auditing {} routes on {}", pages.len(), base_url);

    let (job_tx, job_rx) = mpsc::channel::<AuditJob>(pages.len().max(1));
    let (result_tx, result_rx) = mpsc::channel::<AuditReport>(pages.len().max(1));

    let num_workers = config.max_concurrency.max(1).min(pages.len().max(1));

    // Queue everything up front; workers stop once the queue drains
    for job in pages {
        if job_tx.send(job).await.is_err() {
            break;
        }
    }
    drop(job_tx);

    let job_rx = Arc::new(Mutex::new(job_rx));
    for worker_id in 0..num_workers {
        spawn_worker(
            worker_id,
            config.webdriver_url.clone(),
            base_url.clone(),
            config.page_timeout_ms,
            Arc::clone(&job_rx),
            result_tx.clone(),
        );
    }

    // Each worker holds its own sender; the channel closes when the last one exits
    drop(result_tx);

    Ok(result_rx)
}

/// Spawns a single worker that audits routes until the queue is empty
fn spawn_worker(
    worker_id: usize,
    webdriver_url: String,
    base_url: Url,
    page_timeout_ms: u64,
    job_rx: Arc<Mutex<mpsc::Receiver<AuditJob>>>,
    result_tx: mpsc::Sender<AuditReport>,
) {
    ::log::trace!("Spawning audit worker {}", worker_id);

    tokio::spawn(async move {
        // Connect lazily so idle workers never open a session
        let mut client: Option<Client> = None;

        while let Some((route, expected)) = next_job(&job_rx).await {
            let url = match utils::join_route(&base_url, &route) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    let report = AuditReport::failed(&route, base_url.as_str(), e.to_string());
                    if result_tx.send(report).await.is_err() {
                        break;
                    }
                    continue;
                }
            };

            if client.is_none() {
                client = connect_to_webdriver(worker_id, &webdriver_url).await;
            }

            let report = match &client {
                Some(client) => {
                    let limit = utils::calculate_timeout(page_timeout_ms, url.len());
                    audit_page(worker_id, client, &route, &url, &expected, limit).await
                }
                None => AuditReport::failed(&route, &url, "no WebDriver session available"),
            };

            if let Err(e) = result_tx.send(report).await {
                ::log::error!("Worker {} failed to send report: {}", worker_id, e);
                break;
            }
        }

        if let Some(client) = client {
            if let Err(e) = client.close().await {
                ::log::warn!("Worker {} failed to close client: {}", worker_id, e);
            }
        }
        ::log::debug!("Audit worker {} finished", worker_id);
    });
}

async fn next_job(job_rx: &Arc<Mutex<mpsc::Receiver<AuditJob>>>) -> Option<AuditJob> {
    let mut rx = job_rx.lock().await;
    rx.recv().await
}

/// Connects to the WebDriver instance
async fn connect_to_webdriver(worker_id: usize, webdriver_url: &str) -> Option<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!(
                "Worker {} connected to WebDriver at {}",
                worker_id,
                webdriver_url
            );
            Some(client)
        }
        Err(e) => {
            ::log::error!(
                "Worker {} failed to connect to WebDriver at {}: {}",
                worker_id,
                webdriver_url,
                e
            );
            ::log::error!(
                "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
            );
            None
        }
    }
}

/// Loads a page in the browser and compares its head with the expected metadata
async fn audit_page(
    worker_id: usize,
    client: &Client,
    route: &str,
    url: &str,
    expected: &ResolvedMetadata,
    limit: Duration,
) -> AuditReport {
    let started = std::time::Instant::now();

    let source = timeout(limit, async {
        match client.goto(url).await {
            Ok(()) => client.source().await,
            Err(e) => Err(e),
        }
    })
    .await;

    let report = match source {
        Ok(Ok(html)) => audit_html(route, url, &html, expected),
        Ok(Err(e)) => {
            ::log::error!("Worker {} failed to load {}: {}", worker_id, url, e);
            AuditReport::failed(route, url, e.to_string())
        }
        Err(_) => {
            ::log::error!("Timeout loading: {}", url);
            AuditReport::failed(route, url, format!("timed out after {:?}", limit))
        }
    };

    ::log::debug!(
        "Worker {} audited {} in {:.2} seconds",
        worker_id,
        url,
        started.elapsed().as_secs_f64()
    );
    report
}
