use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Utility function to create a reasonable timeout for a page load
pub fn calculate_timeout(base_ms: u64, url_length: usize) -> Duration {
    // Longer URLs tend to be deeper, heavier pages
    let additional_ms = (url_length / 20) as u64 * 100;
    Duration::from_millis(base_ms.saturating_add(additional_ms))
}

/// Join a route path onto a base URL, keeping any path prefix the base has
pub fn join_route(base: &Url, route: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(route.trim_start_matches('/'))
}

/// Map a normalized route to the relative path its exported head fragment
/// is written to.
///
/// Each segment becomes a directory, percent-encoded with `.` escaped too, so
/// distinct segments never share a name and no directory can end in `.html`.
/// The root maps to `index.html`, which `/index` also maps to; callers that
/// write files must check for that.
pub fn route_file_path(route: &str) -> PathBuf {
    let segments: Vec<String> = route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).replace('.', "%2E"))
        .collect();

    let Some((last, dirs)) = segments.split_last() else {
        return PathBuf::from("index.html");
    };

    let mut path: PathBuf = dirs.iter().collect();
    path.push(format!("{}.html", last));
    path
}
