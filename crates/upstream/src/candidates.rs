//! Candidate URL construction.
//!
//! The portal serves its JSON endpoints under a doubled path segment
//! (`/api/api/...`) on some deployments and a single one on others. Both
//! forms are tried, primary first.

use crate::config::PIN_PLACEHOLDER;

/// Substitute the PIN into a URL template, verbatim.
pub fn fill_template(template: &str, pin: &str) -> String {
    template.replace(PIN_PLACEHOLDER, pin)
}

/// Ordered candidate URLs for a JSON report: the template as given, then the
/// template with its first duplicated path segment collapsed. The second
/// candidate is omitted when the template has no such duplicate.
pub fn candidate_urls(template: &str, pin: &str) -> Vec<String> {
    let mut urls = vec![fill_template(template, pin)];
    if let Some(collapsed) = collapse_duplicate_segment(template) {
        urls.push(fill_template(&collapsed, pin));
    }
    urls
}

/// Remove one copy of the first path segment that immediately repeats.
///
/// Only the path is inspected; the host and query string are left alone.
pub fn collapse_duplicate_segment(url: &str) -> Option<String> {
    let after_scheme = url.find("://").map_or(0, |i| i + 3);
    let path_start = after_scheme + url[after_scheme..].find('/')?;
    let path_end = url[path_start..]
        .find(['?', '#'])
        .map_or(url.len(), |i| path_start + i);

    let mut segments: Vec<&str> = url[path_start..path_end].split('/').collect();
    let dup = segments
        .windows(2)
        .position(|w| !w[0].is_empty() && w[0] == w[1])?;
    segments.remove(dup);

    Some(format!(
        "{}{}{}",
        &url[..path_start],
        segments.join("/"),
        &url[path_end..]
    ))
}
