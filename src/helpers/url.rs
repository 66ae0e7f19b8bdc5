//! URL helper functions

use percent_encoding::percent_decode_str;

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/grid.css") // -> "/blog/css/grid.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/hello/") // -> "https://example.com/blog/posts/hello/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Split a content URI into decoded path segments.
///
/// WordPress percent-encodes non-ASCII slugs (`/caf%c3%a9/`); segments are
/// decoded so they match what a static host looks up on disk. Returns `None`
/// when a segment is not UTF-8 or would escape the output directory.
pub fn uri_segments(uri: &str) -> Option<Vec<String>> {
    let path = uri.split(['?', '#']).next().unwrap_or_default();

    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let segment = percent_decode_str(s).decode_utf8().ok()?;
            if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
                return None;
            }
            Some(segment.into_owned())
        })
        .collect()
}
