//! `Link` header pagination.

use reqwest::header::{HeaderMap, LINK};

/// URL of the `rel="next"` page, if the response has one.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(parse_next)
}

fn parse_next(link: &str) -> Option<String> {
    let mut parts = link.split(';').map(str::trim);
    let target = parts.next()?;
    let url = target.strip_prefix('<')?.strip_suffix('>')?;
    let is_next = parts.any(|param| {
        param
            .strip_prefix("rel=")
            .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
            .unwrap_or(false)
    });
    is_next.then(|| url.to_string())
}
