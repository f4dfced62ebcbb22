//! Utility functions and helpers.

pub mod http;

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;
use url::Url;

use crate::error::{AppError, Result};

static REPEATED_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("/{2,}").expect("slash pattern is valid"));

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Collapse runs of `/` after the scheme separator into a single `/`.
pub fn collapse_slashes(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => format!("{scheme}://{}", REPEATED_SLASHES.replace_all(rest, "/")),
        None => REPEATED_SLASHES.replace_all(url, "/").into_owned(),
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
