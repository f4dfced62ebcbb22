// src/services/pages.rs

//! Leaderboard page fetching.
//!
//! Builds rating page URLs of the form
//! `{base}/pve/{region}/{realm}/rating[.tierN]` and, for later pages,
//! `{base}/pve/{region}/{realm}/rating/next/{page-1}/rating[.tierN]`.

use crate::error::Result;
use crate::utils::collapse_slashes;
use crate::utils::http::Fetcher;

/// Region name of the global leaderboard.
pub const WORLD_REGION: &str = "world";

/// Which leaderboard to read: region, realm and optional tier.
///
/// Empty region or realm segments are dropped from the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub region: String,
    pub realm: String,
    pub tier: Option<u32>,
}

impl LeaderboardQuery {
    pub fn new(region: impl Into<String>, realm: impl Into<String>, tier: Option<u32>) -> Self {
        Self {
            region: region.into(),
            realm: realm.into(),
            tier,
        }
    }

    /// The global leaderboard for an optional tier.
    pub fn world(tier: Option<u32>) -> Self {
        Self::new(WORLD_REGION, "", tier)
    }

    /// Region and realm path segments. The world board has neither.
    fn segments(&self) -> (&str, &str) {
        let region = self.region.trim();
        if region.eq_ignore_ascii_case(WORLD_REGION) {
            ("", "")
        } else {
            (region, self.realm.trim())
        }
    }
}

/// Fetches raw leaderboard pages.
#[derive(Debug, Clone)]
pub struct PageFetcher<F> {
    fetcher: F,
    base_url: String,
}

impl<F: Fetcher> PageFetcher<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// URL of `page` (0-based) of the leaderboard.
    pub fn endpoint(&self, query: &LeaderboardQuery, page: u32) -> String {
        let (region, realm) = query.segments();
        let tier = query.tier.map(|t| format!(".tier{t}")).unwrap_or_default();

        let url = if page == 0 {
            format!("{}/pve/{region}/{realm}/rating{tier}", self.base_url)
        } else {
            format!(
                "{}/pve/{region}/{realm}/rating/next/{}/rating{tier}",
                self.base_url,
                page - 1
            )
        };
        collapse_slashes(&url)
    }

    /// Fetch the HTML of `page` of the leaderboard.
    pub fn fetch(&self, query: &LeaderboardQuery, page: u32) -> Result<String> {
        let url = self.endpoint(query, page);
        log::debug!("Fetching leaderboard page {page}: {url}");
        self.fetcher.fetch_text(&url)
    }
}
