// src/client.rs

//! Entry point tying configuration, transport and both retrieval paths together.

use crate::error::Result;
use crate::models::{BatchRanking, BatchRankingLink, Config, RankingPage};
use crate::pipeline::{
    BatchFilter, BatchRankingIter, FilteredBatchSource, PaginatedRankingSource, RankingIter,
};
use crate::services::{
    BatchExportFetcher, BatchLinkLister, LeaderboardQuery, PageFetcher, TableExtractor,
};
use crate::utils::http::{Fetcher, HttpFetcher};

/// Client for wowprogress leaderboards and bulk exports.
#[derive(Debug, Clone)]
pub struct Wowprogress<F = HttpFetcher> {
    config: Config,
    rankings: PaginatedRankingSource<F>,
    batch: FilteredBatchSource<F>,
}

impl Wowprogress<HttpFetcher> {
    /// Create a client that talks HTTP using `config.client` settings.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.client)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher + Clone> Wowprogress<F> {
    /// Create a client over any transport. The fetcher is shared by all paths.
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self> {
        config.validate()?;

        let rankings = PaginatedRankingSource::new(
            PageFetcher::new(fetcher.clone(), config.client.base_url.clone()),
            TableExtractor::new()?,
            config.pagination.missing_table_ends,
        );
        let batch = FilteredBatchSource::new(
            BatchLinkLister::new(fetcher.clone(), &config.client.export_url)?,
            BatchExportFetcher::new(fetcher),
        );

        Ok(Self {
            config,
            rankings,
            batch,
        })
    }
}

impl<F: Fetcher> Wowprogress<F> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch and classify a single leaderboard page.
    pub fn get_rankings_page(
        &self,
        region: &str,
        realm: &str,
        tier: Option<u32>,
        page: u32,
    ) -> Result<RankingPage> {
        self.rankings
            .page(&LeaderboardQuery::new(region, realm, tier), page)
    }

    /// Lazily iterate leaderboard rankings starting at `start_page`.
    pub fn iterate_rankings(
        &self,
        region: &str,
        realm: &str,
        tier: Option<u32>,
        start_page: u32,
    ) -> RankingIter<'_, F> {
        self.rankings
            .iter(LeaderboardQuery::new(region, realm, tier), start_page)
    }

    /// All export files currently published.
    pub fn list_batch_links(&self) -> Result<Vec<BatchRankingLink>> {
        self.batch.links()
    }

    /// Rows of one export file.
    pub fn get_export_rankings_from_link(
        &self,
        link: &BatchRankingLink,
    ) -> Result<Vec<BatchRanking>> {
        self.batch.rankings(link)
    }

    /// Lazily iterate the rows of every export `filter` accepts.
    pub fn iterate_batch_rankings(&self, filter: BatchFilter) -> BatchRankingIter<'_, F> {
        self.batch.iter(filter)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::AppError;

    /// Fails every request and counts how many were made.
    #[derive(Default)]
    struct Offline {
        requests: Cell<usize>,
    }

    impl Fetcher for Offline {
        fn fetch_text(&self, url: &str) -> Result<String> {
            self.requests.set(self.requests.get() + 1);
            Err(AppError::not_found(url.to_string()))
        }

        fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.requests.set(self.requests.get() + 1);
            Err(AppError::not_found(url.to_string()))
        }
    }

    #[test]
    fn test_with_fetcher_rejects_invalid_config() {
        let mut config = Config::default();
        config.client.timeout_secs = 0;
        let offline = Offline::default();
        assert!(matches!(
            Wowprogress::with_fetcher(config, &offline),
            Err(AppError::Validation(_))
        ));
        assert_eq!(offline.requests.get(), 0);
    }

    #[test]
    fn test_iterators_do_not_fetch_until_pulled() {
        let offline = Offline::default();
        let client = Wowprogress::with_fetcher(Config::default(), &offline).unwrap();

        let mut rankings = client.iterate_rankings("us", "", Some(28), 0);
        let mut batch = client.iterate_batch_rankings(BatchFilter::new());
        assert_eq!(offline.requests.get(), 0);

        assert!(matches!(rankings.next(), Some(Err(_))));
        assert_eq!(offline.requests.get(), 1);

        assert!(matches!(batch.next(), Some(Err(_))));
        assert_eq!(offline.requests.get(), 2);
    }

    #[test]
    fn test_first_pull_surfaces_transport_error() {
        let offline = Offline::default();
        let client = Wowprogress::with_fetcher(Config::default(), &offline).unwrap();
        let mut iter = client.iterate_rankings("us", "", Some(28), 0);
        assert!(matches!(
            iter.next(),
            Some(Err(AppError::NotFound(url))) if url == "https://www.wowprogress.com/pve/us/rating.tier28"
        ));
        assert!(iter.next().is_none());
        assert_eq!(offline.requests.get(), 1);
    }
}
