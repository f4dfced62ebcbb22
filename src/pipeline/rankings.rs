// src/pipeline/rankings.rs

//! Paginated leaderboard retrieval.

use std::iter::FusedIterator;

use crate::error::{AppError, Result};
use crate::models::{Ranking, RankingPage};
use crate::services::{LeaderboardQuery, PageFetcher, TableExtractor};
use crate::utils::http::Fetcher;

/// Drives page fetching and table extraction across leaderboard pages.
#[derive(Debug, Clone)]
pub struct PaginatedRankingSource<F> {
    pages: PageFetcher<F>,
    extractor: TableExtractor,
    missing_table_ends: bool,
}

impl<F: Fetcher> PaginatedRankingSource<F> {
    /// Create a source. With `missing_table_ends` a page lacking the rating
    /// table ends the leaderboard; otherwise it is a not-found error.
    pub fn new(pages: PageFetcher<F>, extractor: TableExtractor, missing_table_ends: bool) -> Self {
        Self {
            pages,
            extractor,
            missing_table_ends,
        }
    }

    /// Fetch one page and classify it.
    ///
    /// An empty table always ends the leaderboard.
    pub fn page(&self, query: &LeaderboardQuery, page: u32) -> Result<RankingPage> {
        let html = self.pages.fetch(query, page)?;
        match self.extractor.extract(&html) {
            Ok(rankings) if rankings.is_empty() => {
                log::debug!("Page {page} has an empty rating table");
                Ok(RankingPage::EndOfResults)
            }
            Ok(rankings) => {
                log::debug!("Page {page}: {} rankings", rankings.len());
                Ok(RankingPage::Rankings(rankings))
            }
            Err(AppError::NotFound(reason)) if self.missing_table_ends => {
                log::debug!("Page {page} ends the leaderboard: {reason}");
                Ok(RankingPage::EndOfResults)
            }
            Err(e) => Err(e),
        }
    }

    /// Lazily iterate rankings from `start_page` onwards.
    pub fn iter(&self, query: LeaderboardQuery, start_page: u32) -> RankingIter<'_, F> {
        RankingIter {
            source: self,
            query,
            next_page: start_page,
            buffer: Vec::new().into_iter(),
            done: false,
        }
    }
}

/// Pull-based iterator over leaderboard rankings.
///
/// A page is fetched only when its first ranking is requested. The iterator
/// stops after the leaderboard ends or after yielding its first error.
#[derive(Debug)]
pub struct RankingIter<'a, F> {
    source: &'a PaginatedRankingSource<F>,
    query: LeaderboardQuery,
    next_page: u32,
    buffer: std::vec::IntoIter<Ranking>,
    done: bool,
}

impl<F> RankingIter<'_, F> {
    /// Page that the next fetch will request; use it to resume elsewhere.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }
}

impl<F: Fetcher> Iterator for RankingIter<'_, F> {
    type Item = Result<Ranking>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(ranking) = self.buffer.next() {
                return Some(Ok(ranking));
            }
            if self.done {
                return None;
            }

            match self.source.page(&self.query, self.next_page) {
                Ok(RankingPage::Rankings(rankings)) => {
                    // The last addressable page ends the sequence once drained.
                    match self.next_page.checked_add(1) {
                        Some(page) => self.next_page = page,
                        None => self.done = true,
                    }
                    self.buffer = rankings.into_iter();
                }
                Ok(RankingPage::EndOfResults) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<F: Fetcher> FusedIterator for RankingIter<'_, F> {}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Pages {
        pages: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl Pages {
        fn with(mut self, url: &str, html: String) -> Self {
            self.pages.insert(url.to_string(), html);
            self
        }
    }

    impl Fetcher for Pages {
        fn fetch_text(&self, url: &str) -> Result<String> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| {
                AppError::fetch(url, reqwest::StatusCode::NOT_FOUND)
            })
        }

        fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.fetch_text(url).map(String::into_bytes)
        }
    }

    fn table(ranks: &[u32]) -> String {
        let rows: String = ranks
            .iter()
            .map(|r| format!("<tr><td>{r}</td><td>Guild {r}</td><td>Realm</td><td>{r}/8 (M)</td></tr>"))
            .collect();
        format!(r#"<table class="rating"><tr><th>#</th></tr>{rows}</table>"#)
    }

    fn source(pages: &Pages, missing_table_ends: bool) -> PaginatedRankingSource<&Pages> {
        PaginatedRankingSource::new(
            PageFetcher::new(pages, "https://host"),
            TableExtractor::new().unwrap(),
            missing_table_ends,
        )
    }

    fn query() -> LeaderboardQuery {
        LeaderboardQuery::new("eu", "", Some(30))
    }

    const PAGE0: &str = "https://host/pve/eu/rating.tier30";
    const PAGE1: &str = "https://host/pve/eu/rating/next/0/rating.tier30";
    const PAGE2: &str = "https://host/pve/eu/rating/next/1/rating.tier30";

    #[test]
    fn test_iterates_across_pages_until_missing_table() {
        let pages = Pages::default()
            .with(PAGE0, table(&[1, 2]))
            .with(PAGE1, table(&[3]))
            .with(PAGE2, "<html><body>No guilds</body></html>".to_string());
        let source = source(&pages, true);

        let ranks: Vec<u32> = source
            .iter(query(), 0)
            .map(|r| r.unwrap().rank)
            .collect();

        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(*pages.requests.borrow(), vec![PAGE0, PAGE1, PAGE2]);
    }

    #[test]
    fn test_empty_table_ends() {
        let pages = Pages::default().with(PAGE0, table(&[]));
        let source = source(&pages, false);
        assert_eq!(source.page(&query(), 0).unwrap(), RankingPage::EndOfResults);
        assert_eq!(source.iter(query(), 0).count(), 0);
    }

    #[test]
    fn test_missing_table_is_error_when_strict() {
        let pages = Pages::default().with(PAGE0, "<p>maintenance</p>".to_string());
        let source = source(&pages, false);

        let mut iter = source.iter(query(), 0);
        assert!(matches!(iter.next(), Some(Err(AppError::NotFound(_)))));
        assert!(iter.next().is_none());
        assert_eq!(pages.requests.borrow().len(), 1);
    }

    #[test]
    fn test_fetches_only_pages_that_are_pulled() {
        let pages = Pages::default()
            .with(PAGE0, table(&[1, 2, 3]))
            .with(PAGE1, table(&[4, 5, 6]));
        let source = source(&pages, true);
        let mut iter = source.iter(query(), 0);

        assert_eq!(iter.next().unwrap().unwrap().rank, 1);
        assert_eq!(pages.requests.borrow().len(), 1);

        // Draining the rest of page 0 does not touch page 1.
        iter.next();
        iter.next();
        assert_eq!(pages.requests.borrow().len(), 1);
        assert_eq!(iter.next_page(), 1);

        assert_eq!(iter.next().unwrap().unwrap().rank, 4);
        assert_eq!(pages.requests.borrow().len(), 2);
    }

    #[test]
    fn test_start_page_offset() {
        let pages = Pages::default().with(PAGE2, table(&[41, 42]));
        let source = source(&pages, true);

        let first = source.iter(query(), 2).next().unwrap().unwrap();
        assert_eq!(first.rank, 41);
        assert_eq!(*pages.requests.borrow(), vec![PAGE2]);
    }

    #[test]
    fn test_last_page_number_ends_after_its_rows() {
        let last = "https://host/pve/eu/rating/next/4294967294/rating.tier30";
        let pages = Pages::default().with(last, table(&[7, 8]));
        let source = source(&pages, true);

        let ranks: Vec<u32> = source
            .iter(query(), u32::MAX)
            .map(|r| r.unwrap().rank)
            .collect();

        assert_eq!(ranks, vec![7, 8]);
        assert_eq!(*pages.requests.borrow(), vec![last]);
    }

    #[test]
    fn test_fetch_error_stops_iteration() {
        let pages = Pages::default().with(PAGE0, table(&[1]));
        let source = source(&pages, true);
        let results: Vec<_> = source.iter(query(), 0).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(AppError::Fetch { .. })));
    }
}
