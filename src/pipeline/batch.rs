// src/pipeline/batch.rs

//! Filtered retrieval over bulk export files.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::Result;
use crate::models::{BatchRanking, BatchRankingLink};
use crate::services::{BatchExportFetcher, BatchLinkLister};
use crate::utils::http::Fetcher;

type LinkPredicate = Box<dyn Fn(&BatchRankingLink) -> bool>;

/// Selects which export files to read.
///
/// Every condition that is set must hold. Empty area or realm strings count
/// as unset.
#[derive(Default)]
pub struct BatchFilter {
    pub area: Option<String>,
    pub realm: Option<String>,
    pub tier: Option<u32>,
    predicate: Option<LinkPredicate>,
}

impl BatchFilter {
    /// A filter that accepts every link.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn tier(mut self, tier: u32) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Add an arbitrary condition on top of the exact-match fields.
    pub fn with_predicate(mut self, predicate: impl Fn(&BatchRankingLink) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn matches(&self, link: &BatchRankingLink) -> bool {
        fn text_matches(filter: Option<&String>, value: &str) -> bool {
            filter.is_none_or(|f| f.is_empty() || f == value)
        }

        text_matches(self.area.as_ref(), &link.area)
            && text_matches(self.realm.as_ref(), &link.realm)
            && self.tier.is_none_or(|t| t == link.tier)
            && self.predicate.as_ref().is_none_or(|p| p(link))
    }
}

impl fmt::Debug for BatchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchFilter")
            .field("area", &self.area)
            .field("realm", &self.realm)
            .field("tier", &self.tier)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Lists exports, keeps those a filter accepts, and reads them in order.
#[derive(Debug, Clone)]
pub struct FilteredBatchSource<F> {
    lister: BatchLinkLister<F>,
    exporter: BatchExportFetcher<F>,
}

impl<F: Fetcher> FilteredBatchSource<F> {
    pub fn new(lister: BatchLinkLister<F>, exporter: BatchExportFetcher<F>) -> Self {
        Self { lister, exporter }
    }

    /// All export links, in index order.
    pub fn links(&self) -> Result<Vec<BatchRankingLink>> {
        self.lister.list()
    }

    /// Export links accepted by `filter`, in index order.
    pub fn matching_links(&self, filter: &BatchFilter) -> Result<Vec<BatchRankingLink>> {
        let links: Vec<_> = self
            .links()?
            .into_iter()
            .filter(|link| filter.matches(link))
            .collect();
        log::info!("{} export files match {:?}", links.len(), filter);
        Ok(links)
    }

    /// Rows of a single export.
    pub fn rankings(&self, link: &BatchRankingLink) -> Result<Vec<BatchRanking>> {
        self.exporter.fetch(link)
    }

    /// Lazily iterate the rows of every matching export.
    ///
    /// Nothing is fetched until the first element is requested.
    pub fn iter(&self, filter: BatchFilter) -> BatchRankingIter<'_, F> {
        BatchRankingIter {
            source: self,
            filter,
            links: None,
            rows: Vec::new().into_iter(),
            done: false,
        }
    }
}

/// Pull-based iterator over the rows of filtered export files.
///
/// The iterator stops after the last export or after yielding its first error.
#[derive(Debug)]
pub struct BatchRankingIter<'a, F> {
    source: &'a FilteredBatchSource<F>,
    filter: BatchFilter,
    links: Option<std::vec::IntoIter<BatchRankingLink>>,
    rows: std::vec::IntoIter<BatchRanking>,
    done: bool,
}

impl<F: Fetcher> Iterator for BatchRankingIter<'_, F> {
    type Item = Result<BatchRanking>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.rows.next() {
                return Some(Ok(row));
            }
            if self.done {
                return None;
            }

            if self.links.is_none() {
                match self.source.matching_links(&self.filter) {
                    Ok(links) => self.links = Some(links.into_iter()),
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }

            let Some(link) = self.links.as_mut().and_then(Iterator::next) else {
                self.done = true;
                return None;
            };

            match self.source.rankings(&link) {
                Ok(rows) => self.rows = rows.into_iter(),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<F: Fetcher> FusedIterator for BatchRankingIter<'_, F> {}
