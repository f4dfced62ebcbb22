// src/services/links.rs

//! Export index listing.

use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::{BatchRankingLink, EXPORT_SUFFIX};
use crate::utils::http::Fetcher;
use crate::utils::{parse_selector, resolve_url};

/// Lists the export files published on the export index page.
#[derive(Debug, Clone)]
pub struct BatchLinkLister<F> {
    fetcher: F,
    index_url: Url,
    anchor: Selector,
}

impl<F: Fetcher> BatchLinkLister<F> {
    pub fn new(fetcher: F, index_url: &str) -> Result<Self> {
        Ok(Self {
            fetcher,
            index_url: Url::parse(index_url)?,
            anchor: parse_selector("a[href]")?,
        })
    }

    /// Fetch the index and decode every export link on it, in page order.
    pub fn list(&self) -> Result<Vec<BatchRankingLink>> {
        log::debug!("Fetching export index: {}", self.index_url);
        let html = self.fetcher.fetch_text(self.index_url.as_str())?;
        let links = self.links_from_html(&html)?;
        log::info!("Found {} export files", links.len());
        Ok(links)
    }

    /// Decode export links from index HTML.
    pub fn links_from_html(&self, html: &str) -> Result<Vec<BatchRankingLink>> {
        let document = Html::parse_document(html);
        document
            .select(&self.anchor)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.ends_with(EXPORT_SUFFIX))
            .map(|href| BatchRankingLink::from_url(&resolve_url(&self.index_url, href)))
            .collect()
    }
}
