// src/services/table.rs

//! Ranking table extraction from leaderboard HTML.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::Ranking;
use crate::utils::parse_selector;

/// Selector of the leaderboard table.
pub const RATING_TABLE_SELECTOR: &str = "table.rating";

/// Converts leaderboard HTML into [`Ranking`] records.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl TableExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: parse_selector(RATING_TABLE_SELECTOR)?,
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
        })
    }

    /// Extract all rankings from a page, in row order.
    ///
    /// The first row of the table is the header and is skipped. Fails with
    /// [`AppError::NotFound`] when the page has no rating table.
    pub fn extract(&self, html: &str) -> Result<Vec<Ranking>> {
        let document = Html::parse_document(html);
        let table = document
            .select(&self.table)
            .next()
            .ok_or_else(|| AppError::not_found(format!("no '{RATING_TABLE_SELECTOR}' element")))?;

        table
            .select(&self.row)
            .skip(1)
            .map(|row| self.parse_row(row))
            .collect()
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Result<Ranking> {
        let cells: Vec<String> = row
            .select(&self.cell)
            .map(|cell| cell.text().collect())
            .collect();
        Ranking::from_cells(cells.as_slice())
    }
}
