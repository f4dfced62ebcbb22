//! Service layer for the ranking client.
//!
//! This module contains the leaf fetch and parse steps:
//! - Leaderboard page fetching (`PageFetcher`)
//! - Ranking table parsing (`TableExtractor`)
//! - Export index listing (`BatchLinkLister`)
//! - Export download and decoding (`BatchExportFetcher`)

mod export;
mod links;
mod pages;
mod table;

pub use export::{BatchExportFetcher, decode_export};
pub use links::BatchLinkLister;
pub use pages::{LeaderboardQuery, PageFetcher, WORLD_REGION};
pub use table::{RATING_TABLE_SELECTOR, TableExtractor};
