// src/models/mod.rs

//! Domain models for the ranking client.
//!
//! This module contains all data structures used throughout the crate,
//! organized by their primary purpose.

mod batch;
mod config;
mod ranking;

// Re-export all public types
pub use batch::{BatchRanking, BatchRankingLink, ExportRow, EXPORT_SUFFIX};
pub use config::{ClientConfig, Config, PaginationConfig};
pub use ranking::{Ranking, RANKING_CELLS};

/// Outcome of fetching one leaderboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingPage {
    /// Rankings on the page, in row order (never empty)
    Rankings(Vec<Ranking>),

    /// The leaderboard has no further rows
    EndOfResults,
}
