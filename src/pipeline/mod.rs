//! Orchestration over the fetch and parse services.
//!
//! - `PaginatedRankingSource`: leaderboard rankings across pages
//! - `FilteredBatchSource`: export rows across filtered export files

pub mod batch;
pub mod rankings;

pub use batch::{BatchFilter, BatchRankingIter, FilteredBatchSource};
pub use rankings::{PaginatedRankingSource, RankingIter};
