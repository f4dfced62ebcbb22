//! Leaderboard ranking scraped from a rating page.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Number of leading cells a ranking row must carry.
pub const RANKING_CELLS: usize = 4;

/// One row of the live leaderboard table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ranking {
    /// 1-based position on the leaderboard
    pub rank: u32,

    /// Guild name
    pub guild: String,

    /// Realm the guild plays on
    pub realm: String,

    /// Progress descriptor (first line of the cell only)
    pub progress: String,
}

impl Ranking {
    /// Build a ranking from the text of a row's cells, in column order.
    ///
    /// Extra trailing cells are ignored.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Result<Self> {
        if cells.len() < RANKING_CELLS {
            return Err(AppError::parse(format!(
                "ranking row has {} cells, expected at least {}",
                cells.len(),
                RANKING_CELLS
            )));
        }

        let raw_rank = cells[0].as_ref().trim();
        let rank = raw_rank
            .parse::<u32>()
            .map_err(|e| AppError::parse(format!("invalid rank '{raw_rank}': {e}")))?;

        let progress = cells[3]
            .as_ref()
            .split('\n')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(Self {
            rank,
            guild: cells[1].as_ref().trim().to_string(),
            realm: cells[2].as_ref().trim().to_string(),
            progress,
        })
    }
}
