//! Bulk export descriptors and rows.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// File suffix of a compressed export.
pub const EXPORT_SUFFIX: &str = ".json.gz";

const TIER_PREFIX: &str = "tier";

/// Descriptor of one downloadable export file.
///
/// Area, realm and tier are decoded from a file name of the form
/// `{area}_{realm}_tier{N}.json.gz`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchRankingLink {
    pub area: String,
    pub realm: String,
    pub tier: u32,
    pub export_url: String,
}

impl BatchRankingLink {
    /// Decode a link from the absolute URL of an export file.
    pub fn from_url(url: &str) -> Result<Self> {
        let file_name = url.rsplit('/').next().unwrap_or(url);
        let stem = file_name.strip_suffix(EXPORT_SUFFIX).ok_or_else(|| {
            AppError::format(format!(
                "export file '{file_name}' does not end in {EXPORT_SUFFIX}"
            ))
        })?;

        let parts: Vec<&str> = stem.split('_').collect();
        let [area, realm, tier] = parts.as_slice() else {
            return Err(AppError::format(format!(
                "export file '{file_name}' must have exactly three '_'-separated parts, found {}",
                parts.len()
            )));
        };

        let tier = parse_tier(tier)
            .ok_or_else(|| AppError::format(format!("invalid tier segment '{tier}' in '{file_name}'")))?;

        Ok(Self {
            area: (*area).to_string(),
            realm: (*realm).to_string(),
            tier,
            export_url: url.to_string(),
        })
    }

    /// Short `{area}/{realm}/tier{N}` label for logging.
    pub fn label(&self) -> String {
        format!("{}/{}/tier{}", self.area, self.realm, self.tier)
    }
}

fn parse_tier(segment: &str) -> Option<u32> {
    let digits = segment.strip_prefix(TIER_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One export row as published, before link metadata is attached.
///
/// Every field is required; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRow {
    pub score: i64,
    pub world_rank: u32,
    pub area_rank: u32,
    pub realm_rank: u32,
    pub name: String,
    pub url: String,
}

/// One ranking row of a bulk export, tagged with its source link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchRanking {
    pub score: i64,
    pub world_rank: u32,
    pub area_rank: u32,
    pub realm_rank: u32,
    pub name: String,
    pub url: String,
    pub area: String,
    pub realm: String,
    pub tier: u32,
}

impl BatchRanking {
    /// Attach the owning link's area, realm and tier to a row.
    pub fn from_row(row: ExportRow, link: &BatchRankingLink) -> Self {
        Self {
            score: row.score,
            world_rank: row.world_rank,
            area_rank: row.area_rank,
            realm_rank: row.realm_rank,
            name: row.name,
            url: row.url,
            area: link.area.clone(),
            realm: link.realm.clone(),
            tier: link.tier,
        }
    }
}
