// src/services/export.rs

//! Export file download and decoding.

use std::io::Read;

use flate2::read::GzDecoder;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{BatchRanking, BatchRankingLink, ExportRow};
use crate::utils::http::Fetcher;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Downloads one export file and maps its rows to [`BatchRanking`]s.
#[derive(Debug, Clone)]
pub struct BatchExportFetcher<F> {
    fetcher: F,
}

impl<F: Fetcher> BatchExportFetcher<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch and decode all rows of the export behind `link`.
    pub fn fetch(&self, link: &BatchRankingLink) -> Result<Vec<BatchRanking>> {
        log::debug!("Downloading export {}: {}", link.label(), link.export_url);
        let bytes = self.fetcher.fetch_bytes(&link.export_url)?;
        let rankings = decode_export(&bytes, link)?;
        log::info!("Export {}: {} rankings", link.label(), rankings.len());
        Ok(rankings)
    }
}

/// Decode a (possibly gzip-compressed) export payload.
///
/// Malformed gzip or JSON yields [`AppError::Decode`]; a row missing a
/// required field yields [`AppError::Format`].
pub fn decode_export(bytes: &[u8], link: &BatchRankingLink) -> Result<Vec<BatchRanking>> {
    let json = decompress(bytes)?;
    let rows: Vec<Value> = serde_json::from_slice(&json)
        .map_err(|e| AppError::decode(format!("export {} is not a JSON array: {e}", link.label())))?;

    rows.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<ExportRow>(value)
                .map(|row| BatchRanking::from_row(row, link))
                .map_err(|e| {
                    AppError::format(format!("row {index} of export {}: {e}", link.label()))
                })
        })
        .collect()
}

// The transport may already have stripped a Content-Encoding layer.
fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes.to_vec());
    }

    let mut decoder = GzDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| AppError::decode(format!("gzip: {e}")))?;
    Ok(decompressed)
}
