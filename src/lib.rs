// src/lib.rs

//! wowprogress ranking client library
//!
//! Reads guild rankings either by scraping the paginated leaderboard pages or
//! by downloading the gzip/JSON bulk exports. Both paths yield lazy iterators
//! that only touch the network when the next element is pulled.

pub mod client;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use client::Wowprogress;
pub use error::{AppError, Result};
pub use models::{BatchRanking, BatchRankingLink, Config, Ranking, RankingPage};
pub use pipeline::BatchFilter;
