pub mod config;
pub mod error;
pub mod http_client;
pub mod posting;
pub mod extractor;
pub mod filter;
pub mod scraper;
pub mod output;
pub mod delay_manager;
pub mod logger;

// Exporting types for convenience
pub use config::ScraperConfig;
pub use error::{ConfigError, FetchError, OutputError};
pub use http_client::{FetchResponse, HttpFetcher, ReqwestFetcher};
pub use delay_manager::{Delay, ThreadDelay};
pub use posting::Posting;
pub use extractor::Extractor;
pub use filter::KeywordFilter;
pub use crate::scraper::{DetailOutcome, ScrapeReport, Scraper, Termination};
