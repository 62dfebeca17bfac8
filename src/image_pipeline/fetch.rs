//! Image fetching module
//!
//! Retrieves encoded image bytes from HTTP(S) URLs or local paths.

mod fetcher;
mod http_fetcher;
mod file_fetcher;
mod scheme_fetcher;
pub mod types;

#[cfg(test)]
mod tests;

pub use fetcher::ImageFetcher;
pub use http_fetcher::HttpFetcher;
pub use file_fetcher::FileFetcher;
pub use scheme_fetcher::SchemeFetcher;
pub use types::{FetchConfig, FetchConfigBuilder};
