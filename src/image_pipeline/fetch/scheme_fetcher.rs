use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fetch::{FetchConfig, FileFetcher, HttpFetcher, ImageFetcher};

/// Dispatches on the location's scheme: `http://` and `https://` go to the
/// network, anything else is treated as a local path.
pub struct SchemeFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SchemeFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            file: FileFetcher,
        })
    }

    pub fn is_remote(location: &str) -> bool {
        let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

impl ImageFetcher for SchemeFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if Self::is_remote(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}
