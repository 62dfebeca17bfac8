use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::fetch::fetcher::ImageFetcher;

const FILE_SCHEME: &str = "file://";

/// Reads images from the local filesystem. Accepts plain paths and
/// `file://` URLs.
pub struct FileFetcher;

impl ImageFetcher for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = location.strip_prefix(FILE_SCHEME).unwrap_or(location);
        debug!("Reading {}", path);

        std::fs::read(path).map_err(|e| PipelineError::FetchError {
            url: location.to_string(),
            reason: e.to_string(),
        })
    }
}
