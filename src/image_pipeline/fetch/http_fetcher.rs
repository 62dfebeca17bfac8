use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::fetch::fetcher::ImageFetcher;
use crate::image_pipeline::fetch::types::FetchConfig;

/// Fetches images over HTTP(S) with a blocking `reqwest` client.
///
/// The client, and with it the timeout, is fixed at construction.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PipelineError::ClientError(e.to_string()))?;

        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);

        let fetch_error = |e: reqwest::Error| PipelineError::FetchError {
            url: url.to_string(),
            reason: e.to_string(),
        };

        // The response owns the connection; it is released when it goes out
        // of scope, on the error returns below as well.
        let response = self.client.get(url).send().map_err(fetch_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PipelineError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(fetch_error)?;
        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
