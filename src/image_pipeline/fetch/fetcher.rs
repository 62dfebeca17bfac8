use crate::image_pipeline::common::error::Result;

pub trait ImageFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}
