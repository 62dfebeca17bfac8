//! Batch input, configuration and report types

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::image_pipeline::batch::timing::PipelineTimings;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::compare::ComparisonStats;
use crate::image_pipeline::fetch::FetchConfig;
use crate::image_pipeline::raster::MismatchCount;

/// One base/candidate location pair as it appears in the batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSpec {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    #[serde(rename = "compURL")]
    pub comp_url: String,
}

impl PairSpec {
    pub fn new(base_url: impl Into<String>, comp_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            comp_url: comp_url.into(),
        }
    }
}

/// Batch file contents: `{"urls": [{"baseURL": ..., "compURL": ...}, ...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInput {
    pub urls: Vec<PairSpec>,
}

impl BatchInput {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

/// What to do when a pair's rasters differ in size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DimensionPolicy {
    /// Compare the overlapping region only (default)
    #[default]
    BoundsSkip,
    /// Fail the pair with `DimensionMismatch` before comparing
    Strict,
}

/// Configuration for the comparison pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Settings handed to the fetcher
    pub fetch: FetchConfig,
    /// Only the first `max_pairs` pairs of a batch are processed; None = all
    pub max_pairs: Option<usize>,
    /// Handling of pairs whose dimensions differ
    pub dimension_policy: DimensionPolicy,
    /// Number of timed comparison passes over the loaded pairs (at least 1)
    pub repeat: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            max_pairs: None,
            dimension_policy: DimensionPolicy::BoundsSkip,
            repeat: 1,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    fetch: Option<FetchConfig>,
    max_pairs: Option<Option<usize>>,
    dimension_policy: Option<DimensionPolicy>,
    repeat: Option<usize>,
}

impl PipelineConfigBuilder {
    pub fn fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = Some(fetch);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        let fetch = self.fetch.take().unwrap_or_default();
        self.fetch = Some(FetchConfig { timeout, ..fetch });
        self
    }

    pub fn max_pairs(mut self, max: Option<usize>) -> Self {
        self.max_pairs = Some(max);
        self
    }

    pub fn dimension_policy(mut self, policy: DimensionPolicy) -> Self {
        self.dimension_policy = Some(policy);
        self
    }

    pub fn repeat(mut self, repeat: usize) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            fetch: self.fetch.unwrap_or(default.fetch),
            max_pairs: self.max_pairs.unwrap_or(default.max_pairs),
            dimension_policy: self.dimension_policy.unwrap_or(default.dimension_policy),
            repeat: self.repeat.unwrap_or(default.repeat).max(1),
        }
    }
}

/// Result of comparing one pair
#[derive(Debug, Clone)]
pub struct PairReport {
    pub base_url: String,
    pub candidate_url: String,
    pub mismatched: MismatchCount,
    pub stats: ComparisonStats,
}

/// Result of a whole batch
#[derive(Debug)]
pub struct BatchReport {
    pub pairs: Vec<PairReport>,
    /// Wall time of the comparison passes alone, excluding fetch and decode
    pub compare_elapsed: Duration,
    pub timings: PipelineTimings,
}

impl BatchReport {
    pub fn total_mismatched(&self) -> u64 {
        self.pairs.iter().map(|p| p.mismatched.get()).sum()
    }
}
