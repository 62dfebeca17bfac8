//! Batch comparison module
//!
//! Orchestrates fetching, decoding, normalization and comparison across a
//! list of image pairs, and records how long each stage took.

mod pipeline;
mod timing;
pub mod types;


pub use pipeline::ComparisonPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{
    BatchInput, BatchReport, DimensionPolicy, PairReport, PairSpec, PipelineConfig,
    PipelineConfigBuilder,
};
