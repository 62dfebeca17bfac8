//! Image comparison pipeline module
//!
//! This module provides a structured approach to pixel-level image comparison,
//! with separate modules for fetching, raster decoding and normalization,
//! comparison, and batch orchestration.

pub mod fetch;
pub mod raster;
pub mod compare;
pub mod batch;
pub mod common;

pub use common::{
    PipelineError,
    Result,
};

pub use fetch::{
    FetchConfig,
    FetchConfigBuilder,
    FileFetcher,
    HttpFetcher,
    ImageFetcher,
    SchemeFetcher,
};

pub use raster::{
    ColorModel,
    DecodedImage,
    ImagePair,
    MismatchCount,
    Normalizer,
    RasterDecoder,
    RasterImage,
    StandardDecoder,
};

pub use compare::{
    count_mismatched_pixels,
    ComparisonStats,
    PixelComparator,
};

pub use batch::{
    BatchInput,
    BatchReport,
    ComparisonPipeline,
    DimensionPolicy,
    PairReport,
    PairSpec,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineTimings,
};
