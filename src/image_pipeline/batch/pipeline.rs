use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    batch::timing::{PipelineTimings, Timer},
    batch::types::{BatchInput, BatchReport, DimensionPolicy, PairReport, PairSpec, PipelineConfig},
    common::error::{PipelineError, Result},
    compare::PixelComparator,
    fetch::{ImageFetcher, SchemeFetcher},
    raster::{ImagePair, Normalizer, RasterDecoder, RasterImage, StandardDecoder},
};

/// Fetch -> decode -> normalize -> compare, for single pairs or whole batches.
///
/// Loading is fail-fast: the first pair that cannot be fetched or decoded
/// aborts the run and no partial report is produced.
pub struct ComparisonPipeline<F: ImageFetcher, D: RasterDecoder> {
    fetcher: F,
    decoder: D,
    normalizer: Normalizer,
    comparator: PixelComparator,
    config: PipelineConfig,
}

impl ComparisonPipeline<SchemeFetcher, StandardDecoder> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let fetcher = SchemeFetcher::new(&config.fetch)?;
        Ok(Self::with_custom(fetcher, StandardDecoder, config))
    }
}

impl<F: ImageFetcher, D: RasterDecoder> ComparisonPipeline<F, D> {
    pub fn with_custom(fetcher: F, decoder: D, config: PipelineConfig) -> Self {
        Self {
            fetcher,
            decoder,
            normalizer: Normalizer,
            comparator: PixelComparator,
            config,
        }
    }

    fn load_raster(&self, location: &str, timings: &mut PipelineTimings) -> Result<RasterImage> {
        let timer = Timer::start("fetch");
        let bytes = self.fetcher.fetch(location)?;
        timings.record(timer);

        let timer = Timer::start("decode");
        let decoded = self.decoder.decode(&bytes)?;
        timings.record(timer);

        let timer = Timer::start("normalize");
        let raster = self.normalizer.normalize(&decoded)?;
        timings.record(timer);

        Ok(raster)
    }

    fn check_dimensions(&self, pair: &ImagePair) -> Result<()> {
        if pair.dimensions_match() {
            return Ok(());
        }

        let (base_width, base_height) = pair.base().dimensions();
        let (candidate_width, candidate_height) = pair.candidate().dimensions();

        match self.config.dimension_policy {
            DimensionPolicy::Strict => Err(PipelineError::DimensionMismatch {
                base_width,
                base_height,
                candidate_width,
                candidate_height,
            }),
            DimensionPolicy::BoundsSkip => {
                warn!(
                    "Dimension mismatch {}x{} vs {}x{} for {} -> {}; only the overlap will be compared",
                    base_width,
                    base_height,
                    candidate_width,
                    candidate_height,
                    pair.base_url(),
                    pair.candidate_url()
                );
                Ok(())
            }
        }
    }

    #[instrument(skip(self, spec, timings), fields(base = %spec.base_url, comp = %spec.comp_url))]
    fn load_pair_timed(&self, spec: &PairSpec, timings: &mut PipelineTimings) -> Result<ImagePair> {
        let base = self.load_raster(&spec.base_url, timings)?;
        let candidate = self.load_raster(&spec.comp_url, timings)?;

        let pair = ImagePair::new(spec.base_url.as_str(), base, spec.comp_url.as_str(), candidate);
        self.check_dimensions(&pair)?;
        Ok(pair)
    }

    /// Fetches, decodes and normalizes both sides of a pair.
    pub fn load_pair(&self, spec: &PairSpec) -> Result<ImagePair> {
        let mut timings = PipelineTimings::new();
        self.load_pair_timed(spec, &mut timings)
    }

    pub fn compare_pair(&self, pair: &ImagePair) -> PairReport {
        let stats = self.comparator.compare_with_stats(pair.base(), pair.candidate());
        PairReport {
            base_url: pair.base_url().to_string(),
            candidate_url: pair.candidate_url().to_string(),
            mismatched: stats.mismatched,
            stats,
        }
    }

    fn passes(&self) -> usize {
        self.config.repeat.max(1)
    }

    fn compare_timed(&self, pair: &ImagePair, timings: &mut PipelineTimings) -> PairReport {
        let timer = Timer::start("compare");
        let report = self.compare_pair(pair);
        timings.record(timer);
        report
    }

    pub fn compare_urls(&self, base_url: &str, comp_url: &str) -> Result<PairReport> {
        self.compare_urls_with_timings(base_url, comp_url)
            .map(|(report, _)| report)
    }

    #[instrument(skip(self))]
    pub fn compare_urls_with_timings(
        &self,
        base_url: &str,
        comp_url: &str,
    ) -> Result<(PairReport, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let pair = self.load_pair_timed(&PairSpec::new(base_url, comp_url), &mut timings)?;

        let mut report = self.compare_timed(&pair, &mut timings);
        for _ in 1..self.passes() {
            report = self.compare_timed(&pair, &mut timings);
        }

        info!(
            mismatched = report.mismatched.get(),
            "Pair comparison complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((report, timings))
    }

    #[instrument(skip(self, input), fields(pairs = input.urls.len()))]
    pub fn run_batch(&self, input: &BatchInput) -> Result<BatchReport> {
        let mut timings = PipelineTimings::new();
        let limit = self.config.max_pairs.unwrap_or(usize::MAX);

        let mut pairs = Vec::new();
        for spec in input.urls.iter().take(limit) {
            pairs.push(self.load_pair_timed(spec, &mut timings)?);
        }
        info!("Image loading completed: {} pairs", pairs.len());

        let start = Instant::now();
        let mut reports = Vec::with_capacity(pairs.len());
        for pass in 0..self.passes() {
            reports.clear();
            for pair in &pairs {
                reports.push(self.compare_timed(pair, &mut timings));
            }
            debug!("Comparison pass {} complete", pass + 1);
        }
        let compare_elapsed = start.elapsed();

        let report = BatchReport {
            pairs: reports,
            compare_elapsed,
            timings,
        };
        info!(
            total_mismatched = report.total_mismatched(),
            "Batch complete: {} pairs compared in {:.6}s",
            report.pairs.len(),
            compare_elapsed.as_secs_f64()
        );
        Ok(report)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
