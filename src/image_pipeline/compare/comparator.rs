use tracing::debug;

use crate::image_pipeline::raster::{MismatchCount, RasterImage};

/// Per-comparison counters.
///
/// `compared + skipped` is the number of positions visited. Positions outside
/// the smaller image are never visited and appear in neither counter, so a
/// size mismatch does not show up here; compare the dimensions instead.
///
/// `skipped` is always 0 for rasters built through [`RasterImage::new`], whose
/// buffers cover every row at their stride. It only counts slices that fall
/// past the end of a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonStats {
    pub mismatched: MismatchCount,
    pub compared: u64,
    pub skipped: u64,
}

impl ComparisonStats {
    pub fn is_exact_match(&self) -> bool {
        self.mismatched.get() == 0 && self.skipped == 0
    }
}

/// Position-by-position raster comparator.
///
/// A position mismatches when any of its channel bytes differ. When the two
/// rasters have different dimensions the walk covers only the overlapping
/// `min(width) x min(height)` region. Unequal sizes are therefore undercounted,
/// never rejected; callers that need shape equality must check it before
/// comparing. A position whose bytes would lie past the end of either buffer
/// is skipped rather than counted.
pub struct PixelComparator;

impl PixelComparator {
    pub fn compare(&self, base: &RasterImage, candidate: &RasterImage) -> MismatchCount {
        self.compare_with_stats(base, candidate).mismatched
    }

    pub fn compare_with_stats(&self, base: &RasterImage, candidate: &RasterImage) -> ComparisonStats {
        let width = base.width().min(candidate.width());
        let height = base.height().min(candidate.height());
        let channels = base.channel_count().min(candidate.channel_count());

        if base.dimensions() != candidate.dimensions() {
            debug!(
                "Comparing rasters of different size ({}x{} vs {}x{}), only the {}x{} overlap is counted",
                base.width(),
                base.height(),
                candidate.width(),
                candidate.height(),
                width,
                height
            );
        }

        let a = base.pixels();
        let b = candidate.pixels();
        let mut mismatched = 0u64;
        let mut compared = 0u64;
        let mut skipped = 0u64;

        for y in 0..height {
            for x in 0..width {
                let offset_a = y * base.stride() + x * base.channel_count();
                let offset_b = y * candidate.stride() + x * candidate.channel_count();

                match (
                    a.get(offset_a..offset_a + channels),
                    b.get(offset_b..offset_b + channels),
                ) {
                    (Some(pa), Some(pb)) => {
                        compared += 1;
                        if pa != pb {
                            mismatched += 1;
                        }
                    }
                    _ => skipped += 1,
                }
            }
        }

        debug!(
            "Compared {} positions: {} mismatched, {} skipped",
            compared, mismatched, skipped
        );

        ComparisonStats {
            mismatched: MismatchCount::new(mismatched),
            compared,
            skipped,
        }
    }
}

/// Shorthand for [`PixelComparator::compare`].
pub fn count_mismatched_pixels(base: &RasterImage, candidate: &RasterImage) -> MismatchCount {
    PixelComparator.compare(base, candidate)
}
