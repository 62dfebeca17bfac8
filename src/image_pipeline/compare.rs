//! Pixel comparison module
//!
//! Counts the pixel positions at which two rasters differ.

mod comparator;


pub use comparator::{count_mismatched_pixels, ComparisonStats, PixelComparator};
