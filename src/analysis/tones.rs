//! Tone analysis - groups regions by their mean colour
//!
//! Every non-empty region is reduced to its mean RGB colour (truncated to
//! 8 bits per channel). Regions whose mean colours coincide share a tone
//! bucket. Buckets are kept sorted dark to light so the painter can lay the
//! underpainting first.

use std::collections::BTreeMap;

use image::RgbImage;
use rayon::prelude::*;
use serde::Serialize;

use super::{rows_per_split, RegionMap};
use crate::brush::{luma, pack_rgb, Rgb};
use crate::core::errors::PaintError;

/// Regions sharing one representative colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneBucket {
    pub color: Rgb,
    /// Region ids in ascending order
    pub regions: Vec<u32>,
}

impl ToneBucket {
    pub fn luma(&self) -> f32 {
        luma(self.color)
    }
}

/// All tone buckets, ordered by non-decreasing luma
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToneMap {
    buckets: Vec<ToneBucket>,
}

impl ToneMap {
    /// Buckets from darkest to lightest
    pub fn iter(&self) -> std::slice::Iter<'_, ToneBucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of regions across all buckets
    pub fn region_count(&self) -> usize {
        self.buckets.iter().map(|b| b.regions.len()).sum()
    }

    /// Bucket whose representative colour is exactly `color`
    pub fn get(&self, color: Rgb) -> Option<&ToneBucket> {
        self.buckets.iter().find(|b| b.color == color)
    }
}

impl<'a> IntoIterator for &'a ToneMap {
    type Item = &'a ToneBucket;
    type IntoIter = std::slice::Iter<'a, ToneBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Per-label colour sums: `[r, g, b, pixel_count]`
type LabelSums = Vec<[u64; 4]>;

pub struct ToneAnalyzer;

impl ToneAnalyzer {
    /// Cluster the regions of `regions` by mean colour in `image`
    pub fn analyze(image: &RgbImage, regions: &RegionMap) -> Result<ToneMap, PaintError> {
        regions.ensure_dimensions("region map", image.dimensions())?;

        let sums = accumulate(image, regions);

        let mut by_color: BTreeMap<u32, (Rgb, Vec<u32>)> = BTreeMap::new();
        for (label, [r, g, b, count]) in sums.into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            let color = [(r / count) as u8, (g / count) as u8, (b / count) as u8];
            by_color
                .entry(pack_rgb(color))
                .or_insert_with(|| (color, Vec::new()))
                .1
                .push(label as u32);
        }

        // BTreeMap iteration is ordered by packed colour, which breaks luma ties
        let mut buckets: Vec<ToneBucket> = by_color
            .into_values()
            .map(|(color, regions)| ToneBucket { color, regions })
            .collect();
        buckets.sort_by(|a, b| a.luma().total_cmp(&b.luma()));

        tracing::debug!(
            "Tone analysis: {} regions in {} tone buckets",
            buckets.iter().map(|b| b.regions.len()).sum::<usize>(),
            buckets.len()
        );

        Ok(ToneMap { buckets })
    }
}

/// Sum colours per label in a single parallel pass over the rows
fn accumulate(image: &RgbImage, regions: &RegionMap) -> LabelSums {
    let width = regions.width() as usize;
    let labels = regions.as_slice();
    if width == 0 || labels.is_empty() {
        return vec![];
    }

    let Some(max_label) = labels.par_iter().copied().max() else {
        return vec![];
    };
    let label_count = max_label as usize + 1;

    labels
        .par_chunks(width)
        .zip(image.as_raw().par_chunks(width * 3))
        .with_min_len(rows_per_split(labels.len() / width))
        .fold(
            || vec![[0u64; 4]; label_count],
            |mut sums, (label_row, pixel_row)| {
                for (&label, px) in label_row.iter().zip(pixel_row.chunks_exact(3)) {
                    let entry = &mut sums[label as usize];
                    entry[0] += px[0] as u64;
                    entry[1] += px[1] as u64;
                    entry[2] += px[2] as u64;
                    entry[3] += 1;
                }
                sums
            },
        )
        .reduce(
            || vec![[0u64; 4]; label_count],
            |mut acc, part| {
                for (a, p) in acc.iter_mut().zip(part) {
                    for (x, y) in a.iter_mut().zip(p) {
                        *x += y;
                    }
                }
                acc
            },
        )
}
