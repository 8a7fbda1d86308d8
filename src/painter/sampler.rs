//! Stroke sampling - shuffled, chunked start points per region

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::analysis::{rows_per_split, RegionMap};
use crate::brush::Point;

/// Shuffled member pixels of one region, split into chunks
#[derive(Debug, Clone)]
pub struct SampledRegion {
    points: Vec<Point>,
    chunk_size: usize,
}

impl SampledRegion {
    /// Contiguous chunks of `chunk_size` points; the last may be shorter
    pub fn chunks(&self) -> std::slice::Chunks<'_, Point> {
        self.points.chunks(self.chunk_size)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-region pixel index, built once from the region map
#[derive(Debug, Clone, Default)]
pub struct StrokeSampler {
    regions: Vec<Vec<Point>>,
}

impl StrokeSampler {
    /// Index every pixel by its region label, in raster order
    pub fn new(regions: &RegionMap) -> Self {
        let width = regions.width() as usize;
        let labels = regions.as_slice();
        if width == 0 || labels.is_empty() {
            return Self::default();
        }

        let Some(max_label) = labels.par_iter().copied().max() else {
            return Self::default();
        };
        let label_count = max_label as usize + 1;

        // Ordered fold/reduce keeps raster order regardless of thread count
        let regions = labels
            .par_chunks(width)
            .enumerate()
            .with_min_len(rows_per_split(labels.len() / width))
            .fold(
                || vec![Vec::new(); label_count],
                |mut acc: Vec<Vec<Point>>, (y, row)| {
                    for (x, &label) in row.iter().enumerate() {
                        acc[label as usize].push(Point::new(x as i32, y as i32));
                    }
                    acc
                },
            )
            .reduce(
                || vec![Vec::new(); label_count],
                |mut left, right| {
                    for (l, r) in left.iter_mut().zip(right) {
                        l.extend(r);
                    }
                    left
                },
            );

        Self { regions }
    }

    /// Member pixels of `region` in raster order
    pub fn region_points(&self, region: u32) -> &[Point] {
        self.regions
            .get(region as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Shuffle the pixels of `region` and split them into chunks
    pub fn sample<R: Rng + ?Sized>(
        &self,
        region: u32,
        chunk_size: usize,
        rng: &mut R,
    ) -> SampledRegion {
        let mut points = self.region_points(region).to_vec();
        points.shuffle(rng);
        SampledRegion {
            points,
            chunk_size: chunk_size.max(1),
        }
    }
}
