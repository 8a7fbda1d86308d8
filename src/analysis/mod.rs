//! Analysis maps - per-pixel inputs produced by the image-analysis stage
//!
//! Segmentation, saliency, edge and feature detection happen outside this
//! crate. Their results arrive here as [`GridMap`]s aligned to the source
//! image's pixel grid and are read-only for the rest of the run.

pub mod gradient;
pub mod tones;

pub use gradient::sobel_gradients;
pub use tones::{ToneAnalyzer, ToneBucket, ToneMap};

use crate::core::errors::PaintError;

/// Region label per pixel
pub type RegionMap = GridMap<u32>;
/// Gradient direction per pixel, degrees in `[0, 360)`
pub type OrientationMap = GridMap<f32>;
/// Normalized gradient magnitude per pixel, `[0, 255]`
pub type MagnitudeMap = GridMap<f32>;

/// Rows per rayon split for per-label folds: at most one accumulator per
/// worker thread
pub(crate) fn rows_per_split(rows: usize) -> usize {
    rows.div_ceil(rayon::current_num_threads().max(1)).max(1)
}

/// Row-major 2D grid of per-pixel values
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy> GridMap<T> {
    /// Wrap row-major values; `data.len()` must equal `width * height`
    pub fn new(width: u32, height: u32, data: Vec<T>) -> Result<Self, PaintError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(PaintError::InvalidConfig(format!(
                "Grid map of {}x{} needs {} values, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Map filled with a single value
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Build a map by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Value at `(x, y)`, `None` outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row-major values
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Fail unless this map matches `expected` dimensions
    pub fn ensure_dimensions(
        &self,
        name: &'static str,
        expected: (u32, u32),
    ) -> Result<(), PaintError> {
        if self.dimensions() != expected {
            return Err(PaintError::DimensionMismatch {
                map: name,
                expected,
                actual: self.dimensions(),
            });
        }
        Ok(())
    }
}

/// Everything the image-analysis stage hands to the painter
#[derive(Debug, Clone)]
pub struct AnalysisMaps {
    /// Segmentation labels, dense in `[0, N]`
    pub regions: RegionMap,
    /// Gradient orientation in degrees
    pub orientation: OrientationMap,
    pub magnitude: Option<MagnitudeMap>,
    pub saliency: Option<GridMap<f32>>,
    pub edges: Option<GridMap<u8>>,
    /// Non-zero where a detected feature (e.g. a face) lies
    pub features: Option<GridMap<u8>>,
}

impl AnalysisMaps {
    /// Maps with only the inputs the painting passes require
    pub fn new(regions: RegionMap, orientation: OrientationMap) -> Self {
        Self {
            regions,
            orientation,
            magnitude: None,
            saliency: None,
            edges: None,
            features: None,
        }
    }

    /// Region labels plus Sobel gradients computed from `image`
    pub fn with_sobel(image: &image::RgbImage, regions: RegionMap) -> Self {
        let (orientation, magnitude) = sobel_gradients(image);
        Self::new(regions, orientation).with_magnitude(magnitude)
    }

    pub fn with_magnitude(mut self, magnitude: MagnitudeMap) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_saliency(mut self, saliency: GridMap<f32>) -> Self {
        self.saliency = Some(saliency);
        self
    }

    pub fn with_edges(mut self, edges: GridMap<u8>) -> Self {
        self.edges = Some(edges);
        self
    }

    pub fn with_features(mut self, features: GridMap<u8>) -> Self {
        self.features = Some(features);
        self
    }

    /// Check that every supplied map is aligned to a `width x height` source
    pub fn validate(&self, width: u32, height: u32) -> Result<(), PaintError> {
        let expected = (width, height);
        self.regions.ensure_dimensions("region map", expected)?;
        self.orientation.ensure_dimensions("orientation map", expected)?;
        if let Some(map) = &self.magnitude {
            map.ensure_dimensions("magnitude map", expected)?;
        }
        if let Some(map) = &self.saliency {
            map.ensure_dimensions("saliency map", expected)?;
        }
        if let Some(map) = &self.edges {
            map.ensure_dimensions("edge map", expected)?;
        }
        if let Some(map) = &self.features {
            map.ensure_dimensions("feature mask", expected)?;
        }
        Ok(())
    }
}
