//! Painting passes - the coarse-to-fine schedule

use serde::{Deserialize, Serialize};

/// One sweep over every region with a fixed brush
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    /// Sampled points per chunk
    pub chunk_size: usize,
    /// Stamp size in pixels
    pub brush_size: u32,
    /// Stroke opacity in (0, 1]
    pub opacity: f32,
}

impl Pass {
    pub const fn new(chunk_size: usize, brush_size: u32, opacity: f32) -> Self {
        Self {
            chunk_size,
            brush_size,
            opacity,
        }
    }

    /// Stroke length for this pass, never shorter than `min_length`
    pub fn stroke_length(&self, min_length: u32) -> u32 {
        self.brush_size.max(min_length)
    }
}

/// Ordered list of passes, coarsest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassSchedule {
    passes: Vec<Pass>,
}

impl PassSchedule {
    pub fn new(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pass> {
        self.passes.iter()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassSchedule {
    fn default() -> Self {
        Self::new(vec![
            Pass::new(1000, 8, 0.7),
            Pass::new(500, 4, 0.8),
            Pass::new(200, 2, 0.9),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_is_coarse_to_fine() {
        let schedule = PassSchedule::default();
        assert_eq!(schedule.len(), 3);
        let sizes: Vec<u32> = schedule.iter().map(|p| p.brush_size).collect();
        assert_eq!(sizes, vec![8, 4, 2]);
        assert!(schedule.iter().all(|p| p.opacity > 0.0 && p.opacity <= 1.0));
    }

    #[test]
    fn test_stroke_length_has_floor() {
        assert_eq!(Pass::new(10, 2, 1.0).stroke_length(5), 5);
        assert_eq!(Pass::new(10, 8, 1.0).stroke_length(5), 8);
    }

    #[test]
    fn test_schedule_serializes_as_list() {
        let json = serde_json::to_string(&PassSchedule::new(vec![Pass::new(3, 4, 0.5)])).unwrap();
        assert_eq!(json, r#"[{"chunkSize":3,"brushSize":4,"opacity":0.5}]"#);
    }
}
