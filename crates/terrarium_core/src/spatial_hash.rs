use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Clone, Debug, Default)]
/// Uniform grid index over point positions.
///
/// Rebuilt from scratch every tick. Entries are stored in an offset array
/// (compressed-sparse-row layout): `cell_offsets[i]..cell_offsets[i + 1]`
/// slices `entity_indices` for cell `i`, and each entry is the index of the
/// point in the slice passed to [`SpatialHash::build_parallel`].
///
/// Finite coordinates outside the arena are folded into the nearest edge
/// cell, so every finite point is indexed. Queries return candidates only;
/// callers do their own exact distance test.
///
/// # Examples
/// ```
/// use terrarium_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(10.0, 100.0, 100.0);
/// let positions = vec![(15.0, 15.0), (25.0, 25.0), (85.0, 85.0)];
/// spatial.build_parallel(&positions, 100.0, 100.0);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(15.0, 15.0, 20.0, &mut nearby);
/// assert!(nearby.contains(&0) && nearby.contains(&1));
/// ```
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    pub fn new(cell_size: f64, width: f64, height: f64) -> Self {
        let cell_size = cell_size.max(1.0);
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, v: f64, limit: usize) -> usize {
        let c = (v / self.cell_size).floor();
        if c <= 0.0 {
            0
        } else {
            (c as usize).min(limit - 1)
        }
    }

    /// Flat cell index for a point, or `None` for non-finite coordinates.
    #[inline]
    pub fn get_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let cx = self.cell_coord(x, self.cols);
        let cy = self.cell_coord(y, self.rows);
        Some(cy * self.cols + cx)
    }

    pub fn build_parallel(&mut self, positions: &[(f64, f64)], width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.cols = ((width / self.cell_size).ceil() as usize).max(1);
        self.rows = ((height / self.cell_size).ceil() as usize).max(1);
        let cell_count = self.cols * self.rows;

        let atomic_counts: Vec<AtomicUsize> =
            (0..cell_count).map(|_| AtomicUsize::new(0)).collect();
        positions.par_iter().for_each(|&(x, y)| {
            if let Some(idx) = self.get_cell_idx(x, y) {
                atomic_counts[idx].fetch_add(1, AtomicOrdering::Relaxed);
            }
        });
        let counts: Vec<usize> = atomic_counts.into_iter().map(|a| a.into_inner()).collect();

        self.cell_offsets.clear();
        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);

        // Sequential fill keeps per-cell order equal to input order.
        let mut current_offsets = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, &(x, y)) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(x, y) {
                let write_idx = current_offsets[cell_idx];
                self.entity_indices[write_idx] = entity_idx;
                current_offsets[cell_idx] += 1;
            }
        }
    }

    fn cell_range(&self, x: f64, y: f64, radius: f64) -> (usize, usize, usize, usize) {
        (
            self.cell_coord(x - radius, self.cols),
            self.cell_coord(x + radius, self.cols),
            self.cell_coord(y - radius, self.rows),
            self.cell_coord(y + radius, self.rows),
        )
    }

    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        if !x.is_finite() || !y.is_finite() || self.entity_indices.is_empty() {
            return;
        }
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_range(x, y, radius);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy * self.cols + cx;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                for &entity_idx in &self.entity_indices[start..end] {
                    callback(entity_idx);
                }
            }
        }
    }

    /// Collects candidate indices near `(x, y)` into `result`, in ascending index order.
    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(x, y, radius, |idx| result.push(idx));
        result.sort_unstable();
    }

    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        if !x.is_finite() || !y.is_finite() {
            return 0;
        }
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_range(x, y, radius);
        let mut count = 0;
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy * self.cols + cx;
                count += self.cell_offsets[cell_idx + 1] - self.cell_offsets[cell_idx];
            }
        }
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entity_indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_indices.is_empty()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_spatial_hash_query_finds_nearby() {
        let mut sh = SpatialHash::new(5.0, 20.0, 20.0);
        let data = vec![(1.0, 1.0), (2.0, 2.0), (10.0, 10.0)];
        sh.build_parallel(&data, 20.0, 20.0);

        let mut count = 0;
        sh.query_callback(1.5, 1.5, 2.0, |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_edge_points_are_indexed() {
        let mut sh = SpatialHash::new(10.0, 100.0, 50.0);
        let data = vec![(100.0, 50.0), (0.0, 0.0), (-0.5, 49.9)];
        sh.build_parallel(&data, 100.0, 50.0);
        assert_eq!(sh.len(), 3);

        let mut out = Vec::new();
        sh.query_into(99.0, 49.0, 2.0, &mut out);
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn test_non_finite_points_are_skipped() {
        let mut sh = SpatialHash::new(10.0, 100.0, 100.0);
        let data = vec![(f64::NAN, 5.0), (5.0, 5.0)];
        sh.build_parallel(&data, 100.0, 100.0);
        assert_eq!(sh.len(), 1);

        let mut out = Vec::new();
        sh.query_into(f64::INFINITY, 5.0, 10.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_query_results_are_sorted() {
        let mut sh = SpatialHash::new(4.0, 40.0, 40.0);
        let data = vec![(20.0, 20.0), (1.0, 1.0), (21.0, 21.0), (19.0, 19.0)];
        sh.build_parallel(&data, 40.0, 40.0);
        let mut out = Vec::new();
        sh.query_into(20.0, 20.0, 3.0, &mut out);
        assert_eq!(out, vec![0, 2, 3]);
    }

    #[test]
    fn test_count_nearby_matches_query() {
        let mut sh = SpatialHash::new(10.0, 100.0, 100.0);
        let data: Vec<(f64, f64)> = (0..50).map(|i| (i as f64 * 2.0, 50.0)).collect();
        sh.build_parallel(&data, 100.0, 100.0);
        let mut out = Vec::new();
        sh.query_into(50.0, 50.0, 10.0, &mut out);
        assert_eq!(sh.count_nearby(50.0, 50.0, 10.0), out.len());
    }
}
