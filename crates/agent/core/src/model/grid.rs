//! Exploration grid over the world bounds.
//!
//! Cells are laid out row-major; neighbours are the eight surrounding cells.
//! Every cell carries an influence value derived from the known houses: a
//! normalised inverse-distance potential, so cells near clusters of houses
//! are explored first. The field is recomputed lazily, only after a new house
//! was discovered.
use glam::Vec2;

use crate::config::AgentConfig;
use crate::world::WorldInfo;

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub position: Vec2,
    /// Always in `[0, 1]`.
    pub influence: f32,
    pub visited: bool,
    pub neighbors: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct InfluenceGrid {
    cells: Vec<GridCell>,
    origin: Vec2,
    cell_size: f32,
    columns: usize,
    rows: usize,
    dirty: bool,
    recomputations: u64,
}

impl InfluenceGrid {
    /// Columns and rows needed to cover `bounds`.
    ///
    /// `None` for non-finite bounds or when the grid would exceed
    /// [`AgentConfig::MAX_GRID_CELLS`].
    pub fn layout(bounds: &WorldInfo, cell_size: f32) -> Option<(usize, usize)> {
        if !bounds.center.is_finite() || !bounds.dimensions.is_finite() {
            return None;
        }
        let cell_size = f64::from(effective_cell_size(cell_size));
        let columns = (f64::from(bounds.dimensions.x) / cell_size).ceil().max(1.0);
        let rows = (f64::from(bounds.dimensions.y) / cell_size).ceil().max(1.0);
        if columns * rows > AgentConfig::MAX_GRID_CELLS as f64 {
            return None;
        }
        Some((columns as usize, rows as usize))
    }

    /// Builds the grid. Bounds rejected by [`layout`](Self::layout) get a
    /// single cell; callers are expected to validate first.
    pub fn new(bounds: &WorldInfo, cell_size: f32) -> Self {
        let (columns, rows) = Self::layout(bounds, cell_size).unwrap_or((1, 1));
        let cell_size = effective_cell_size(cell_size);
        let origin = bounds.min();

        let mut cells = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(GridCell {
                    position: origin + Vec2::new(column as f32 + 0.5, row as f32 + 0.5) * cell_size,
                    influence: 0.0,
                    visited: false,
                    neighbors: neighbor_indices(row, column, rows, columns),
                });
            }
        }

        Self {
            cells,
            origin,
            cell_size,
            columns,
            rows,
            dirty: false,
            recomputations: 0,
        }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Index of the cell containing `point`, `None` outside the grid.
    pub fn cell_index_at(&self, point: Vec2) -> Option<usize> {
        let local = (point - self.origin) / self.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (column, row) = (local.x as usize, local.y as usize);
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How often the influence field was rebuilt.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Rebuilds the influence field from the house centers if it is dirty.
    pub fn recompute_influence(&mut self, houses: impl IntoIterator<Item = Vec2>) -> bool {
        if !self.dirty {
            return false;
        }
        let houses: Vec<Vec2> = houses.into_iter().collect();
        let cell_size = self.cell_size;

        let mut peak = 0.0f32;
        for cell in &mut self.cells {
            cell.influence = houses
                .iter()
                .map(|house| cell_size / cell.position.distance(*house).max(cell_size))
                .sum();
            peak = peak.max(cell.influence);
        }
        if peak > 0.0 {
            for cell in &mut self.cells {
                cell.influence /= peak;
            }
        }

        self.dirty = false;
        self.recomputations += 1;
        true
    }

    /// Marks cells containing `point` or whose center lies within `radius`.
    /// Returns the number of newly visited cells.
    pub fn mark_visited_around(&mut self, point: Vec2, radius: f32) -> usize {
        let containing = self.cell_index_at(point);
        let radius_sq = radius * radius;
        let mut newly_visited = 0;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if cell.visited {
                continue;
            }
            if Some(index) == containing || cell.position.distance_squared(point) <= radius_sq {
                cell.visited = true;
                newly_visited += 1;
            }
        }
        newly_visited
    }

    pub fn unvisited_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.visited).count()
    }

    /// Picks the next cell to explore from `from`.
    ///
    /// Preference order: the current cell if unvisited, the strongest
    /// unvisited neighbour at or above `local_threshold`, the strongest
    /// unvisited cell anywhere at or above `min_wide`, the strongest unvisited
    /// neighbour, and finally the nearest unvisited cell. Ties keep the first
    /// scanned cell.
    pub fn best_target(&self, from: Vec2, local_threshold: f32, min_wide: f32) -> Option<usize> {
        let current = self.cell_index_at(from);
        if let Some(index) = current {
            if !self.cells[index].visited {
                return Some(index);
            }
        }

        let neighbors: &[usize] = match current {
            Some(index) => &self.cells[index].neighbors,
            None => &[],
        };
        let best_neighbor = self.strongest_unvisited(neighbors.iter().copied());
        if let Some(index) = best_neighbor {
            if self.cells[index].influence >= local_threshold {
                return Some(index);
            }
        }

        if let Some(index) = self.strongest_unvisited(0..self.cells.len()) {
            if self.cells[index].influence >= min_wide {
                return Some(index);
            }
        }

        best_neighbor.or_else(|| self.nearest_unvisited(from))
    }

    fn strongest_unvisited(&self, candidates: impl Iterator<Item = usize>) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for index in candidates {
            let cell = &self.cells[index];
            if cell.visited {
                continue;
            }
            if best.is_none_or(|(_, influence)| cell.influence > influence) {
                best = Some((index, cell.influence));
            }
        }
        best.map(|(index, _)| index)
    }

    fn nearest_unvisited(&self, from: Vec2) -> Option<usize> {
        let mut nearest: Option<(usize, f32)> = None;
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.visited {
                continue;
            }
            let distance = cell.position.distance_squared(from);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
        nearest.map(|(index, _)| index)
    }
}

/// Non-positive or non-finite sizes fall back to the default.
fn effective_cell_size(cell_size: f32) -> f32 {
    if cell_size > 0.0 && cell_size.is_finite() {
        cell_size
    } else {
        AgentConfig::DEFAULT_GRID_CELL_SIZE
    }
}

/// Row-major indices of the up to eight cells around `(row, column)`.
fn neighbor_indices(row: usize, column: usize, rows: usize, columns: usize) -> Vec<usize> {
    let mut neighbors = Vec::with_capacity(8);
    for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
        for c in column.saturating_sub(1)..=(column + 1).min(columns - 1) {
            if (r, c) != (row, column) {
                neighbors.push(r * columns + c);
            }
        }
    }
    neighbors
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid() -> InfluenceGrid {
        // 4 x 4 cells of size 10 covering [-20, 20]^2.
        InfluenceGrid::new(&WorldInfo::new(Vec2::ZERO, Vec2::splat(40.0)), 10.0)
    }

    #[test]
    fn layout_and_lookup() {
        let grid = grid();
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.cell_index_at(Vec2::new(-19.0, -19.0)), Some(0));
        assert_eq!(grid.cell_index_at(Vec2::new(19.0, -19.0)), Some(3));
        assert_eq!(grid.cell_index_at(Vec2::new(-19.0, 19.0)), Some(12));
        assert_eq!(grid.cell_index_at(Vec2::new(25.0, 0.0)), None);
        assert_eq!(grid.cell(0).map(|c| c.position), Some(Vec2::new(-15.0, -15.0)));
    }

    #[test]
    fn neighbours_are_the_eight_surrounding_cells() {
        let grid = grid();
        assert_eq!(grid.cells()[0].neighbors, vec![1, 4, 5]);
        assert_eq!(grid.cells()[5].neighbors.len(), 8);
    }

    #[test]
    fn neighbours_respect_grid_edges() {
        // 5 columns x 3 rows.
        let grid = InfluenceGrid::new(&WorldInfo::new(Vec2::ZERO, Vec2::new(50.0, 30.0)), 10.0);
        assert_eq!(grid.cells()[4].neighbors, vec![3, 8, 9]);
        assert_eq!(grid.cells()[7].neighbors, vec![1, 2, 3, 6, 8, 11, 12, 13]);
        assert_eq!(grid.cells()[10].neighbors, vec![5, 6, 11]);

        let single = InfluenceGrid::new(&WorldInfo::new(Vec2::ZERO, Vec2::splat(5.0)), 10.0);
        assert!(single.cells()[0].neighbors.is_empty());
    }

    #[test]
    fn large_map_builds_without_pairwise_scan() {
        // 300 x 300 cells.
        let grid = InfluenceGrid::new(&WorldInfo::new(Vec2::ZERO, Vec2::splat(9000.0)), 30.0);
        assert_eq!(grid.len(), 90_000);
        assert_eq!(grid.cells()[0].neighbors, vec![1, 300, 301]);
        assert_eq!(grid.cells()[301].neighbors.len(), 8);
    }

    #[test]
    fn layout_rejects_unbounded_worlds() {
        let infinite = WorldInfo::new(Vec2::ZERO, Vec2::new(f32::INFINITY, 100.0));
        assert_eq!(InfluenceGrid::layout(&infinite, 30.0), None);

        let huge = WorldInfo::new(Vec2::ZERO, Vec2::splat(1.0e30));
        assert_eq!(InfluenceGrid::layout(&huge, 30.0), None);
        assert_eq!(InfluenceGrid::new(&huge, 30.0).len(), 1);

        let normal = WorldInfo::new(Vec2::ZERO, Vec2::new(40.0, 25.0));
        assert_eq!(InfluenceGrid::layout(&normal, 10.0), Some((4, 3)));
        assert_eq!(InfluenceGrid::layout(&normal, f32::NAN), Some((2, 1)));
    }

    #[test]
    fn recompute_only_when_dirty() {
        let mut grid = grid();
        assert!(!grid.recompute_influence([Vec2::ZERO]));

        grid.mark_dirty();
        assert!(grid.recompute_influence([Vec2::new(15.0, 15.0)]));
        assert!(!grid.recompute_influence([Vec2::new(15.0, 15.0)]));
        assert_eq!(grid.recomputations(), 1);

        let peak = grid.cells().iter().map(|c| c.influence).fold(0.0, f32::max);
        assert!((peak - 1.0).abs() < 1e-6);
        assert_eq!(grid.cells()[15].influence, 1.0);
    }

    #[test]
    fn current_unvisited_cell_comes_first() {
        let grid = grid();
        assert_eq!(grid.best_target(Vec2::new(-15.0, -15.0), 0.3, 0.6), Some(0));
    }

    #[test]
    fn strong_neighbour_beats_far_cells() {
        let mut grid = grid();
        grid.mark_dirty();
        grid.recompute_influence([Vec2::new(-5.0, -15.0)]);
        grid.mark_visited_around(Vec2::new(-15.0, -15.0), 0.0);

        assert_eq!(grid.best_target(Vec2::new(-15.0, -15.0), 0.3, 0.6), Some(1));
    }

    #[test]
    fn wide_search_picks_strong_distant_cell() {
        let mut grid = grid();
        grid.mark_dirty();
        grid.recompute_influence([Vec2::new(18.0, 18.0)]);
        grid.mark_visited_around(Vec2::new(-15.0, -15.0), 0.0);

        assert_eq!(grid.best_target(Vec2::new(-15.0, -15.0), 0.9, 0.6), Some(15));
    }

    #[test]
    fn without_influence_falls_back_to_neighbours_then_nearest() {
        let mut grid = grid();
        grid.mark_visited_around(Vec2::new(-15.0, -15.0), 15.0);
        // Cell 0 and its neighbours 1, 4, 5 are visited now.
        let target = grid.best_target(Vec2::new(-15.0, -15.0), 0.3, 0.6);
        assert_eq!(target, Some(2));

        for index in 0..grid.len() {
            let position = grid.cells()[index].position;
            grid.mark_visited_around(position, 0.0);
        }
        assert_eq!(grid.best_target(Vec2::ZERO, 0.3, 0.6), None);
    }

    proptest! {
        #[test]
        fn influence_is_normalised_and_non_negative(
            houses in prop::collection::vec((-30.0f32..30.0, -30.0f32..30.0), 1..8),
        ) {
            let mut grid = grid();
            grid.mark_dirty();
            grid.recompute_influence(houses.iter().map(|(x, y)| Vec2::new(*x, *y)));

            for cell in grid.cells() {
                prop_assert!(cell.influence >= 0.0);
                prop_assert!(cell.influence <= 1.0 + 1e-6);
            }
        }

        #[test]
        fn best_target_is_never_a_visited_cell(
            visited in prop::collection::vec(any::<bool>(), 16),
            x in -20.0f32..20.0,
            y in -20.0f32..20.0,
        ) {
            let mut grid = grid();
            grid.mark_dirty();
            grid.recompute_influence([Vec2::new(x, y)]);
            for (index, flag) in visited.iter().enumerate() {
                if *flag {
                    let position = grid.cells()[index].position;
                    grid.mark_visited_around(position, 0.0);
                }
            }

            match grid.best_target(Vec2::new(x, y), 0.3, 0.6) {
                Some(index) => prop_assert!(!grid.cells()[index].visited),
                None => prop_assert_eq!(grid.unvisited_count(), 0),
            }
        }
    }
}
