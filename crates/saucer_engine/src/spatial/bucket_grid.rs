//! Fixed-size 2D bucket grid
//!
//! Divides a rectangular region anchored at the origin into square cells of
//! `cell_size`. Each cell owns an ordered bucket; items keep insertion order.
//! Neighbor queries visit a fixed window of cells around a centre cell, so the
//! cost is bounded regardless of how large a radius the caller cares about.

use crate::foundation::math::Vec2;

/// Anything that can be filed into a [`BucketGrid`] by position
pub trait Bucketed {
    /// Position in grid space (same units as the grid's cell size)
    fn position(&self) -> Vec2;
}

impl Bucketed for Vec2 {
    fn position(&self) -> Vec2 {
        *self
    }
}

/// Integer cell coordinates `(a, b)`.
///
/// Signed so that window offsets around edge cells can be expressed before
/// bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    /// Column, `floor(x / cell_size)`
    pub a: i32,
    /// Row, `floor(y / cell_size)`
    pub b: i32,
}

impl GridCell {
    /// Create a cell coordinate
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }
}

/// Inclusive per-axis offset range around a centre cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    /// Lowest offset visited on each axis
    pub lo: i32,
    /// Highest offset visited on each axis
    pub hi: i32,
}

impl GridWindow {
    /// Window of explicit offsets `lo..=hi`
    pub const fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    /// Symmetric window `-radius..=radius`
    pub const fn square(radius: i32) -> Self {
        Self::new(-radius, radius)
    }

    /// Cells covered by the window around `centre`, `a` outer and `b` inner
    pub fn cells_around(self, centre: GridCell) -> impl Iterator<Item = GridCell> {
        (self.lo..=self.hi).flat_map(move |da| {
            (self.lo..=self.hi).map(move |db| GridCell::new(centre.a + da, centre.b + db))
        })
    }
}

/// 2D array of buckets, stored row-major by `a`
#[derive(Debug, Clone)]
pub struct BucketGrid<T> {
    width: usize,
    height: usize,
    cell_size: f32,
    buckets: Vec<Vec<T>>,
}

impl<T: Bucketed> BucketGrid<T> {
    /// Create an empty grid of `width × height` cells.
    ///
    /// A zero dimension gives a grid that rejects every insert.
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(width * height, Vec::new);
        Self {
            width,
            height,
            cell_size,
            buckets,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Side length of one cell
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `position`; may lie outside the grid
    pub fn cell_of(&self, position: Vec2) -> GridCell {
        GridCell::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Whether `cell` lies inside the grid extents
    pub fn contains_cell(&self, cell: GridCell) -> bool {
        self.index_of(cell).is_some()
    }

    fn index_of(&self, cell: GridCell) -> Option<usize> {
        let a = usize::try_from(cell.a).ok()?;
        let b = usize::try_from(cell.b).ok()?;
        (a < self.width && b < self.height).then_some(a * self.height + b)
    }

    /// Append `item` to the bucket of its cell.
    ///
    /// Returns the cell on success. Items whose cell lies outside the grid are
    /// dropped and `None` is returned.
    pub fn insert(&mut self, item: T) -> Option<GridCell> {
        let cell = self.cell_of(item.position());
        let index = self.index_of(cell)?;
        self.buckets[index].push(item);
        Some(cell)
    }

    /// Items filed under `cell`; empty for out-of-range cells
    pub fn bucket(&self, cell: GridCell) -> &[T] {
        match self.index_of(cell) {
            Some(index) => &self.buckets[index],
            None => &[],
        }
    }

    /// Mutable items filed under `cell`
    pub fn bucket_mut(&mut self, cell: GridCell) -> Option<&mut Vec<T>> {
        let index = self.index_of(cell)?;
        self.buckets.get_mut(index)
    }

    /// Every in-range cell, `a` outer and `b` inner
    pub fn cells(&self) -> impl Iterator<Item = GridCell> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |a| (0..height).map(move |b| GridCell::new(a, b)))
    }

    /// Concatenated buckets of the in-range cells in `window` around `centre`
    pub fn neighbors(&self, centre: GridCell, window: GridWindow) -> Vec<&T> {
        window
            .cells_around(centre)
            .filter_map(|cell| self.index_of(cell))
            .flat_map(|index| self.buckets[index].iter())
            .collect()
    }

    /// Mutable variant of [`BucketGrid::neighbors`], same visiting order
    pub fn neighbors_mut(&mut self, centre: GridCell, window: GridWindow) -> Vec<&mut T> {
        let height = self.height;
        let in_window = |index: usize| {
            let a = (index / height) as i32 - centre.a;
            let b = (index % height) as i32 - centre.b;
            (window.lo..=window.hi).contains(&a) && (window.lo..=window.hi).contains(&b)
        };
        self.buckets
            .iter_mut()
            .enumerate()
            .filter(|(index, _)| in_window(*index))
            .flat_map(|(_, bucket)| bucket.iter_mut())
            .collect()
    }

    /// All items in cell order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flatten()
    }

    /// All items with their cells, in cell order
    pub fn iter_cells(&self) -> impl Iterator<Item = (GridCell, &T)> {
        self.cells()
            .zip(self.buckets.iter())
            .flat_map(|(cell, bucket)| bucket.iter().map(move |item| (cell, item)))
    }

    /// Consume the grid, yielding items with their cells in cell order
    pub fn into_cells(self) -> impl Iterator<Item = (GridCell, T)> {
        let height = self.height;
        self.buckets.into_iter().enumerate().flat_map(move |(index, bucket)| {
            let cell = GridCell::new((index / height) as i32, (index % height) as i32);
            bucket.into_iter().map(move |item| (cell, item))
        })
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether no bucket holds anything
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_files_by_floor() {
        let mut grid = BucketGrid::new(5, 5, 20.0);
        assert_eq!(grid.insert(Vec2::new(39.9, 0.0)), Some(GridCell::new(1, 0)));
        assert_eq!(grid.bucket(GridCell::new(1, 0)).len(), 1);
    }

    #[test]
    fn test_out_of_range_insert_is_dropped() {
        let mut grid = BucketGrid::new(5, 5, 20.0);
        assert_eq!(grid.insert(Vec2::new(100.0, 10.0)), None);
        assert_eq!(grid.insert(Vec2::new(-0.1, 10.0)), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_sized_grid() {
        let mut grid: BucketGrid<Vec2> = BucketGrid::new(0, 3, 1.0);
        assert_eq!(grid.insert(Vec2::new(0.5, 0.5)), None);
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn test_neighbors_respects_window() {
        let mut grid = BucketGrid::new(4, 4, 1.0);
        for a in 0..4 {
            for b in 0..4 {
                grid.insert(Vec2::new(a as f32 + 0.5, b as f32 + 0.5));
            }
        }

        let centre = GridCell::new(1, 1);
        assert_eq!(grid.neighbors(centre, GridWindow::square(1)).len(), 9);
        assert_eq!(grid.neighbors(centre, GridWindow::new(-1, 0)).len(), 4);

        // Corner windows are clipped to the grid
        assert_eq!(grid.neighbors(GridCell::new(0, 0), GridWindow::square(1)).len(), 4);
    }

    #[test]
    fn test_neighbors_mut_matches_neighbors_order() {
        let mut grid = BucketGrid::new(3, 3, 1.0);
        for a in 0..3 {
            for b in 0..3 {
                grid.insert(Vec2::new(a as f32 + 0.25, b as f32 + 0.75));
            }
        }
        let window = GridWindow::new(-1, 0);
        let centre = GridCell::new(2, 1);
        let expected: Vec<Vec2> = grid.neighbors(centre, window).into_iter().copied().collect();
        let actual: Vec<Vec2> = grid.neighbors_mut(centre, window).into_iter().map(|p| *p).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_buckets_keep_insertion_order() {
        let mut grid = BucketGrid::new(1, 1, 10.0);
        grid.insert(Vec2::new(1.0, 1.0));
        grid.insert(Vec2::new(2.0, 2.0));
        let cell = GridCell::new(0, 0);
        assert_eq!(grid.bucket(cell), &[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]);
    }
}
