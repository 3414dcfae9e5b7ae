//! Ruled table grids.
//!
//! A `TableGrid` is described by the positions of its vertical rules
//! (`columns`) and horizontal rules (`rows`). Besides drawing itself it can
//! report the cell rectangles between the rules, which tests use as the
//! expected layout of a detected table.

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::{
    draw::{draw_line, Color},
    geometry::{Point, Rect},
    raster::Raster,
};

/// A grid of at least one cell, with strictly increasing rule positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    columns: Vec<i32>,
    rows: Vec<i32>,
    thickness: u32,
    color: Color,
}

impl TableGrid {
    /// Creates a grid with black rules two pixels thick.
    pub fn new(columns: Vec<i32>, rows: Vec<i32>) -> Result<Self> {
        anyhow::ensure!(
            columns.len() >= 2 && rows.len() >= 2,
            "A table needs at least two rules in each direction"
        );
        anyhow::ensure!(
            is_increasing(&columns) && is_increasing(&rows),
            "Rule positions must be strictly increasing"
        );
        Ok(Self::from_valid(columns, rows))
    }

    /// Wraps rule positions already known to satisfy the grid invariants.
    pub(crate) fn from_valid(columns: Vec<i32>, rows: Vec<i32>) -> Self {
        debug_assert!(columns.len() >= 2 && rows.len() >= 2);
        debug_assert!(is_increasing(&columns) && is_increasing(&rows));
        Self {
            columns,
            rows,
            thickness: 2,
            color: Color::BLACK,
        }
    }

    /// A grid of `n_cols` x `n_rows` equally sized cells starting at `origin`.
    ///
    /// Fails when the last rule would not fit in an `i32`.
    pub fn uniform(
        origin: Point,
        cell_width: u32,
        cell_height: u32,
        n_cols: u32,
        n_rows: u32,
    ) -> Result<Self> {
        anyhow::ensure!(cell_width > 0 && cell_height > 0, "Cells must have a positive size");
        let columns = evenly_spaced(origin.x, cell_width, n_cols).context("Table is too wide")?;
        let rows = evenly_spaced(origin.y, cell_height, n_rows).context("Table is too tall")?;
        Self::new(columns, rows)
    }

    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// x positions of the vertical rules, left to right.
    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    /// y positions of the horizontal rules, top to bottom.
    pub fn rows(&self) -> &[i32] {
        &self.rows
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len() - 1
    }

    /// The outer frame of the table, measured between rule centers.
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(
            Point::new(self.columns[0], self.rows[0]),
            Point::new(self.columns[self.n_cols()], self.rows[self.n_rows()]),
        )
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Rect> {
        if row >= self.n_rows() || col >= self.n_cols() {
            return None;
        }
        Some(Rect::from_corners(
            Point::new(self.columns[col], self.rows[row]),
            Point::new(self.columns[col + 1], self.rows[row + 1]),
        ))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> Vec<Rect> {
        (0..self.n_rows())
            .cartesian_product(0..self.n_cols())
            .filter_map(|(row, col)| self.cell(row, col))
            .collect()
    }

    pub fn draw(&self, raster: &mut Raster) {
        let (left, right) = (self.columns[0], self.columns[self.n_cols()]);
        let (top, bottom) = (self.rows[0], self.rows[self.n_rows()]);

        for &y in &self.rows {
            draw_line(raster, Point::new(left, y), Point::new(right, y), self.color, self.thickness);
        }
        for &x in &self.columns {
            draw_line(raster, Point::new(x, top), Point::new(x, bottom), self.color, self.thickness);
        }
    }
}

/// `count + 1` rule positions `step` apart, or `None` past `i32::MAX`.
fn evenly_spaced(start: i32, step: u32, count: u32) -> Option<Vec<i32>> {
    let span = i32::try_from(u64::from(step) * u64::from(count)).ok()?;
    start.checked_add(span)?;
    Some(
        (0..=count)
            .map(|i| start + (u64::from(i) * u64::from(step)) as i32)
            .collect(),
    )
}

fn is_increasing(values: &[i32]) -> bool {
    values.iter().tuple_windows().all(|(a, b)| a < b)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rejects_bad_rules() {
        assert!(TableGrid::new(vec![10], vec![0, 10]).is_err());
        assert!(TableGrid::new(vec![10, 10], vec![0, 10]).is_err());
        assert!(TableGrid::new(vec![20, 10], vec![0, 10]).is_err());
    }

    #[test]
    fn test_uniform_grid() {
        let grid = TableGrid::uniform(Point::new(50, 50), 100, 50, 3, 3).unwrap();
        assert_eq!(grid.columns(), &[50, 150, 250, 350]);
        assert_eq!(grid.rows(), &[50, 100, 150, 200]);
        assert_eq!(grid.thickness(), 2);
        assert_eq!(grid.color(), Color::BLACK);
        assert_eq!(grid.bounds(), Rect::new(50, 50, 300, 150));
    }

    #[test]
    fn test_uniform_rejects_overflow() {
        assert!(TableGrid::uniform(Point::new(0, 0), 1 << 20, 10, 4096, 2).is_err());
        assert!(TableGrid::uniform(Point::new(0, 0), 10, u32::MAX, 2, 2).is_err());
        assert!(TableGrid::uniform(Point::new(i32::MAX - 5, 0), 10, 10, 1, 1).is_err());

        let edge = TableGrid::uniform(Point::new(i32::MAX - 10, i32::MIN), 10, 10, 1, 1).unwrap();
        assert_eq!(edge.columns(), &[i32::MAX - 10, i32::MAX]);
        assert_eq!(edge.rows(), &[i32::MIN, i32::MIN + 10]);
    }

    #[test]
    fn test_uniform_needs_a_cell() {
        assert!(TableGrid::uniform(Point::new(0, 0), 10, 10, 0, 3).is_err());
        assert!(TableGrid::uniform(Point::new(0, 0), 0, 10, 3, 3).is_err());
    }

    #[test]
    fn test_full_range_grid() {
        let grid = TableGrid::new(vec![i32::MIN, 0, i32::MAX], vec![i32::MIN, i32::MAX]).unwrap();
        assert_eq!(grid.cell(0, 0), Some(Rect::new(i32::MIN, i32::MIN, 1 << 31, u32::MAX)));
        assert_eq!(grid.bounds().width, u32::MAX);

        let mut img = Raster::white(10, 10, crate::raster::Channels::Gray);
        grid.with_thickness(1).draw(&mut img);
        // Only the x = 0 rule crosses the canvas.
        assert!((0..10).all(|y| img.get(0, y, 0) == Some(0)));
        assert_eq!(img.get(1, 5, 0), Some(255));
    }

    #[test]
    fn test_cells_row_major() {
        let grid = TableGrid::new(vec![0, 10, 30], vec![0, 5, 20]).unwrap();
        let cells = grid.cells();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], Rect::new(0, 0, 10, 5));
        assert_eq!(cells[1], Rect::new(10, 0, 20, 5));
        assert_eq!(cells[2], Rect::new(0, 5, 10, 15));
        assert_eq!(cells[3], Rect::new(10, 5, 20, 15));
        assert_eq!(grid.cell(2, 0), None);
    }
}
