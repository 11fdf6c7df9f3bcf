//! Connectivity analysis - groups same-colored cells by 4-adjacency
//!
//! A fresh [`Connectivity`] is computed for every resolution step. Groups live
//! in a small arena indexed by [`GroupId`]; cells refer to their group by id,
//! so nothing survives past the step that produced it.
//!
//! Only rows below the ghost row are considered. Empty and garbage cells never
//! belong to a group.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Color, Coord, ERASE_THRESHOLD, FIELD_WIDTH, VISIBLE_HEIGHT};

/// Number of cells that can belong to a group
pub const CONNECT_CELLS: usize = FIELD_WIDTH as usize * VISIBLE_HEIGHT as usize;

/// Index of a group inside one [`Connectivity`]
pub type GroupId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Group {
    color: Color,
    size: u8,
}

/// Result of one connectivity run
#[derive(Debug, Clone)]
pub struct Connectivity {
    /// Group of each visible cell, row-major
    group_of: [Option<GroupId>; CONNECT_CELLS],
    /// Group arena, ids assigned in row-major order of each group's first cell
    groups: ArrayVec<Group, CONNECT_CELLS>,
}

impl Connectivity {
    #[inline(always)]
    fn slot(x: usize, y: usize) -> usize {
        y * FIELD_WIDTH as usize + x
    }

    /// Group containing `coord`, if any
    pub fn group_at(&self, coord: Coord) -> Option<GroupId> {
        if coord.x < 0
            || coord.x >= FIELD_WIDTH as i8
            || coord.y < 0
            || coord.y >= VISIBLE_HEIGHT as i8
        {
            return None;
        }
        self.group_of[Self::slot(coord.x as usize, coord.y as usize)]
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_size(&self, id: GroupId) -> u8 {
        self.groups[id as usize].size
    }

    pub fn group_color(&self, id: GroupId) -> Color {
        self.groups[id as usize].color
    }

    pub fn is_erasable(&self, id: GroupId) -> bool {
        self.group_size(id) >= ERASE_THRESHOLD
    }

    /// Whether the cell at `coord` belongs to an erasable group
    pub fn is_erasable_at(&self, coord: Coord) -> bool {
        self.group_at(coord).is_some_and(|id| self.is_erasable(id))
    }

    /// Distinct erasable groups in first-appearance order
    pub fn erasable_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        (0..self.groups.len() as GroupId).filter(move |&id| self.is_erasable(id))
    }

    /// Sizes of the erasable groups in first-appearance order
    pub fn erasable_sizes(&self) -> ArrayVec<u8, CONNECT_CELLS> {
        self.erasable_groups().map(|id| self.group_size(id)).collect()
    }

    /// Distinct colors among erasable groups, first-appearance order
    pub fn erasable_colors(&self) -> ArrayVec<Color, 5> {
        let mut colors = ArrayVec::new();
        for id in self.erasable_groups() {
            let color = self.group_color(id);
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }
}

/// Flood-fill the visible rows of `grid` into groups.
///
/// Cells are seeded in row-major order; each seed grows its group through an
/// explicit stack over the four orthogonal neighbors.
pub fn analyze(grid: &Grid) -> Connectivity {
    let width = FIELD_WIDTH as usize;
    let height = VISIBLE_HEIGHT as usize;

    let mut result = Connectivity {
        group_of: [None; CONNECT_CELLS],
        groups: ArrayVec::new(),
    };
    let mut stack: ArrayVec<(usize, usize), CONNECT_CELLS> = ArrayVec::new();

    for y in 0..height {
        for x in 0..width {
            let color = grid.at(x, y);
            if !color.is_colored() || result.group_of[Connectivity::slot(x, y)].is_some() {
                continue;
            }

            let id = result.groups.len() as GroupId;
            result.groups.push(Group { color, size: 1 });
            result.group_of[Connectivity::slot(x, y)] = Some(id);
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                // up, down, right, left
                let neighbors = [
                    (cy + 1 < height).then(|| (cx, cy + 1)),
                    cy.checked_sub(1).map(|ny| (cx, ny)),
                    (cx + 1 < width).then(|| (cx + 1, cy)),
                    cx.checked_sub(1).map(|nx| (nx, cy)),
                ];
                for (nx, ny) in neighbors.into_iter().flatten() {
                    let slot = Connectivity::slot(nx, ny);
                    if result.group_of[slot].is_none() && grid.at(nx, ny) == color {
                        result.group_of[slot] = Some(id);
                        result.groups[id as usize].size += 1;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_has_no_groups() {
        let conn = analyze(&Grid::new());
        assert_eq!(conn.group_count(), 0);
        assert_eq!(conn.erasable_groups().count(), 0);
    }

    #[test]
    fn test_square_is_one_erasable_group() {
        let grid = Grid::from_rows(&["11....", "11...."]).unwrap();
        let conn = analyze(&grid);

        assert_eq!(conn.group_count(), 1);
        let id = conn.group_at(Coord::new(0, 0)).unwrap();
        assert_eq!(conn.group_size(id), 4);
        assert_eq!(conn.group_color(id), Color::Green);
        assert!(conn.is_erasable(id));
        for coord in [Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)] {
            assert_eq!(conn.group_at(coord), Some(id));
        }
    }

    #[test]
    fn test_diagonal_cells_do_not_connect() {
        let grid = Grid::from_rows(&[".1....", "1....."]).unwrap();
        let conn = analyze(&grid);
        assert_eq!(conn.group_count(), 2);
    }

    #[test]
    fn test_garbage_and_empty_are_ungrouped() {
        let grid = Grid::from_rows(&["9.....", "92...."]).unwrap();
        let conn = analyze(&grid);
        assert_eq!(conn.group_count(), 1);
        assert_eq!(conn.group_at(Coord::new(0, 0)), None);
        assert_eq!(conn.group_at(Coord::new(2, 0)), None);
        assert!(conn.group_at(Coord::new(1, 0)).is_some());
    }

    #[test]
    fn test_ghost_row_is_excluded() {
        let mut rows = vec!["1....."; 4];
        rows.extend(std::iter::repeat("......").take(9));
        // rows[0] is the ghost row, rows[1..4] are rows 11..9
        let grid = Grid::from_rows(&rows).unwrap();
        let conn = analyze(&grid);

        let id = conn.group_at(Coord::new(0, 11)).unwrap();
        assert_eq!(conn.group_size(id), 3);
        assert!(!conn.is_erasable(id));
        assert_eq!(conn.group_at(Coord::new(0, 12)), None);
    }

    #[test]
    fn test_winding_group_is_counted_once() {
        let grid = Grid::from_rows(&["3333..", "3..3..", "3..333"]).unwrap();
        let conn = analyze(&grid);
        assert_eq!(conn.group_count(), 1);
        assert_eq!(conn.erasable_sizes().as_slice(), &[10]);
    }

    #[test]
    fn test_erasable_colors_are_distinct() {
        let grid = Grid::from_rows(&["1...22", "1..122", "11.111"]).unwrap();
        let conn = analyze(&grid);

        assert_eq!(conn.erasable_sizes().as_slice(), &[4, 4, 4]);
        assert_eq!(conn.erasable_colors().as_slice(), &[Color::Green, Color::Red]);
    }
}
