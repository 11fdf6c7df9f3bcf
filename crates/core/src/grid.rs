//! Grid module - owns the field cells and their string form
//!
//! The grid is a 6x13 array of colors stored flat for cache locality.
//! Coordinates: (x, y) where x ranges 0..5 (left to right) and y ranges 0..12
//! (bottom to top). Row 12 is the ghost row.
//!
//! The serialized form is one character per cell in the same flat order
//! (row 0 first, left to right), using the alphabet `0 1 2 3 4 5 9`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FieldError;
use crate::types::{Color, Coord, DEATH_CELL, FIELD_HEIGHT, FIELD_SIZE, FIELD_WIDTH};

/// The playing field - 6 columns x 13 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Color; FIELD_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Color::Empty; FIELD_SIZE],
        }
    }

    /// Get the color at `coord`, `None` when out of bounds
    pub fn get(&self, coord: Coord) -> Option<Color> {
        coord.index().map(|idx| self.cells[idx])
    }

    /// Set the color at `coord`
    pub fn set(&mut self, coord: Coord, color: Color) -> Result<(), FieldError> {
        match coord.index() {
            Some(idx) => {
                self.cells[idx] = color;
                Ok(())
            }
            None => Err(FieldError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            }),
        }
    }

    /// Color at an in-bounds coordinate.
    ///
    /// Only for coordinates the caller has already bounded to the field.
    #[inline(always)]
    pub(crate) fn at(&self, x: usize, y: usize) -> Color {
        self.cells[y * FIELD_WIDTH as usize + x]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, x: usize, y: usize, color: Color) {
        self.cells[y * FIELD_WIDTH as usize + x] = color;
    }

    /// Serialize to the 78-character field string
    pub fn serialize(&self) -> String {
        self.cells.iter().map(Color::as_char).collect()
    }

    /// Parse a field string into a new grid
    pub fn deserialize(s: &str) -> Result<Self, FieldError> {
        let mut cells = [Color::Empty; FIELD_SIZE];
        let mut count = 0usize;
        for (index, ch) in s.chars().enumerate() {
            if index >= FIELD_SIZE {
                return Err(FieldError::Length {
                    actual: s.chars().count(),
                });
            }
            cells[index] = Color::from_char(ch).ok_or(FieldError::UnknownColor { index, ch })?;
            count += 1;
        }
        if count != FIELD_SIZE {
            return Err(FieldError::Length { actual: count });
        }
        Ok(Self { cells })
    }

    /// Replace the contents from a field string.
    ///
    /// The string is fully validated first; on error the grid is unchanged.
    pub fn load(&mut self, s: &str) -> Result<(), FieldError> {
        *self = Self::deserialize(s)?;
        Ok(())
    }

    /// Build a grid from visual rows listed top to bottom.
    ///
    /// Rows are bottom-aligned: the last string is row 0. Each row must be six
    /// field characters; `.` is accepted as Empty for readability.
    ///
    /// ```
    /// use puyo_sim_core::Grid;
    /// use puyo_sim_core::types::{Color, Coord};
    ///
    /// let grid = Grid::from_rows(&["1.....", "11...."]).unwrap();
    /// assert_eq!(grid.get(Coord::new(0, 1)), Some(Color::Green));
    /// assert_eq!(grid.get(Coord::new(1, 0)), Some(Color::Green));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, FieldError> {
        let width = FIELD_WIDTH as usize;
        if rows.len() > FIELD_HEIGHT as usize {
            return Err(FieldError::Length {
                actual: rows.len() * width,
            });
        }
        let mut grid = Self::new();
        for (i, row) in rows.iter().rev().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(FieldError::Length {
                    actual: i * width + len,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let color = if ch == '.' {
                    Color::Empty
                } else {
                    Color::from_char(ch).ok_or(FieldError::UnknownColor {
                        index: i * width + x,
                        ch,
                    })?
                };
                grid.put(x, i, color);
            }
        }
        Ok(grid)
    }

    /// Whether the death cell is occupied
    pub fn is_dead(&self) -> bool {
        self.get(DEATH_CELL).is_some_and(|c| !c.is_empty())
    }

    /// Topmost occupied row of column `x`, or -1 when the column is empty
    /// (or `x` is outside the field).
    pub fn column_height(&self, x: i8) -> i8 {
        if x < 0 || x >= FIELD_WIDTH as i8 {
            return -1;
        }
        (0..FIELD_HEIGHT as usize)
            .rev()
            .find(|&y| !self.at(x as usize, y).is_empty())
            .map_or(-1, |y| y as i8)
    }

    /// Heights of all columns, see [`Grid::column_height`]
    pub fn column_heights(&self) -> [i8; FIELD_WIDTH as usize] {
        let mut heights = [-1i8; FIELD_WIDTH as usize];
        for (x, h) in heights.iter_mut().enumerate() {
            *h = self.column_height(x as i8);
        }
        heights
    }

    /// Number of non-empty cells (garbage included)
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.cells {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Grid::serialize(self))
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Grid::deserialize(&s).map_err(serde::de::Error::custom)
    }
}
