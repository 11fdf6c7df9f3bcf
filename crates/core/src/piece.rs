//! Piece module - the falling pair and its movement rules
//!
//! A piece is an axis cell plus a child cell. Only the axis column and the
//! orientation change while the piece is controlled; the axis row stays at
//! [`PIECE_ROW`] of the piece area. Landing rows are decided by the field.
//!
//! Movement clamps instead of failing:
//! - `move_by` keeps both cells inside columns 0..=5,
//! - `rotate` kicks the axis one column away from the wall when the child
//!   would leave the field.

use crate::events::{PlacedCell, Placement};
use crate::types::{ColorPair, Coord, Orientation, FIELD_WIDTH, PIECE_ROW, SPAWN_COLUMN};

/// The controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pair: ColorPair,
    axis_x: i8,
    orientation: Orientation,
}

impl Piece {
    /// Create a piece at the spawn column, child on top
    pub fn new(pair: ColorPair) -> Self {
        Self {
            pair,
            axis_x: SPAWN_COLUMN,
            orientation: Orientation::Top,
        }
    }

    /// Replace the colors and return to the spawn state
    pub fn spawn(&mut self, pair: ColorPair) {
        *self = Self::new(pair);
    }

    pub fn pair(&self) -> ColorPair {
        self.pair
    }

    pub fn axis_x(&self) -> i8 {
        self.axis_x
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn axis_coord(&self) -> Coord {
        Coord::new(self.axis_x, PIECE_ROW)
    }

    pub fn child_coord(&self) -> Coord {
        let (dx, dy) = self.orientation.child_offset();
        self.axis_coord().offset(dx, dy)
    }

    /// Columns of the axis and child cells
    pub fn columns(&self) -> (i8, i8) {
        (self.axis_x, self.child_coord().x)
    }

    /// Allowed axis column range for the current orientation
    fn column_bounds(&self) -> (i8, i8) {
        let lo = if self.orientation == Orientation::Left { 1 } else { 0 };
        let hi = if self.orientation == Orientation::Right {
            FIELD_WIDTH as i8 - 2
        } else {
            FIELD_WIDTH as i8 - 1
        };
        (lo, hi)
    }

    /// Shift the axis column by `delta`, clamped so both cells stay on the field.
    pub fn move_by(&mut self, delta: i32) {
        let (lo, hi) = self.column_bounds();
        let to = (self.axis_x as i32 + delta).clamp(lo as i32, hi as i32);
        self.axis_x = to as i8;
    }

    /// Rotate, then kick off the wall if the child left the field.
    pub fn rotate(&mut self, clockwise: bool) {
        self.orientation = self.orientation.rotated(clockwise);
        if self.orientation == Orientation::Right && self.axis_x == FIELD_WIDTH as i8 - 1 {
            self.axis_x -= 1;
        }
        if self.orientation == Orientation::Left && self.axis_x == 0 {
            self.axis_x += 1;
        }
        debug_assert!(self.child_coord().x >= 0 && self.child_coord().x < FIELD_WIDTH as i8);
    }

    /// Current cells with colors, in piece-area coordinates
    pub fn drop(&self) -> Placement {
        Placement {
            axis: PlacedCell {
                color: self.pair.axis,
                coord: self.axis_coord(),
            },
            child: PlacedCell {
                color: self.pair.child,
                coord: self.child_coord(),
            },
        }
    }
}
