//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: colors, coordinates, orientations, color pairs
//! and the discrete actions a session accepts. Nothing in this crate mutates a
//! field or owns randomness.
//!
//! # Field Dimensions
//!
//! - **Width**: 6 columns (indexed 0-5, left to right)
//! - **Height**: 13 rows (indexed 0-12, bottom to top)
//! - **Ghost row**: row 12, never connected or erased
//! - **Death cell**: (2, 11), occupied means game over
//!
//! # Bonus Tables
//!
//! | Table | Indexed by | Values |
//! |-------|------------|--------|
//! | `CHAIN_BONUS` | chain - 1 | 0, 8, 16, 32, 64, 96 ... 512 |
//! | `CONNECT_BONUS` | clamp(size, 4, 11) - 4 | 0, 2, 3, 4, 5, 6, 7, 10 |
//! | `COLOR_BONUS` | distinct colors - 1 | 0, 3, 6, 12, 24 |
//!
//! # Examples
//!
//! ```
//! use puyo_sim_types::{Color, GameAction, Orientation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! // Colors map one-to-one onto serialized characters
//! assert_eq!(Color::from_char('3'), Some(Color::Blue));
//! assert_eq!(Color::Garbage.as_char(), '9');
//!
//! // Orientations rotate clockwise Top -> Right -> Bottom -> Left
//! assert_eq!(Orientation::Top.rotated(true), Orientation::Right);
//! assert_eq!(Orientation::Top.child_offset(), (0, 1));
//!
//! // Parse a session action
//! assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
//!
//! assert_eq!(FIELD_WIDTH, 6);
//! assert_eq!(FIELD_HEIGHT, 13);
//! ```

use serde::{Deserialize, Serialize};

/// Field width in cells (6 columns)
pub const FIELD_WIDTH: u8 = 6;

/// Field height in cells (13 rows, the top one being the ghost row)
pub const FIELD_HEIGHT: u8 = 13;

/// Total number of cells on the field
pub const FIELD_SIZE: usize = FIELD_WIDTH as usize * FIELD_HEIGHT as usize;

/// Index of the ghost row (excluded from connectivity and erasure)
pub const GHOST_ROW: u8 = FIELD_HEIGHT - 1;

/// Number of rows that take part in connectivity (rows 0..GHOST_ROW)
pub const VISIBLE_HEIGHT: u8 = FIELD_HEIGHT - 1;

/// Cell whose occupancy ends the game
pub const DEATH_CELL: Coord = Coord::new(2, 11);

/// Minimum group size that gets erased
pub const ERASE_THRESHOLD: u8 = 4;

/// Column the axis cell spawns in
pub const SPAWN_COLUMN: i8 = 2;

/// Row of the axis cell inside the piece area
pub const PIECE_ROW: i8 = 1;

/// Default repeat count used by the next queue generator (64 repeats per color)
pub const QUEUE_REPEAT: u32 = 128;

/// Number of trailing empty pairs appended when replaying a solved puzzle
pub const REPLAY_PADDING: usize = 3;

/// Chain bonus by chain index (index 0 = first chain)
///
/// Chains beyond the end of the table reuse the last entry.
pub const CHAIN_BONUS: [u32; 19] = [
    0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512,
];

/// Connection bonus by group size (index 0 = 4 cells, index 7 = 11 or more)
pub const CONNECT_BONUS: [u32; 8] = [0, 2, 3, 4, 5, 6, 7, 10];

/// Color bonus by number of distinct colors erased at once (index 0 = one color)
pub const COLOR_BONUS: [u32; 5] = [0, 3, 6, 12, 24];

/// Cell color
///
/// `Empty` and `Garbage` never join a group. The discriminants match the
/// serialized field characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    #[default]
    Empty = 0,
    Green = 1,
    Red = 2,
    Blue = 3,
    Yellow = 4,
    Purple = 5,
    Garbage = 9,
}

impl Color {
    /// The five playable colors in queue-generation order
    pub const PALETTE: [Color; 5] = [
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
    ];

    /// Parse from the serialized field character
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_sim_types::Color;
    ///
    /// assert_eq!(Color::from_char('0'), Some(Color::Empty));
    /// assert_eq!(Color::from_char('5'), Some(Color::Purple));
    /// assert_eq!(Color::from_char('6'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Color::Empty),
            '1' => Some(Color::Green),
            '2' => Some(Color::Red),
            '3' => Some(Color::Blue),
            '4' => Some(Color::Yellow),
            '5' => Some(Color::Purple),
            '9' => Some(Color::Garbage),
            _ => None,
        }
    }

    /// Serialized field character
    pub fn as_char(&self) -> char {
        match self {
            Color::Empty => '0',
            Color::Green => '1',
            Color::Red => '2',
            Color::Blue => '3',
            Color::Yellow => '4',
            Color::Purple => '5',
            Color::Garbage => '9',
        }
    }

    /// Whether this color can form a group (not Empty, not Garbage)
    pub fn is_colored(&self) -> bool {
        !matches!(self, Color::Empty | Color::Garbage)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Color::Empty)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Empty => "empty",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Garbage => "garbage",
        }
    }
}

/// Field coordinate, x = column (0 at the left), y = row (0 at the bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Translate by an offset
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the coordinate lies on the field (ghost row included)
    pub fn in_field(&self) -> bool {
        self.x >= 0 && self.x < FIELD_WIDTH as i8 && self.y >= 0 && self.y < FIELD_HEIGHT as i8
    }

    /// Flat row-major index, `None` when outside the field
    #[inline(always)]
    pub fn index(&self) -> Option<usize> {
        if !self.in_field() {
            return None;
        }
        Some(self.y as usize * FIELD_WIDTH as usize + self.x as usize)
    }

    /// Inverse of [`Coord::index`]
    pub fn from_index(index: usize) -> Self {
        let w = FIELD_WIDTH as usize;
        Self::new((index % w) as i8, (index / w) as i8)
    }
}

/// Orientation of the child cell relative to the axis cell
///
/// Uses a clockwise cycle:
/// - **Top**: child above the axis (spawn orientation)
/// - **Right**: child right of the axis
/// - **Bottom**: child below the axis
/// - **Left**: child left of the axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl Orientation {
    /// Child offset `(dx, dy)` from the axis cell
    pub fn child_offset(&self) -> (i8, i8) {
        match self {
            Orientation::Top => (0, 1),
            Orientation::Right => (1, 0),
            Orientation::Bottom => (0, -1),
            Orientation::Left => (-1, 0),
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_sim_types::Orientation;
    ///
    /// assert_eq!(Orientation::Top.rotate_cw(), Orientation::Right);
    /// assert_eq!(Orientation::Right.rotate_cw(), Orientation::Bottom);
    /// assert_eq!(Orientation::Bottom.rotate_cw(), Orientation::Left);
    /// assert_eq!(Orientation::Left.rotate_cw(), Orientation::Top);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::Top => Orientation::Right,
            Orientation::Right => Orientation::Bottom,
            Orientation::Bottom => Orientation::Left,
            Orientation::Left => Orientation::Top,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Orientation::Top => Orientation::Left,
            Orientation::Left => Orientation::Bottom,
            Orientation::Bottom => Orientation::Right,
            Orientation::Right => Orientation::Top,
        }
    }

    pub fn rotated(&self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }

    /// Parse orientation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "top" | "t", "right" | "r", "bottom" | "b", "left" | "l"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" | "t" => Some(Orientation::Top),
            "right" | "r" => Some(Orientation::Right),
            "bottom" | "b" => Some(Orientation::Bottom),
            "left" | "l" => Some(Orientation::Left),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Top => "top",
            Orientation::Right => "right",
            Orientation::Bottom => "bottom",
            Orientation::Left => "left",
        }
    }
}

/// Colors of one piece: the axis cell and the child cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorPair {
    pub axis: Color,
    pub child: Color,
}

impl ColorPair {
    pub const EMPTY: ColorPair = ColorPair::new(Color::Empty, Color::Empty);

    pub const fn new(axis: Color, child: Color) -> Self {
        Self { axis, child }
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty() && self.child.is_empty()
    }
}

/// Actions that can be applied to a session
///
/// These map one-to-one onto the discrete player inputs. Each action is
/// refused once the session is dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the piece one column left
    MoveLeft,
    /// Move the piece one column right
    MoveRight,
    /// Rotate the piece clockwise
    RotateCw,
    /// Rotate the piece counter-clockwise
    RotateCcw,
    /// Commit the piece to the field and resolve chains
    Drop,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_sim_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("drop"), Some(GameAction::Drop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "drop" => Some(GameAction::Drop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Drop => "drop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_geometry_defaults() {
        assert_eq!(FIELD_SIZE, 78);
        assert_eq!(GHOST_ROW, 12);
        assert_eq!(VISIBLE_HEIGHT, 12);
        assert_eq!(DEATH_CELL, Coord::new(2, 11));
        assert_ne!(DEATH_CELL.y, GHOST_ROW as i8);
    }

    #[test]
    fn bonus_tables_match_reference_values() {
        assert_eq!(CHAIN_BONUS.len(), 19);
        assert_eq!(CHAIN_BONUS[18], 512);
        assert_eq!(CONNECT_BONUS[7], 10);
        assert_eq!(COLOR_BONUS, [0, 3, 6, 12, 24]);
    }

    #[test]
    fn color_chars_round_trip() {
        for c in [
            Color::Empty,
            Color::Green,
            Color::Red,
            Color::Blue,
            Color::Yellow,
            Color::Purple,
            Color::Garbage,
        ] {
            assert_eq!(Color::from_char(c.as_char()), Some(c));
            assert_eq!(c.as_char() as u8 - b'0', c as u8);
        }
    }

    #[test]
    fn only_palette_colors_are_colored() {
        assert!(!Color::Empty.is_colored());
        assert!(!Color::Garbage.is_colored());
        assert!(Color::PALETTE.iter().all(Color::is_colored));
    }

    #[test]
    fn rotation_cycles_are_inverse() {
        for o in [
            Orientation::Top,
            Orientation::Right,
            Orientation::Bottom,
            Orientation::Left,
        ] {
            assert_eq!(o.rotate_cw().rotate_ccw(), o);
            assert_eq!(o.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), o);
        }
    }

    #[test]
    fn coord_index_bounds() {
        assert_eq!(Coord::new(0, 0).index(), Some(0));
        assert_eq!(Coord::new(5, 0).index(), Some(5));
        assert_eq!(Coord::new(0, 1).index(), Some(6));
        assert_eq!(Coord::new(5, 12).index(), Some(77));
        assert_eq!(Coord::new(-1, 0).index(), None);
        assert_eq!(Coord::new(6, 0).index(), None);
        assert_eq!(Coord::new(0, 13).index(), None);
        assert_eq!(Coord::from_index(77), Coord::new(5, 12));
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Color::Red).unwrap(), "\"red\"");
        assert_eq!(
            serde_json::from_str::<Orientation>("\"RIGHT\"").unwrap(),
            Orientation::Right
        );
    }
}
