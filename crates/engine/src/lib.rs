//! Engine helpers built on top of the core session.
//!
//! - [`place`]: drive the active piece to a target column and orientation,
//!   then drop it
//! - [`puzzle`]: puzzle sequences and replay of solved answers

pub mod place;
pub mod puzzle;

pub use puyo_sim_core as core;
pub use puyo_sim_types as types;

pub use place::{apply_place, PlaceError};
pub use puzzle::{replay_solution, PuzzleError, PuzzleSequence, SolutionStep, PUZZLE_SLOTS};
