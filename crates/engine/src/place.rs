use thiserror::Error;

use crate::core::{DropOutcome, Session};
use crate::types::{GameAction, Orientation, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("target x would place piece out of bounds")]
    XOutOfBounds,
    #[error("target columns are too high to drop into")]
    ColumnFull,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::ColumnFull => "column_full",
            PlaceError::XOutOfBounds | PlaceError::NotPlayable | PlaceError::NoActive => {
                "invalid_place"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::ColumnFull => "target columns are too high to drop into",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

/// Axis columns reachable with the child at `orientation`
fn axis_range(orientation: Orientation) -> (i8, i8) {
    let w = FIELD_WIDTH as i8;
    match orientation {
        Orientation::Left => (1, w - 1),
        Orientation::Right => (0, w - 2),
        Orientation::Top | Orientation::Bottom => (0, w - 1),
    }
}

/// Rotate the active piece to `target_rot`, move its axis to `target_x` and
/// drop it. The session is left untouched on error.
pub fn apply_place(
    state: &mut Session,
    target_x: i8,
    target_rot: Orientation,
) -> Result<DropOutcome, PlaceError> {
    if state.is_dead() {
        return Err(PlaceError::NotPlayable);
    }

    let Some(active0) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    let (lo, hi) = axis_range(target_rot);
    if target_x < lo || target_x > hi {
        return Err(PlaceError::XOutOfBounds);
    }

    let rot_to_i = |r: Orientation| match r {
        Orientation::Top => 0i8,
        Orientation::Right => 1i8,
        Orientation::Bottom => 2i8,
        Orientation::Left => 3i8,
    };

    // Three clockwise turns are one counter-clockwise turn.
    let cw = (rot_to_i(target_rot) - rot_to_i(active0.orientation())).rem_euclid(4);
    let snapshot = state.clone();
    if cw == 3 {
        state.apply_action(GameAction::RotateCcw);
    } else {
        for _ in 0..cw {
            state.apply_action(GameAction::RotateCw);
        }
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    let dx = target_x - active.axis_x();
    let (step, action) = if dx < 0 {
        (-dx, GameAction::MoveLeft)
    } else {
        (dx, GameAction::MoveRight)
    };
    for _ in 0..step {
        state.apply_action(action);
    }

    if state.active().map(|p| p.axis_x()) != Some(target_x) {
        *state = snapshot;
        return Err(PlaceError::XOutOfBounds);
    }

    if !state.apply_action(GameAction::Drop) {
        *state = snapshot;
        return Err(PlaceError::ColumnFull);
    }

    state.take_last_drop().ok_or(PlaceError::NoActive)
}
