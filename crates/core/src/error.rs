//! Typed errors raised by the core.
//!
//! Every fallible operation validates before it mutates, so an `Err` never
//! leaves a field or queue half-updated.

use thiserror::Error;

use crate::types::FIELD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field string has {actual} cells, expected {}", FIELD_SIZE)]
    Length { actual: usize },
    #[error("unknown color character {ch:?} at index {index}")]
    UnknownColor { index: usize, ch: char },
    #[error("coordinate ({x}, {y}) is outside the field")]
    OutOfBounds { x: i8, y: i8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("next queue is empty")]
    Empty,
    #[error("repeat count {repeat} leaves fewer than two copies of each color")]
    RepeatTooSmall { repeat: u32 },
}

/// Failure while restoring a saved session state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
