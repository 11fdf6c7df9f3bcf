//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the field model, chain resolution, scoring, the piece
//! state machine and the next-pair queue. It has **zero dependencies** on
//! rendering, input, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same queue and the same games
//! - **Testable**: Every rule is covered by unit tests in its module
//! - **Headless**: Events are returned as values for any renderer to replay
//!
//! # Module Structure
//!
//! - [`grid`]: 6x13 color grid with string serialization
//! - [`connect`]: flood-fill grouping of same-colored cells
//! - [`scoring`]: chain, connection and color bonuses
//! - [`field`]: the drop/connect/score/erase loop and piece landing
//! - [`piece`]: the falling pair, movement clamping and wall kicks
//! - [`rng`]: seeded random source and the circular next queue
//! - [`session`]: one game, driven by discrete actions
//! - [`events`]: serializable payloads for placements, chains and snapshots
//!
//! # Rules
//!
//! - **Erase**: four or more orthogonally connected cells of one color
//! - **Garbage**: never connects; cleared when next to an erased cell
//! - **Ghost row**: row 12 holds cells but never connects or erases
//! - **Game over**: any cell at (2, 11)
//!
//! # Example
//!
//! ```
//! use puyo_sim_core::Session;
//! use puyo_sim_types::GameAction;
//!
//! let mut session = Session::new(12345);
//! session.start().unwrap();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::RotateCw);
//! assert!(session.apply_action(GameAction::Drop));
//!
//! let outcome = session.take_last_drop().unwrap();
//! assert_eq!(outcome.placement.axis.coord.y, 0);
//! ```

pub mod connect;
pub mod error;
pub mod events;
pub mod field;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;

pub use puyo_sim_types as types;

// Re-export commonly used types for convenience
pub use connect::{analyze, Connectivity, GroupId};
pub use error::{FieldError, QueueError, SessionError};
pub use events::{
    ActiveSnapshot, CellMove, ChainInfo, ChainStep, DropOutcome, PlacedCell, Placement,
    ResolveReport, ScoreFormula, SessionSnapshot,
};
pub use field::{apply_gravity, erase, Field};
pub use grid::Grid;
pub use piece::Piece;
pub use rng::{shuffle, Advance, NextQueue, RandomSource, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use session::Session;
