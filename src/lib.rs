//! Puyo chain simulator (workspace facade crate).
//!
//! The simulation lives in dedicated crates under `crates/`; this package
//! re-exports them under one name and adds the pieces the headless runner
//! needs: env configuration, command parsing and the JSONL event log.

pub use puyo_sim_core as core;
pub use puyo_sim_engine as engine;
pub use puyo_sim_types as types;

pub mod config;
pub mod event_log;
pub mod runner;
pub mod script;
