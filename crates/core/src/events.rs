//! Event payloads handed to renderers and loggers.
//!
//! The core never animates anything. It returns these values from placement
//! and resolution so a collaborator can replay them. All of them serialize to
//! camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::types::{Color, ColorPair, Coord, Orientation};

/// One colored cell at a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedCell {
    pub color: Color,
    pub coord: Coord,
}

/// Axis and child cells of a piece, either in the piece area or on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub axis: PlacedCell,
    pub child: PlacedCell,
}

/// A cell moved down by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellMove {
    pub from: Coord,
    pub to: Coord,
}

/// The `(erased, bonus)` pair shown as the score formula of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreFormula {
    pub erased: u32,
    pub bonus: u32,
}

/// Summary of one scoring chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain: u32,
    pub distinct_colors: u32,
    pub group_sizes: Vec<u8>,
    pub score_delta: u32,
}

/// Everything that happened during one drop/connect/score/erase iteration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStep {
    pub chain: u32,
    pub drops: Vec<CellMove>,
    pub formula: Option<ScoreFormula>,
    /// Erased cells, garbage cleared by adjacency included
    pub erased: Vec<Coord>,
}

/// Result of one full resolution
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub steps: Vec<ChainStep>,
    pub chains: Vec<ChainInfo>,
    pub total_score: u32,
}

impl ResolveReport {
    /// Number of scoring chains
    pub fn chain_count(&self) -> u32 {
        self.chains.len() as u32
    }

    /// Score gained during this resolution
    pub fn score_gained(&self) -> u32 {
        self.chains
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.score_delta))
    }
}

/// A committed piece: where it landed and what it set off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropOutcome {
    pub placement: Placement,
    pub report: ResolveReport,
}

/// Active piece as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub pair: ColorPair,
    pub axis_x: i8,
    pub orientation: Orientation,
}

/// Externally visible session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub field: String,
    pub score: u32,
    pub active: Option<ActiveSnapshot>,
    pub guide: Option<Placement>,
    pub next: [ColorPair; 2],
    pub dead: bool,
}
