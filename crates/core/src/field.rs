//! Field module - places pieces and resolves chains
//!
//! [`Field`] owns the grid and the running score. Committing a piece runs the
//! resolution loop until the grid is stable:
//!
//! 1. **Drop**: floating cells fall to the lowest empty slot of their column.
//! 2. **Connect**: same-colored cells are grouped ([`crate::connect`]).
//! 3. **Score**: erasable groups are scored for the current chain index.
//! 4. **Erase**: erasable groups are cleared, along with adjacent garbage.
//!
//! The loop repeats while step 4 erased something. Every iteration erases at
//! least four cells, so it always terminates.

use arrayvec::ArrayVec;

use crate::connect::{analyze, Connectivity};
use crate::error::FieldError;
use crate::events::{
    CellMove, ChainInfo, ChainStep, DropOutcome, PlacedCell, Placement, ResolveReport,
    ScoreFormula,
};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::scoring::calculate_score;
use crate::types::{Color, Coord, FIELD_HEIGHT, FIELD_SIZE, FIELD_WIDTH, VISIBLE_HEIGHT};

/// Grid plus score, the stateful half of the simulation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    grid: Grid,
    total_score: u32,
    last_chains: Vec<ChainInfo>,
}

impl Field {
    /// Create an empty field with zero score
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing grid
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn score(&self) -> u32 {
        self.total_score
    }

    /// Overwrite the running score (used when restoring a saved state)
    pub fn set_score(&mut self, score: u32) {
        self.total_score = score;
    }

    /// Chain summaries produced by the most recent resolution
    pub fn last_chains(&self) -> &[ChainInfo] {
        &self.last_chains
    }

    pub fn is_dead(&self) -> bool {
        self.grid.is_dead()
    }

    pub fn serialize(&self) -> String {
        self.grid.serialize()
    }

    /// Replace the grid from a field string; the grid is unchanged on error
    pub fn load(&mut self, s: &str) -> Result<(), FieldError> {
        self.grid.load(s)
    }

    /// Whether both columns of `piece` have room below the ghost row
    pub fn can_drop(&self, piece: &Piece) -> bool {
        let (axis_x, child_x) = piece.columns();
        let limit = FIELD_HEIGHT as i8 - 2;
        self.grid.column_height(axis_x) < limit && self.grid.column_height(child_x) < limit
    }

    /// Where `piece` would land, without committing it.
    ///
    /// The lower of the two cells stacks first so a vertical pair keeps its
    /// order. A landing row may be at or above the top of the field; such a
    /// cell is discarded when committed.
    pub fn landing(&self, piece: &Piece) -> Placement {
        let mut heights = self.grid.column_heights();
        let from = piece.drop();

        let mut land = |cell: PlacedCell| -> PlacedCell {
            let x = cell.coord.x;
            let h = &mut heights[x as usize];
            *h += 1;
            PlacedCell {
                color: cell.color,
                coord: Coord::new(x, *h),
            }
        };

        if from.child.coord.y < from.axis.coord.y {
            let child = land(from.child);
            let axis = land(from.axis);
            Placement { axis, child }
        } else {
            let axis = land(from.axis);
            let child = land(from.child);
            Placement { axis, child }
        }
    }

    /// Commit `piece` to the grid and resolve the resulting chains
    pub fn drop_piece(&mut self, piece: &Piece) -> DropOutcome {
        let placement = self.landing(piece);
        for cell in [placement.axis, placement.child] {
            if cell.coord.y < FIELD_HEIGHT as i8 {
                self.grid.put(cell.coord.x as usize, cell.coord.y as usize, cell.color);
            }
        }

        let report = self.resolve();
        DropOutcome { placement, report }
    }

    /// Run drop/connect/score/erase until nothing is erased.
    pub fn resolve(&mut self) -> ResolveReport {
        self.last_chains.clear();
        let mut steps = Vec::new();
        let mut chain = 0u32;

        loop {
            chain += 1;

            let drops = apply_gravity(&mut self.grid);
            let conn = analyze(&self.grid);
            let formula = self.score_step(&conn, chain);
            let erased = erase(&mut self.grid, &conn);

            let done = erased.is_empty();
            steps.push(ChainStep {
                chain,
                drops,
                formula,
                erased,
            });
            if done {
                break;
            }
        }

        ResolveReport {
            steps,
            chains: self.last_chains.clone(),
            total_score: self.total_score,
        }
    }

    fn score_step(&mut self, conn: &Connectivity, chain: u32) -> Option<ScoreFormula> {
        let sizes = conn.erasable_sizes();
        let colors = conn.erasable_colors();
        let result = calculate_score(&sizes, colors.len(), chain);
        if result.score == 0 {
            return None;
        }

        self.total_score = self.total_score.saturating_add(result.score);
        self.last_chains.push(ChainInfo {
            chain,
            distinct_colors: colors.len() as u32,
            group_sizes: sizes.to_vec(),
            score_delta: result.score,
        });
        Some(ScoreFormula {
            erased: result.erased,
            bonus: result.bonus,
        })
    }
}

/// Let every floating cell fall, returning the moves in scan order.
///
/// Rows below the ghost row are filled bottom-up; the search for a falling
/// cell may reach into the ghost row.
pub fn apply_gravity(grid: &mut Grid) -> Vec<CellMove> {
    let mut moves = Vec::new();
    let top = FIELD_HEIGHT as usize - 1;

    for y in 0..VISIBLE_HEIGHT as usize {
        for x in 0..FIELD_WIDTH as usize {
            if !grid.at(x, y).is_empty() {
                continue;
            }

            let Some(from_y) = (y + 1..=top).find(|&fy| !grid.at(x, fy).is_empty()) else {
                continue;
            };

            let color = grid.at(x, from_y);
            grid.put(x, y, color);
            grid.put(x, from_y, Color::Empty);
            moves.push(CellMove {
                from: Coord::new(x as i8, from_y as i8),
                to: Coord::new(x as i8, y as i8),
            });
        }
    }

    moves
}

/// Clear erasable groups and the garbage touching them.
///
/// Returns every cleared coordinate in scan order.
pub fn erase(grid: &mut Grid, conn: &Connectivity) -> Vec<Coord> {
    let mut cleared: ArrayVec<Coord, FIELD_SIZE> = ArrayVec::new();
    let visible = VISIBLE_HEIGHT as i8;

    for y in 0..visible {
        for x in 0..FIELD_WIDTH as i8 {
            let coord = Coord::new(x, y);
            if !conn.is_erasable_at(coord) {
                continue;
            }
            grid.put(x as usize, y as usize, Color::Empty);
            cleared.push(coord);

            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let n = coord.offset(dx, dy);
                if n.y >= visible || !n.in_field() {
                    continue;
                }
                if grid.at(n.x as usize, n.y as usize) == Color::Garbage {
                    grid.put(n.x as usize, n.y as usize, Color::Empty);
                    cleared.push(n);
                }
            }
        }
    }

    cleared.to_vec()
}
