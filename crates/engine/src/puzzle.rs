//! Puzzle sequences and solution replay
//!
//! A puzzle lists up to [`PUZZLE_SLOTS`] pairs the player is given, encoded
//! as one character per cell: axis first, then child, `0` for an unused slot.
//! Used slots come first; once a slot is empty every later slot must be too.
//!
//! A solver answers with one [`SolutionStep`] per pair. [`replay_solution`]
//! loads those pairs into a session and plays each placement in order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::core::{DropOutcome, Session};
use crate::place::{apply_place, PlaceError};
use crate::types::{Color, ColorPair, Orientation, REPLAY_PADDING};

/// Number of slots in an editable puzzle
pub const PUZZLE_SLOTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle string has odd length {0}")]
    OddLength(usize),
    #[error("unknown color character {ch:?} at index {index}")]
    UnknownColor { index: usize, ch: char },
    #[error("garbage cannot be part of a pair (slot {0})")]
    Garbage(usize),
    #[error("slot {0} is out of range")]
    SlotOutOfRange(usize),
    #[error("the first slot is empty")]
    EmptyFirst,
    #[error("slot {0} has only one color")]
    HalfEmpty(usize),
    #[error("slot {0} is used after an empty slot")]
    ColorAfterEmpty(usize),
}

/// The pairs given by a puzzle, empty slots included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSequence {
    slots: Vec<ColorPair>,
}

impl Default for PuzzleSequence {
    fn default() -> Self {
        Self {
            slots: vec![ColorPair::EMPTY; PUZZLE_SLOTS],
        }
    }
}

impl PuzzleSequence {
    /// Blank puzzle with every slot empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `axis child axis child ...`; the result is not validated.
    pub fn parse(s: &str) -> Result<Self, PuzzleError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() % 2 != 0 {
            return Err(PuzzleError::OddLength(chars.len()));
        }

        let mut slots = Vec::with_capacity(chars.len() / 2);
        for (slot, cells) in chars.chunks_exact(2).enumerate() {
            let mut colors = [Color::Empty; 2];
            for (k, &ch) in cells.iter().enumerate() {
                let index = slot * 2 + k;
                let color =
                    Color::from_char(ch).ok_or(PuzzleError::UnknownColor { index, ch })?;
                if color == Color::Garbage {
                    return Err(PuzzleError::Garbage(slot));
                }
                colors[k] = color;
            }
            slots.push(ColorPair::new(colors[0], colors[1]));
        }
        Ok(Self { slots })
    }

    /// Change one slot; garbage is refused.
    pub fn set(&mut self, slot: usize, pair: ColorPair) -> Result<(), PuzzleError> {
        if pair.axis == Color::Garbage || pair.child == Color::Garbage {
            return Err(PuzzleError::Garbage(slot));
        }
        let cell = self
            .slots
            .get_mut(slot)
            .ok_or(PuzzleError::SlotOutOfRange(slot))?;
        *cell = pair;
        Ok(())
    }

    pub fn slots(&self) -> &[ColorPair] {
        &self.slots
    }

    /// Check the slot layout:
    /// - the first slot is used,
    /// - no slot has exactly one color,
    /// - nothing is used after an empty slot.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let mut seen_empty = false;
        for (i, pair) in self.slots.iter().enumerate() {
            if i == 0 && pair.is_empty() {
                return Err(PuzzleError::EmptyFirst);
            }
            if pair.axis.is_empty() != pair.child.is_empty() {
                return Err(PuzzleError::HalfEmpty(i));
            }
            if pair.is_empty() {
                seen_empty = true;
                continue;
            }
            if seen_empty {
                return Err(PuzzleError::ColorAfterEmpty(i));
            }
        }
        Ok(())
    }

    /// Used slots in order
    pub fn pairs(&self) -> Vec<ColorPair> {
        self.slots
            .iter()
            .copied()
            .take_while(|p| !p.is_empty())
            .collect()
    }
}

impl fmt::Display for PuzzleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.slots {
            write!(f, "{}{}", pair.axis.as_char(), pair.child.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for PuzzleSequence {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One placement of a solved puzzle, as reported by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionStep {
    #[serde(with = "color_char")]
    pub axis_color: Color,
    #[serde(with = "color_char")]
    pub child_color: Color,
    pub position: Orientation,
    #[serde(with = "column")]
    pub axis_x: i8,
}

impl SolutionStep {
    pub fn pair(&self) -> ColorPair {
        ColorPair::new(self.axis_color, self.child_color)
    }
}

/// Colors travel as their field character, e.g. `"3"`.
mod color_char {
    use super::*;
    use serde::de::Error;

    pub fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        s.serialize_str(color.as_char().encode_utf8(&mut buf))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let s = String::deserialize(d)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                Color::from_char(ch).ok_or_else(|| D::Error::custom(format!("unknown color {s:?}")))
            }
            _ => Err(D::Error::custom(format!("unknown color {s:?}"))),
        }
    }
}

/// The solver sends columns as strings; numbers are accepted too.
mod column {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i8),
        Text(String),
    }

    pub fn serialize<S: Serializer>(x: &i8, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&x.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i8, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Num(x) => Ok(x),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid column {s:?}"))),
        }
    }
}

/// Load the answer's pairs into `session` and play every step.
///
/// The queue gets [`REPLAY_PADDING`] empty pairs after the answer so the
/// preview stays defined past the last step.
pub fn replay_solution(
    session: &mut Session,
    steps: &[SolutionStep],
) -> Result<Vec<DropOutcome>, PlaceError> {
    let pairs = steps
        .iter()
        .map(SolutionStep::pair)
        .chain(std::iter::repeat(ColorPair::EMPTY).take(REPLAY_PADDING));
    session.reset_queue(pairs);

    steps
        .iter()
        .map(|step| apply_place(session, step.axis_x, step.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grid;
    use crate::types::Coord;

    #[test]
    fn parse_and_display() {
        let seq = PuzzleSequence::parse("12340000").unwrap();
        assert_eq!(seq.slots().len(), 4);
        assert_eq!(seq.slots()[0], ColorPair::new(Color::Green, Color::Red));
        assert_eq!(seq.to_string(), "12340000");
        assert_eq!(
            seq.pairs(),
            vec![
                ColorPair::new(Color::Green, Color::Red),
                ColorPair::new(Color::Blue, Color::Yellow)
            ]
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(PuzzleSequence::parse("123"), Err(PuzzleError::OddLength(3)));
        assert_eq!(
            PuzzleSequence::parse("1x"),
            Err(PuzzleError::UnknownColor { index: 1, ch: 'x' })
        );
        assert_eq!(PuzzleSequence::parse("1191"), Err(PuzzleError::Garbage(1)));
    }

    #[test]
    fn validate_rules() {
        let ok = PuzzleSequence::parse("11220000").unwrap();
        assert_eq!(ok.validate(), Ok(()));

        let first = PuzzleSequence::parse("0011").unwrap();
        assert_eq!(first.validate(), Err(PuzzleError::EmptyFirst));

        let half = PuzzleSequence::parse("1120").unwrap();
        assert_eq!(half.validate(), Err(PuzzleError::HalfEmpty(1)));

        let gap = PuzzleSequence::parse("11003333").unwrap();
        assert_eq!(gap.validate(), Err(PuzzleError::ColorAfterEmpty(2)));
    }

    #[test]
    fn blank_puzzle_is_invalid_until_set() {
        let mut seq = PuzzleSequence::new();
        assert_eq!(seq.to_string().len(), PUZZLE_SLOTS * 2);
        assert_eq!(seq.validate(), Err(PuzzleError::EmptyFirst));

        seq.set(0, ColorPair::new(Color::Purple, Color::Purple))
            .unwrap();
        assert_eq!(seq.validate(), Ok(()));
        assert_eq!(
            seq.set(1, ColorPair::new(Color::Garbage, Color::Red)),
            Err(PuzzleError::Garbage(1))
        );
        assert_eq!(
            seq.set(PUZZLE_SLOTS, ColorPair::new(Color::Red, Color::Red)),
            Err(PuzzleError::SlotOutOfRange(PUZZLE_SLOTS))
        );
    }

    #[test]
    fn solution_step_reads_solver_payload() {
        let json = r#"{"axisColor":"2","childColor":"4","axisX":"3","position":"RIGHT"}"#;
        let step: SolutionStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.axis_color, Color::Red);
        assert_eq!(step.child_color, Color::Yellow);
        assert_eq!(step.axis_x, 3);
        assert_eq!(step.position, Orientation::Right);

        let numeric = r#"{"axisColor":"1","childColor":"1","axisX":0,"position":"TOP"}"#;
        let step: SolutionStep = serde_json::from_str(numeric).unwrap();
        assert_eq!(step.axis_x, 0);

        let back = serde_json::to_value(step).unwrap();
        assert_eq!(back["axisColor"], "1");
        assert_eq!(back["axisX"], "0");
    }

    #[test]
    fn replay_plays_each_step() {
        // Two green pairs laid flat in columns 0-1 clear as one square.
        let steps = [
            SolutionStep {
                axis_color: Color::Green,
                child_color: Color::Green,
                position: Orientation::Right,
                axis_x: 0,
            },
            SolutionStep {
                axis_color: Color::Green,
                child_color: Color::Green,
                position: Orientation::Right,
                axis_x: 0,
            },
        ];
        let mut session = Session::new(1);
        let outcomes = replay_solution(&mut session, &steps).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].report.chain_count(), 0);
        assert_eq!(outcomes[1].report.chain_count(), 1);
        assert_eq!(session.score(), 40);
        assert_eq!(session.field().grid(), &Grid::new());
        // padding pairs are now in play
        assert!(session.active().unwrap().pair().is_empty());
    }

    #[test]
    fn replay_stops_at_first_bad_step() {
        let steps = [
            SolutionStep {
                axis_color: Color::Red,
                child_color: Color::Blue,
                position: Orientation::Top,
                axis_x: 5,
            },
            SolutionStep {
                axis_color: Color::Red,
                child_color: Color::Blue,
                position: Orientation::Right,
                axis_x: 5,
            },
        ];
        let mut session = Session::new(1);
        let err = replay_solution(&mut session, &steps).unwrap_err();
        assert_eq!(err, PlaceError::XOutOfBounds);
        assert_eq!(
            session.field().grid().get(Coord::new(5, 0)),
            Some(Color::Red)
        );
    }
}
