//! Line commands accepted by the runner.
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.
//!
//! | Command | Aliases | Effect |
//! |---------|---------|--------|
//! | `left` | `h` | move one column left |
//! | `right` | `l` | move one column right |
//! | `cw` | `x` | rotate clockwise |
//! | `ccw` | `z` | rotate counter-clockwise |
//! | `drop` | `j` | commit the piece and resolve |
//! | `place <x> <pos>` | | rotate to `pos`, move to column `x`, drop |
//! | `field <78 chars>` | | replace the field |
//! | `set <x> <y> <c>` | | paint one cell with field character `c` |
//! | `resolve` | `start` | run the chain loop on the current field |
//! | `state` | | print the current snapshot |
//! | `quit` | `q` | stop reading input |

use anyhow::{anyhow, bail, Result};

use crate::types::{Color, Coord, GameAction, Orientation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(GameAction),
    Place { x: i8, orientation: Orientation },
    Field(String),
    Set { coord: Coord, color: Color },
    Resolve,
    State,
    Quit,
}

/// Map a single word to a game action.
pub fn action_for_word(word: &str) -> Option<GameAction> {
    match word {
        "left" | "h" => Some(GameAction::MoveLeft),
        "right" | "l" => Some(GameAction::MoveRight),
        "cw" | "x" => Some(GameAction::RotateCw),
        "ccw" | "z" => Some(GameAction::RotateCcw),
        "drop" | "j" => Some(GameAction::Drop),
        _ => GameAction::from_str(word),
    }
}

/// Parse one input line; `Ok(None)` for blank and comment lines.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let cmd = match head.as_str() {
        "state" => Command::State,
        "quit" | "q" => Command::Quit,
        "resolve" | "start" if args.is_empty() => Command::Resolve,
        "resolve" | "start" => bail!("{head} takes no arguments"),
        "set" => match args.as_slice() {
            [x, y, c] => {
                let x = x.parse().map_err(|_| anyhow!("invalid column {x:?}"))?;
                let y = y.parse().map_err(|_| anyhow!("invalid row {y:?}"))?;
                let mut chars = c.chars();
                let color = match (chars.next(), chars.next()) {
                    (Some(ch), None) => Color::from_char(ch),
                    _ => None,
                }
                .ok_or_else(|| anyhow!("invalid color {c:?}"))?;
                Command::Set {
                    coord: Coord::new(x, y),
                    color,
                }
            }
            _ => bail!("usage: set <x> <y> <color char>"),
        },
        "field" => match args.as_slice() {
            [s] => Command::Field((*s).to_string()),
            _ => bail!("usage: field <78 chars>"),
        },
        "place" => match args.as_slice() {
            [x, pos] => {
                let x = x
                    .parse()
                    .map_err(|_| anyhow!("invalid column {x:?}"))?;
                let orientation = Orientation::from_str(pos)
                    .ok_or_else(|| anyhow!("invalid orientation {pos:?}"))?;
                Command::Place { x, orientation }
            }
            _ => bail!("usage: place <x> <top|right|bottom|left>"),
        },
        word => {
            let action = action_for_word(word).ok_or_else(|| anyhow!("unknown command {word:?}"))?;
            if !args.is_empty() {
                bail!("{word} takes no arguments");
            }
            Command::Action(action)
        }
    };
    Ok(Some(cmd))
}
