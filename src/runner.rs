//! Headless runner: applies parsed commands to one session.

use serde::Serialize;

use crate::core::{DropOutcome, ResolveReport, Session, SessionSnapshot};
use crate::engine::apply_place;
use crate::script::Command;
use crate::types::GameAction;

/// One reply line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reply {
    #[serde(rename_all = "camelCase")]
    State {
        accepted: bool,
        snapshot: SessionSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    Drop {
        outcome: DropOutcome,
        snapshot: SessionSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    Resolve {
        report: ResolveReport,
        snapshot: SessionSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    Error { code: String, message: String },
}

impl Reply {
    fn error(code: &str, message: impl ToString) -> Self {
        Reply::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the reply is worth printing in quiet mode
    pub fn is_notable(&self) -> bool {
        !matches!(self, Reply::State { accepted: true, .. })
    }
}

/// Log record written per command
#[derive(Debug, Serialize)]
pub struct Record<'a> {
    pub seq: u64,
    pub command: &'a str,
    pub reply: &'a Reply,
}

pub struct Runner {
    session: Session,
}

impl Runner {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply a command; `None` means stop.
    pub fn execute(&mut self, cmd: Command) -> Option<Reply> {
        let reply = match cmd {
            Command::Quit => return None,
            Command::State => self.state(true),
            Command::Action(GameAction::Drop) => {
                if self.session.apply_action(GameAction::Drop) {
                    self.dropped()
                } else {
                    self.state(false)
                }
            }
            Command::Action(action) => {
                let accepted = self.session.apply_action(action);
                self.state(accepted)
            }
            Command::Place { x, orientation } => {
                match apply_place(&mut self.session, x, orientation) {
                    Ok(outcome) => Reply::Drop {
                        outcome,
                        snapshot: self.session.snapshot(),
                    },
                    Err(e) => Reply::error(e.code(), e.message()),
                }
            }
            Command::Field(s) => match self.session.load_field(&s) {
                Ok(()) => self.state(true),
                Err(e) => Reply::error("invalid_field", e),
            },
            Command::Set { coord, color } => match self.session.set_cell(coord, color) {
                Ok(()) => self.state(true),
                Err(e) => Reply::error("invalid_cell", e),
            },
            Command::Resolve => {
                let report = self.session.resolve();
                Reply::Resolve {
                    report,
                    snapshot: self.session.snapshot(),
                }
            }
        };
        Some(reply)
    }

    fn state(&self, accepted: bool) -> Reply {
        Reply::State {
            accepted,
            snapshot: self.session.snapshot(),
        }
    }

    fn dropped(&mut self) -> Reply {
        match self.session.take_last_drop() {
            Some(outcome) => Reply::Drop {
                outcome,
                snapshot: self.session.snapshot(),
            },
            None => self.state(true),
        }
    }
}
