//! Session module - one player's game
//!
//! Ties together the field, the controlled piece and the next queue, and
//! applies discrete actions to them. A session is single-threaded and owns
//! everything it touches; chain results are returned as values and the most
//! recent one is kept until taken.

use crate::error::{FieldError, QueueError, SessionError};
use crate::events::{ActiveSnapshot, DropOutcome, Placement, ResolveReport, SessionSnapshot};
use crate::field::Field;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{NextQueue, SimpleRng};
use crate::types::{Color, ColorPair, Coord, GameAction, QUEUE_REPEAT};

impl From<Piece> for ActiveSnapshot {
    fn from(p: Piece) -> Self {
        Self {
            pair: p.pair(),
            axis_x: p.axis_x(),
            orientation: p.orientation(),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    field: Field,
    active: Option<Piece>,
    queue: NextQueue,
    rng: SimpleRng,
    repeat: u32,
    started: bool,
    /// Last committed drop (consumed by observers).
    last_drop: Option<DropOutcome>,
}

impl Session {
    /// Create a new session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_repeat(seed, QUEUE_REPEAT)
    }

    /// Create a session whose queue repeats each color `repeat / 2` times
    pub fn with_repeat(seed: u32, repeat: u32) -> Self {
        Self {
            field: Field::new(),
            active: None,
            queue: NextQueue::default(),
            rng: SimpleRng::new(seed),
            repeat,
            started: false,
            last_drop: None,
        }
    }

    /// Generate the queue and spawn the first piece.
    ///
    /// Calling it again on a started session does nothing.
    pub fn start(&mut self) -> Result<(), QueueError> {
        if self.started {
            return Ok(());
        }
        self.queue = NextQueue::generate_with_repeat(&mut self.rng, self.repeat)?;
        self.started = true;
        self.spawn_next();
        Ok(())
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_dead(&self) -> bool {
        self.field.is_dead()
    }

    pub fn score(&self) -> u32 {
        self.field.score()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn queue(&self) -> &NextQueue {
        &self.queue
    }

    /// Next and double-next pairs
    pub fn next_pairs(&self) -> [ColorPair; 2] {
        self.queue.preview()
    }

    /// Take the front pair of the queue as the new active piece
    fn spawn_next(&mut self) -> bool {
        match self.queue.advance() {
            Ok(adv) => {
                self.active = Some(Piece::new(adv.current));
                true
            }
            Err(_) => {
                self.active = None;
                false
            }
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.is_dead() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
            GameAction::Drop => self.drop_active(),
        }
    }

    fn try_move(&mut self, dx: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let before = piece.axis_x();
        piece.move_by(dx);
        piece.axis_x() != before
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.rotate(clockwise);
        true
    }

    /// Commit the active piece, resolve and spawn the next one.
    fn drop_active(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if !self.field.can_drop(&piece) {
            return false;
        }

        let outcome = self.field.drop_piece(&piece);
        self.last_drop = Some(outcome);
        self.spawn_next();
        true
    }

    /// Consume the most recent drop outcome
    pub fn take_last_drop(&mut self) -> Option<DropOutcome> {
        self.last_drop.take()
    }

    /// Where the active piece would land right now
    pub fn guide(&self) -> Option<Placement> {
        if self.is_dead() {
            return None;
        }
        self.active.map(|p| self.field.landing(&p))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            field: self.field.serialize(),
            score: self.field.score(),
            active: self.active.map(ActiveSnapshot::from),
            guide: self.guide(),
            next: self.queue.preview(),
            dead: self.is_dead(),
        }
    }

    /// Replace the queue with an explicit sequence and spawn from its front.
    pub fn reset_queue(&mut self, pairs: impl IntoIterator<Item = ColorPair>) {
        self.queue.reset(pairs);
        self.started = true;
        self.last_drop = None;
        self.spawn_next();
    }

    /// Replace the field contents, keeping score and queue.
    pub fn load_field(&mut self, s: &str) -> Result<(), SessionError> {
        self.field.load(s)?;
        Ok(())
    }

    /// Paint one cell of the field, keeping score and queue.
    ///
    /// The grid is not resolved; call [`Session::resolve`] afterwards.
    pub fn set_cell(&mut self, coord: Coord, color: Color) -> Result<(), FieldError> {
        self.field.grid_mut().set(coord, color)
    }

    /// Run the chain loop on the current field, e.g. after editing it.
    pub fn resolve(&mut self) -> ResolveReport {
        self.field.resolve()
    }

    /// Step back one drop: restore the field and score, rewind the queue and
    /// respawn the pair that was played.
    ///
    /// Nothing changes when the field string is invalid or the queue is empty.
    pub fn restore(&mut self, field: &str, score: u32) -> Result<(), SessionError> {
        let grid = Grid::deserialize(field)?;
        if self.queue.is_empty() {
            return Err(QueueError::Empty.into());
        }

        *self.field.grid_mut() = grid;
        self.field.set_score(score);
        let pair = self.queue.rewind()?;
        self.active = Some(Piece::new(pair));
        self.last_drop = None;
        Ok(())
    }
}
