//! RNG module - random source and the next-pair queue
//!
//! The queue is generated once per session from four of the five colors:
//! one color is excluded at random, each remaining color is repeated
//! `repeat / 2` times, and the whole list is shuffled. A shuffle whose first
//! four colors are all different is thrown away and redrawn, so the opening
//! two pairs never show every color at once. Consecutive colors are then paired
//! into (axis, child) and the queue rotates forever.
//!
//! Randomness comes from any [`RandomSource`]; [`SimpleRng`] is a small LCG for
//! deterministic games and tests.

use std::collections::VecDeque;

use crate::error::QueueError;
use crate::types::{Color, ColorPair, QUEUE_REPEAT};

/// Uniform randomness injected into the queue generator
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, n)`; `n` must be non-zero
    fn next_below(&mut self, n: u32) -> u32 {
        ((self.next_f64() * n as f64) as u32).min(n - 1)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// Whether the first four colors are pairwise different
fn is_head_four_color(list: &[Color]) -> bool {
    let head = &list[..4];
    (0..4).all(|i| (i + 1..4).all(|j| head[i] != head[j]))
}

/// Circular queue of upcoming color pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NextQueue {
    pairs: VecDeque<ColorPair>,
}

/// Result of [`NextQueue::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// The pair taken from the front, to be played now
    pub current: ColorPair,
    /// The pair newly exposed two moves ahead
    pub preview: ColorPair,
}

impl NextQueue {
    /// Generate a queue with the default repeat count
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self, QueueError> {
        Self::generate_with_repeat(rng, QUEUE_REPEAT)
    }

    /// Generate a queue where each of the four chosen colors appears
    /// `repeat / 2` times.
    pub fn generate_with_repeat<R: RandomSource + ?Sized>(
        rng: &mut R,
        repeat: u32,
    ) -> Result<Self, QueueError> {
        let per_color = (repeat / 2) as usize;
        // One copy each can never pass the head check.
        if per_color < 2 {
            return Err(QueueError::RepeatTooSmall { repeat });
        }

        let palette = Color::PALETTE;
        let excluded = rng.next_below(palette.len() as u32) as usize;
        let mut colors: Vec<Color> = palette
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != excluded)
            .flat_map(|(_, &c)| std::iter::repeat(c).take(per_color))
            .collect();

        loop {
            shuffle(rng, &mut colors);
            if !is_head_four_color(&colors) {
                break;
            }
        }

        let pairs = colors
            .chunks_exact(2)
            .map(|c| ColorPair::new(c[0], c[1]))
            .collect();
        Ok(Self { pairs })
    }

    /// Build a queue from an explicit list of pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = ColorPair>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Replace the queue wholesale
    pub fn reset(&mut self, pairs: impl IntoIterator<Item = ColorPair>) {
        self.pairs.clear();
        self.pairs.extend(pairs);
    }

    /// Take the front pair, move it to the back and report the new preview.
    pub fn advance(&mut self) -> Result<Advance, QueueError> {
        let current = self.pairs.pop_front().ok_or(QueueError::Empty)?;
        self.pairs.push_back(current);
        Ok(Advance {
            current,
            preview: self.get(1).unwrap_or(current),
        })
    }

    /// Undo one [`NextQueue::advance`], returning the pair now at the tail.
    pub fn rewind(&mut self) -> Result<ColorPair, QueueError> {
        let last = self.pairs.pop_back().ok_or(QueueError::Empty)?;
        self.pairs.push_front(last);
        self.pairs.back().copied().ok_or(QueueError::Empty)
    }

    /// The next two pairs (next, double next)
    pub fn preview(&self) -> [ColorPair; 2] {
        [
            self.get(0).unwrap_or(ColorPair::EMPTY),
            self.get(1).unwrap_or(ColorPair::EMPTY),
        ]
    }

    pub fn get(&self, index: usize) -> Option<ColorPair> {
        self.pairs.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = ColorPair> + '_ {
        self.pairs.iter().copied()
    }
}
