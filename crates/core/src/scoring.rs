//! Scoring module - score for one resolution step
//!
//! The score of a step is `erased * bonus * 10`, where the bonus sums three
//! table lookups:
//! - chain bonus by chain index (1-based, clamped to the last table entry),
//! - connection bonus per erased group by its size (clamped to 4..=11),
//! - color bonus by the number of distinct colors erased.
//!
//! A step whose bonus sums to zero still scores with a bonus of 1.

use crate::types::{CHAIN_BONUS, COLOR_BONUS, CONNECT_BONUS, ERASE_THRESHOLD};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Total number of cells erased (sum of group sizes)
    pub erased: u32,
    pub connect_bonus: u32,
    pub color_bonus: u32,
    pub chain_bonus: u32,
    /// Sum of the three bonuses, never below 1 when anything was erased
    pub bonus: u32,
    /// `erased * bonus * 10`
    pub score: u32,
}

/// Chain bonus for a 1-based chain index.
///
/// Indices past the end of the table reuse its last entry; index 0 is treated
/// as the first chain.
pub fn chain_bonus(chain: u32) -> u32 {
    let index = (chain.max(1) as usize - 1).min(CHAIN_BONUS.len() - 1);
    CHAIN_BONUS[index]
}

/// Connection bonus for one group of `size` cells
pub fn connect_bonus(size: u8) -> u32 {
    let clamped = size.clamp(ERASE_THRESHOLD, ERASE_THRESHOLD + CONNECT_BONUS.len() as u8 - 1);
    CONNECT_BONUS[(clamped - ERASE_THRESHOLD) as usize]
}

/// Color bonus for `colors` distinct colors erased together.
///
/// # Panics
///
/// Panics when `colors` is outside `1..=5`; only five colors exist.
pub fn color_bonus(colors: usize) -> u32 {
    assert!(
        (1..=COLOR_BONUS.len()).contains(&colors),
        "distinct color count {colors} outside 1..={}",
        COLOR_BONUS.len()
    );
    COLOR_BONUS[colors - 1]
}

/// Calculate the score of one step.
///
/// `group_sizes` holds the size of every distinct erasable group and `colors`
/// the number of distinct colors among them. Returns a zero result when there
/// is nothing to erase.
pub fn calculate_score(group_sizes: &[u8], colors: usize, chain: u32) -> ScoreResult {
    if group_sizes.is_empty() {
        return ScoreResult::default();
    }

    let erased: u32 = group_sizes.iter().map(|&s| s as u32).sum();
    let connect: u32 = group_sizes.iter().map(|&s| connect_bonus(s)).sum();
    let color = color_bonus(colors);
    let chain = chain_bonus(chain);

    let mut bonus = connect + color + chain;
    if bonus == 0 {
        bonus = 1;
    }

    ScoreResult {
        erased,
        connect_bonus: connect,
        color_bonus: color,
        chain_bonus: chain,
        bonus,
        score: erased.saturating_mul(bonus).saturating_mul(10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_bonus() {
        assert_eq!(chain_bonus(1), 0);
        assert_eq!(chain_bonus(2), 8);
        assert_eq!(chain_bonus(5), 64);
        assert_eq!(chain_bonus(19), 512);
    }

    #[test]
    fn test_chain_bonus_past_table_clamps() {
        assert_eq!(chain_bonus(20), 512);
        assert_eq!(chain_bonus(100), 512);
        assert_eq!(chain_bonus(0), 0);
    }

    #[test]
    fn test_connect_bonus() {
        assert_eq!(connect_bonus(4), 0);
        assert_eq!(connect_bonus(5), 2);
        assert_eq!(connect_bonus(10), 7);
        assert_eq!(connect_bonus(11), 10);
        assert_eq!(connect_bonus(30), 10);
    }

    #[test]
    fn test_color_bonus() {
        assert_eq!(color_bonus(1), 0);
        assert_eq!(color_bonus(2), 3);
        assert_eq!(color_bonus(5), 24);
    }

    #[test]
    #[should_panic]
    fn test_color_bonus_rejects_zero() {
        color_bonus(0);
    }

    #[test]
    fn test_single_minimum_group_scores_forty() {
        let result = calculate_score(&[4], 1, 1);
        assert_eq!(result.erased, 4);
        assert_eq!(result.connect_bonus, 0);
        assert_eq!(result.color_bonus, 0);
        assert_eq!(result.chain_bonus, 0);
        assert_eq!(result.bonus, 1);
        assert_eq!(result.score, 40);
    }

    #[test]
    fn test_two_colors_at_once() {
        let result = calculate_score(&[4, 4], 2, 1);
        assert_eq!(result.erased, 8);
        assert_eq!(result.bonus, 3);
        assert_eq!(result.score, 240);
    }

    #[test]
    fn test_second_chain_with_big_group() {
        // 5 cells (+2), one color (+0), chain 2 (+8)
        let result = calculate_score(&[5], 1, 2);
        assert_eq!(result.bonus, 10);
        assert_eq!(result.score, 500);
    }

    #[test]
    fn test_nothing_erased() {
        assert_eq!(calculate_score(&[], 0, 3), ScoreResult::default());
    }
}
