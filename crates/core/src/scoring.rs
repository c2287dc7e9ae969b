//! Scoring module - points, level, gravity speed and attack size
//!
//! Level is derived from score rather than from cleared lines, and gravity is
//! derived from level:
//! - clearing k rows awards `LINE_SCORES[k] * level`
//! - level = score / 1000 + 1
//! - drop interval = max(100ms, 1000ms - (level - 1) * 100ms)
//! - clearing k > 1 rows sends k - 1 garbage rows to the opponent

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LEVEL_SCORE_STEP, LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared in one lock (1-4)
/// level: current level (1-based)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Level for a given score (starts at 1)
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Garbage rows sent for clearing `lines` rows at once
pub fn attack_for_lines(lines: usize) -> u32 {
    lines.saturating_sub(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);
        assert_eq!(line_clear_score(4, 3), 2400);
        assert_eq!(line_clear_score(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(999), 1);
        assert_eq!(level_for_score(1000), 2);
        assert_eq!(level_for_score(1050), 2);
        assert_eq!(level_for_score(9500), 10);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(9), 200);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(40), 100);
        // level 0 never happens in play but must not underflow
        assert_eq!(drop_interval_ms(0), 1000);
    }

    #[test]
    fn test_attack_law() {
        assert_eq!(attack_for_lines(0), 0);
        assert_eq!(attack_for_lines(1), 0);
        assert_eq!(attack_for_lines(2), 1);
        assert_eq!(attack_for_lines(3), 2);
        assert_eq!(attack_for_lines(4), 3);
    }
}
