use std::time::Duration;

/// Base points for line clears, indexed by the number of lines cleared at once.
///
/// The awarded score is the base value times `level + 1`.
pub const LINE_SCORES: [usize; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

const BASE_DROP_MILLIS: u64 = 1000;
const DROP_MILLIS_PER_LEVEL: u64 = 50;
const MIN_DROP_MILLIS: u64 = 50;

/// Returns the points for clearing `cleared_lines` lines at once at `level`.
///
/// Counts above four are scored as four.
///
/// # Example
///
/// ```
/// use tetris_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(1, 0), 40);
/// assert_eq!(line_clear_score(4, 1), 2400);
/// ```
#[must_use]
pub fn line_clear_score(cleared_lines: usize, level: usize) -> usize {
    LINE_SCORES[cleared_lines.min(LINE_SCORES.len() - 1)] * (level + 1)
}

/// Returns the bonus for hard-dropping a piece `rows` rows.
#[must_use]
pub const fn hard_drop_bonus(rows: usize) -> usize {
    rows * 2
}

/// Returns the level reached after clearing `total_lines` lines.
#[must_use]
pub const fn level_for_lines(total_lines: usize) -> usize {
    total_lines / LINES_PER_LEVEL
}

/// Returns the gravity interval at `level`: 1000 ms at level 0, 50 ms less per level,
/// never below 50 ms.
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let level = u64::try_from(level).unwrap_or(u64::MAX);
    let millis = BASE_DROP_MILLIS
        .saturating_sub(level.saturating_mul(DROP_MILLIS_PER_LEVEL))
        .max(MIN_DROP_MILLIS);
    Duration::from_millis(millis)
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: line-clear points scaled by level, plus hard-drop bonuses
/// - **Level**: derived from total lines cleared (1 level per 10 lines)
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of locks by lines cleared
///
/// # Example
///
/// ```
/// use tetris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4, 0); // four lines at level 0
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level based on total lines cleared.
    #[must_use]
    pub const fn level(&self) -> usize {
        level_for_lines(self.total_cleared_lines)
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// Index 0 counts locks that cleared nothing; index 4 counts four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks.
    ///
    /// Line-clear points use the level *before* the clear. `drop_rows` is the distance
    /// covered by a hard drop (0 for gravity and soft-drop locks).
    ///
    /// Returns `true` when the lock raised the level.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, drop_rows: usize) -> bool {
        let level_before = self.level();
        self.score += line_clear_score(cleared_lines, level_before) + hard_drop_bonus(drop_rows);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines.min(self.line_cleared_counter.len() - 1)] += 1;
        self.level() > level_before
    }
}
