use crate::config::LEADERBOARD_CAPACITY;

/// In-memory session leaderboard, best scores first.
///
/// Bookkeeping over the scores the game emits at each game over. Lives only
/// as long as the process; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    scores: Vec<u32>,
}

impl Leaderboard {
    /// Creates an empty leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished game's score, keeping the top entries sorted
    /// descending and trimmed to capacity.
    pub fn record(&mut self, score: u32) {
        self.scores.push(score);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(LEADERBOARD_CAPACITY);
    }

    /// Returns the recorded scores, best first.
    #[must_use]
    pub fn entries(&self) -> &[u32] {
        &self.scores
    }

    /// Returns the best score seen this session, zero before any game ends.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.scores.first().copied().unwrap_or(0)
    }
}
