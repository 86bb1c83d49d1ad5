//! Game session collaborator
//!
//! Owns the menu/playing/game-over state machine, the score and the
//! score-driven difficulty ramp. The simulation core never reaches for a
//! global: the tick loop polls this snapshot once per tick and
//! edge-triggers the spawner on actual phase changes.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Score-driven difficulty parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Difficulty {
    /// Downward speed of the ball, units per second
    pub base_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Conceptual gap width the generator aims for (shrinks with score)
    pub initial_gap_size: f32,
    pub min_gap_size: f32,
    /// Score at which the ramp saturates
    pub max_difficulty_score: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            base_fall_speed: 3.0,
            max_fall_speed: 8.0,
            initial_gap_size: 2.0,
            min_gap_size: 1.2,
            max_difficulty_score: 100,
        }
    }
}

/// One player session: phase, score and persisted counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    phase: GamePhase,
    score: u32,
    difficulty: Difficulty,
    fall_speed: f32,
    gap_size: f32,
    /// Persisted counters (high score, games played)
    pub profile: Profile,
}

impl GameSession {
    pub fn new(profile: Profile) -> Self {
        let difficulty = Difficulty::default();
        Self {
            phase: GamePhase::Menu,
            score: 0,
            fall_speed: difficulty.base_fall_speed,
            gap_size: difficulty.initial_gap_size,
            difficulty,
            profile,
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    /// Conceptual gap width for the host's pacing display. Ring patterns
    /// keep their fixed two-slice opening and never consume this.
    #[inline]
    pub fn gap_size(&self) -> f32 {
        self.gap_size
    }

    /// Begin a run: zero the score, reset difficulty, enter Playing.
    pub fn start_game(&mut self) {
        self.score = 0;
        self.reset_difficulty();
        self.phase = GamePhase::Playing;
        log::info!("run started");
    }

    /// End the current run, folding the score into the profile counters.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.profile.games_played += 1;
        if self.score > self.profile.high_score {
            log::info!("new high score: {}", self.score);
            self.profile.high_score = self.score;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "game over at score {} (game #{})",
            self.score,
            self.profile.games_played
        );
    }

    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }

    /// Award points for a gap passage; ignored outside Playing.
    pub fn add_score(&mut self, points: u32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.score += points;
        self.update_difficulty();
    }

    fn reset_difficulty(&mut self) {
        self.fall_speed = self.difficulty.base_fall_speed;
        self.gap_size = self.difficulty.initial_gap_size;
    }

    fn update_difficulty(&mut self) {
        let d = &self.difficulty;
        let progress = (self.score as f32 / d.max_difficulty_score as f32).clamp(0.0, 1.0);
        self.fall_speed = d.base_fall_speed + (d.max_fall_speed - d.base_fall_speed) * progress;
        self.gap_size = d.initial_gap_size + (d.min_gap_size - d.initial_gap_size) * progress;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut s = GameSession::default();
        assert_eq!(s.phase(), GamePhase::Menu);

        s.start_game();
        assert_eq!(s.phase(), GamePhase::Playing);

        s.game_over();
        assert_eq!(s.phase(), GamePhase::GameOver);

        s.return_to_menu();
        assert_eq!(s.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_game_over_only_ends_a_run() {
        let mut s = GameSession::default();
        s.game_over();
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.profile.games_played, 0);
    }

    #[test]
    fn test_score_and_counters() {
        let mut s = GameSession::default();
        s.add_score(1); // ignored in menu
        assert_eq!(s.score(), 0);

        s.start_game();
        for _ in 0..7 {
            s.add_score(1);
        }
        s.game_over();
        assert_eq!(s.profile.high_score, 7);
        assert_eq!(s.profile.games_played, 1);

        // A worse run keeps the high score.
        s.start_game();
        s.add_score(3);
        s.game_over();
        assert_eq!(s.profile.high_score, 7);
        assert_eq!(s.profile.games_played, 2);
    }

    #[test]
    fn test_difficulty_ramp() {
        let mut s = GameSession::default();
        s.start_game();
        assert_eq!(s.fall_speed(), 3.0);
        assert_eq!(s.gap_size(), 2.0);

        s.add_score(50);
        assert!((s.fall_speed() - 5.5).abs() < 1e-4);
        assert!((s.gap_size() - 1.6).abs() < 1e-4);

        // Ramp saturates at max_difficulty_score.
        s.add_score(500);
        assert!((s.fall_speed() - 8.0).abs() < 1e-4);
        assert!((s.gap_size() - 1.2).abs() < 1e-4);

        // Restart resets it.
        s.start_game();
        assert_eq!(s.fall_speed(), 3.0);
    }
}
