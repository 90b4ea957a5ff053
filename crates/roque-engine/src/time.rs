//! Per-turn time budgeting.

use std::time::Instant;

use tracing::debug;

use crate::config::Config;
use crate::error::Interrupt;

/// Derives and enforces the per-turn deadline.
///
/// The first `restart` pins the game's total budget; later restarts allocate
/// a fraction of it by game phase unless a fixed per-turn limit is
/// configured. A zero budget disables the deadline entirely (pondering).
pub struct TimeBudget {
    total_seconds: f64,
    per_turn: f64,
    started: Instant,
}

impl TimeBudget {
    /// Create an idle budget with no deadline.
    pub fn new() -> TimeBudget {
        TimeBudget {
            total_seconds: 0.0,
            per_turn: 0.0,
            started: Instant::now(),
        }
    }

    /// Derive this turn's budget from the remaining clock and start timing.
    ///
    /// In the last game phase the depth floor is raised to 4 so a move is
    /// still produced before the near-zero deadline can fire.
    pub fn restart(&mut self, remaining_seconds: f64, config: &mut Config) {
        if self.total_seconds == 0.0 {
            self.total_seconds = remaining_seconds;
        }

        if config.seconds_limit >= 0.0 {
            self.per_turn = config.seconds_limit;
        } else {
            let fraction = remaining_seconds / self.total_seconds;
            self.per_turn = if fraction > 0.95 {
                0.0075 * self.total_seconds
            } else if fraction > 0.60 {
                0.02 * self.total_seconds
            } else if fraction > 0.20 {
                0.01 * self.total_seconds
            } else if fraction > 0.05 {
                0.005 * self.total_seconds
            } else {
                config.min_depth_limit = config.min_depth_limit.max(4);
                1e-6
            };
        }

        debug!(
            remaining_seconds,
            per_turn = self.per_turn,
            "turn budget restarted"
        );
        self.started = Instant::now();
    }

    /// Seconds since the last restart.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// This turn's budget in seconds; zero means no deadline.
    #[inline]
    pub fn per_turn_seconds(&self) -> f64 {
        self.per_turn
    }

    /// Raise `OutOfTime` once the budget is spent. A non-positive budget
    /// never fires.
    #[inline]
    pub fn check(&self) -> Result<(), Interrupt> {
        if self.per_turn > 0.0 && self.elapsed() >= self.per_turn {
            Err(Interrupt::OutOfTime)
        } else {
            Ok(())
        }
    }
}

impl Default for TimeBudget {
    fn default() -> TimeBudget {
        TimeBudget::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TimeBudget;
    use crate::config::Config;
    use crate::error::Interrupt;

    fn fractional_config() -> Config {
        Config { seconds_limit: -1.0, ..Config::default() }
    }

    #[test]
    fn fixed_limit_is_used_as_is() {
        let mut config = Config { seconds_limit: 2.5, ..Config::default() };
        let mut budget = TimeBudget::new();
        budget.restart(100.0, &mut config);
        assert_eq!(budget.per_turn_seconds(), 2.5);
    }

    #[test]
    fn fractional_allocation_by_game_phase() {
        let mut config = fractional_config();
        let mut budget = TimeBudget::new();

        // First restart pins the total at 100 seconds.
        budget.restart(100.0, &mut config);
        assert!((budget.per_turn_seconds() - 0.75).abs() < 1e-9);

        budget.restart(70.0, &mut config);
        assert!((budget.per_turn_seconds() - 2.0).abs() < 1e-9);

        budget.restart(30.0, &mut config);
        assert!((budget.per_turn_seconds() - 1.0).abs() < 1e-9);

        budget.restart(8.0, &mut config);
        assert!((budget.per_turn_seconds() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn last_phase_raises_the_depth_floor() {
        let mut config = fractional_config();
        let mut budget = TimeBudget::new();
        budget.restart(100.0, &mut config);
        budget.restart(2.0, &mut config);
        assert!(budget.per_turn_seconds() < 0.001);
        assert_eq!(config.min_depth_limit, 4);
    }

    #[test]
    fn zero_budget_never_fires() {
        let budget = TimeBudget::new();
        assert_eq!(budget.check(), Ok(()));
    }

    #[test]
    fn tiny_budget_fires() {
        let mut config = Config { seconds_limit: 1e-9, ..Config::default() };
        let mut budget = TimeBudget::new();
        budget.restart(100.0, &mut config);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_eq!(budget.check(), Err(Interrupt::OutOfTime));
    }
}
