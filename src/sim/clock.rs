use crate::devices::DeviceContext;

use super::types::SimConfig;

/// A simulation clock that hands out one [`DeviceContext`] per step.
///
/// The clock knows the day length so every context it yields can place its
/// timestep within a day.
///
/// # Examples
///
/// ```
/// use fl_energy::sim::clock::Clock;
///
/// let mut clock = Clock::new(3, 2);
/// let mut steps = Vec::new();
///
/// clock.run(|ctx| steps.push((ctx.timestep, ctx.step_of_day())));
/// assert_eq!(steps, vec![(0, 0), (1, 1), (2, 0)]);
/// ```
pub struct Clock {
    /// Next step to hand out
    current: usize,
    /// Total steps to run
    total: usize,
    /// Steps in one simulated day
    steps_per_day: usize,
}

impl Clock {
    /// Creates a clock for `total` steps of a day `steps_per_day` long.
    pub fn new(total: usize, steps_per_day: usize) -> Self {
        Self {
            current: 0,
            total,
            steps_per_day,
        }
    }

    /// Creates a clock covering every step of a simulation.
    pub fn for_config(config: &SimConfig) -> Self {
        Self::new(config.total_steps(), config.steps_per_day)
    }

    /// Advances the clock by one step.
    ///
    /// Returns `None` once all steps have been handed out.
    pub fn tick(&mut self) -> Option<DeviceContext> {
        if self.current >= self.total {
            return None;
        }
        let context = DeviceContext::new(self.current, self.steps_per_day);
        self.current += 1;
        Some(context)
    }

    /// Steps not yet handed out.
    pub fn remaining(&self) -> usize {
        self.total - self.current
    }

    /// Calls `f` for each remaining step.
    pub fn run(&mut self, mut f: impl FnMut(&DeviceContext)) {
        while let Some(context) = self.tick() {
            f(&context);
        }
    }
}
