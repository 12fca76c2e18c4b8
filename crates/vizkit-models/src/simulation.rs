//! Step and pass counters shared by all models.

use log::debug;

use crate::{Model, ModelStep};

/// The position of a run: the current step and how many passes have started.
///
/// Passes count from 1. Stepping is clamped, so a driver can call
/// [`Simulation::next_step`] blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulation {
    current_step: usize,
    pass_count: u32,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            current_step: 0,
            pass_count: 1,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn pass_count(&self) -> u32 {
        self.pass_count
    }

    /// Moves one step forward, never past `max`, and returns the new step.
    pub fn next_step(&mut self, max: usize) -> usize {
        self.current_step = (self.current_step + 1).min(max);
        debug!(step = self.current_step, max; "Next step");
        self.current_step
    }

    pub fn set_step(&mut self, step: usize) {
        self.current_step = step;
    }

    /// Returns to step 0 and counts a new pass.
    pub fn start_next_pass(&mut self) {
        self.current_step = 0;
        self.pass_count += 1;
        debug!(pass = self.pass_count; "Starting next pass");
    }

    /// Returns to step 0 of the first pass.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Handles the end of the current step's animation.
    ///
    /// Steps marked `auto_advance` move on by themselves; returns whether
    /// the simulation advanced.
    pub fn step_completed(&mut self, steps: &[ModelStep]) -> bool {
        let auto = steps
            .get(self.current_step)
            .is_some_and(ModelStep::auto_advance);
        if auto {
            self.next_step(steps.len().saturating_sub(1));
        }
        auto
    }

    /// Replays `model` from step 0 up to `target` (clamped to the last step).
    ///
    /// Every step before the target is entered and completed; the target
    /// step is entered but left pending, as a driver would see it before the
    /// step's animation ends. Returns the step reached.
    pub fn run_to<M: Model + ?Sized>(&mut self, model: &mut M, target: usize) -> usize {
        let last = model.steps().len().saturating_sub(1);
        let target = target.min(last);

        model.reset();
        self.set_step(0);
        model.enter_step(0);
        while self.current_step < target {
            model.complete_step();
            let step = self.next_step(last);
            model.enter_step(step);
        }

        debug!(model = model.id(), step = self.current_step, pass = self.pass_count; "Model replayed");
        self.current_step
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_clamps() {
        let mut simulation = Simulation::new();
        assert_eq!(simulation.next_step(2), 1);
        assert_eq!(simulation.next_step(2), 2);
        assert_eq!(simulation.next_step(2), 2);
    }

    #[test]
    fn test_passes() {
        let mut simulation = Simulation::new();
        assert_eq!(simulation.pass_count(), 1);

        simulation.set_step(3);
        simulation.start_next_pass();
        assert_eq!(simulation.current_step(), 0);
        assert_eq!(simulation.pass_count(), 2);

        simulation.start_next_pass();
        assert_eq!(simulation.pass_count(), 3);

        simulation.reset();
        assert_eq!(simulation, Simulation::new());
    }

    #[test]
    fn test_step_completed_honors_auto_advance() {
        let steps = [ModelStep::auto("a"), ModelStep::new("b"), ModelStep::new("c")];
        let mut simulation = Simulation::new();

        assert!(simulation.step_completed(&steps));
        assert_eq!(simulation.current_step(), 1);
        assert!(!simulation.step_completed(&steps));
        assert_eq!(simulation.current_step(), 1);
    }
}
