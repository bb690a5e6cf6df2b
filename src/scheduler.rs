//! Fixed-timestep frame scheduler
//!
//! Decouples the 60 Hz simulation rate from whatever rate the display
//! driver delivers frames at. Each frame's elapsed wall time is banked in
//! an accumulator and the simulation steps while a full timestep is
//! available, so physics stays deterministic regardless of how elapsed
//! time is chunked across calls.
//!
//! Single-threaded by construction: the driver holds the scheduler by
//! `&mut`, so two invocations can never be in flight at once.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Elapsed time above this is treated as a stall (tab hidden, debugger),
/// not as simulation time to catch up on.
const MAX_FRAME_SECS: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    accumulator: f32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `elapsed` seconds and run `step` once per full timestep,
    /// capped at `MAX_SUBSTEPS` to prevent the spiral of death. Returns
    /// the number of steps taken; the remainder stays banked.
    pub fn advance<F: FnMut(f32)>(&mut self, elapsed: f32, mut step: F) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_SECS);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            step(SIM_DT);
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_match_banked_time() {
        let mut scheduler = FrameScheduler::new();
        let mut count = 0;
        scheduler.advance(SIM_DT * 3.0, |_| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_sub_timestep_frames_carry_over() {
        let mut scheduler = FrameScheduler::new();
        let mut count = 0;
        // Three frames of 0.4 timesteps each: no step until enough banks
        scheduler.advance(SIM_DT * 0.4, |_| count += 1);
        scheduler.advance(SIM_DT * 0.4, |_| count += 1);
        assert_eq!(count, 0);
        scheduler.advance(SIM_DT * 0.4, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_chunking_is_irrelevant() {
        // One call with 5 timesteps equals 5 calls with 1 timestep each
        let mut a = FrameScheduler::new();
        let mut b = FrameScheduler::new();

        let mut steps_a = 0;
        a.advance(SIM_DT * 5.0, |_| steps_a += 1);

        let mut steps_b = 0;
        for _ in 0..5 {
            b.advance(SIM_DT, |_| steps_b += 1);
        }
        assert_eq!(steps_a, 5);
        assert_eq!(steps_b, 5);
    }

    #[test]
    fn test_substep_cap_prevents_spiral() {
        let mut scheduler = FrameScheduler::new();
        let mut count = 0;
        // A huge stall is clamped, then capped
        let steps = scheduler.advance(10.0, |_| count += 1);
        assert!(steps <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_negative_elapsed_is_ignored() {
        let mut scheduler = FrameScheduler::new();
        let mut count = 0;
        scheduler.advance(-1.0, |_| count += 1);
        assert_eq!(count, 0);
    }
}
