//! Frame driver for [`SimWorld`].
//!
//! The world integrates physics from its own clock, so the loop does not
//! decide how many steps to take. It measures each frame against its own
//! clock, reports frames long enough that the physics world will drop time,
//! and keeps running totals.

use drift_entity::DrawSink;
use drift_input::InputSource;
use drift_physics::Clock;
use tracing::warn;

use crate::world::{FrameReport, SimWorld};

/// Frame time above which a frame counts as slow, in seconds.
pub const MAX_FRAME_TIME: f64 = 0.25; // 250ms = 4 FPS minimum

pub struct FrameLoop {
    clock: Box<dyn Clock>,
    frame_count: u64,
    substep_count: u64,
    slow_frames: u64,
    total_sim_time: f64,
}

impl FrameLoop {
    pub fn new(mut clock: Box<dyn Clock>) -> Self {
        clock.reset();
        Self {
            clock,
            frame_count: 0,
            substep_count: 0,
            slow_frames: 0,
            total_sim_time: 0.0,
        }
    }

    /// Runs one frame of `world`.
    pub fn tick(
        &mut self,
        world: &mut SimWorld,
        input: &dyn InputSource,
        sink: &mut dyn DrawSink,
    ) -> FrameReport {
        let frame_time = self.clock.elapsed_micros() as f64 / 1_000_000.0;
        self.clock.reset();
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum of {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            self.slow_frames += 1;
        }

        let report = world.frame(input, sink);
        self.substep_count += u64::from(report.substeps);
        self.total_sim_time += f64::from(report.substeps) * f64::from(world.physics().timestep());
        self.frame_count += 1;
        report
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of physics substeps taken.
    pub fn substep_count(&self) -> u64 {
        self.substep_count
    }

    /// Returns how many frames exceeded [`MAX_FRAME_TIME`].
    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }

    /// Returns the total simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
