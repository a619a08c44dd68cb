//! Draw-call interface between entities and a renderer.

use drift_physics::Transform;
use glam::Vec3;

use crate::model::ModelHandle;

/// Receives the draw calls entities issue each frame.
pub trait DrawSink {
    /// Draws `model` at `transform`, uniformly scaled.
    fn draw_model(&mut self, model: ModelHandle, transform: Transform, scale: f32);
    /// Camera-facing disc, used for debris particles.
    fn draw_billboard(&mut self, center: Vec3, size: f32);
    /// Positions fixed-function light `index` (0..=7).
    fn set_light(&mut self, index: u8, position: Vec3, ambient: [f32; 3], diffuse: [f32; 3]);
    /// Debug line in world space.
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Model {
        model: ModelHandle,
        transform: Transform,
        scale: f32,
    },
    Billboard {
        center: Vec3,
        size: f32,
    },
    Light {
        index: u8,
        position: Vec3,
    },
    Line {
        from: Vec3,
        to: Vec3,
    },
}

/// Sink that records calls, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
}

impl DrawLog {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn models(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Model { .. }))
            .count()
    }

    pub fn billboards(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Billboard { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count()
    }
}

impl DrawSink for DrawLog {
    fn draw_model(&mut self, model: ModelHandle, transform: Transform, scale: f32) {
        self.calls.push(DrawCall::Model {
            model,
            transform,
            scale,
        });
    }

    fn draw_billboard(&mut self, center: Vec3, size: f32) {
        self.calls.push(DrawCall::Billboard { center, size });
    }

    fn set_light(&mut self, index: u8, position: Vec3, _ambient: [f32; 3], _diffuse: [f32; 3]) {
        self.calls.push(DrawCall::Light { index, position });
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3, _color: [f32; 4]) {
        self.calls.push(DrawCall::Line { from, to });
    }
}
