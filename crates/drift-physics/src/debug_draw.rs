//! Physics debug visualization: collider bounds and velocity vectors handed
//! to an installed [`DebugDrawer`].
//!
//! Drawing is read-only on the simulation state.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

/// Receives debug line segments in world space.
pub trait DebugDrawer {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]);
}

/// Drawer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDrawer;

impl DebugDrawer for NullDrawer {
    fn draw_line(&mut self, _from: Vec3, _to: Vec3, _color: [f32; 4]) {}
}

/// Lets a drawer be installed in the world while its owner keeps reading it.
impl<T: DebugDrawer> DebugDrawer for Rc<RefCell<T>> {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.borrow_mut().draw_line(from, to, color);
    }
}

/// A single debug line segment with color.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: [f32; 4],
}

/// Drawer that keeps lines until cleared, for renderers that batch per frame.
#[derive(Debug, Default, Clone)]
pub struct DebugLineBuffer {
    pub lines: Vec<DebugLine>,
}

impl DebugLineBuffer {
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl DebugDrawer for DebugLineBuffer {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.lines.push(DebugLine { from, to, color });
    }
}

/// Fixed bodies: green.
pub const FIXED_COLOR: [f32; 4] = [0.0, 0.8, 0.2, 0.6];
/// Dynamic bodies: blue.
pub const DYNAMIC_COLOR: [f32; 4] = [0.2, 0.4, 1.0, 0.6];
/// Linear velocity: magenta.
pub const VELOCITY_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 0.8];

/// Whether debug drawing is on, toggled by a held signal.
///
/// The state flips once when the signal goes down and ignores it while held.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugDrawState {
    enabled: bool,
    signal_down: bool,
}

impl DebugDrawState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            signal_down: false,
        }
    }

    /// Feeds this frame's signal. Returns `true` if the state flipped.
    pub fn feed(&mut self, held: bool) -> bool {
        let flip = held && !self.signal_down;
        if flip {
            self.enabled = !self.enabled;
        }
        self.signal_down = held;
        flip
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Emits the 12 edges of an axis-aligned box.
pub(crate) fn emit_box(drawer: &mut dyn DebugDrawer, min: Vec3, max: Vec3, color: [f32; 4]) {
    let corners = [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ];
    for (a, b) in BOX_EDGES {
        drawer.draw_line(corners[a], corners[b], color);
    }
}
