//! Three-mode camera: follow the player, orbit it, or fly free.
//!
//! A single toggle cycles Follow -> Vanity -> Free -> Follow. Vanity zeroes
//! the follow offsets (saving them) and lets the mouse orbit; Free detaches
//! the camera entirely; returning to Follow restores the offsets and resets
//! the camera's own rotation. With nothing to follow the camera is held in
//! Free.
//!
//! Every frame the camera also casts a ray from its eye along its forward
//! axis. A body hit by the ray is "looked at" and can be grabbed with the
//! grab control; in Free mode pointer motion then pushes the grabbed body.

use drift_config::CameraConfig;
use drift_entity::{CameraView, DrawSink, Entity, EntityBehavior, EntityId, FrameContext};
use drift_input::{Control, EdgeTrigger, InputSource};
use drift_physics::{BodyHandle, Clock, Transform};
use glam::{Quat, Vec3};

/// Smallest per-frame zoom multiplier. Keeps a fast scroll-in from
/// reaching zero, which a multiplicative zoom could never leave.
const MIN_ZOOM_FACTOR: f32 = 0.1;

/// Camera state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Sits behind the followed entity and copies its orientation.
    Follow,
    /// Tracks the followed entity's location, rotates independently.
    Vanity,
    /// Detached; moved by the flight controls.
    Free,
}

/// The body under the camera's crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookTarget {
    pub entity: EntityId,
    pub body: BodyHandle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedOffsets {
    x_offset: f32,
    y_offset: f32,
    min_zoom: f32,
}

pub struct Camera {
    entity: Entity,
    mode: CameraMode,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    x_offset: f32,
    y_offset: f32,
    saved: Option<SavedOffsets>,
    free_speed: f32,
    zoom_sensitivity: f32,
    grab_sensitivity: f32,
    draw_distance: f32,
    looking_at: Option<LookTarget>,
    grabbed: bool,
    mode_trigger: EdgeTrigger,
    clock: Box<dyn Clock>,
}

impl Camera {
    /// A camera at the origin in Follow mode. It drops to Free on its first
    /// update if nothing is followed.
    pub fn new(config: &CameraConfig, mut clock: Box<dyn Clock>) -> Self {
        clock.reset();
        Self {
            entity: Entity::new("camera"),
            mode: CameraMode::Follow,
            zoom: config.initial_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            x_offset: config.x_offset,
            y_offset: config.y_offset,
            saved: None,
            free_speed: config.free_speed,
            zoom_sensitivity: config.zoom_sensitivity,
            grab_sensitivity: config.grab_sensitivity,
            draw_distance: config.draw_distance,
            looking_at: None,
            grabbed: false,
            mode_trigger: EdgeTrigger::new(),
            clock,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_free(&self) -> bool {
        self.mode == CameraMode::Free
    }

    pub fn is_vanity(&self) -> bool {
        self.mode == CameraMode::Vanity
    }

    /// Returns to Follow with the configured offsets, e.g. after a scene
    /// load assigns something to follow.
    pub fn follow(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.restore(saved);
        }
        self.mode = CameraMode::Follow;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_bounds(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn offsets(&self) -> (f32, f32) {
        (self.x_offset, self.y_offset)
    }

    pub fn looking_at(&self) -> Option<LookTarget> {
        self.looking_at
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbed
    }

    pub fn draw_distance(&self) -> f32 {
        self.draw_distance
    }

    /// Where the eye actually is: the location pushed back by the zoom and
    /// shifted by the offsets, all in the camera's frame.
    pub fn eye_position(&self) -> Vec3 {
        let offsets = Vec3::new(self.x_offset, self.y_offset, -self.zoom);
        self.entity.location + self.entity.to_world(offsets)
    }

    /// What other entities may read about the camera this frame.
    pub fn view(&self) -> CameraView {
        CameraView {
            location: self.entity.location,
            rotation: self.entity.rotation,
            vanity: self.is_vanity(),
            draw_distance: self.draw_distance,
        }
    }

    fn restore(&mut self, saved: SavedOffsets) {
        self.x_offset = saved.x_offset;
        self.y_offset = saved.y_offset;
        self.min_zoom = saved.min_zoom;
    }

    /// Pushes a grabbed body, then re-resolves what the ray points at.
    fn resolve_look_target(&mut self, ctx: &mut FrameContext<'_>) {
        let button = ctx.input.is_active(Control::Grab);

        if self.mode == CameraMode::Free
            && self.grabbed
            && let Some(target) = self.looking_at
        {
            let delta = ctx.input.pointer_delta();
            let push = Vec3::new(
                delta.x * self.grab_sensitivity,
                -delta.y * self.grab_sensitivity,
                0.0,
            );
            ctx.physics
                .apply_central_impulse(target.body, self.entity.to_world(push));
        }

        let eye = self.eye_position();
        let end = eye + self.entity.to_world(Vec3::new(0.0, 0.0, self.draw_distance));
        match ctx.physics.ray_test(eye, end) {
            Some(hit) if !self.grabbed => {
                self.looking_at = hit.entity.map(|entity| LookTarget {
                    entity,
                    body: hit.body,
                });
                if button && self.looking_at.is_some() {
                    self.grabbed = true;
                }
            }
            _ if !button => {
                self.looking_at = None;
                self.grabbed = false;
            }
            _ => {}
        }
    }

    fn apply_zoom(&mut self, input: &dyn InputSource) {
        if !input.console_open() {
            let scroll = input.scroll_delta();
            if scroll != 0.0 {
                let factor = 1.0 - self.zoom_sensitivity * scroll;
                self.zoom *= factor.max(MIN_ZOOM_FACTOR);
            }
        }
        if self.zoom < self.min_zoom {
            self.zoom = self.min_zoom;
        } else if self.zoom > self.max_zoom {
            self.zoom = self.max_zoom;
        }
    }

    fn cycle_mode(&mut self) {
        self.mode = match self.mode {
            CameraMode::Follow => {
                self.saved = Some(SavedOffsets {
                    x_offset: self.x_offset,
                    y_offset: self.y_offset,
                    min_zoom: self.min_zoom,
                });
                self.x_offset = 0.0;
                self.y_offset = 0.0;
                self.min_zoom = 0.0;
                CameraMode::Vanity
            }
            CameraMode::Vanity => CameraMode::Free,
            CameraMode::Free => {
                self.entity.rotation = Quat::IDENTITY;
                if let Some(saved) = self.saved.take() {
                    self.restore(saved);
                }
                CameraMode::Follow
            }
        };
        tracing::debug!(mode = ?self.mode, "camera mode changed");
    }

    fn fly(&mut self, input: &dyn InputSource, delta: f32) {
        let step = self.free_speed * delta;
        let e = &mut self.entity;
        if input.is_active(Control::Forward) {
            e.move_z(step);
        }
        if input.is_active(Control::Backward) {
            e.move_z(-step);
        }
        if input.is_active(Control::Left) {
            e.move_x(step);
        }
        if input.is_active(Control::Right) {
            e.move_x(-step);
        }
        if input.is_active(Control::Ascend) {
            e.move_y(-step);
        }
        if input.is_active(Control::Descend) {
            e.move_y(step);
        }
        if input.is_active(Control::RollRight) {
            e.rotate_z(-delta);
        }
        if input.is_active(Control::RollLeft) {
            e.rotate_z(delta);
        }
    }
}

impl EntityBehavior for Camera {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.resolve_look_target(ctx);

        let followed: Option<Transform> = ctx.followed;
        if followed.is_none() {
            self.mode = CameraMode::Free;
        }

        let input = ctx.input;
        self.apply_zoom(input);

        let toggled = self
            .mode_trigger
            .rising(input.is_active(Control::CameraMode));
        if toggled && followed.is_some() {
            self.cycle_mode();
        }

        match (self.mode, followed) {
            (CameraMode::Follow, Some(target)) => self.entity.rotation = target.rotation,
            _ => {
                let d = input.pointer_delta();
                self.entity.rotate_x(d.y);
                self.entity.rotate_y(d.x);
            }
        }

        // Movement speed is per 10 ms of elapsed time.
        let delta = self.clock.elapsed_micros() as f32 / 10_000.0;
        self.clock.reset();

        match (self.mode, followed) {
            (CameraMode::Free, _) => {
                if !input.console_open() {
                    self.fly(input, delta);
                }
            }
            (_, Some(target)) => self.entity.location = target.position,
            (_, None) => {}
        }
    }

    fn draw(&self, _sink: &mut dyn DrawSink) {}
}

#[cfg(test)]
mod tests {
    use drift_input::FrameInput;
    use drift_physics::{BodyDesc, ManualClock};

    use super::*;
    use crate::test_rig::Rig;

    fn camera(rig: &Rig) -> Camera {
        Camera::new(&CameraConfig::default(), Box::new(rig.clock.clone()))
    }

    fn followed_at(position: Vec3) -> Option<Transform> {
        Some(Transform {
            position,
            rotation: drift_math::rotate_y(Quat::IDENTITY, 30.0),
        })
    }

    fn toggle(rig: &mut Rig, cam: &mut Camera) {
        rig.run(cam, &FrameInput::new().press(Control::CameraMode));
        rig.run(cam, &FrameInput::new());
    }

    #[test]
    fn test_nothing_followed_forces_free() {
        let mut rig = Rig::new();
        let mut cam = camera(&rig);
        assert_eq!(cam.mode(), CameraMode::Follow);
        rig.run(&mut cam, &FrameInput::new());
        assert!(cam.is_free());
    }

    #[test]
    fn test_losing_target_in_vanity_forces_free() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::ZERO);
        let mut cam = camera(&rig);
        toggle(&mut rig, &mut cam);
        assert!(cam.is_vanity());

        rig.followed = None;
        rig.run(&mut cam, &FrameInput::new());
        assert!(cam.is_free());
        assert!(!cam.is_vanity());
    }

    #[test]
    fn test_toggle_ignored_without_followed() {
        let mut rig = Rig::new();
        let mut cam = camera(&rig);
        for _ in 0..3 {
            toggle(&mut rig, &mut cam);
            assert!(cam.is_free());
        }
    }

    #[test]
    fn test_mode_cycle_saves_and_restores_offsets() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::new(5.0, 0.0, 0.0));
        let mut cam = camera(&rig);

        toggle(&mut rig, &mut cam);
        assert!(cam.is_vanity());
        assert_eq!(cam.offsets(), (0.0, 0.0));
        assert_eq!(cam.zoom_bounds().0, 0.0);

        toggle(&mut rig, &mut cam);
        assert!(cam.is_free());
        assert_eq!(cam.offsets(), (0.0, 0.0));

        toggle(&mut rig, &mut cam);
        assert_eq!(cam.mode(), CameraMode::Follow);
        assert_eq!(cam.offsets(), (0.0, -2.7));
        assert_eq!(cam.zoom_bounds(), (10.0, 3000.0));
    }

    #[test]
    fn test_held_toggle_cycles_once() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::ZERO);
        let mut cam = camera(&rig);
        let held = FrameInput::new().hold(Control::CameraMode);
        for _ in 0..10 {
            rig.run(&mut cam, &held);
        }
        assert!(cam.is_vanity());
    }

    #[test]
    fn test_follow_copies_transform() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::new(1.0, 2.0, 3.0));
        let mut cam = camera(&rig);
        rig.run(&mut cam, &FrameInput::new().with_pointer(40.0, 40.0));
        let target = rig.followed.unwrap();
        assert_eq!(cam.entity().location, target.position);
        assert_eq!(cam.entity().rotation, target.rotation);
    }

    #[test]
    fn test_vanity_tracks_location_but_rotates_freely() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::ZERO);
        let mut cam = camera(&rig);
        toggle(&mut rig, &mut cam);
        let before = cam.entity().rotation;

        rig.followed = followed_at(Vec3::new(0.0, 0.0, 50.0));
        rig.run(&mut cam, &FrameInput::new().with_pointer(10.0, 0.0));
        assert_eq!(cam.entity().location, Vec3::new(0.0, 0.0, 50.0));
        assert!(!cam.entity().rotation.abs_diff_eq(before, 1e-4));
    }

    #[test]
    fn test_return_to_follow_resets_rotation_before_copy() {
        let mut rig = Rig::new();
        rig.followed = Some(Transform::default());
        let mut cam = camera(&rig);
        toggle(&mut rig, &mut cam);
        toggle(&mut rig, &mut cam);
        rig.run(&mut cam, &FrameInput::new().with_pointer(25.0, 5.0));
        assert!(cam.entity().rotation != Quat::IDENTITY);
        toggle(&mut rig, &mut cam);
        assert_eq!(cam.entity().rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_zoom_scroll_and_clamp() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::ZERO);
        let mut cam = camera(&rig);

        rig.run(&mut cam, &FrameInput::new().with_scroll(-1.0));
        assert!((cam.zoom() - 13.0).abs() < 1e-4, "zoom={}", cam.zoom());

        for _ in 0..20 {
            rig.run(&mut cam, &FrameInput::new().with_scroll(1.0));
        }
        assert_eq!(cam.zoom(), 10.0);

        for _ in 0..200 {
            rig.run(&mut cam, &FrameInput::new().with_scroll(-3.0));
        }
        assert_eq!(cam.zoom(), 3000.0);
    }

    #[test]
    fn test_fast_scroll_in_vanity_recovers() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::ZERO);
        let mut cam = camera(&rig);
        toggle(&mut rig, &mut cam);
        assert!(cam.is_vanity());

        rig.run(&mut cam, &FrameInput::new().with_scroll(12.0));
        assert!((cam.zoom() - 1.2).abs() < 1e-4, "zoom={}", cam.zoom());

        for _ in 0..50 {
            rig.run(&mut cam, &FrameInput::new().with_scroll(-3.0));
        }
        assert_eq!(cam.zoom(), 3000.0);
    }

    #[test]
    fn test_console_suppresses_zoom() {
        let mut rig = Rig::new();
        rig.followed = followed_at(Vec3::ZERO);
        let mut cam = camera(&rig);
        let input = FrameInput::new().with_scroll(-2.0).with_console(true);
        rig.run(&mut cam, &input);
        assert_eq!(cam.zoom(), 12.0);
    }

    #[test]
    fn test_free_flight_scales_with_elapsed_time() {
        let mut rig = Rig::new();
        let mut cam = camera(&rig);
        rig.run(&mut cam, &FrameInput::new());
        assert!(cam.is_free());

        // 100 ms -> delta 10 -> 10 * free_speed 10 = 100 units.
        rig.clock.advance_micros(100_000);
        rig.run(&mut cam, &FrameInput::new().hold(Control::Forward));
        assert!((cam.entity().location - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-3);

        rig.clock.advance_micros(50_000);
        rig.run(&mut cam, &FrameInput::new().hold(Control::Ascend));
        assert!((cam.entity().location - Vec3::new(0.0, -50.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_free_flight_without_time_stays_put() {
        let mut rig = Rig::new();
        let mut cam = camera(&rig);
        for _ in 0..5 {
            rig.run(&mut cam, &FrameInput::new().hold(Control::Forward));
        }
        assert_eq!(cam.entity().location, Vec3::ZERO);
    }

    #[test]
    fn test_eye_position_applies_offsets() {
        let rig = Rig::new();
        let cam = camera(&rig);
        assert!((cam.eye_position() - Vec3::new(0.0, -2.7, -12.0)).length() < 1e-5);
    }

    fn rock_ahead(rig: &mut Rig) -> (EntityId, BodyHandle) {
        let id = rig.ids.allocate();
        let desc = BodyDesc::ball(
            Transform {
                position: Vec3::new(0.0, -2.7, 200.0),
                rotation: Quat::IDENTITY,
            },
            5.0,
            10.0,
            0.5,
        );
        let body = rig.physics.add_body(&desc, Some(id));
        rig.step_physics();
        (id, body)
    }

    #[test]
    fn test_look_and_grab() {
        let mut rig = Rig::new();
        let (id, body) = rock_ahead(&mut rig);
        let mut cam = Camera::new(&CameraConfig::default(), Box::new(ManualClock::new()));

        rig.run(&mut cam, &FrameInput::new());
        assert_eq!(cam.looking_at(), Some(LookTarget { entity: id, body }));
        assert!(!cam.is_grabbing());

        rig.run(&mut cam, &FrameInput::new().hold(Control::Grab));
        assert!(cam.is_grabbing());

        rig.run(&mut cam, &FrameInput::new().hold(Control::Grab).with_pointer(2.0, 1.0));
        let v = rig.physics.linear_velocity(body).unwrap();
        assert!((v - Vec3::new(50.0, -25.0, 0.0)).length() < 1e-3, "{v:?}");

        rig.run(&mut cam, &FrameInput::new());
        assert!(!cam.is_grabbing());
        assert_eq!(cam.looking_at(), None);
    }

    #[test]
    fn test_grab_needs_a_target() {
        let mut rig = Rig::new();
        let mut cam = Camera::new(&CameraConfig::default(), Box::new(ManualClock::new()));
        rig.run(&mut cam, &FrameInput::new().hold(Control::Grab));
        assert!(!cam.is_grabbing());
        assert_eq!(cam.looking_at(), None);
    }

    #[test]
    fn test_grab_does_not_push_outside_free_mode() {
        let mut rig = Rig::new();
        let (_id, body) = rock_ahead(&mut rig);
        rig.followed = Some(Transform::default());
        let mut cam = Camera::new(&CameraConfig::default(), Box::new(ManualClock::new()));

        rig.run(&mut cam, &FrameInput::new().hold(Control::Grab));
        assert!(cam.is_grabbing());
        rig.run(&mut cam, &FrameInput::new().hold(Control::Grab).with_pointer(4.0, 0.0));
        assert_eq!(rig.physics.linear_velocity(body).unwrap(), Vec3::ZERO);
    }
}
