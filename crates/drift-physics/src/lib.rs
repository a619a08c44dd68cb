//! Rigid-body world driver for the flight sandbox.
//!
//! Wraps the Rapier 3D pipeline behind a single [`PhysicsWorld`] value that
//! owns all simulation state. The world exists from [`PhysicsWorld::init`]
//! until [`PhysicsWorld::cleanup`] consumes it, so stepping an uninitialised
//! or torn-down world cannot be expressed.
//!
//! Time is measured by an injected [`Clock`]; each [`update`](PhysicsWorld::update)
//! integrates whatever elapsed since the previous one in fixed substeps.

pub mod body;
pub mod clock;
pub mod debug_draw;

use drift_config::PhysicsConfig;
use glam::{Quat, Vec3};
use rapier3d::prelude::*;

pub use body::{BodyDesc, BodyShape, EntityId, Transform};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use debug_draw::{DebugDrawState, DebugDrawer, DebugLine, DebugLineBuffer, NullDrawer};
pub use rapier3d::prelude::RigidBodyHandle as BodyHandle;

use debug_draw::{DYNAMIC_COLOR, FIXED_COLOR, VELOCITY_COLOR, emit_box};

/// Closest intersection reported by [`PhysicsWorld::ray_test`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub body: BodyHandle,
    /// Entity that registered the body, if any.
    pub entity: Option<EntityId>,
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

fn to_vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// Central simulation state. Free space: gravity defaults to zero.
pub struct PhysicsWorld {
    gravity: Vector,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    clock: Box<dyn Clock>,
    drawer: Box<dyn DebugDrawer>,
    debug: DebugDrawState,
    max_substeps: u32,
    /// Seconds not yet integrated.
    accumulator: f64,
}

impl PhysicsWorld {
    /// Builds the collision and solver stages and installs the debug drawer.
    ///
    /// The clock is reset here, so the first `update` only sees time that
    /// passed after initialisation.
    pub fn init(
        config: &PhysicsConfig,
        mut clock: Box<dyn Clock>,
        drawer: Box<dyn DebugDrawer>,
    ) -> Self {
        let broad_phase = BroadPhaseBvh::new();
        let narrow_phase = NarrowPhase::new();
        let physics_pipeline = PhysicsPipeline::new();

        let mut dt = config.fixed_timestep;
        if !(dt > 0.0) {
            tracing::warn!(dt, "invalid fixed timestep, using 1/60 s");
            dt = 1.0 / 60.0;
        }
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };
        let max_substeps = config.max_substeps.max(1);
        let [gx, gy, gz] = config.gravity;

        clock.reset();
        tracing::info!(dt, max_substeps, "physics world initialised");

        Self {
            gravity: Vector::new(gx, gy, gz),
            integration_parameters,
            physics_pipeline,
            island_manager: IslandManager::new(),
            broad_phase,
            narrow_phase,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            clock,
            drawer,
            debug: DebugDrawState::default(),
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Integrates the time elapsed since the previous call and returns the
    /// number of substeps taken.
    ///
    /// At most `max_substeps` are taken; time beyond that is dropped rather
    /// than carried into later frames. A leftover shorter than one substep
    /// is carried.
    pub fn update(&mut self) -> u32 {
        let elapsed = self.clock.elapsed_micros();
        self.clock.reset();
        if elapsed == 0 {
            return 0;
        }

        let dt = f64::from(self.integration_parameters.dt);
        self.accumulator += elapsed as f64 / 1_000_000.0;
        let wanted = (self.accumulator / dt).floor();
        if wanted < 1.0 {
            return 0;
        }
        self.accumulator -= wanted * dt;

        let steps = if wanted > f64::from(self.max_substeps) {
            tracing::trace!(
                wanted,
                max = self.max_substeps,
                "frame too long, dropping physics time"
            );
            self.max_substeps
        } else {
            wanted as u32
        };

        for _ in 0..steps {
            self.step();
        }
        steps
    }

    fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Closest body crossed by the segment `from -> to`.
    ///
    /// Bodies added since the last substep are not yet in the broad phase
    /// and cannot be hit.
    pub fn ray_test(&self, from: Vec3, to: Vec3) -> Option<RayHit> {
        let span = to - from;
        let length = span.length();
        if !(length > f32::EPSILON) {
            return None;
        }
        let dir = span / length;

        let query_pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.rigid_body_set,
            &self.collider_set,
            QueryFilter::default(),
        );
        let ray = Ray::new(to_vector(from), to_vector(dir));
        let (collider, distance) = query_pipeline.cast_ray(&ray, length, true)?;

        let body = self.collider_set.get(collider)?.parent()?;
        let entity = self
            .rigid_body_set
            .get(body)
            .and_then(|b| EntityId::from_user_data(b.user_data));

        Some(RayHit {
            body,
            entity,
            point: from + dir * distance,
            distance,
        })
    }

    /// Creates a body with one collider. `owner` is reported by ray hits.
    pub fn add_body(&mut self, desc: &BodyDesc, owner: Option<EntityId>) -> BodyHandle {
        let builder = if desc.is_fixed() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let body = builder
            .translation(to_vector(desc.transform.position))
            .user_data(owner.map_or(0, EntityId::to_user_data))
            .ccd_enabled(desc.ccd)
            .build();
        let handle = self.rigid_body_set.insert(body);
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let q = desc.transform.rotation;
            body.set_rotation(rapier3d::math::Rotation::from_xyzw(q.x, q.y, q.z, q.w), false);
        }

        let collider = match desc.shape {
            BodyShape::Ball { radius } => ColliderBuilder::ball(radius),
            BodyShape::Cuboid { half_extents: h } => ColliderBuilder::cuboid(h.x, h.y, h.z),
        }
        .restitution(desc.restitution);
        let collider = if desc.is_fixed() {
            collider
        } else {
            collider.mass(desc.mass)
        };
        self.collider_set
            .insert_with_parent(collider.build(), handle, &mut self.rigid_body_set);

        tracing::trace!(?handle, ?owner, "body added");
        handle
    }

    /// Removes a body and its colliders. `false` for a stale handle.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    pub fn body_transform(&self, handle: BodyHandle) -> Option<Transform> {
        self.rigid_body_set.get(handle).map(|body| {
            let t = body.translation();
            let r = body.rotation();
            Transform {
                position: Vec3::new(t.x, t.y, t.z),
                rotation: Quat::from_xyzw(r.x, r.y, r.z, r.w),
            }
        })
    }

    /// Overwrites the body's orientation. Position and velocities are kept.
    pub fn set_body_rotation(&mut self, handle: BodyHandle, rotation: Quat) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return false;
        };
        body.set_rotation(
            rapier3d::math::Rotation::from_xyzw(rotation.x, rotation.y, rotation.z, rotation.w),
            true,
        );
        true
    }

    /// Applies an instantaneous impulse through the centre of mass.
    pub fn apply_central_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return false;
        };
        body.apply_impulse(to_vector(impulse), true);
        true
    }

    pub fn linear_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Feeds the debug toggle signal for this frame.
    pub fn debug_toggle(&mut self, held: bool) {
        if self.debug.feed(held) {
            tracing::debug!(enabled = self.debug.enabled(), "physics debug drawing toggled");
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.enabled()
    }

    /// Sets the debug drawing state directly, e.g. from configuration.
    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug = DebugDrawState::new(enabled);
    }

    /// Length of one substep in seconds.
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Sends collider bounds and velocity vectors to the installed drawer.
    /// Does nothing while debug drawing is off.
    pub fn debug_draw(&mut self) {
        if !self.debug.enabled() {
            return;
        }

        for (_handle, collider) in self.collider_set.iter() {
            let color = match collider.parent().and_then(|h| self.rigid_body_set.get(h)) {
                Some(body) if body.is_dynamic() => DYNAMIC_COLOR,
                _ => FIXED_COLOR,
            };
            let aabb = collider.compute_aabb();
            let (min, max) = (aabb.mins, aabb.maxs);
            emit_box(
                self.drawer.as_mut(),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, max.y, max.z),
                color,
            );
        }

        for (_handle, body) in self.rigid_body_set.iter() {
            if !body.is_dynamic() {
                continue;
            }
            let t = body.translation();
            let v = body.linvel();
            let start = Vec3::new(t.x, t.y, t.z);
            self.drawer
                .draw_line(start, start + Vec3::new(v.x, v.y, v.z), VELOCITY_COLOR);
        }
    }

    /// Removes every body and collider and drops the solver state.
    /// Returns the number of bodies removed.
    pub fn cleanup(mut self) -> usize {
        let handles: Vec<BodyHandle> = self.rigid_body_set.iter().map(|(h, _)| h).collect();
        let removed = handles.len();
        for handle in handles {
            self.remove_body(handle);
        }
        tracing::info!(removed, "physics world cleaned up");
        removed
    }
}
