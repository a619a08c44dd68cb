//! Shared fixtures for controller tests.

use drift_config::PhysicsConfig;
use drift_entity::{CameraView, EntityBehavior, EntityIds, FrameContext, ModelRegistry, SpawnQueue};
use drift_input::FrameInput;
use drift_physics::{ManualClock, NullDrawer, PhysicsWorld, Transform};

/// Just over one 1/60 s physics substep.
pub const STEP_MICROS: u64 = 16_700;

pub struct Rig {
    pub physics: PhysicsWorld,
    pub clock: ManualClock,
    pub spawns: SpawnQueue,
    pub ids: EntityIds,
    pub models: ModelRegistry,
    pub camera: CameraView,
    pub followed: Option<Transform>,
}

impl Rig {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let physics = PhysicsWorld::init(
            &PhysicsConfig::default(),
            Box::new(clock.clone()),
            Box::new(NullDrawer),
        );
        Self {
            physics,
            clock,
            spawns: SpawnQueue::new(),
            ids: EntityIds::new(),
            models: ModelRegistry::with_models(["wing_x", "laser_bullet"]),
            camera: CameraView::default(),
            followed: None,
        }
    }

    /// Advances time by one substep and steps physics.
    pub fn step_physics(&mut self) {
        self.clock.advance_micros(STEP_MICROS);
        self.physics.update();
    }

    pub fn run(&mut self, target: &mut dyn EntityBehavior, input: &FrameInput) {
        let mut ctx = FrameContext {
            physics: &mut self.physics,
            input,
            spawns: &mut self.spawns,
            ids: &mut self.ids,
            models: &mut self.models,
            camera: self.camera,
            followed: self.followed,
        };
        target.update(&mut ctx);
    }
}
