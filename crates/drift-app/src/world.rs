//! The live world and its frame phases.
//!
//! A frame runs, in order: physics step, debug toggle, player sync, camera,
//! entity updates, spawn merge, draw. Entities spawned during the update
//! phase wait in the spawn queue and join the live collection only after
//! every entity has been updated.

use drift_config::{Config, DebrisConfig, PlayerConfig};
use drift_entity::{
    DrawSink, EntityBehavior, EntityId, EntityIds, FrameContext, ModelProvider, SpawnQueue,
    Transform,
};
use drift_input::{Control, InputSource};
use drift_physics::{Clock, DebugDrawer, PhysicsWorld};
use drift_player::Camera;
use drift_scene::{Descriptor, Scene, SceneError, resolve_model};
use drift_space::Skybox;

use crate::builder::{BuildContext, build_entity};
use crate::scene_entity::SceneEntity;

/// The independent time sources of a world.
pub struct WorldClocks {
    pub physics: Box<dyn Clock>,
    pub camera: Box<dyn Clock>,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub substeps: u32,
    /// Entities that joined the live collection at the end of the frame.
    pub spawned: usize,
    pub live: usize,
}

/// Outcome of loading a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneReport {
    pub loaded: usize,
    pub skipped: usize,
}

pub struct SimWorld {
    physics: PhysicsWorld,
    camera: Camera,
    entities: Vec<SceneEntity>,
    spawns: SpawnQueue,
    ids: EntityIds,
    models: Box<dyn ModelProvider>,
    player_config: PlayerConfig,
    debris_config: DebrisConfig,
}

impl SimWorld {
    /// An empty world. The camera starts free until a player is loaded.
    pub fn new(
        config: &Config,
        clocks: WorldClocks,
        drawer: Box<dyn DebugDrawer>,
        models: Box<dyn ModelProvider>,
    ) -> Self {
        let mut physics = PhysicsWorld::init(&config.physics, clocks.physics, drawer);
        physics.set_debug_enabled(config.debug.physics_debug);
        Self {
            physics,
            camera: Camera::new(&config.camera, clocks.camera),
            entities: Vec::new(),
            spawns: SpawnQueue::new(),
            ids: EntityIds::new(),
            models,
            player_config: config.player.clone(),
            debris_config: config.debris.clone(),
        }
    }

    /// Adds every usable descriptor of `scene`. Bad descriptors and
    /// unknown models are logged and skipped; the rest still load.
    pub fn load_scene(&mut self, scene: Scene) -> SceneReport {
        let valid = scene.valid_entities();
        let mut report = SceneReport {
            skipped: scene.entities.len() - valid.len(),
            ..SceneReport::default()
        };

        if let Some(name) = scene.skybox.as_deref() {
            match resolve_model(self.models.as_mut(), name) {
                Ok(model) => {
                    self.entities.push(SceneEntity::Skybox(Skybox::new(Some(model))));
                    report.loaded += 1;
                }
                Err(err) => {
                    tracing::error!(%err, "skipping skybox");
                    report.skipped += 1;
                }
            }
        }

        for (index, descriptor) in valid {
            match self.spawn_descriptor(index, descriptor) {
                Ok(entity) => {
                    self.entities.push(entity);
                    report.loaded += 1;
                }
                Err(err) => {
                    tracing::error!(%err, kind = descriptor.kind(), "skipping scene descriptor");
                    report.skipped += 1;
                }
            }
        }

        if self.player().is_some() {
            self.camera.follow();
        }
        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped,
            bodies = self.physics.body_count(),
            "scene populated"
        );
        report
    }

    fn spawn_descriptor(
        &mut self,
        index: usize,
        descriptor: &Descriptor,
    ) -> Result<SceneEntity, SceneError> {
        if matches!(descriptor, Descriptor::Player(_)) && self.player().is_some() {
            return Err(SceneError::Invalid {
                index,
                kind: descriptor.kind(),
                reason: "scene already has a player".into(),
            });
        }
        let mut ctx = BuildContext {
            physics: &mut self.physics,
            ids: &mut self.ids,
            models: self.models.as_mut(),
            player: &self.player_config,
            debris: &self.debris_config,
            anchor: self.camera.entity().location,
        };
        build_entity(descriptor, &mut ctx)
    }

    /// Runs one frame.
    pub fn frame(&mut self, input: &dyn InputSource, sink: &mut dyn DrawSink) -> FrameReport {
        let substeps = self.physics.update();
        self.physics
            .debug_toggle(input.is_active(Control::PhysicsDebug));

        let followed = self.sync_player();

        let mut ctx = FrameContext {
            physics: &mut self.physics,
            input,
            spawns: &mut self.spawns,
            ids: &mut self.ids,
            models: self.models.as_mut(),
            camera: self.camera.view(),
            followed,
        };
        self.camera.update(&mut ctx);

        ctx.camera = self.camera.view();
        for entity in &mut self.entities {
            entity.behavior_mut().update(&mut ctx);
        }

        let spawned = self.merge_spawns();
        self.draw(sink);
        self.physics.debug_draw();

        FrameReport {
            substeps,
            spawned,
            live: self.entities.len(),
        }
    }

    /// Refreshes the player from its body and returns its transform.
    fn sync_player(&mut self) -> Option<Transform> {
        self.entities.iter_mut().find_map(|entity| match entity {
            SceneEntity::Player(ship) => {
                ship.sync(&self.physics);
                Some(ship.transform())
            }
            _ => None,
        })
    }

    fn merge_spawns(&mut self) -> usize {
        let before = self.entities.len();
        self.entities
            .extend(self.spawns.drain().map(SceneEntity::from));
        self.entities.len() - before
    }

    /// Skybox first so everything else draws over it.
    fn draw(&self, sink: &mut dyn DrawSink) {
        let (sky, rest): (Vec<_>, Vec<_>) = self.entities.iter().partition(|e| e.is_skybox());
        for entity in sky.into_iter().chain(rest) {
            entity.behavior().draw(sink);
        }
    }

    /// Removes an entity and releases its body and model.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(pos) = self.entities.iter().position(|e| e.id() == Some(id)) else {
            return false;
        };
        let mut entity = self.entities.remove(pos);
        entity
            .behavior_mut()
            .cleanup(&mut self.physics, self.models.as_mut());
        true
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn entities(&self) -> &[SceneEntity] {
        &self.entities
    }

    pub fn player(&self) -> Option<&drift_player::ShipController> {
        self.entities.iter().find_map(|entity| match entity {
            SceneEntity::Player(ship) => Some(ship),
            _ => None,
        })
    }

    /// Tears the world down. Returns the number of bodies no entity
    /// released, which is zero unless something leaked a body.
    pub fn cleanup(mut self) -> usize {
        for entity in &mut self.entities {
            entity
                .behavior_mut()
                .cleanup(&mut self.physics, self.models.as_mut());
        }
        self.camera
            .cleanup(&mut self.physics, self.models.as_mut());
        let entities = self.entities.len();
        let leaked = self.physics.cleanup();
        if leaked > 0 {
            tracing::warn!(leaked, "bodies outlived their entities");
        }
        tracing::info!(entities, "world cleaned up");
        leaked
    }
}
