//! Player ship control and the follow/orbit/free camera.

pub mod camera;
pub mod ship_controller;

#[cfg(test)]
pub(crate) mod test_rig;

pub use camera::{Camera, CameraMode, LookTarget};
pub use ship_controller::ShipController;
