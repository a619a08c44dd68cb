//! Scene files: the initial set of entities, described in RON.
//!
//! A scene is parsed as a whole, then each descriptor is validated on its
//! own. A bad descriptor is reported and dropped without affecting the rest.

pub mod descriptor;
pub mod error;
pub mod scene;

pub use descriptor::{
    BodyDescriptor, DebrisDescriptor, Descriptor, PlanetDescriptor, Quad, ShapeDescriptor,
    StaticDescriptor, SunDescriptor, Triple,
};
pub use error::SceneError;
pub use scene::{Scene, resolve_model};
