//! Orientation math for Drift: incremental quaternion axis rotations, vector
//! rotation by quaternion, and basis-vector movement helpers.
//!
//! Everything here is a pure function over [`glam`] types. None of the helpers
//! normalize their result; long-lived orientations must be passed through
//! [`renormalize`] by their owner after each incremental rotation.

mod orientation;

pub use orientation::{
    axis_delta, move_x, move_y, move_z, renormalize, rotate_vector, rotate_x, rotate_y, rotate_z,
};
