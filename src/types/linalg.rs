//! Frame algebra for segment coordinate systems
//!
//! Provides the nalgebra aliases used everywhere in the crate, a sampled
//! 3D position carrying a validity residual, and the rigid pose used for
//! technical and segmental coordinate systems.

use nalgebra::{Matrix3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

// ===== Aliases =====
pub type Vec3 = Vector3<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat4 = Matrix4<f64>;

/// Residual stored on samples that are not present (occluded or never labeled)
pub const INVALID_RESIDUAL: f64 = -1.0;

/// A single 3D sample with its reconstruction residual.
///
/// A negative residual (or a non-finite coordinate) marks the sample as invalid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub value: Vec3,
    pub residual: f64,
}

impl Position {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            residual: 0.0,
        }
    }

    pub fn invalid() -> Self {
        Self {
            value: Vec3::zeros(),
            residual: INVALID_RESIDUAL,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.residual >= 0.0 && self.value.iter().all(|c| c.is_finite())
    }

    /// Returns the coordinates only when the sample is valid
    pub fn valid_value(&self) -> Option<Vec3> {
        self.is_valid().then_some(self.value)
    }
}

/// Midpoint of two points
pub fn midpoint(a: &Vec3, b: &Vec3) -> Vec3 {
    (a + b) / 2.0
}

/// Rigid pose: three orthonormal axes (matrix columns) and an origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub rotation: Mat3,
    pub origin: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            rotation: Mat3::identity(),
            origin: Vec3::zeros(),
        }
    }

    /// Build a pose from its three axes expressed in the parent frame
    pub fn from_axes(u: Vec3, v: Vec3, w: Vec3, origin: Vec3) -> Self {
        Self {
            rotation: Mat3::from_columns(&[u, v, w]),
            origin,
        }
    }

    pub fn u(&self) -> Vec3 {
        self.rotation.column(0).into_owned()
    }

    pub fn v(&self) -> Vec3 {
        self.rotation.column(1).into_owned()
    }

    pub fn w(&self) -> Vec3 {
        self.rotation.column(2).into_owned()
    }

    /// Inverse of a rigid pose: R^T, -R^T * o
    pub fn inverse(&self) -> Self {
        let rt = self.rotation.transpose();
        Self {
            rotation: rt,
            origin: -(rt * self.origin),
        }
    }

    /// Composition `self ∘ other`: `other` is expressed in `self`, the result in the parent of `self`
    pub fn compose(&self, other: &Pose) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            origin: self.rotation * other.origin + self.origin,
        }
    }

    /// Map a point expressed in this frame to the parent frame
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.rotation * point + self.origin
    }

    /// 4x4 homogeneous matrix [R o; 0 1]
    pub fn to_homogeneous(&self) -> Mat4 {
        let mut m = Mat4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.origin);
        m
    }
}

/// Rotation about the third axis by `angle` radians
pub fn rotation_about_w(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}
