//! Frame construction rules shared by calibration and reconstruction.
//!
//! Every function maps landmark positions (already validated) to a pose
//! whose columns are the u, v, w axes. Calibration evaluates them on
//! averaged landmarks, reconstruction once per sample.

use super::regression::TorsoOffset;
use crate::types::{midpoint, rotation_about_w, Pose, Vec3};

/// Pelvis technical frame, centred on the sacral center.
///
/// w points from the left to the right ASIS, v is normal to the plane
/// holding both ASIS and the sacral center.
pub fn pelvis_technical(l_asis: &Vec3, r_asis: &Vec3, sc: &Vec3) -> Pose {
    let w = (r_asis - l_asis).normalize();
    let v = w.cross(&(midpoint(l_asis, r_asis) - sc)).normalize();
    Pose::from_axes(v.cross(&w), v, w, *sc)
}

/// Frame of a long bone (thigh or arm).
///
/// v runs from `distal` to `proximal`, u is normal to the plane holding v and
/// the epicondyles. `sign` is the side sign so that u stays anterior on both sides.
pub fn long_bone_frame(
    sign: f64,
    proximal: &Vec3,
    distal: &Vec3,
    lateral: &Vec3,
    medial: &Vec3,
    origin: &Vec3,
) -> Pose {
    let v = (proximal - distal).normalize();
    let u = v.cross(&((lateral - medial) * sign)).normalize();
    Pose::from_axes(u, v, u.cross(&v), *origin)
}

/// Trunk frame through C7, SS and the XP/T8 midpoint.
///
/// v runs from the XP/T8 midpoint to `superior`, w is normal to the plane
/// holding v and the C7 -> SS direction.
pub fn trunk_frame(ss: &Vec3, c7: &Vec3, xp: &Vec3, t8: &Vec3, superior: &Vec3, origin: &Vec3) -> Pose {
    let v = (superior - midpoint(xp, t8)).normalize();
    let w = (ss - c7).cross(&v).normalize();
    Pose::from_axes(v.cross(&w), v, w, *origin)
}

pub fn torso_technical(ss: &Vec3, c7: &Vec3, xp: &Vec3, t8: &Vec3) -> Pose {
    trunk_frame(ss, c7, xp, t8, &midpoint(ss, c7), c7)
}

/// Torso frame used to place the clavicular and shoulder joint centers.
///
/// u runs from C7 to SS and w is normal to the sagittal plane of the thorax.
pub fn torso_landmark_frame(ss: &Vec3, c7: &Vec3, xp: &Vec3, t8: &Vec3) -> Pose {
    let u = (ss - c7).normalize();
    let w = u.cross(&(midpoint(ss, c7) - midpoint(xp, t8))).normalize();
    Pose::from_axes(u, w.cross(&u), w, *c7)
}

/// Joint center offset from the landmark frame origin by a fraction of the torso depth
pub fn torso_joint_center(landmark_frame: &Pose, offset: &TorsoOffset, depth: f64) -> Vec3 {
    let local = rotation_about_w(offset.angle_deg.to_radians()) * Vec3::new(offset.depth_ratio * depth, 0.0, 0.0);
    landmark_frame.transform_point(&local)
}

/// Joint center regressed from the pelvis technical frame.
///
/// `ratio` is expressed per unit of inter-ASIS distance, `scale` is the
/// measured inter-ASIS distance.
pub fn pelvic_joint_center(technical: &Pose, ratio: &Vec3, scale: f64) -> Vec3 {
    technical.transform_point(&(ratio * scale))
}
