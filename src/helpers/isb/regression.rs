//! Sex-keyed regression constants
//!
//! Pelvic joint centers follow Dumas et al. (2007), "Adjustments to McConville
//! et al. and Young et al. body segment inertial parameters". Coordinates are
//! in millimetres, expressed in a pelvis frame with X anterior, Y superior and
//! Z to the right.

use crate::types::{Sex, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PelvisTable {
    pub r_asis: [f64; 3],
    pub l_asis: [f64; 3],
    pub r_hjc: [f64; 3],
    pub l_hjc: [f64; 3],
    pub ljc: [f64; 3],
    pub sc: [f64; 3],
}

pub const FEMALE_PELVIS: PelvisTable = PelvisTable {
    r_asis: [87.0, -13.0, 119.0],
    l_asis: [87.0, -13.0, -119.0],
    r_hjc: [54.0, -93.0, 88.0],
    l_hjc: [54.0, -93.0, -88.0],
    ljc: [0.0, 0.0, 0.0],
    sc: [-108.0, -13.0, 0.0],
};

pub const MALE_PELVIS: PelvisTable = PelvisTable {
    r_asis: [78.0, 7.0, 112.0],
    l_asis: [78.0, 7.0, -112.0],
    r_hjc: [56.0, -75.0, 81.0],
    l_hjc: [56.0, -75.0, -81.0],
    ljc: [0.0, 0.0, 0.0],
    sc: [-102.0, 7.0, 0.0],
};

impl PelvisTable {
    /// Calibration only runs with a known sex; anything else uses the male table
    pub fn for_sex(sex: Sex) -> &'static PelvisTable {
        match sex {
            Sex::Female => &FEMALE_PELVIS,
            _ => &MALE_PELVIS,
        }
    }

    /// Inter-ASIS distance of the table, the scale reference of every ratio
    pub fn asis_length(&self) -> f64 {
        (Vec3::from(self.r_asis) - Vec3::from(self.l_asis)).norm()
    }

    /// Offset of `point` from the sacral center, per unit of inter-ASIS distance
    pub fn ratio(&self, point: [f64; 3]) -> Vec3 {
        (Vec3::from(point) - Vec3::from(self.sc)) / self.asis_length()
    }

    pub fn ljc_ratio(&self) -> Vec3 {
        self.ratio(self.ljc)
    }

    pub fn left_hjc_ratio(&self) -> Vec3 {
        self.ratio(self.l_hjc)
    }

    pub fn right_hjc_ratio(&self) -> Vec3 {
        self.ratio(self.r_hjc)
    }
}

/// Joint center placed from the torso: a fraction of the torso depth along
/// the first axis, rotated about the third axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorsoOffset {
    pub angle_deg: f64,
    pub depth_ratio: f64,
}

impl TorsoOffset {
    /// Clavicular joint center, from C7
    pub fn clavicular(sex: Sex) -> Self {
        match sex {
            Sex::Female => Self {
                angle_deg: 14.0,
                depth_ratio: 0.53,
            },
            _ => Self {
                angle_deg: 8.0,
                depth_ratio: 0.55,
            },
        }
    }

    /// Shoulder joint center
    pub fn shoulder(sex: Sex) -> Self {
        match sex {
            Sex::Female => Self {
                angle_deg: -5.0,
                depth_ratio: 0.53,
            },
            _ => Self {
                angle_deg: -11.0,
                depth_ratio: 0.43,
            },
        }
    }
}
