pub mod linalg;

pub use linalg::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body side, used both as a segment tag and as a helper selector.
///
/// `Center` tags midline segments. `Both` only makes sense as a selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Center,
    Left,
    Right,
    Both,
}

impl Side {
    /// True when this selector covers `side` (Left or Right)
    pub fn includes(self, side: Side) -> bool {
        self == side || (self == Side::Both && matches!(side, Side::Left | Side::Right))
    }

    /// Prefix of canonical landmark and segment names ("L." / "R.")
    pub fn prefix(self) -> &'static str {
        match self {
            Side::Left => "L.",
            Side::Right => "R.",
            Side::Center | Side::Both => "",
        }
    }

    /// Canonical names of this side, e.g. `["GT"]` -> `["R.GT"]`
    pub fn prefixed<const N: usize>(self, names: [&str; N]) -> [String; N] {
        names.map(|name| format!("{}{}", self.prefix(), name))
    }

    /// Sign keeping the medio-lateral axes right-handed on both sides
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
            Side::Center | Side::Both => 0.0,
        }
    }
}

/// Body region selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Upper,
    Lower,
    Full,
}

impl Region {
    pub fn has_upper(self) -> bool {
        matches!(self, Region::Upper | Region::Full)
    }

    pub fn has_lower(self) -> bool {
        matches!(self, Region::Lower | Region::Full)
    }
}

/// Anatomical tag of a segment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    User,
    Head,
    Torso,
    Arm,
    Forearm,
    Hand,
    Pelvis,
    Thigh,
    Shank,
    Foot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Unknown,
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Unknown => "Unknown",
            Sex::Female => "Female",
            Sex::Male => "Male",
        };
        f.write_str(s)
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" => Ok(Sex::Female),
            "Male" => Ok(Sex::Male),
            "Unknown" => Ok(Sex::Unknown),
            other => Err(format!("unrecognized sex '{}'", other)),
        }
    }
}

/// Axis sequence of an Euler-angle joint descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EulerSequence {
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}
