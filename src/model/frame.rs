use serde::{Deserialize, Serialize};

use crate::types::{Pose, Vec3};

/// Who produced a frame or a point.
///
/// User entries are overrides: calibration reads them but never replaces them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    User,
    Calibration,
}

/// Coordinate system of a segment relative to its technical frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub name: String,
    pose: Pose,
    provenance: Provenance,
    #[serde(skip)]
    revision: u64,
}

impl ReferenceFrame {
    pub fn new(name: &str, pose: Pose, provenance: Provenance) -> Self {
        Self {
            name: name.to_string(),
            pose,
            provenance,
            revision: 0,
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        if self.pose == pose {
            return;
        }
        self.pose = pose;
        self.revision += 1;
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_user_defined(&self) -> bool {
        self.provenance == Provenance::User
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Named point such as a joint center
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    position: Vec3,
    provenance: Provenance,
    #[serde(skip)]
    revision: u64,
}

impl Point {
    pub fn new(name: &str, position: Vec3, provenance: Provenance) -> Self {
        Self {
            name: name.to_string(),
            position,
            provenance,
            revision: 0,
        }
    }

    pub fn position(&self) -> &Vec3 {
        &self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        if self.position == position {
            return;
        }
        self.position = position;
        self.revision += 1;
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_user_defined(&self) -> bool {
        self.provenance == Provenance::User
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Time series of world poses. `None` marks samples where a landmark was invalid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseSeries {
    pub name: String,
    pub sample_rate: f64,
    pub start_time: f64,
    pub poses: Vec<Option<Pose>>,
}

impl PoseSeries {
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.poses.iter().filter(|p| p.is_some()).count()
    }
}
