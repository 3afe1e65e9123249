use serde::{Deserialize, Serialize};

use super::{JointId, SegmentId};
use crate::types::EulerSequence;

/// Where a joint connects to its distal segment when not the segment origin
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Origin of the given segment
    Origin(SegmentId),
    /// Named point, e.g. a hip joint center
    Point(String),
}

/// Extra information attached to a joint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Descriptor {
    /// Joint angles are later computed with this axis sequence
    Euler { name: String, sequence: EulerSequence },
    /// The joint takes part in kinetics
    Dynamic,
}

/// Directed relation between a proximal and a distal segment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub name: String,
    pub proximal: SegmentId,
    pub distal: SegmentId,
    anchor: Option<Anchor>,
    description: Option<String>,
    descriptors: Vec<Descriptor>,
    #[serde(skip)]
    revision: u64,
}

impl Joint {
    pub fn new(name: &str, proximal: SegmentId, distal: SegmentId) -> Self {
        Self {
            name: name.to_string(),
            proximal,
            distal,
            anchor: None,
            description: None,
            descriptors: Vec::new(),
            revision: 0,
        }
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        if self.anchor.as_ref() == Some(&anchor) {
            return;
        }
        self.anchor = Some(anchor);
        self.revision += 1;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: &str) {
        if self.description.as_deref() == Some(description) {
            return;
        }
        self.description = Some(description.to_string());
        self.revision += 1;
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn add_descriptor(&mut self, descriptor: Descriptor) {
        self.descriptors.push(descriptor);
        self.revision += 1;
    }

    pub fn euler_sequence(&self) -> Option<EulerSequence> {
        self.descriptors.iter().find_map(|d| match d {
            Descriptor::Euler { sequence, .. } => Some(*sequence),
            Descriptor::Dynamic => None,
        })
    }

    pub fn is_dynamic(&self) -> bool {
        self.descriptors.contains(&Descriptor::Dynamic)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Ordered joints of a kinematic chain, proximal to distal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub name: String,
    joints: Vec<JointId>,
    #[serde(skip)]
    revision: u64,
}

impl Chain {
    pub fn new(name: &str, joints: Vec<JointId>) -> Self {
        Self {
            name: name.to_string(),
            joints,
            revision: 0,
        }
    }

    pub fn joints(&self) -> &[JointId] {
        &self.joints
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
