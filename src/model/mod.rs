//! Multibody model: segments, joints and chains stored in per-model arenas.
//!
//! Joints and chains refer to segments and joints by index handles; the
//! model owns everything. Collections are created on first mutable access.

pub mod frame;
pub mod joint;
pub mod segment;

pub use frame::{Point, PoseSeries, Provenance, ReferenceFrame};
pub use joint::{Anchor, Chain, Descriptor, Joint};
pub use segment::Segment;

use serde::{Deserialize, Serialize};

use crate::types::{Part, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(pub usize);

pub const SEGMENTS: &str = "Segments";
pub const JOINTS: &str = "Joints";
pub const CHAINS: &str = "Chains";

/// Named, owning collection of model items
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    pub name: String,
    items: Vec<T>,
}

impl<T> Collection<T> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    name: String,
    segments: Option<Collection<Segment>>,
    joints: Option<Collection<Joint>>,
    chains: Option<Collection<Chain>>,
    #[serde(skip)]
    revision: u64,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            segments: None,
            joints: None,
            chains: None,
            revision: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name == name {
            return;
        }
        self.name = name.to_string();
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The "Segments" collection, if anything was ever added to it
    pub fn segment_collection(&self) -> Option<&Collection<Segment>> {
        self.segments.as_ref()
    }

    pub fn joint_collection(&self) -> Option<&Collection<Joint>> {
        self.joints.as_ref()
    }

    pub fn chain_collection(&self) -> Option<&Collection<Chain>> {
        self.chains.as_ref()
    }

    pub fn segments(&self) -> &[Segment] {
        self.segments.as_ref().map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    pub fn joints(&self) -> &[Joint] {
        self.joints.as_ref().map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    pub fn chains(&self) -> &[Chain] {
        self.chains.as_ref().map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    pub fn add_segment(&mut self, name: &str, part: Part, side: Side) -> SegmentId {
        let segments = self.segments.get_or_insert_with(|| Collection::new(SEGMENTS));
        let id = SegmentId(segments.push(Segment::new(name, part, side)));
        self.revision += 1;
        id
    }

    pub fn add_joint(&mut self, joint: Joint) -> JointId {
        let joints = self.joints.get_or_insert_with(|| Collection::new(JOINTS));
        let id = JointId(joints.push(joint));
        self.revision += 1;
        id
    }

    pub fn add_chain(&mut self, name: &str, joints: Vec<JointId>) -> ChainId {
        let chains = self.chains.get_or_insert_with(|| Collection::new(CHAINS));
        let id = ChainId(chains.push(Chain::new(name, joints)));
        self.revision += 1;
        id
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments().get(id.0)
    }

    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.as_mut().and_then(|c| c.items.get_mut(id.0))
    }

    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints().get(id.0)
    }

    pub fn joint_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        self.joints.as_mut().and_then(|c| c.items.get_mut(id.0))
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains().get(id.0)
    }

    pub fn find_segment(&self, name: &str) -> Option<SegmentId> {
        self.segments().iter().position(|s| s.name == name).map(SegmentId)
    }

    /// First segment with the given anatomical tag
    pub fn find_segment_by_part(&self, part: Part) -> Option<SegmentId> {
        self.segments().iter().position(|s| s.part == part).map(SegmentId)
    }

    pub fn find_joint(&self, name: &str) -> Option<JointId> {
        self.joints().iter().position(|j| j.name == name).map(JointId)
    }

    pub fn find_chain(&self, name: &str) -> Option<ChainId> {
        self.chains().iter().position(|c| c.name == name).map(ChainId)
    }
}
