use serde::{Deserialize, Serialize};

use super::frame::{PoseSeries, ReferenceFrame};
use crate::properties::Properties;
use crate::types::{Part, Side};

/// Rigid body part of a model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub part: Part,
    pub side: Side,
    properties: Properties,
    frames: Vec<ReferenceFrame>,
    pose_series: Vec<PoseSeries>,
    #[serde(skip)]
    revision: u64,
}

impl Segment {
    pub fn new(name: &str, part: Part, side: Side) -> Self {
        Self {
            name: name.to_string(),
            part,
            side,
            properties: Properties::new(),
            frames: Vec::new(),
            pose_series: Vec::new(),
            revision: 0,
        }
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Segment length set by calibration (property "length")
    pub fn length(&self) -> Option<f64> {
        self.properties.get_f64("length")
    }

    pub fn set_length(&mut self, length: f64) {
        let before = self.properties.revision();
        self.properties.set("length", length);
        if self.properties.revision() != before {
            self.revision += 1;
        }
    }

    pub fn frames(&self) -> &[ReferenceFrame] {
        &self.frames
    }

    pub fn frame(&self, name: &str) -> Option<&ReferenceFrame> {
        self.frames.iter().find(|f| f.name == name)
    }

    /// Replaces a frame with the same name
    pub fn attach_frame(&mut self, frame: ReferenceFrame) {
        self.frames.retain(|f| f.name != frame.name);
        self.frames.push(frame);
        self.revision += 1;
    }

    pub fn pose_series(&self) -> &[PoseSeries] {
        &self.pose_series
    }

    pub fn find_pose_series(&self, name: &str) -> Option<&PoseSeries> {
        self.pose_series.iter().find(|s| s.name == name)
    }

    /// Replaces a series with the same name
    pub fn append_pose_series(&mut self, series: PoseSeries) {
        self.pose_series.retain(|s| s.name != series.name);
        self.pose_series.push(series);
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
