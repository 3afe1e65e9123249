//! Skeleton helper following the International Society of Biomechanics
//! recommendations (Wu et al. 2002, 2005), with joint centers regressed as in
//! Dumas et al. (2007).

mod calibrate;
pub mod frames;
mod reconstruct;
pub mod regression;

use std::collections::BTreeMap;

use super::{InertialParametersEstimator, SkeletonHelper};
use crate::config::HelperConfig;
use crate::error::{SkeletonError, SkeletonResult};
use crate::landmarks::LandmarksTranslator;
use crate::model::{Anchor, Descriptor, Joint, JointId, Model, Point, Provenance, ReferenceFrame, SegmentId};
use crate::properties::Properties;
use crate::trial::{Subject, Trial};
use crate::types::{EulerSequence, Part, Pose, Region, Sex, Side, Vec3};

pub const DEFAULT_NAME: &str = "InternationalSocietyBiomechanics";

const DEFAULT_LANDMARKS: [&str; 43] = [
    "C7", "T8", "SS", "XP",
    "L.AC", "L.GH", "L.LHE", "L.MHE", "L.US", "L.RS", "L.MH5", "L.MH2",
    "R.AC", "R.GH", "R.LHE", "R.MHE", "R.US", "R.RS", "R.MH5", "R.MH2",
    "SC", "L.ASIS", "R.ASIS", "L.PSIS", "R.PSIS",
    "L.GT", "L.LFE", "L.MFE", "L.FH", "L.LTM", "L.MTM", "L.MTH1", "L.MTH5", "L.HEE",
    "R.GT", "R.LFE", "R.MFE", "R.FH", "R.LTM", "R.MTM", "R.MTH1", "R.MTH5", "R.HEE",
];

/// ISB skeleton helper for the upper limbs, the lower limbs or the full body
#[derive(Clone, Debug)]
pub struct InternationalSocietyBiomechanics {
    name: String,
    region: Region,
    side: Side,
    properties: Properties,
    points: BTreeMap<String, Point>,
    frames: BTreeMap<String, ReferenceFrame>,
    translator: Option<LandmarksTranslator>,
}

impl InternationalSocietyBiomechanics {
    pub fn new(region: Region, side: Side) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            region,
            side,
            properties: Properties::new(),
            points: BTreeMap::new(),
            frames: BTreeMap::new(),
            translator: None,
        }
    }

    pub fn from_config(config: &HelperConfig) -> Self {
        let mut helper = Self::new(config.region, config.side).with_name(&config.name);
        if let Some(sex) = config.sex {
            helper.set_sex(sex);
        }
        helper
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.properties.set("sex", sex);
    }

    /// Calibrated length of a segment ("Pelvis", "L.Thigh", ...)
    pub fn segment_length(&self, segment: &str) -> Option<f64> {
        self.properties.get_f64(&format!("{}.length", segment))
    }

    /// Replace the translator used to find landmarks in trials
    pub fn set_landmarks_translator(&mut self, translator: LandmarksTranslator) {
        self.translator = Some(translator);
    }

    pub fn landmarks_translator(&self) -> LandmarksTranslator {
        self.translator
            .clone()
            .unwrap_or_else(|| self.default_landmarks_translator())
    }

    /// Register a joint center ("LJC", "L.HJC", "R.SJC", ...) that calibration
    /// uses instead of its own estimate
    pub fn set_joint_center(&mut self, name: &str, position: Vec3) {
        self.points
            .insert(name.to_string(), Point::new(name, position, Provenance::User));
    }

    /// Register a relative frame ("Pelvis.SCS", ...) that calibration never replaces
    pub fn set_relative_frame(&mut self, name: &str, pose: Pose) {
        self.frames
            .insert(name.to_string(), ReferenceFrame::new(name, pose, Provenance::User));
    }

    pub fn joint_center(&self, name: &str) -> Option<&Point> {
        self.points.get(name)
    }

    pub fn relative_frame(&self, name: &str) -> Option<&ReferenceFrame> {
        self.frames.get(name)
    }

    /// User point if any, otherwise `estimate`, stored as a calibrated point
    fn resolve_joint_center(&mut self, name: &str, estimate: impl FnOnce() -> Vec3) -> Vec3 {
        match self.points.get_mut(name) {
            Some(point) if point.is_user_defined() => *point.position(),
            Some(point) => {
                point.set_position(estimate());
                *point.position()
            }
            None => {
                let position = estimate();
                self.points
                    .insert(name.to_string(), Point::new(name, position, Provenance::Calibration));
                position
            }
        }
    }

    fn store_relative_frame(&mut self, name: &str, pose: Pose) {
        match self.frames.get_mut(name) {
            Some(frame) if frame.is_user_defined() => {
                log::debug!("Keeping user-defined frame '{}'", name);
            }
            Some(frame) => frame.set_pose(pose),
            None => {
                self.frames
                    .insert(name.to_string(), ReferenceFrame::new(name, pose, Provenance::Calibration));
            }
        }
    }

    fn set_length(&mut self, segment: &str, length: f64) {
        self.properties.set(&format!("{}.length", segment), length);
    }

    fn add_upper_limb(&self, model: &mut Model, torso: SegmentId, side: Side) {
        let prefix = side.prefix();
        let arm = model.add_segment(&format!("{}Arm", prefix), Part::Arm, side);
        let forearm = model.add_segment(&format!("{}Forearm", prefix), Part::Forearm, side);
        let hand = model.add_segment(&format!("{}Hand", prefix), Part::Hand, side);
        for (name, proximal, distal) in [("Shoulder", torso, arm), ("Elbow", arm, forearm), ("Wrist", forearm, hand)] {
            add_euler_joint(model, &format!("{}{}", prefix, name), proximal, distal, false);
        }
    }

    fn add_lower_limb(&self, model: &mut Model, pelvis: SegmentId, side: Side) {
        let prefix = side.prefix();
        let thigh = model.add_segment(&format!("{}Thigh", prefix), Part::Thigh, side);
        let shank = model.add_segment(&format!("{}Shank", prefix), Part::Shank, side);
        let foot = model.add_segment(&format!("{}Foot", prefix), Part::Foot, side);
        let hip = add_euler_joint(model, &format!("{}Hip", prefix), pelvis, thigh, true);
        if let Some(joint) = model.joint_mut(hip) {
            joint.set_anchor(Anchor::Point(format!("{}HJC", prefix)));
        }
        let knee = add_euler_joint(model, &format!("{}Knee", prefix), thigh, shank, true);
        let ankle = add_euler_joint(model, &format!("{}Ankle", prefix), shank, foot, true);
        if let Some(joint) = model.joint_mut(ankle) {
            joint.set_anchor(Anchor::Origin(shank));
        }
        model.add_chain(&format!("{}LowerLimb", prefix), vec![hip, knee, ankle]);
    }

    /// Selected sides, left first
    fn sides(&self) -> impl Iterator<Item = Side> {
        let selector = self.side;
        [Side::Left, Side::Right]
            .into_iter()
            .filter(move |side| selector.includes(*side))
    }
}

/// Joint with a "<name>.Angle" ZXY descriptor, and a dynamic one for kinetics
fn add_euler_joint(model: &mut Model, name: &str, proximal: SegmentId, distal: SegmentId, dynamic: bool) -> JointId {
    let mut joint = Joint::new(name, proximal, distal);
    joint.add_descriptor(Descriptor::Euler {
        name: format!("{}.Angle", name),
        sequence: EulerSequence::ZXY,
    });
    if dynamic {
        joint.add_descriptor(Descriptor::Dynamic);
    }
    model.add_joint(joint)
}

impl SkeletonHelper for InternationalSocietyBiomechanics {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup_model(&self, model: &mut Model) -> SkeletonResult<()> {
        if self.side == Side::Center {
            return Err(SkeletonError::InvalidSide {
                helper: self.name.clone(),
            });
        }
        model.add_segment("Progression", Part::User, Side::Center);

        let mut torso = None;
        if self.region.has_upper() {
            model.set_name(&format!("{}_UpperLimb", self.name));
            model.add_segment("Head", Part::Head, Side::Center);
            let id = model.add_segment("Torso", Part::Torso, Side::Center);
            for side in self.sides() {
                self.add_upper_limb(model, id, side);
            }
            torso = Some(id);
        }

        let mut pelvis = None;
        if self.region.has_lower() {
            model.set_name(&format!("{}_LowerLimb", self.name));
            let id = model.add_segment("Pelvis", Part::Pelvis, Side::Center);
            for side in self.sides() {
                self.add_lower_limb(model, id, side);
            }
            pelvis = Some(id);
        }

        if let (Some(torso), Some(pelvis)) = (torso, pelvis) {
            let mut spine = Joint::new("Spine", torso, pelvis);
            spine.set_description("Torso relative to pelvis");
            model.add_joint(spine);
        }
        log::debug!(
            "Model '{}' set up with {} segments and {} joints",
            model.name(),
            model.segments().len(),
            model.joints().len()
        );
        Ok(())
    }

    fn calibrate(&mut self, trials: &[Trial], subject: Option<&Subject>) -> SkeletonResult<()> {
        self.calibrate_static(trials, subject)
    }

    fn reconstruct_model(&self, model: &mut Model, trial: &Trial) -> SkeletonResult<()> {
        self.reconstruct_trial(model, trial)
    }

    fn default_landmarks_translator(&self) -> LandmarksTranslator {
        LandmarksTranslator::identity(&self.name, &DEFAULT_LANDMARKS)
    }

    fn default_inertial_parameters_estimator(&self) -> Option<Box<dyn InertialParametersEstimator>> {
        None
    }
}
