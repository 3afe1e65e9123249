//! Static calibration: joint centers, relative segment frames and lengths

use super::frames;
use super::regression::{PelvisTable, TorsoOffset};
use super::InternationalSocietyBiomechanics;
use crate::error::{SkeletonError, SkeletonResult};
use crate::landmarks::{extract_landmark_positions, StaticLandmarks};
use crate::trial::{Subject, Trial};
use crate::types::{midpoint, Pose, Sex, Side, Vec3};

/// Centers found while calibrating the pelvis, reused by the limbs and the torso
struct PelvisCenters {
    ljc: Vec3,
    l_hjc: Vec3,
    r_hjc: Vec3,
}

impl PelvisCenters {
    fn hjc(&self, side: Side) -> Vec3 {
        match side {
            Side::Left => self.l_hjc,
            _ => self.r_hjc,
        }
    }
}

/// Torso landmark frame and depth, from which the shoulder centers are placed
struct TorsoReference {
    landmark_frame: Pose,
    depth: f64,
}

impl InternationalSocietyBiomechanics {
    pub(super) fn calibrate_static(&mut self, trials: &[Trial], subject: Option<&Subject>) -> SkeletonResult<()> {
        let trial = trials.first().ok_or(SkeletonError::NoTrial)?;
        if trials.len() > 1 {
            log::warn!(
                "{} static trials given, only '{}' is used for the calibration",
                trials.len(),
                trial.name
            );
        }

        let extraction = extract_landmark_positions(&self.landmarks_translator(), trial);
        if !extraction.consistent {
            return Err(SkeletonError::InconsistentSampling {
                trial: trial.name.clone(),
            });
        }
        if let Some(subject) = subject {
            self.properties.merge(&subject.properties);
        }
        let sex = self.calibration_sex()?;
        let landmarks = StaticLandmarks::from_extraction(&extraction);
        log::debug!(
            "Calibrating '{}' ({}) on trial '{}' with {} landmarks",
            self.name,
            sex,
            trial.name,
            extraction.series.len()
        );

        let mut ljc = None;
        if self.region.has_lower() {
            let centers = self.calibrate_pelvis(sex, &landmarks)?;
            for side in self.sides() {
                self.calibrate_lower_limb(side, &centers.hjc(side), &landmarks)?;
            }
            ljc = Some(centers.ljc);
        }
        if self.region.has_upper() {
            let ljc = ljc.or_else(|| {
                self.joint_center("LJC")
                    .filter(|p| p.is_user_defined())
                    .map(|p| *p.position())
            });
            let torso = self.calibrate_torso(sex, ljc, &landmarks)?;
            for side in self.sides() {
                self.calibrate_upper_limb(side, sex, &torso, &landmarks)?;
            }
        }
        log::info!("Helper '{}' calibrated on trial '{}'", self.name, trial.name);
        Ok(())
    }

    fn calibration_sex(&self) -> SkeletonResult<Sex> {
        let value = self.properties.get("sex").ok_or(SkeletonError::MissingSex)?;
        let text = value
            .as_str()
            .ok_or_else(|| SkeletonError::UnrecognizedSex(format!("{:?}", value)))?;
        match text.parse::<Sex>() {
            Ok(sex @ (Sex::Female | Sex::Male)) => Ok(sex),
            _ => Err(SkeletonError::UnrecognizedSex(text.to_string())),
        }
    }

    fn calibrate_pelvis(&mut self, sex: Sex, landmarks: &StaticLandmarks) -> SkeletonResult<PelvisCenters> {
        let [l_asis, r_asis] = landmarks.require(["L.ASIS", "R.ASIS"], "pelvis")?;
        let sc = sacral_center(landmarks)?;

        let technical = frames::pelvis_technical(&l_asis, &r_asis, &sc);
        let table = PelvisTable::for_sex(sex);
        let scale = (r_asis - l_asis).norm();

        let ljc = self.resolve_joint_center("LJC", || {
            frames::pelvic_joint_center(&technical, &table.ljc_ratio(), scale)
        });
        let l_hjc = self.resolve_joint_center("L.HJC", || {
            frames::pelvic_joint_center(&technical, &table.left_hjc_ratio(), scale)
        });
        let r_hjc = self.resolve_joint_center("R.HJC", || {
            frames::pelvic_joint_center(&technical, &table.right_hjc_ratio(), scale)
        });

        let segmental = Pose {
            rotation: technical.rotation,
            origin: ljc,
        };
        self.store_relative_frame("Pelvis.SCS", technical.inverse().compose(&segmental));
        self.set_length("Pelvis", (ljc - midpoint(&l_hjc, &r_hjc)).norm());
        Ok(PelvisCenters { ljc, l_hjc, r_hjc })
    }

    fn calibrate_lower_limb(&mut self, side: Side, hjc: &Vec3, landmarks: &StaticLandmarks) -> SkeletonResult<()> {
        let prefix = side.prefix();
        let sign = side.sign();

        let [gt, lfe, mfe] = landmarks.require(side.prefixed(["GT", "LFE", "MFE"]), "thigh")?;
        let kjc = midpoint(&lfe, &mfe);
        let technical = frames::long_bone_frame(sign, &gt, &lfe, &lfe, &mfe, &lfe);
        let segmental = frames::long_bone_frame(sign, hjc, &kjc, &lfe, &mfe, hjc);
        self.store_relative_frame(
            &format!("{}Thigh.SCS", prefix),
            technical.inverse().compose(&segmental),
        );
        self.set_length(&format!("{}Thigh", prefix), (hjc - kjc).norm());

        let [ltm, mtm] = landmarks.require(side.prefixed(["LTM", "MTM"]), "shank")?;
        let ajc = midpoint(&ltm, &mtm);
        self.set_length(&format!("{}Shank", prefix), (kjc - ajc).norm());

        let [mth1, mth5, hee] = landmarks.require(side.prefixed(["MTH1", "MTH5", "HEE"]), "foot")?;
        self.set_length(&format!("{}Foot", prefix), (midpoint(&mth1, &mth5) - hee).norm());
        Ok(())
    }

    fn calibrate_torso(
        &mut self,
        sex: Sex,
        ljc: Option<Vec3>,
        landmarks: &StaticLandmarks,
    ) -> SkeletonResult<TorsoReference> {
        let [ss, c7, xp, t8] = landmarks.require(["SS", "C7", "XP", "T8"], "torso")?;
        let landmark_frame = frames::torso_landmark_frame(&ss, &c7, &xp, &t8);
        let depth = (ss - c7).norm();
        let cjc = frames::torso_joint_center(&landmark_frame, &TorsoOffset::clavicular(sex), depth);

        let technical = frames::torso_technical(&ss, &c7, &xp, &t8);
        let segmental = frames::trunk_frame(&ss, &c7, &xp, &t8, &cjc, &cjc);
        self.store_relative_frame("Torso.SCS", technical.inverse().compose(&segmental));

        let length = match ljc {
            Some(ljc) => (cjc - ljc).norm(),
            None => {
                log::warn!("No lumbar joint center available, the torso length is set to 0");
                0.0
            }
        };
        self.set_length("Torso", length);
        self.properties.set("torso.depth", depth);
        Ok(TorsoReference { landmark_frame, depth })
    }

    fn calibrate_upper_limb(
        &mut self,
        side: Side,
        sex: Sex,
        torso: &TorsoReference,
        landmarks: &StaticLandmarks,
    ) -> SkeletonResult<()> {
        let prefix = side.prefix();
        let sign = side.sign();

        let [_ac, gh, lhe, mhe] = landmarks.require(side.prefixed(["AC", "GH", "LHE", "MHE"]), "arm")?;
        let sjc = self.resolve_joint_center(&format!("{}SJC", prefix), || {
            frames::torso_joint_center(&torso.landmark_frame, &TorsoOffset::shoulder(sex), torso.depth)
        });
        let ejc = midpoint(&lhe, &mhe);
        let technical = frames::long_bone_frame(sign, &gh, &ejc, &lhe, &mhe, &gh);
        let segmental = frames::long_bone_frame(sign, &sjc, &ejc, &lhe, &mhe, &sjc);
        self.store_relative_frame(
            &format!("{}Arm.SCS", prefix),
            technical.inverse().compose(&segmental),
        );
        self.set_length(&format!("{}Arm", prefix), (sjc - ejc).norm());

        let [us, rs] = landmarks.require(side.prefixed(["US", "RS"]), "forearm")?;
        let wjc = midpoint(&us, &rs);
        self.set_length(&format!("{}Forearm", prefix), (ejc - wjc).norm());

        let [mh2, mh5] = landmarks.require(side.prefixed(["MH2", "MH5"]), "hand")?;
        self.set_length(&format!("{}Hand", prefix), (wjc - midpoint(&mh2, &mh5)).norm());
        Ok(())
    }
}

/// SC landmark, or the midpoint of both PSIS
fn sacral_center(landmarks: &StaticLandmarks) -> SkeletonResult<Vec3> {
    if let Some(sc) = landmarks.get("SC") {
        return Ok(sc);
    }
    match landmarks.require(["L.PSIS", "R.PSIS"], "pelvis") {
        Ok([l_psis, r_psis]) => Ok(midpoint(&l_psis, &r_psis)),
        Err(SkeletonError::MissingLandmarks { segment, mut landmarks }) => {
            landmarks.insert(0, "SC".to_string());
            Err(SkeletonError::MissingLandmarks { segment, landmarks })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::SkeletonHelper;
    use crate::test_utils::{
        female_subject, male_subject, mirror, static_positions, static_trial, trial_from_positions,
    };
    use crate::types::{Region, Side};
    use approx::assert_relative_eq;

    fn calibrated(region: Region, side: Side) -> InternationalSocietyBiomechanics {
        calibrated_with(region, side, &female_subject())
    }

    fn calibrated_with(region: Region, side: Side, subject: &Subject) -> InternationalSocietyBiomechanics {
        let mut helper = InternationalSocietyBiomechanics::new(region, side);
        helper
            .calibrate(&[static_trial("static")], Some(subject))
            .unwrap();
        helper
    }

    fn calibrate_without(region: Region, landmark: &str) -> (InternationalSocietyBiomechanics, SkeletonError) {
        let positions = static_positions().into_iter().filter(|(name, _)| name != landmark);
        let trial = trial_from_positions("static", positions);
        let mut helper = InternationalSocietyBiomechanics::new(region, Side::Both);
        let err = helper.calibrate(&[trial], Some(&female_subject())).unwrap_err();
        (helper, err)
    }

    fn c7() -> Vec3 {
        Vec3::new(-80.0, 520.0, 0.0)
    }

    // The fixture thorax has u = (2, -1, 0)/sqrt(5), v = (1, 2, 0)/sqrt(5) and
    // a depth of 70*sqrt(5), so the offset reduces to 70 * ratio * (2c + s, 2s - c, 0)
    fn torso_offset(angle_deg: f64, depth_ratio: f64) -> Vec3 {
        let (s, c) = angle_deg.to_radians().sin_cos();
        70.0 * depth_ratio * Vec3::new(2.0 * c + s, 2.0 * s - c, 0.0)
    }

    #[test]
    fn test_female_pelvis_length() {
        let helper = calibrated(Region::Lower, Side::Both);
        // ASIS 200 mm apart, SC at the PSIS midpoint 100 mm behind them
        let expected = 200.0 / 238.0 * (54.0_f64.powi(2) + 93.0_f64.powi(2)).sqrt();
        assert_relative_eq!(helper.segment_length("Pelvis").unwrap(), expected, epsilon = 1e-9);
        let ljc = helper.joint_center("LJC").unwrap();
        assert_relative_eq!(*ljc.position(), Vec3::new(200.0 * 108.0 / 238.0 - 100.0, 200.0 * 13.0 / 238.0, 0.0), epsilon = 1e-9);
        assert!(!ljc.is_user_defined());
    }

    #[test]
    fn test_male_pelvis_length() {
        let helper = calibrated_with(Region::Lower, Side::Both, &male_subject());
        let expected = 200.0 / 224.0 * (56.0_f64.powi(2) + 75.0_f64.powi(2)).sqrt();
        assert_relative_eq!(helper.segment_length("Pelvis").unwrap(), expected, epsilon = 1e-9);
        let ljc = helper.joint_center("LJC").unwrap().position();
        assert_relative_eq!(*ljc, Vec3::new(200.0 * 102.0 / 224.0 - 100.0, -200.0 * 7.0 / 224.0, 0.0), epsilon = 1e-9);
        let r_hjc = helper.joint_center("R.HJC").unwrap().position();
        assert_relative_eq!(*r_hjc, Vec3::new(200.0 * 158.0 / 224.0 - 100.0, -200.0 * 82.0 / 224.0, 200.0 * 81.0 / 224.0), epsilon = 1e-9);
    }

    #[test]
    fn test_clavicular_center_per_sex() {
        let cases = [
            (female_subject(), 14.0, 0.53, Vec3::new(200.0 * 108.0 / 238.0 - 100.0, 200.0 * 13.0 / 238.0, 0.0)),
            (male_subject(), 8.0, 0.55, Vec3::new(200.0 * 102.0 / 224.0 - 100.0, -200.0 * 7.0 / 224.0, 0.0)),
        ];
        for (subject, angle, ratio, ljc) in cases {
            let helper = calibrated_with(Region::Full, Side::Both, &subject);
            let cjc = c7() + torso_offset(angle, ratio);
            assert_relative_eq!(helper.segment_length("Torso").unwrap(), (cjc - ljc).norm(), epsilon = 1e-9);

            // The torso technical frame of the fixture is the world frame centred on C7
            let relative = helper.relative_frame("Torso.SCS").unwrap().pose();
            assert_relative_eq!(relative.origin, cjc - c7(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_shoulder_centers_per_sex() {
        for (subject, angle, ratio) in [(female_subject(), -5.0, 0.53), (male_subject(), -11.0, 0.43)] {
            let helper = calibrated_with(Region::Upper, Side::Both, &subject);
            let expected = c7() + torso_offset(angle, ratio);
            for name in ["L.SJC", "R.SJC"] {
                let sjc = helper.joint_center(name).unwrap();
                assert_relative_eq!(*sjc.position(), expected, epsilon = 1e-9);
                assert!(!sjc.is_user_defined());
            }
            let ejc = Vec3::new(-20.0, 180.0, 190.0);
            assert_relative_eq!(helper.segment_length("R.Arm").unwrap(), (expected - ejc).norm(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pelvis_scs_keeps_technical_axes() {
        let helper = calibrated(Region::Lower, Side::Both);
        let relative = helper.relative_frame("Pelvis.SCS").unwrap();
        assert_relative_eq!(relative.pose().rotation, crate::types::Mat3::identity(), epsilon = 1e-12);
        // Technical frame of the fixture is aligned with the world, centred on SC
        let ljc = helper.joint_center("LJC").unwrap().position();
        assert_relative_eq!(relative.pose().origin, ljc - Vec3::new(-100.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_lengths() {
        let helper = calibrated(Region::Full, Side::Both);
        for segment in ["Thigh", "Shank", "Foot", "Arm", "Forearm", "Hand"] {
            let left = helper.segment_length(&format!("L.{}", segment)).unwrap();
            let right = helper.segment_length(&format!("R.{}", segment)).unwrap();
            assert_relative_eq!(left, right, epsilon = 1e-9);
            assert!(right > 0.0, "{} length should be positive", segment);
        }
        let l_hjc = helper.joint_center("L.HJC").unwrap().position();
        let r_hjc = helper.joint_center("R.HJC").unwrap().position();
        assert_relative_eq!(*l_hjc, mirror(*r_hjc), epsilon = 1e-9);

        let l_thigh = helper.relative_frame("L.Thigh.SCS").unwrap().pose();
        let r_thigh = helper.relative_frame("R.Thigh.SCS").unwrap().pose();
        assert_relative_eq!(l_thigh.origin.norm(), r_thigh.origin.norm(), epsilon = 1e-9);
    }

    #[test]
    fn test_limb_lengths() {
        let helper = calibrated(Region::Full, Side::Right);
        let kjc = Vec3::new(0.0, -450.0, 90.0);
        let ajc = Vec3::new(-5.0, -845.0, 95.0);
        assert_relative_eq!(helper.segment_length("R.Shank").unwrap(), (kjc - ajc).norm(), epsilon = 1e-9);
        let toe = Vec3::new(140.0, -900.0, 95.0);
        let heel = Vec3::new(-60.0, -890.0, 90.0);
        assert_relative_eq!(helper.segment_length("R.Foot").unwrap(), (toe - heel).norm(), epsilon = 1e-9);
        let ejc = Vec3::new(-20.0, 180.0, 190.0);
        let wjc = Vec3::new(10.0, -60.0, 210.0);
        assert_relative_eq!(helper.segment_length("R.Forearm").unwrap(), (ejc - wjc).norm(), epsilon = 1e-9);
        assert!(helper.segment_length("L.Thigh").is_none());
    }

    #[test]
    fn test_torso_properties() {
        let helper = calibrated(Region::Full, Side::Both);
        let depth = (Vec3::new(60.0, 450.0, 0.0) - Vec3::new(-80.0, 520.0, 0.0)).norm();
        assert_relative_eq!(helper.properties().get_f64("torso.depth").unwrap(), depth, epsilon = 1e-9);
        assert!(helper.segment_length("Torso").unwrap() > 0.0);
        assert!(helper.relative_frame("Torso.SCS").is_some());
        assert!(helper.joint_center("R.SJC").is_some());
    }

    #[test]
    fn test_upper_only_torso_length_fallback() {
        let helper = calibrated(Region::Upper, Side::Both);
        assert_eq!(helper.segment_length("Torso"), Some(0.0));
        assert!(helper.joint_center("LJC").is_none());
    }

    #[test]
    fn test_calibration_is_idempotent() {
        let mut helper = calibrated(Region::Full, Side::Both);
        let properties = helper.properties().clone();
        let pelvis = helper.relative_frame("Pelvis.SCS").unwrap().clone();
        let hjc = helper.joint_center("R.HJC").unwrap().clone();

        helper
            .calibrate(&[static_trial("static")], Some(&female_subject()))
            .unwrap();
        assert_eq!(helper.properties(), &properties);
        assert_eq!(helper.relative_frame("Pelvis.SCS").unwrap().pose(), pelvis.pose());
        assert_eq!(helper.relative_frame("Pelvis.SCS").unwrap().revision(), pelvis.revision());
        assert_eq!(helper.joint_center("R.HJC").unwrap().revision(), hjc.revision());
    }

    #[test]
    fn test_user_overrides_survive() {
        let mut helper = InternationalSocietyBiomechanics::new(Region::Full, Side::Both);
        let sentinel = Pose {
            rotation: crate::types::rotation_about_w(0.7),
            origin: Vec3::new(1.0, 2.0, 3.0),
        };
        helper.set_relative_frame("Pelvis.SCS", sentinel);
        helper.set_joint_center("R.HJC", Vec3::new(80.0, -100.0, 90.0));
        helper
            .calibrate(&[static_trial("static")], Some(&female_subject()))
            .unwrap();

        let frame = helper.relative_frame("Pelvis.SCS").unwrap();
        assert!(frame.is_user_defined());
        assert_eq!(frame.pose(), &sentinel);
        assert_eq!(*helper.joint_center("R.HJC").unwrap().position(), Vec3::new(80.0, -100.0, 90.0));

        // The user hip center feeds the thigh length
        let kjc = Vec3::new(0.0, -450.0, 90.0);
        let expected = (Vec3::new(80.0, -100.0, 90.0) - kjc).norm();
        assert_relative_eq!(helper.segment_length("R.Thigh").unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_asis_reports_pelvis() {
        let positions = static_positions().into_iter().filter(|(name, _)| name != "R.ASIS");
        let trial = trial_from_positions("static", positions);
        let mut helper = InternationalSocietyBiomechanics::new(Region::Lower, Side::Both);
        let err = helper.calibrate(&[trial], Some(&female_subject())).unwrap_err();
        assert_eq!(err.segment(), Some("pelvis"));
        assert_eq!(
            err,
            SkeletonError::MissingLandmarks {
                segment: "pelvis",
                landmarks: vec!["R.ASIS".to_string()],
            }
        );
        assert!(helper.relative_frame("Pelvis.SCS").is_none());
    }

    #[test]
    fn test_missing_sacrum_lists_alternatives() {
        let positions = static_positions().into_iter().filter(|(name, _)| name != "L.PSIS");
        let trial = trial_from_positions("static", positions);
        let mut helper = InternationalSocietyBiomechanics::new(Region::Lower, Side::Both);
        let err = helper.calibrate(&[trial], Some(&female_subject())).unwrap_err();
        assert_eq!(
            err,
            SkeletonError::MissingLandmarks {
                segment: "pelvis",
                landmarks: vec!["SC".to_string(), "L.PSIS".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_heel_reports_foot() {
        let positions = static_positions().into_iter().filter(|(name, _)| name != "L.HEE");
        let trial = trial_from_positions("static", positions);
        let mut helper = InternationalSocietyBiomechanics::new(Region::Lower, Side::Both);
        let err = helper.calibrate(&[trial], Some(&female_subject())).unwrap_err();
        assert_eq!(err.segment(), Some("foot"));
        // Earlier steps are kept
        assert!(helper.relative_frame("L.Thigh.SCS").is_some());
    }

    #[test]
    fn test_missing_sternum_reports_torso() {
        let (helper, err) = calibrate_without(Region::Full, "SS");
        assert_eq!(
            err,
            SkeletonError::MissingLandmarks {
                segment: "torso",
                landmarks: vec!["SS".to_string()],
            }
        );
        assert!(helper.segment_length("Pelvis").is_some());
        assert!(helper.relative_frame("Torso.SCS").is_none());
        assert!(helper.joint_center("L.SJC").is_none());
    }

    #[test]
    fn test_missing_acromion_reports_arm() {
        let (helper, err) = calibrate_without(Region::Upper, "R.AC");
        assert_eq!(err.segment(), Some("arm"));
        assert_eq!(
            err,
            SkeletonError::MissingLandmarks {
                segment: "arm",
                landmarks: vec!["R.AC".to_string()],
            }
        );
        assert!(helper.segment_length("L.Hand").is_some());
        assert!(helper.joint_center("R.SJC").is_none());
        assert!(helper.relative_frame("R.Arm.SCS").is_none());
    }

    #[test]
    fn test_missing_ulnar_styloid_reports_forearm() {
        let (helper, err) = calibrate_without(Region::Upper, "R.US");
        assert_eq!(err.segment(), Some("forearm"));
        assert_eq!(
            err,
            SkeletonError::MissingLandmarks {
                segment: "forearm",
                landmarks: vec!["R.US".to_string()],
            }
        );
        // The right arm is calibrated before the forearm fails
        assert!(helper.relative_frame("R.Arm.SCS").is_some());
        assert!(helper.segment_length("R.Arm").is_some());
        assert!(helper.segment_length("R.Forearm").is_none());
        assert!(helper.segment_length("R.Hand").is_none());
    }

    #[test]
    fn test_missing_metacarpal_reports_hand() {
        let (helper, err) = calibrate_without(Region::Upper, "L.MH2");
        assert_eq!(err.segment(), Some("hand"));
        assert_eq!(
            err,
            SkeletonError::MissingLandmarks {
                segment: "hand",
                landmarks: vec!["L.MH2".to_string()],
            }
        );
        assert!(helper.segment_length("L.Forearm").is_some());
        assert!(helper.segment_length("L.Hand").is_none());
        // Left side fails first, the right side is never reached
        assert!(helper.relative_frame("R.Arm.SCS").is_none());
    }

    #[test]
    fn test_sex_checks() {
        let mut helper = InternationalSocietyBiomechanics::new(Region::Lower, Side::Both);
        assert_eq!(
            helper.calibrate(&[static_trial("static")], None),
            Err(SkeletonError::MissingSex)
        );

        let mut subject = Subject::new("S01");
        subject.properties.set("sex", "Other");
        assert_eq!(
            helper.calibrate(&[static_trial("static")], Some(&subject)),
            Err(SkeletonError::UnrecognizedSex("Other".to_string()))
        );

        subject.properties.set("sex", "female");
        assert_eq!(
            helper.calibrate(&[static_trial("static")], Some(&subject)),
            Err(SkeletonError::UnrecognizedSex("female".to_string()))
        );

        subject.properties.set("sex", Sex::Unknown);
        assert!(matches!(
            helper.calibrate(&[static_trial("static")], Some(&subject)),
            Err(SkeletonError::UnrecognizedSex(_))
        ));

        helper.set_sex(Sex::Male);
        assert!(helper.calibrate(&[static_trial("static")], None).is_ok());
    }

    #[test]
    fn test_no_trial() {
        let mut helper = InternationalSocietyBiomechanics::new(Region::Lower, Side::Both);
        assert_eq!(helper.calibrate(&[], Some(&female_subject())), Err(SkeletonError::NoTrial));
    }

    #[test]
    fn test_inconsistent_sampling() {
        let mut trial = static_trial("static");
        if let Some(marker) = trial.markers.iter_mut().find(|m| m.name == "SS") {
            marker.sample_rate = 50.0;
        }
        let mut helper = InternationalSocietyBiomechanics::new(Region::Upper, Side::Both);
        assert_eq!(
            helper.calibrate(&[trial], Some(&female_subject())),
            Err(SkeletonError::InconsistentSampling {
                trial: "static".to_string()
            })
        );
    }

    #[test]
    fn test_first_static_trial_is_used() {
        let mut second = static_trial("second");
        second.remove_marker("R.ASIS");
        let mut helper = InternationalSocietyBiomechanics::new(Region::Lower, Side::Both);
        helper
            .calibrate(&[static_trial("first"), second], Some(&female_subject()))
            .unwrap();
        assert!(helper.segment_length("Pelvis").is_some());
    }

    #[test]
    fn test_sacral_center_from_psis() {
        let landmarks = StaticLandmarks::from_positions(vec![
            ("L.PSIS".to_string(), Vec3::new(-100.0, 0.0, -40.0)),
            ("R.PSIS".to_string(), Vec3::new(-100.0, 0.0, 40.0)),
        ]);
        assert_eq!(sacral_center(&landmarks).unwrap(), Vec3::new(-100.0, 0.0, 0.0));
    }
}
