//! Dynamic reconstruction: per-sample technical frames composed with the
//! calibrated relative frames.

use super::frames;
use super::InternationalSocietyBiomechanics;
use crate::error::{SkeletonError, SkeletonResult};
use crate::landmarks::{extract_landmark_positions, DynamicLandmarks};
use crate::model::{Model, PoseSeries, ReferenceFrame};
use crate::trial::{MarkerSeries, Trial};
use crate::types::{Part, Pose, Side, Vec3};

#[derive(Clone, Copy, Debug)]
struct Sampling {
    sample_rate: f64,
    start_time: f64,
}

impl InternationalSocietyBiomechanics {
    pub(super) fn reconstruct_trial(&self, model: &mut Model, trial: &Trial) -> SkeletonResult<()> {
        model.set_name(&format!("{}_{}", model.name(), trial.name));

        let extraction = extract_landmark_positions(&self.landmarks_translator(), trial);
        if !extraction.consistent {
            return Err(SkeletonError::InconsistentSampling {
                trial: trial.name.clone(),
            });
        }
        let sampling = Sampling {
            sample_rate: extraction.sample_rate,
            start_time: extraction.start_time,
        };
        let landmarks = DynamicLandmarks::new(&trial.name, extraction);

        if self.region.has_lower() {
            self.reconstruct_pelvis(model, &landmarks, sampling)?;
            for side in self.sides() {
                self.reconstruct_lower_limb(model, side, &landmarks)?;
            }
        }
        if self.region.has_upper() {
            self.reconstruct_torso(model, &landmarks, sampling)?;
            for side in self.sides() {
                self.reconstruct_upper_limb(model, side, &landmarks)?;
            }
        }
        log::info!("Trial '{}' reconstructed into model '{}'", trial.name, model.name());
        Ok(())
    }

    fn reconstruct_pelvis(
        &self,
        model: &mut Model,
        landmarks: &DynamicLandmarks<'_>,
        sampling: Sampling,
    ) -> SkeletonResult<()> {
        let [l_asis, r_asis] = landmarks.require(["L.ASIS", "R.ASIS"], "pelvis")?;
        let sc = sacral_series(landmarks)?;
        let relative = self
            .relative_frame("Pelvis.SCS")
            .ok_or_else(|| SkeletonError::NotCalibrated("Relative pelvis segment coordinate system".to_string()))?;

        let poses = sample_poses([l_asis, r_asis, &sc], relative.pose(), |[l, r, sc]| {
            frames::pelvis_technical(&l, &r, &sc)
        });
        self.write_segment(model, Part::Pelvis, relative, poses, sampling)
    }

    fn reconstruct_torso(
        &self,
        model: &mut Model,
        landmarks: &DynamicLandmarks<'_>,
        sampling: Sampling,
    ) -> SkeletonResult<()> {
        let [ss, c7, xp, t8] = landmarks.require(["SS", "C7", "XP", "T8"], "torso")?;
        let relative = self
            .relative_frame("Torso.SCS")
            .ok_or_else(|| SkeletonError::NotCalibrated("Relative torso segment coordinate system".to_string()))?;
        if self.joint_center("LJC").is_none() {
            return Err(if self.region.has_lower() {
                SkeletonError::NotCalibrated("Relative lumbar joint centre".to_string())
            } else {
                SkeletonError::MissingUserJointCenter("LJC".to_string())
            });
        }

        let poses = sample_poses([ss, c7, xp, t8], relative.pose(), |[ss, c7, xp, t8]| {
            frames::torso_technical(&ss, &c7, &xp, &t8)
        });
        self.write_segment(model, Part::Torso, relative, poses, sampling)
    }

    // Thigh, shank and foot poses are not tracked; only the pelvis is reconstructed
    fn reconstruct_lower_limb(&self, _model: &mut Model, side: Side, _landmarks: &DynamicLandmarks<'_>) -> SkeletonResult<()> {
        log::debug!("Lower limb {:?} not reconstructed", side);
        Ok(())
    }

    // Arm, forearm and hand poses are not tracked; only the torso is reconstructed
    fn reconstruct_upper_limb(&self, _model: &mut Model, side: Side, _landmarks: &DynamicLandmarks<'_>) -> SkeletonResult<()> {
        log::debug!("Upper limb {:?} not reconstructed", side);
        Ok(())
    }

    /// Attach the relative frame, the world pose series and the calibrated length
    fn write_segment(
        &self,
        model: &mut Model,
        part: Part,
        relative: &ReferenceFrame,
        poses: Vec<Option<Pose>>,
        sampling: Sampling,
    ) -> SkeletonResult<()> {
        let id = model
            .find_segment_by_part(part)
            .ok_or_else(|| SkeletonError::SegmentNotFound(format!("{:?}", part)))?;
        let segment = model
            .segment_mut(id)
            .ok_or_else(|| SkeletonError::SegmentNotFound(format!("{:?}", part)))?;

        segment.attach_frame(ReferenceFrame::new("SCS", *relative.pose(), relative.provenance()));
        let series = PoseSeries {
            name: format!("{}.SCS", segment.name),
            sample_rate: sampling.sample_rate,
            start_time: sampling.start_time,
            poses,
        };
        log::debug!(
            "{}: {}/{} valid poses",
            series.name,
            series.valid_count(),
            series.len()
        );
        segment.append_pose_series(series);
        if let Some(length) = self.segment_length(&segment.name) {
            segment.set_length(length);
        }
        Ok(())
    }
}

/// SC trajectory, or the sample-wise midpoint of both PSIS
fn sacral_series(landmarks: &DynamicLandmarks<'_>) -> SkeletonResult<MarkerSeries> {
    if let Some(sc) = landmarks.get("SC") {
        return Ok(sc.clone());
    }
    match landmarks.require(["L.PSIS", "R.PSIS"], "pelvis") {
        Ok([l_psis, r_psis]) => Ok(MarkerSeries::midpoint("SC", l_psis, r_psis)),
        Err(SkeletonError::MissingTrialLandmarks {
            segment,
            trial,
            mut landmarks,
        }) => {
            landmarks.insert(0, "SC".to_string());
            Err(SkeletonError::MissingTrialLandmarks {
                segment,
                trial,
                landmarks,
            })
        }
        Err(err) => Err(err),
    }
}

/// World pose of the segment at every sample: technical frame from the
/// landmarks, composed with the relative frame. `None` where a landmark is invalid.
fn sample_poses<const N: usize>(
    series: [&MarkerSeries; N],
    relative: &Pose,
    technical: impl Fn([Vec3; N]) -> Pose,
) -> Vec<Option<Pose>> {
    let len = series.iter().map(|s| s.len()).min().unwrap_or(0);
    (0..len)
        .map(|i| {
            let values: Vec<Vec3> = series
                .iter()
                .filter_map(|s| s.sample(i).valid_value())
                .collect();
            let values = <[Vec3; N]>::try_from(values).ok()?;
            Some(technical(values).compose(relative))
        })
        .collect()
}
