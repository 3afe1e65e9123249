//! Skeleton helpers: build a model topology, calibrate it on a static trial
//! and reconstruct segment poses from dynamic trials.

pub mod isb;

pub use isb::InternationalSocietyBiomechanics;

use crate::error::SkeletonResult;
use crate::landmarks::LandmarksTranslator;
use crate::model::Model;
use crate::trial::{Subject, Trial};

/// Estimates segment masses and inertia tensors from a calibrated model
pub trait InertialParametersEstimator {
    fn name(&self) -> &str;

    fn estimate(&self, model: &mut Model) -> SkeletonResult<()>;
}

/// Common capabilities of every skeleton helper.
///
/// Calibration mutates the helper only; reconstruction reads the helper and
/// writes into a model, so one calibrated helper can be shared between threads
/// reconstructing different models.
pub trait SkeletonHelper {
    fn name(&self) -> &str;

    /// Add the helper's segments, joints and chains to `model`
    fn setup_model(&self, model: &mut Model) -> SkeletonResult<()>;

    /// Compute joint centers, relative frames and lengths from static trials
    fn calibrate(&mut self, trials: &[Trial], subject: Option<&Subject>) -> SkeletonResult<()>;

    /// Fill `model` (already set up) with the poses reconstructed from `trial`
    fn reconstruct_model(&self, model: &mut Model, trial: &Trial) -> SkeletonResult<()>;

    fn default_landmarks_translator(&self) -> LandmarksTranslator;

    fn default_inertial_parameters_estimator(&self) -> Option<Box<dyn InertialParametersEstimator>>;

    /// One new model per dynamic trial
    fn reconstruct(&self, trials: &[Trial]) -> SkeletonResult<Vec<Model>> {
        trials
            .iter()
            .map(|trial| {
                let mut model = Model::new(self.name());
                self.setup_model(&mut model)?;
                self.reconstruct_model(&mut model, trial)?;
                Ok(model)
            })
            .collect()
    }
}
