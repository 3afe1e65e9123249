//! ISB skeleton helper: builds a multibody model of the human body, calibrates
//! it on a static marker trial and reconstructs segment poses from dynamic trials.

pub mod config;
pub mod error;
pub mod helpers;
pub mod landmarks;
pub mod model;
pub mod properties;
pub mod trial;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::HelperConfig;
pub use error::{SkeletonError, SkeletonResult};
pub use helpers::{InertialParametersEstimator, InternationalSocietyBiomechanics, SkeletonHelper};
pub use model::Model;
pub use trial::{MarkerSeries, Subject, Trial};
