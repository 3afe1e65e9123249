use thiserror::Error;

/// Calibration and reconstruction error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkeletonError {
    #[error("Impossible to have a 'centre' side for the {helper} helper. Only Left, Right and Both are available. Setup aborted.")]
    InvalidSide { helper: String },

    #[error("No trial found. Calibration aborted.")]
    NoTrial,

    #[error("The sampling information is not consistent between required landmarks of trial '{trial}' (sampling rates or start times are not the same).")]
    InconsistentSampling { trial: String },

    #[error("The sex of the subject is required to set correctly the model. Calibration aborted.")]
    MissingSex,

    #[error("Unrecognized subject's sex: {0}. Calibration aborted.")]
    UnrecognizedSex(String),

    #[error("Missing landmarks ({}) to define the {segment}. Calibration aborted.", .landmarks.join(", "))]
    MissingLandmarks {
        segment: &'static str,
        landmarks: Vec<String>,
    },

    #[error("Missing landmarks ({}) to define the {segment}. Movement reconstruction aborted for trial '{trial}'.", .landmarks.join(", "))]
    MissingTrialLandmarks {
        segment: &'static str,
        trial: String,
        landmarks: Vec<String>,
    },

    #[error("{0} not found. Did you calibrate first the helper? Movement reconstruction aborted.")]
    NotCalibrated(String),

    #[error("An upper-body helper has no pelvis to estimate the {0}. Set it with set_joint_center(\"{0}\", ...) before calibrating. Movement reconstruction aborted.")]
    MissingUserJointCenter(String),

    #[error("Segment '{0}' not found in the model. Did you set up the model first?")]
    SegmentNotFound(String),
}

impl SkeletonError {
    /// Name of the anatomical structure a data error refers to
    pub fn segment(&self) -> Option<&'static str> {
        match self {
            SkeletonError::MissingLandmarks { segment, .. }
            | SkeletonError::MissingTrialLandmarks { segment, .. } => Some(*segment),
            _ => None,
        }
    }
}

/// Result type for calibration and reconstruction
pub type SkeletonResult<T> = Result<T, SkeletonError>;
