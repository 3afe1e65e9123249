//! Synthetic trials for tests.
//!
//! The static pose is mirror-symmetric about the sagittal plane, with X
//! anterior, Y superior and Z to the right (millimetres).

use crate::trial::{MarkerSeries, Subject, Trial};
use crate::types::{Pose, Sex, Vec3};

pub const SAMPLE_RATE: f64 = 100.0;

const MIDLINE: [(&str, [f64; 3]); 4] = [
    ("SS", [60.0, 450.0, 0.0]),
    ("C7", [-80.0, 520.0, 0.0]),
    ("XP", [90.0, 250.0, 0.0]),
    ("T8", [-110.0, 280.0, 0.0]),
];

const RIGHT_SIDE: [(&str, [f64; 3]); 18] = [
    ("ASIS", [0.0, 0.0, 100.0]),
    ("PSIS", [-100.0, 0.0, 40.0]),
    ("GT", [-20.0, -90.0, 160.0]),
    ("LFE", [0.0, -450.0, 140.0]),
    ("MFE", [0.0, -450.0, 40.0]),
    ("LTM", [-10.0, -850.0, 130.0]),
    ("MTM", [0.0, -840.0, 60.0]),
    ("MTH1", [150.0, -900.0, 60.0]),
    ("MTH5", [130.0, -900.0, 130.0]),
    ("HEE", [-60.0, -890.0, 90.0]),
    ("AC", [-10.0, 500.0, 180.0]),
    ("GH", [-10.0, 460.0, 200.0]),
    ("LHE", [-20.0, 180.0, 230.0]),
    ("MHE", [-20.0, 180.0, 150.0]),
    ("US", [-10.0, -60.0, 200.0]),
    ("RS", [30.0, -60.0, 220.0]),
    ("MH2", [40.0, -140.0, 210.0]),
    ("MH5", [10.0, -140.0, 240.0]),
];

/// Reflection through the sagittal plane
pub fn mirror(p: Vec3) -> Vec3 {
    Vec3::new(p.x, p.y, -p.z)
}

/// Canonical landmark positions of the static pose
pub fn static_positions() -> Vec<(String, Vec3)> {
    let mut positions: Vec<(String, Vec3)> = MIDLINE
        .iter()
        .map(|(name, p)| (name.to_string(), Vec3::from(*p)))
        .collect();
    for (name, p) in RIGHT_SIDE {
        positions.push((format!("R.{}", name), Vec3::from(p)));
        positions.push((format!("L.{}", name), mirror(Vec3::from(p))));
    }
    positions
}

/// Trial holding each position, unchanged, for a few samples
pub fn trial_from_positions<I: IntoIterator<Item = (String, Vec3)>>(name: &str, positions: I) -> Trial {
    positions
        .into_iter()
        .fold(Trial::new(name), |trial, (marker, p)| {
            trial.with_marker(MarkerSeries::new(&marker, SAMPLE_RATE, 0.0, vec![p; 5]))
        })
}

pub fn static_trial(name: &str) -> Trial {
    trial_from_positions(name, static_positions())
}

/// Smooth rigid motion: a growing rotation about a tilted axis plus a walk along X
pub fn rigid_motions(samples: usize) -> Vec<Pose> {
    let axis = nalgebra::Unit::new_normalize(Vec3::new(0.2, 1.0, 0.3));
    (0..samples)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            Pose {
                rotation: nalgebra::Rotation3::from_axis_angle(&axis, 0.8 * t).into_inner(),
                origin: Vec3::new(1200.0 * t, 900.0, -50.0 * t),
            }
        })
        .collect()
}

/// Static pose carried by one rigid motion per sample
pub fn moving_trial(name: &str, motions: &[Pose]) -> Trial {
    static_positions()
        .into_iter()
        .fold(Trial::new(name), |trial, (marker, p)| {
            let values = motions.iter().map(|m| m.transform_point(&p)).collect();
            trial.with_marker(MarkerSeries::new(&marker, SAMPLE_RATE, 0.0, values))
        })
}

pub fn female_subject() -> Subject {
    let mut subject = Subject::new("S01");
    subject.properties.set("sex", Sex::Female);
    subject
}

pub fn male_subject() -> Subject {
    let mut subject = Subject::new("S02");
    subject.properties.set("sex", Sex::Male);
    subject
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
