//! Landmark extraction
//!
//! Maps canonical landmark names (e.g. "L.ASIS") to the trial's marker labels,
//! collects the matching trajectories and checks that they share the same
//! sampling. Calibration averages each trajectory to a single static sample;
//! reconstruction keeps the full series.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{SkeletonError, SkeletonResult};
use crate::trial::{MarkerSeries, Trial};
use crate::types::{Position, Vec3};

const SAMPLING_TOLERANCE: f64 = 1e-9;

/// Canonical name -> external marker label.
///
/// Only canonical names listed here are extracted. A canonical name mapped to
/// nothing falls back to itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarksTranslator {
    pub name: String,
    mapping: BTreeMap<String, String>,
}

impl LandmarksTranslator {
    pub fn new(name: &str, mapping: BTreeMap<String, String>) -> Self {
        Self {
            name: name.to_string(),
            mapping,
        }
    }

    /// Translator mapping every name to itself
    pub fn identity(name: &str, canonical: &[&str]) -> Self {
        let mapping = canonical
            .iter()
            .map(|c| (c.to_string(), c.to_string()))
            .collect();
        Self::new(name, mapping)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.mapping.keys().map(String::as_str)
    }

    pub fn external_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.mapping.get(canonical).map(String::as_str).unwrap_or(canonical)
    }

    pub fn set_mapping(&mut self, canonical: &str, external: &str) {
        self.mapping.insert(canonical.to_string(), external.to_string());
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Trajectories found in a trial, keyed by canonical name
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub series: HashMap<String, MarkerSeries>,
    pub sample_rate: f64,
    pub start_time: f64,
    /// Every extracted series has the same sample rate, start time and length
    pub consistent: bool,
}

/// Collect the trajectories of every canonical landmark the translator knows about
pub fn extract_landmark_positions(translator: &LandmarksTranslator, trial: &Trial) -> Extraction {
    let mut extraction = Extraction {
        consistent: true,
        ..Default::default()
    };
    let mut reference: Option<(f64, f64, usize)> = None;
    for canonical in translator.canonical_names() {
        let Some(marker) = trial.marker(translator.external_name(canonical)) else {
            continue;
        };
        match reference {
            None => {
                reference = Some((marker.sample_rate, marker.start_time, marker.len()));
                extraction.sample_rate = marker.sample_rate;
                extraction.start_time = marker.start_time;
            }
            Some((rate, start, len)) => {
                if (marker.sample_rate - rate).abs() > SAMPLING_TOLERANCE
                    || (marker.start_time - start).abs() > SAMPLING_TOLERANCE
                    || marker.len() != len
                {
                    log::debug!(
                        "Landmark '{}' sampled at {} Hz from {} s ({} samples), expected {} Hz from {} s ({} samples)",
                        canonical,
                        marker.sample_rate,
                        marker.start_time,
                        marker.len(),
                        rate,
                        start,
                        len
                    );
                    extraction.consistent = false;
                }
            }
        }
        extraction.series.insert(canonical.to_string(), marker.clone());
    }
    extraction
}

/// Landmarks averaged over a static trial
#[derive(Clone, Debug, Default)]
pub struct StaticLandmarks {
    positions: HashMap<String, Position>,
}

impl StaticLandmarks {
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let positions = extraction
            .series
            .iter()
            .map(|(name, series)| (name.clone(), series.mean()))
            .collect();
        Self { positions }
    }

    pub fn from_positions<I: IntoIterator<Item = (String, Vec3)>>(positions: I) -> Self {
        Self {
            positions: positions
                .into_iter()
                .map(|(name, value)| (name, Position::new(value)))
                .collect(),
        }
    }

    /// Valid landmark, if any
    pub fn get(&self, name: &str) -> Option<Vec3> {
        self.positions.get(name).and_then(Position::valid_value)
    }

    /// All named landmarks, or the list of missing ones reported for `segment`
    pub fn require<S: AsRef<str>, const N: usize>(
        &self,
        names: [S; N],
        segment: &'static str,
    ) -> SkeletonResult<[Vec3; N]> {
        let found: Vec<Option<Vec3>> = names.iter().map(|name| self.get(name.as_ref())).collect();
        let missing = missing_names(&names, &found);
        <[Vec3; N]>::try_from(found.into_iter().flatten().collect::<Vec<_>>()).map_err(|_| {
            SkeletonError::MissingLandmarks {
                segment,
                landmarks: missing,
            }
        })
    }
}

/// Full landmark trajectories of a dynamic trial
#[derive(Clone, Debug)]
pub struct DynamicLandmarks<'t> {
    trial: &'t str,
    series: HashMap<String, MarkerSeries>,
}

impl<'t> DynamicLandmarks<'t> {
    pub fn new(trial: &'t str, extraction: Extraction) -> Self {
        Self {
            trial,
            series: extraction.series,
        }
    }

    /// Series present with at least one valid sample
    pub fn get(&self, name: &str) -> Option<&MarkerSeries> {
        self.series.get(name).filter(|s| s.is_valid())
    }

    pub fn require<S: AsRef<str>, const N: usize>(
        &self,
        names: [S; N],
        segment: &'static str,
    ) -> SkeletonResult<[&MarkerSeries; N]> {
        let found: Vec<Option<&MarkerSeries>> = names.iter().map(|name| self.get(name.as_ref())).collect();
        let missing = missing_names(&names, &found);
        <[&MarkerSeries; N]>::try_from(found.into_iter().flatten().collect::<Vec<_>>())
            .map_err(|_| self.missing(segment, missing))
    }

    pub fn missing(&self, segment: &'static str, landmarks: Vec<String>) -> SkeletonError {
        SkeletonError::MissingTrialLandmarks {
            segment,
            trial: self.trial.to_string(),
            landmarks,
        }
    }
}

fn missing_names<S: AsRef<str>, T>(names: &[S], found: &[Option<T>]) -> Vec<String> {
    names
        .iter()
        .zip(found)
        .filter(|(_, f)| f.is_none())
        .map(|(n, _)| n.as_ref().to_string())
        .collect()
}
