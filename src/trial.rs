//! Marker trajectories, trials and subjects

use serde::{Deserialize, Serialize};

use crate::properties::Properties;
use crate::types::{Position, Vec3, INVALID_RESIDUAL};

/// Sampled 3D trajectory of one labeled marker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSeries {
    pub name: String,
    pub sample_rate: f64,
    #[serde(default)]
    pub start_time: f64,
    pub values: Vec<Vec3>,
    /// Per-sample residuals. Missing entries are treated as valid (0.0)
    #[serde(default)]
    pub residuals: Vec<f64>,
}

impl MarkerSeries {
    pub fn new(name: &str, sample_rate: f64, start_time: f64, values: Vec<Vec3>) -> Self {
        let residuals = vec![0.0; values.len()];
        Self {
            name: name.to_string(),
            sample_rate,
            start_time,
            values,
            residuals,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sample(&self, index: usize) -> Position {
        match self.values.get(index) {
            Some(value) => Position {
                value: *value,
                residual: self.residuals.get(index).copied().unwrap_or(0.0),
            },
            None => Position::invalid(),
        }
    }

    /// True when at least one sample is valid
    pub fn is_valid(&self) -> bool {
        (0..self.len()).any(|i| self.sample(i).is_valid())
    }

    /// Average of the valid samples, with a zeroed residual.
    /// Invalid when no sample is valid.
    pub fn mean(&self) -> Position {
        let (sum, count) = (0..self.len())
            .filter_map(|i| self.sample(i).valid_value())
            .fold((Vec3::zeros(), 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            return Position::invalid();
        }
        Position::new(sum / count as f64)
    }

    /// Sample-wise midpoint of two series; a sample is valid only when both inputs are
    pub fn midpoint(name: &str, a: &MarkerSeries, b: &MarkerSeries) -> Self {
        let len = a.len().min(b.len());
        let mut values = Vec::with_capacity(len);
        let mut residuals = Vec::with_capacity(len);
        for i in 0..len {
            match (a.sample(i).valid_value(), b.sample(i).valid_value()) {
                (Some(pa), Some(pb)) => {
                    values.push((pa + pb) / 2.0);
                    residuals.push(0.0);
                }
                _ => {
                    values.push(Vec3::zeros());
                    residuals.push(INVALID_RESIDUAL);
                }
            }
        }
        Self {
            name: name.to_string(),
            sample_rate: a.sample_rate,
            start_time: a.start_time,
            values,
            residuals,
        }
    }
}

/// One acquisition: a set of marker trajectories
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<MarkerSeries>,
}

impl Trial {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: MarkerSeries) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn marker(&self, name: &str) -> Option<&MarkerSeries> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn remove_marker(&mut self, name: &str) -> Option<MarkerSeries> {
        let idx = self.markers.iter().position(|m| m.name == name)?;
        Some(self.markers.remove(idx))
    }
}

/// Subject metadata. Its properties (e.g. "sex") are merged into the helper at calibration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Subject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: Properties::new(),
        }
    }
}
