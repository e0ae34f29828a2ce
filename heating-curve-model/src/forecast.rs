use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A length-`H` time series aligned to the planner's step boundaries.
///
/// Thin enough to stay a plain `Vec<f64>` at the byte level (so a host can
/// build one from whatever sensor/weather plumbing it already has), but
/// named so call sites read as "a forecast", not "a vector of numbers".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSeries(pub Vec<f64>);

impl ForecastSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

impl From<Vec<f64>> for ForecastSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl Index<usize> for ForecastSeries {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}
