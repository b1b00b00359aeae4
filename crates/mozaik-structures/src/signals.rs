// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Regularly sampled analog recordings (membrane potential, conductances, ...).

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{MozaikError, MozaikResult, Units};

/// A regularly sampled signal of one neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogSignal {
    #[serde(with = "crate::samples::array1")]
    samples: Array1<f64>,
    units: Units,
    sampling_period: f64,
    time_units: Units,
    t_start: f64,
}

impl AnalogSignal {
    /// Creates a signal. `sampling_period` is expressed in `time_units` and must be positive.
    pub fn new(
        samples: Array1<f64>,
        units: Units,
        sampling_period: f64,
        time_units: Units,
        t_start: f64,
    ) -> MozaikResult<Self> {
        if !(sampling_period > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "Sampling period must be positive, got {}",
                sampling_period
            )));
        }
        Ok(AnalogSignal {
            samples,
            units,
            sampling_period,
            time_units,
            t_start,
        })
    }

    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn sampling_period(&self) -> f64 {
        self.sampling_period
    }

    /// Units of the time axis; the sampling rate is expressed in their inverse.
    pub fn time_units(&self) -> &Units {
        &self.time_units
    }

    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.sampling_period
    }

    pub fn times(&self) -> Array1<f64> {
        Array1::from_iter((0..self.samples.len()).map(|i| self.t_start + i as f64 * self.sampling_period))
    }

    pub fn mean(&self) -> Option<f64> {
        self.samples.mean()
    }
}
