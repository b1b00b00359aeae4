// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use ndarray::Array2;
use mozaik_structures::{MozaikError, MozaikResult};

use crate::{Frame, FrameStream, StimulusParameters, VisualStimulus};

/// A uniform field of constant luminance; with zero luminance this is the blank
/// (null) stimulus shown between presentations.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformLuminance {
    parameters: StimulusParameters,
    luminance: f64,
    pixels_per_degree: f64,
    duration: Option<f64>,
}

impl UniformLuminance {
    pub fn new(
        parameters: StimulusParameters,
        luminance: f64,
        pixels_per_degree: f64,
        duration: Option<f64>,
    ) -> MozaikResult<Self> {
        if !(luminance >= 0.0 && luminance <= parameters.max_luminance) {
            return Err(MozaikError::BadParameters(format!(
                "luminance {} outside [0, {}]",
                luminance, parameters.max_luminance
            )));
        }
        if !(pixels_per_degree > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "pixels_per_degree must be positive, got {}",
                pixels_per_degree
            )));
        }
        if let Some(d) = duration {
            if !(d > 0.0) {
                return Err(MozaikError::BadParameters(format!("duration must be positive, got {}", d)));
            }
        }
        Ok(UniformLuminance {
            parameters,
            luminance,
            pixels_per_degree,
            duration,
        })
    }

    pub fn blank(parameters: StimulusParameters, pixels_per_degree: f64, duration: Option<f64>) -> MozaikResult<Self> {
        UniformLuminance::new(parameters, 0.0, pixels_per_degree, duration)
    }

    pub fn luminance(&self) -> f64 {
        self.luminance
    }
}

impl VisualStimulus for UniformLuminance {
    fn name(&self) -> &'static str {
        "UniformLuminance"
    }

    fn parameters(&self) -> &StimulusParameters {
        &self.parameters
    }

    fn stimulus_parameter_values(&self) -> Vec<f64> {
        vec![self.luminance]
    }

    fn frames(&self) -> FrameStream {
        let cols = (self.parameters.size_in_degrees.0 * self.pixels_per_degree).round().max(1.0) as usize;
        let rows = (self.parameters.size_in_degrees.1 * self.pixels_per_degree).round().max(1.0) as usize;
        let frame = Frame::new(Array2::from_elem((rows, cols), self.luminance), vec![self.luminance]);
        let frames = std::iter::repeat(frame);
        match self.duration {
            Some(d) => Box::new(frames.take(self.parameters.frames_in(d))),
            None => Box::new(frames),
        }
    }
}
