// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use mozaik_structures::{
    check_parameters, MozaikError, MozaikResult, ParameterKind, ParameterSet, ParameterValue,
    RequiredParameters, StimulusId,
};

use crate::FrameStream;

/// Parameters shared by every visual stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimulusParameters {
    /// Duration of one frame in ms
    pub frame_duration: f64,
    /// Width and height of the stimulus in degrees of visual angle
    pub size_in_degrees: (f64, f64),
    /// Centre of the stimulus in the visual field
    pub location: (f64, f64),
    /// Upper bound of every pixel value, in cd/m2
    pub max_luminance: f64,
}

impl StimulusParameters {
    pub fn new(
        frame_duration: f64,
        size_in_degrees: (f64, f64),
        location: (f64, f64),
        max_luminance: f64,
    ) -> MozaikResult<Self> {
        if !(frame_duration > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "frame_duration must be positive, got {}",
                frame_duration
            )));
        }
        if !(size_in_degrees.0 > 0.0 && size_in_degrees.1 > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "size_in_degrees must be positive, got {:?}",
                size_in_degrees
            )));
        }
        if !(max_luminance > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "max_luminance must be positive, got {}",
                max_luminance
            )));
        }
        Ok(StimulusParameters {
            frame_duration,
            size_in_degrees,
            location,
            max_luminance,
        })
    }

    /// Frames needed to cover `duration` ms; a final partial frame counts as a frame.
    /// Quotients within 1e-9 of an integer are taken as exact.
    pub fn frames_in(&self, duration: f64) -> usize {
        let quotient = duration / self.frame_duration;
        let nearest = quotient.round();
        if (quotient - nearest).abs() < 1e-9 {
            nearest as usize
        } else {
            quotient.ceil() as usize
        }
    }

    pub fn required_parameters() -> RequiredParameters {
        RequiredParameters::new()
            .with("frame_duration", ParameterKind::Float)
            .with("size_in_degrees", ParameterKind::List)
            .with("location", ParameterKind::List)
            .with("max_luminance", ParameterKind::Float)
    }

    /// Reads and validates the parameters from a generic parameter set.
    pub fn from_parameter_set(parameters: &ParameterSet) -> MozaikResult<Self> {
        check_parameters("VisualStimulus", &Self::required_parameters(), parameters)?;
        StimulusParameters::new(
            parameters.get_f64("frame_duration")?,
            pair(parameters, "size_in_degrees")?,
            pair(parameters, "location")?,
            parameters.get_f64("max_luminance")?,
        )
    }

    pub fn to_parameter_set(&self) -> ParameterSet {
        ParameterSet::new()
            .with("frame_duration", self.frame_duration)
            .with("size_in_degrees", self.size_in_degrees)
            .with("location", self.location)
            .with("max_luminance", self.max_luminance)
    }
}

fn pair(parameters: &ParameterSet, key: &str) -> MozaikResult<(f64, f64)> {
    let bad = || MozaikError::BadParameters(format!("'{}' must be a list of two numbers", key));
    match parameters.get(key) {
        Some(ParameterValue::List(values)) if values.len() == 2 => {
            let first = values[0].as_f64().ok_or_else(bad)?;
            let second = values[1].as_f64().ok_or_else(bad)?;
            Ok((first, second))
        }
        _ => Err(bad()),
    }
}

/// A parametrized visual stimulus.
///
/// Implementations only describe the stimulus; presentation state lives in
/// [`crate::StimulusPlayer`].
pub trait VisualStimulus: Send {
    /// Name used in stimulus ids and exported file names.
    fn name(&self) -> &'static str;

    fn parameters(&self) -> &StimulusParameters;

    /// Values of the stimulus specific parameters, in declaration order.
    fn stimulus_parameter_values(&self) -> Vec<f64>;

    fn stimulus_id(&self) -> StimulusId {
        StimulusId::from_values(self.name(), &self.stimulus_parameter_values())
    }

    /// Returns a fresh stream starting at the first frame of the stimulus.
    fn frames(&self) -> FrameStream;
}
