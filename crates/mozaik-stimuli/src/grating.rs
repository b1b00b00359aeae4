// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Drifting sinusoidal gratings, optionally seen through a circular aperture.

use std::f64::consts::PI;

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use mozaik_structures::{MozaikError, MozaikResult};

use crate::{Frame, FrameStream, StimulusParameters, VisualStimulus, TRANSPARENT};

/// Grating specific settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GratingSettings {
    /// Orientation of the grating in radians
    pub orientation: f64,
    /// Cycles per degree
    pub spatial_frequency: f64,
    /// Hz
    pub temporal_frequency: f64,
    /// Michelson contrast in percent
    pub contrast: f64,
    pub background_luminance: f64,
    /// Rendering resolution
    pub pixels_per_degree: f64,
    /// Total duration in ms; `None` makes the stream infinite
    pub duration: Option<f64>,
    /// Radius in degrees of a circular aperture centred on the stimulus; pixels outside
    /// are transparent
    pub aperture_radius: Option<f64>,
}

impl Default for GratingSettings {
    fn default() -> Self {
        GratingSettings {
            orientation: 0.0,
            spatial_frequency: 0.8,
            temporal_frequency: 2.0,
            contrast: 100.0,
            background_luminance: 50.0,
            pixels_per_degree: 10.0,
            duration: None,
            aperture_radius: None,
        }
    }
}

/// Full-field (or apertured) drifting sinusoidal grating.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftingSinusoidalGrating {
    parameters: StimulusParameters,
    settings: GratingSettings,
}

impl DriftingSinusoidalGrating {
    pub fn new(parameters: StimulusParameters, settings: GratingSettings) -> MozaikResult<Self> {
        if !(settings.pixels_per_degree > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "pixels_per_degree must be positive, got {}",
                settings.pixels_per_degree
            )));
        }
        if !(settings.contrast >= 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "contrast must be non-negative, got {}",
                settings.contrast
            )));
        }
        if !(settings.background_luminance >= 0.0 && settings.background_luminance <= parameters.max_luminance) {
            return Err(MozaikError::BadParameters(format!(
                "background_luminance {} outside [0, {}]",
                settings.background_luminance, parameters.max_luminance
            )));
        }
        if let Some(duration) = settings.duration {
            if !(duration > 0.0) {
                return Err(MozaikError::BadParameters(format!("duration must be positive, got {}", duration)));
            }
        }
        if let Some(radius) = settings.aperture_radius {
            if !(radius > 0.0) {
                return Err(MozaikError::BadParameters(format!("aperture_radius must be positive, got {}", radius)));
            }
        }
        Ok(DriftingSinusoidalGrating { parameters, settings })
    }

    pub fn settings(&self) -> &GratingSettings {
        &self.settings
    }

    /// Number of frames for a finite grating.
    pub fn frame_count(&self) -> Option<usize> {
        self.settings
            .duration
            .map(|d| self.parameters.frames_in(d))
    }

    /// Renders frame `index` of the sequence.
    pub fn render(&self, index: usize) -> Frame {
        render_frame(&self.parameters, &self.settings, index)
    }
}

impl VisualStimulus for DriftingSinusoidalGrating {
    fn name(&self) -> &'static str {
        "DriftingSinusoidalGrating"
    }

    fn parameters(&self) -> &StimulusParameters {
        &self.parameters
    }

    fn stimulus_parameter_values(&self) -> Vec<f64> {
        vec![
            self.settings.orientation,
            self.settings.spatial_frequency,
            self.settings.temporal_frequency,
            self.settings.contrast,
            self.settings.background_luminance,
        ]
    }

    fn frames(&self) -> FrameStream {
        let parameters = self.parameters;
        let settings = self.settings;
        let frames = (0..).map(move |index| render_frame(&parameters, &settings, index));
        match self.frame_count() {
            Some(count) => Box::new(frames.take(count)),
            None => Box::new(frames),
        }
    }
}

fn pixel_grid(parameters: &StimulusParameters, pixels_per_degree: f64) -> (usize, usize) {
    let cols = (parameters.size_in_degrees.0 * pixels_per_degree).round().max(1.0) as usize;
    let rows = (parameters.size_in_degrees.1 * pixels_per_degree).round().max(1.0) as usize;
    (rows, cols)
}

fn render_frame(parameters: &StimulusParameters, settings: &GratingSettings, index: usize) -> Frame {
    let (rows, cols) = pixel_grid(parameters, settings.pixels_per_degree);
    let ppd = settings.pixels_per_degree;
    let (cx, cy) = parameters.location;
    let left = cx - parameters.size_in_degrees.0 / 2.0;
    let top = cy + parameters.size_in_degrees.1 / 2.0;

    let t = index as f64 * parameters.frame_duration / 1000.0;
    let phase = (2.0 * PI * settings.temporal_frequency * t).rem_euclid(2.0 * PI);
    let (sin_o, cos_o) = settings.orientation.sin_cos();
    let amplitude = settings.background_luminance * settings.contrast / 100.0;
    let max_luminance = parameters.max_luminance;

    let mut img = Array2::<f64>::zeros((rows, cols));
    Zip::indexed(&mut img).par_for_each(|(row, col), pixel| {
        let x = left + (col as f64 + 0.5) / ppd;
        let y = top - (row as f64 + 0.5) / ppd;
        if let Some(radius) = settings.aperture_radius {
            if ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() > radius {
                *pixel = TRANSPARENT;
                return;
            }
        }
        let projected = (x - cx) * cos_o + (y - cy) * sin_o;
        let value = settings.background_luminance
            + amplitude * (2.0 * PI * settings.spatial_frequency * projected - phase).sin();
        *pixel = value.clamp(0.0, max_luminance);
    });

    Frame::new(img, vec![settings.orientation, phase])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> StimulusParameters {
        StimulusParameters::new(10.0, (4.0, 2.0), (0.0, 0.0), 100.0).unwrap()
    }

    #[test]
    fn test_frame_shape_follows_density() {
        let grating = DriftingSinusoidalGrating::new(parameters(), GratingSettings::default()).unwrap();
        assert_eq!(grating.render(0).img.dim(), (20, 40));
    }

    #[test]
    fn test_luminance_stays_within_range() {
        let settings = GratingSettings {
            contrast: 100.0,
            background_luminance: 50.0,
            ..GratingSettings::default()
        };
        let grating = DriftingSinusoidalGrating::new(parameters(), settings).unwrap();
        for index in 0..5 {
            let frame = grating.render(index);
            assert!(frame.validate_luminance(100.0).is_ok());
            assert!(frame.max().unwrap() > 90.0);
            assert!(frame.min().unwrap() < 10.0);
        }
    }

    #[test]
    fn test_zero_contrast_is_uniform_background() {
        let settings = GratingSettings {
            contrast: 0.0,
            background_luminance: 30.0,
            ..GratingSettings::default()
        };
        let grating = DriftingSinusoidalGrating::new(parameters(), settings).unwrap();
        assert!(grating.render(3).img.iter().all(|v| (*v - 30.0).abs() < 1e-12));
    }

    #[test]
    fn test_duration_bounds_stream() {
        let settings = GratingSettings {
            duration: Some(95.0),
            ..GratingSettings::default()
        };
        let grating = DriftingSinusoidalGrating::new(parameters(), settings).unwrap();
        assert_eq!(grating.frames().count(), 10);
    }

    #[test]
    fn test_phase_advances_with_temporal_frequency() {
        let settings = GratingSettings {
            temporal_frequency: 25.0,
            ..GratingSettings::default()
        };
        let grating = DriftingSinusoidalGrating::new(parameters(), settings).unwrap();
        let phases: Vec<f64> = grating.frames().take(3).map(|f| f.variables[1]).collect();
        assert_eq!(phases[0], 0.0);
        assert!((phases[1] - PI / 2.0).abs() < 1e-9);
        assert!((phases[2] - PI).abs() < 1e-9);
    }

    #[test]
    fn test_aperture_masks_corners() {
        let settings = GratingSettings {
            aperture_radius: Some(0.5),
            ..GratingSettings::default()
        };
        let grating = DriftingSinusoidalGrating::new(parameters(), settings).unwrap();
        let frame = grating.render(0);
        assert_eq!(frame.img[[0, 0]], TRANSPARENT);
        assert_ne!(frame.img[[10, 20]], TRANSPARENT);
        assert!(frame.validate_luminance(100.0).is_ok());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let too_bright = GratingSettings {
            background_luminance: 150.0,
            ..GratingSettings::default()
        };
        assert!(DriftingSinusoidalGrating::new(parameters(), too_bright).is_err());
        let no_pixels = GratingSettings {
            pixels_per_degree: 0.0,
            ..GratingSettings::default()
        };
        assert!(DriftingSinusoidalGrating::new(parameters(), no_pixels).is_err());
    }
}
