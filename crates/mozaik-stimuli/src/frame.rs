// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use ndarray::Array2;
use mozaik_structures::{MozaikError, MozaikResult};

use crate::TRANSPARENT;

/// A lazy sequence of frames. Finite stimuli end, infinite ones never return `None`.
pub type FrameStream = Box<dyn Iterator<Item = Frame> + Send>;

/// One rendered image of a stimulus together with the values of the stimulus variables
/// (orientation, phase, ...) at that frame.
///
/// The image is a luminance map indexed `[row, column]`, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub img: Array2<f64>,
    pub variables: Vec<f64>,
}

impl Frame {
    pub fn new(img: Array2<f64>, variables: Vec<f64>) -> Self {
        Frame { img, variables }
    }

    pub fn min(&self) -> Option<f64> {
        self.img.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.img.iter().copied().reduce(f64::max)
    }

    /// Checks that every pixel is either `TRANSPARENT` or inside `[0, max_luminance]`.
    pub fn validate_luminance(&self, max_luminance: f64) -> MozaikResult<()> {
        if self.img.iter().any(|v| v.is_nan()) {
            return Err(MozaikError::FrameOutOfRange("frame contains NaN pixels".into()));
        }
        let (min, max) = match (self.min(), self.max()) {
            (Some(min), Some(max)) => (min, max),
            _ => return Err(MozaikError::FrameOutOfRange("frame is empty".into())),
        };
        if !(min >= 0.0 || min == TRANSPARENT) {
            return Err(MozaikError::FrameOutOfRange(format!(
                "frame minimum is less than zero: {}",
                min
            )));
        }
        if !(max <= max_luminance) {
            return Err(MozaikError::FrameOutOfRange(format!(
                "frame maximum ({}) is greater than the maximum luminance ({})",
                max, max_luminance
            )));
        }
        Ok(())
    }
}
