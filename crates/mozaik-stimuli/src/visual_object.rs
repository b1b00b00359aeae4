// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

/// Pixel value marking "no stimulus here"; the background of the visual space shows through.
pub const TRANSPARENT: f64 = -1.0;

/// An object placed in the visual field. Positions and sizes are in degrees of visual angle.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualObject {
    pub location: (f64, f64),
    pub size_in_degrees: (f64, f64),
    pub visible: bool,
}

impl VisualObject {
    pub fn new(location: (f64, f64), size_in_degrees: (f64, f64)) -> Self {
        VisualObject {
            location,
            size_in_degrees,
            visible: true,
        }
    }

    /// Bounding box as `(left, right, bottom, top)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let half_width = self.size_in_degrees.0 / 2.0;
        let half_height = self.size_in_degrees.1 / 2.0;
        (
            self.location.0 - half_width,
            self.location.0 + half_width,
            self.location.1 - half_height,
            self.location.1 + half_height,
        )
    }
}
