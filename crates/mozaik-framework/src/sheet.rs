// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use ndarray::{Array2, ArrayView1};
use mozaik_structures::{MozaikError, MozaikResult};

/// Positions of the neurons of one sheet.
///
/// `positions` has shape `(2, n)`: x coordinates in row 0, y in row 1, in the sheet's
/// native metric (degrees of visual field for retinal sheets). Sheets with a
/// magnification factor convert visual-field distances into cortical distances
/// (μm per degree) before a connection kernel sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGeometry {
    name: String,
    positions: Array2<f64>,
    magnification_factor: Option<f64>,
}

impl SheetGeometry {
    pub fn new(name: &str, positions: Array2<f64>) -> MozaikResult<Self> {
        if positions.nrows() != 2 {
            return Err(MozaikError::BadParameters(format!(
                "Sheet {} positions must have 2 rows (x, y), got {}",
                name,
                positions.nrows()
            )));
        }
        Ok(SheetGeometry {
            name: name.to_string(),
            positions,
            magnification_factor: None,
        })
    }

    pub fn with_magnification_factor(mut self, magnification_factor: f64) -> MozaikResult<Self> {
        if !(magnification_factor > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "magnification factor must be positive, got {}",
                magnification_factor
            )));
        }
        self.magnification_factor = Some(magnification_factor);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn magnification_factor(&self) -> Option<f64> {
        self.magnification_factor
    }

    pub fn len(&self) -> usize {
        self.positions.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self, index: usize) -> ArrayView1<f64> {
        self.positions.column(index)
    }

    /// Visual-field distance to cortical distance; identity without a magnification factor.
    pub fn dvf_to_dcs(&self, distance: f64) -> f64 {
        match self.magnification_factor {
            Some(factor) => distance * factor,
            None => distance,
        }
    }
}
