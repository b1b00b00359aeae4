// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Small numeric helpers shared by connectors and analysis code.

use std::f64::consts::PI;
use std::str::FromStr;

use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;

use crate::{MozaikError, MozaikResult};

/// Samples `number_of_samples` bin indices from the distribution defined by `bins`.
///
/// The bins do not need to sum to one, they are normalized here. An empty distribution
/// yields no samples.
pub fn sample_from_bin_distribution<R: Rng>(
    bins: ArrayView1<f64>,
    number_of_samples: usize,
    rng: &mut R,
) -> MozaikResult<Vec<usize>> {
    if bins.is_empty() {
        return Ok(Vec::new());
    }
    if bins.iter().any(|b| *b < 0.0 || !b.is_finite()) {
        return Err(MozaikError::BadParameters(
            "Bin weights must be finite and non-negative".into(),
        ));
    }
    let total: f64 = bins.sum();
    if total <= 0.0 {
        return Err(MozaikError::BadParameters("Bin weights sum to zero".into()));
    }

    let mut cumulative = Vec::with_capacity(bins.len());
    let mut running = 0.0;
    for b in bins.iter() {
        running += b / total;
        cumulative.push(running);
    }

    let last = bins.len() - 1;
    Ok((0..number_of_samples)
        .map(|_| {
            let s: f64 = rng.gen();
            cumulative.iter().position(|c| s < *c).unwrap_or(last)
        })
        .collect())
}

/// Value of the normal density N(mean, sigma) at `x`.
pub fn normal_function(x: f64, mean: f64, sigma: f64) -> f64 {
    (-((x - mean) / sigma).powi(2) / 2.0).exp() / (sigma * (2.0 * PI).sqrt())
}

/// Landmarks of a sheet used to pick a representative neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuronLocation {
    Center,
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl FromStr for NeuronLocation {
    type Err = MozaikError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(NeuronLocation::Center),
            "top_right" => Ok(NeuronLocation::TopRight),
            "top_left" => Ok(NeuronLocation::TopLeft),
            "bottom_left" => Ok(NeuronLocation::BottomLeft),
            "bottom_right" => Ok(NeuronLocation::BottomRight),
            other => Err(MozaikError::BadParameters(format!("Unknown neuron location '{}'", other))),
        }
    }
}

/// Index of the neuron closest to `which` in a `2 x N` array of (x, y) positions.
pub fn find_neuron(which: NeuronLocation, positions: ArrayView2<f64>) -> MozaikResult<usize> {
    if positions.nrows() != 2 || positions.ncols() == 0 {
        return Err(MozaikError::BadParameters(format!(
            "Positions must have shape (2, N>0), got {:?}",
            positions.shape()
        )));
    }
    let xs = positions.row(0);
    let ys = positions.row(1);
    let min_x = xs.fold(f64::INFINITY, |a, &b| a.min(b));
    let max_x = xs.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let min_y = ys.fold(f64::INFINITY, |a, &b| a.min(b));
    let max_y = ys.fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    let (target_x, target_y) = match which {
        NeuronLocation::Center => (min_x + (max_x - min_x) / 2.0, min_y + (max_y - min_y) / 2.0),
        NeuronLocation::TopRight => (max_x, max_y),
        NeuronLocation::TopLeft => (min_x, max_y),
        NeuronLocation::BottomLeft => (min_x, min_y),
        NeuronLocation::BottomRight => (max_x, min_y),
    };

    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, (x, y)) in xs.iter().zip(ys.iter()).enumerate() {
        let distance = ((x - target_x).powi(2) + (y - target_y).powi(2)).sqrt();
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    Ok(best)
}
