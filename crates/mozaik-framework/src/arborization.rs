// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Connection kernels deciding how likely two neurons are to connect and how long a
//! spike takes between them.

use mozaik_structures::tools::normal_function;
use mozaik_structures::{MozaikError, MozaikResult, ParameterKind, RequiredParameters};

use crate::{Parametrized, ParametrizedObject};

/// Lower bound on any connection delay, in ms.
pub const MINIMAL_DELAY: f64 = 0.1;

/// A parametrized rule for sampling the connections of a projection.
///
/// Distances are cortical distances when the target sheet has a magnification factor
/// and the sheet's native metric otherwise.
pub trait ArborizationKernel: Parametrized + Sized {
    fn from_parameters(parameters: &ParametrizedObject<Self>) -> MozaikResult<Self>;

    fn connection_probability(&self, distance: f64) -> f64;

    fn delay(&self, distance: f64) -> f64;

    /// Synapse strength, nA.
    fn weight(&self) -> f64;
}

/// Requirements shared by all distance dependent kernels.
pub fn distance_dependent_requirements() -> RequiredParameters {
    RequiredParameters::new()
        .with("weights", ParameterKind::Float)
        .with("map_location", ParameterKind::Str)
}

/// Gaussian fall-off of the connection probability with linear spike propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialProbabilisticArborization {
    weights: f64,
    map_location: String,
    /// ms/μm
    propagation_constant: f64,
    /// μm, width of the probability fall-off around the innervation point
    arborization_constant: f64,
    arborization_scaler: f64,
}

impl ExponentialProbabilisticArborization {
    pub fn map_location(&self) -> &str {
        &self.map_location
    }
}

impl Parametrized for ExponentialProbabilisticArborization {
    const NAME: &'static str = "ExponentialProbabilisticArborization";

    fn required_parameters() -> RequiredParameters {
        distance_dependent_requirements().merged(
            &RequiredParameters::new()
                .with("propagation_constant", ParameterKind::Float)
                .with("arborization_constant", ParameterKind::Float)
                .with("arborization_scaler", ParameterKind::Float),
        )
    }
}

impl ArborizationKernel for ExponentialProbabilisticArborization {
    fn from_parameters(parameters: &ParametrizedObject<Self>) -> MozaikResult<Self> {
        let p = parameters.parameters();
        let arborization_constant = p.get_f64("arborization_constant")?;
        if !(arborization_constant > 0.0) {
            return Err(MozaikError::BadParameters(format!(
                "arborization_constant must be positive, got {}",
                arborization_constant
            )));
        }
        Ok(ExponentialProbabilisticArborization {
            weights: p.get_f64("weights")?,
            map_location: p.get_str("map_location")?.to_string(),
            propagation_constant: p.get_f64("propagation_constant")?,
            arborization_constant,
            arborization_scaler: p.get_f64("arborization_scaler")?,
        })
    }

    fn connection_probability(&self, distance: f64) -> f64 {
        self.arborization_scaler * normal_function(distance, 0.0, self.arborization_constant)
    }

    fn delay(&self, distance: f64) -> f64 {
        (distance * self.propagation_constant).max(MINIMAL_DELAY)
    }

    fn weight(&self) -> f64 {
        self.weights
    }
}

/// Equal connection probability between any two neurons.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformProbabilisticArborization {
    connection_probability: f64,
    weights: f64,
    delay: f64,
}

impl Parametrized for UniformProbabilisticArborization {
    const NAME: &'static str = "UniformProbabilisticArborization";

    fn required_parameters() -> RequiredParameters {
        RequiredParameters::new()
            .with("connection_probability", ParameterKind::Float)
            .with("weights", ParameterKind::Float)
            .with("delay", ParameterKind::Float)
    }
}

impl ArborizationKernel for UniformProbabilisticArborization {
    fn from_parameters(parameters: &ParametrizedObject<Self>) -> MozaikResult<Self> {
        let p = parameters.parameters();
        let connection_probability = p.get_f64("connection_probability")?;
        if !(0.0..=1.0).contains(&connection_probability) {
            return Err(MozaikError::BadParameters(format!(
                "connection_probability must lie in [0, 1], got {}",
                connection_probability
            )));
        }
        Ok(UniformProbabilisticArborization {
            connection_probability,
            weights: p.get_f64("weights")?,
            delay: p.get_f64("delay")?,
        })
    }

    fn connection_probability(&self, _distance: f64) -> f64 {
        self.connection_probability
    }

    fn delay(&self, _distance: f64) -> f64 {
        self.delay
    }

    fn weight(&self) -> f64 {
        self.weights
    }
}
