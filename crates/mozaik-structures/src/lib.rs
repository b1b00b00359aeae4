// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! The core crate for Mozaik. Defines the most common data structures used throughout:
//! the shared error type, parameter sets with their validation, stimulus ids, units,
//! analog signals and a handful of numeric helpers.

mod error;
pub mod parameters;
pub mod samples;
pub mod signals;
pub mod stimulus_id;
pub mod tools;
pub mod units;

pub use error::{MozaikError, MozaikResult};
pub use parameters::{
    check_parameters, ParameterKind, ParameterSet, ParameterSpec, ParameterValue,
    RequiredParameters,
};
pub use signals::AnalogSignal;
pub use stimulus_id::{parse_stimulus_id, StimulusId};
pub use units::Units;
