// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! # mozaik-analysis
//!
//! Analysis data structures (ADS) encapsulate the data an analysis produces. One
//! analysis can produce several ADSs and one kind of ADS can be produced by several
//! analyses; the point is a common representation that plotting and further analysis can
//! rely on.
//!
//! Every ADS carries three identifying parameters:
//!
//! - `identifier`: the kind of data structure (`TuningCurve`, `PerNeuronValue`, ...), used
//!   to find structures of a common type in a results collection;
//! - `analysis_algorithm`: the name of the analysis that produced it;
//! - `tags`: free-form labels attached at creation (or later) to tell apart structures
//!   that hold the same kind of data. Prefer parameter filters over tags where possible.
//!
//! The data itself is passed to the constructors as ordinary inputs.

mod ads;
mod per_neuron_value;
mod queries;
mod results;
mod signal_lists;
mod tuning_curve;

pub use ads::{AdsHeader, AdsParams, AnalysisDataStructure};
pub use per_neuron_value::PerNeuronValue;
pub use queries::AdsQuery;
pub use results::{AnalysisResult, AnalysisResults};
pub use signal_lists::{AnalogSignalList, Axes1D, ConductanceSignalList};
pub use tuning_curve::{CyclicTuningCurve, TuningCurve, TuningCurveParametrization};
