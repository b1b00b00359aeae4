// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! One dimensional analysis data structures: every member shares one x axis and one y
//! axis, each with a name and units.

use serde::{Deserialize, Serialize};
use mozaik_structures::{AnalogSignal, MozaikError, MozaikResult, ParameterSet, Units};

use crate::{AdsHeader, AdsParams, AnalysisDataStructure};

/// Names and units of both axes of 1D data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes1D {
    pub x_axis_name: String,
    pub y_axis_name: String,
    pub x_axis_units: Units,
    pub y_axis_units: Units,
}

impl Axes1D {
    pub fn new(x_axis_name: &str, x_axis_units: Units, y_axis_name: &str, y_axis_units: Units) -> Self {
        Axes1D {
            x_axis_name: x_axis_name.to_string(),
            y_axis_name: y_axis_name.to_string(),
            x_axis_units,
            y_axis_units,
        }
    }

    fn to_parameter_set(&self) -> ParameterSet {
        ParameterSet::new()
            .with("x_axis_name", self.x_axis_name.as_str())
            .with("y_axis_name", self.y_axis_name.as_str())
    }
}

/// Analog signals recorded from a set of neurons of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogSignalList {
    header: AdsHeader,
    sheet_name: Option<String>,
    axes: Axes1D,
    asl: Vec<AnalogSignal>,
    /// Index in the sheet of the neuron each signal belongs to
    indexes: Vec<usize>,
}

impl AnalogSignalList {
    pub fn new(asl: Vec<AnalogSignal>, indexes: Vec<usize>, axes: Axes1D, params: AdsParams) -> MozaikResult<Self> {
        if asl.len() != indexes.len() {
            return Err(MozaikError::LengthMismatch {
                what: "analog signals and neuron indexes",
                left: asl.len(),
                right: indexes.len(),
            });
        }
        let (header, sheet_name) = params.into_header("AnalogSignalList");
        Ok(AnalogSignalList {
            header,
            sheet_name,
            axes,
            asl,
            indexes,
        })
    }

    pub fn axes(&self) -> &Axes1D {
        &self.axes
    }

    pub fn signals(&self) -> &[AnalogSignal] {
        &self.asl
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Signal recorded from the neuron with sheet index `index`.
    pub fn signal_of(&self, index: usize) -> Option<&AnalogSignal> {
        self.indexes.iter().position(|i| *i == index).map(|p| &self.asl[p])
    }
}

impl AnalysisDataStructure for AnalogSignalList {
    fn header(&self) -> &AdsHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut AdsHeader {
        &mut self.header
    }

    fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    fn extra_parameters(&self) -> ParameterSet {
        self.axes.to_parameter_set()
    }
}

/// Excitatory and inhibitory conductances recorded from a set of neurons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductanceSignalList {
    header: AdsHeader,
    sheet_name: Option<String>,
    axes: Axes1D,
    e_con: Vec<AnalogSignal>,
    i_con: Vec<AnalogSignal>,
    indexes: Vec<usize>,
}

impl ConductanceSignalList {
    /// Axis units are taken from the first excitatory signal; excitatory and inhibitory
    /// conductances must share units.
    pub fn new(
        e_con: Vec<AnalogSignal>,
        i_con: Vec<AnalogSignal>,
        indexes: Vec<usize>,
        params: AdsParams,
    ) -> MozaikResult<Self> {
        let (first_e, first_i) = match (e_con.first(), i_con.first()) {
            (Some(e), Some(i)) => (e, i),
            _ => {
                return Err(MozaikError::BadParameters(
                    "ConductanceSignalList needs at least one excitatory and one inhibitory signal".into(),
                ))
            }
        };
        if first_e.units() != first_i.units() {
            return Err(MozaikError::UnitsMismatch(
                first_e.units().to_string(),
                first_i.units().to_string(),
            ));
        }
        for (what, len) in [("excitatory conductances", e_con.len()), ("inhibitory conductances", i_con.len())] {
            if len != indexes.len() {
                return Err(MozaikError::LengthMismatch {
                    what,
                    left: len,
                    right: indexes.len(),
                });
            }
        }

        let axes = Axes1D::new(
            "time",
            first_e.time_units().clone(),
            "conductance",
            first_e.units().clone(),
        );
        let (header, sheet_name) = params.into_header("ConductanceSignalList");
        Ok(ConductanceSignalList {
            header,
            sheet_name,
            axes,
            e_con,
            i_con,
            indexes,
        })
    }

    pub fn axes(&self) -> &Axes1D {
        &self.axes
    }

    pub fn excitatory(&self) -> &[AnalogSignal] {
        &self.e_con
    }

    pub fn inhibitory(&self) -> &[AnalogSignal] {
        &self.i_con
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }
}

impl AnalysisDataStructure for ConductanceSignalList {
    fn header(&self) -> &AdsHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut AdsHeader {
        &mut self.header
    }

    fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    fn extra_parameters(&self) -> ParameterSet {
        self.axes.to_parameter_set()
    }
}
