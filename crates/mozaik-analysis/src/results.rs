// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use tracing::debug;
use mozaik_structures::{MozaikResult, ParameterSet};

use crate::{
    AdsHeader, AdsQuery, AnalogSignalList, AnalysisDataStructure, ConductanceSignalList, CyclicTuningCurve,
    PerNeuronValue, TuningCurve,
};

/// Any analysis data structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AnalysisResult {
    TuningCurve(TuningCurve),
    CyclicTuningCurve(CyclicTuningCurve),
    PerNeuronValue(PerNeuronValue),
    AnalogSignalList(AnalogSignalList),
    ConductanceSignalList(ConductanceSignalList),
}

impl AnalysisResult {
    pub fn as_ads(&self) -> &dyn AnalysisDataStructure {
        match self {
            AnalysisResult::TuningCurve(a) => a,
            AnalysisResult::CyclicTuningCurve(a) => a,
            AnalysisResult::PerNeuronValue(a) => a,
            AnalysisResult::AnalogSignalList(a) => a,
            AnalysisResult::ConductanceSignalList(a) => a,
        }
    }

    fn as_ads_mut(&mut self) -> &mut dyn AnalysisDataStructure {
        match self {
            AnalysisResult::TuningCurve(a) => a,
            AnalysisResult::CyclicTuningCurve(a) => a,
            AnalysisResult::PerNeuronValue(a) => a,
            AnalysisResult::AnalogSignalList(a) => a,
            AnalysisResult::ConductanceSignalList(a) => a,
        }
    }

    pub fn as_tuning_curve(&self) -> Option<&TuningCurve> {
        match self {
            AnalysisResult::TuningCurve(a) => Some(a),
            AnalysisResult::CyclicTuningCurve(a) => Some(a.curve()),
            _ => None,
        }
    }

    pub fn as_per_neuron_value(&self) -> Option<&PerNeuronValue> {
        match self {
            AnalysisResult::PerNeuronValue(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_analog_signal_list(&self) -> Option<&AnalogSignalList> {
        match self {
            AnalysisResult::AnalogSignalList(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_conductance_signal_list(&self) -> Option<&ConductanceSignalList> {
        match self {
            AnalysisResult::ConductanceSignalList(a) => Some(a),
            _ => None,
        }
    }
}

impl AnalysisDataStructure for AnalysisResult {
    fn header(&self) -> &AdsHeader {
        self.as_ads().header()
    }

    fn header_mut(&mut self) -> &mut AdsHeader {
        self.as_ads_mut().header_mut()
    }

    fn sheet_name(&self) -> Option<&str> {
        self.as_ads().sheet_name()
    }

    fn extra_parameters(&self) -> ParameterSet {
        self.as_ads().extra_parameters()
    }
}

macro_rules! impl_into_analysis_result {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for AnalysisResult {
                fn from(value: $kind) -> Self {
                    AnalysisResult::$kind(value)
                }
            }
        )*
    };
}

impl_into_analysis_result!(
    TuningCurve,
    CyclicTuningCurve,
    PerNeuronValue,
    AnalogSignalList,
    ConductanceSignalList
);

/// In-memory collection of analysis results, queried with [`AdsQuery`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResults {
    results: Vec<AnalysisResult>,
}

impl AnalysisResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: impl Into<AnalysisResult>) {
        let result = result.into();
        debug!(
            target: "mozaik-analysis",
            "Storing {} from '{}' with tags {:?}",
            result.identifier(),
            result.analysis_algorithm(),
            result.tags()
        );
        self.results.push(result);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn query(&self, query: &AdsQuery) -> Vec<&AnalysisResult> {
        query.filter(&self.results)
    }

    /// Tags every result matched by `query`; returns how many were tagged.
    pub fn tag(&mut self, query: &AdsQuery, tag: &str) -> usize {
        let mut tagged = 0;
        for result in self.results.iter_mut().filter(|r| query.matches(&**r)) {
            result.add_tag(tag);
            tagged += 1;
        }
        tagged
    }

    pub fn to_json(&self) -> MozaikResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> MozaikResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<AnalysisResult> for AnalysisResults {
    fn from_iter<T: IntoIterator<Item = AnalysisResult>>(iter: T) -> Self {
        AnalysisResults {
            results: iter.into_iter().collect(),
        }
    }
}
