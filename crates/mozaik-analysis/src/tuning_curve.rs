// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Tuning curves with respect to one parameter of a stimulus.
//!
//! Every other stimulus parameter is assumed to be either collapsed (averaged out, like
//! phase or trials for orientation tuning) or to parametrize the tuning curve itself
//! (orientation tuning at different contrasts gives one curve per contrast).

use std::collections::BTreeMap;

use ndarray::{stack, Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;
use mozaik_structures::{MozaikError, MozaikResult, ParameterSet, StimulusId, Units};

use crate::{AdsHeader, AdsParams, AnalysisDataStructure};

/// One parametrization of a tuning curve: plotting `levels` against `x_axis` draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningCurveParametrization {
    /// Row `i` holds the per-neuron responses at `x_axis[i]`
    pub levels: Array2<f64>,
    pub x_axis: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningCurve {
    header: AdsHeader,
    sheet_name: Option<String>,
    #[serde(with = "mozaik_structures::samples::vec_array1")]
    values: Vec<Array1<f64>>,
    stimuli_ids: Vec<StimulusId>,
    parameter_index: usize,
    y_axis_name: String,
    y_axis_units: Units,
}

impl TuningCurve {
    /// `values[i]` holds the response of every measured neuron to `stimuli_ids[i]`;
    /// `parameter_index` is the slot of the stimulus id the curve runs through.
    pub fn new(
        values: Vec<Array1<f64>>,
        stimuli_ids: Vec<StimulusId>,
        parameter_index: usize,
        y_axis_name: &str,
        y_axis_units: Units,
        params: AdsParams,
    ) -> MozaikResult<Self> {
        Self::with_identifier("TuningCurve", values, stimuli_ids, parameter_index, y_axis_name, y_axis_units, params)
    }

    fn with_identifier(
        identifier: &str,
        values: Vec<Array1<f64>>,
        stimuli_ids: Vec<StimulusId>,
        parameter_index: usize,
        y_axis_name: &str,
        y_axis_units: Units,
        params: AdsParams,
    ) -> MozaikResult<Self> {
        if values.len() != stimuli_ids.len() {
            return Err(MozaikError::LengthMismatch {
                what: "tuning curve values and stimuli ids",
                left: values.len(),
                right: stimuli_ids.len(),
            });
        }
        if let Some(short) = stimuli_ids.iter().find(|s| s.parameters.len() <= parameter_index) {
            return Err(MozaikError::BadParameters(format!(
                "Stimulus {} has no parameter at index {}",
                short, parameter_index
            )));
        }
        let (header, sheet_name) = params.into_header(identifier);
        Ok(TuningCurve {
            header,
            sheet_name,
            values,
            stimuli_ids,
            parameter_index,
            y_axis_name: y_axis_name.to_string(),
            y_axis_units,
        })
    }

    pub fn values(&self) -> &[Array1<f64>] {
        &self.values
    }

    pub fn stimuli_ids(&self) -> &[StimulusId] {
        &self.stimuli_ids
    }

    pub fn parameter_index(&self) -> usize {
        self.parameter_index
    }

    pub fn y_axis_name(&self) -> &str {
        &self.y_axis_name
    }

    pub fn y_axis_units(&self) -> &Units {
        &self.y_axis_units
    }

    /// Groups the curve by parametrization.
    ///
    /// Keys are the stimulus ids with the slot the curve runs through replaced by `x`.
    /// Rows keep the order in which the stimuli were supplied.
    pub fn to_dictionary_of_tc_parametrization(
        &self,
    ) -> MozaikResult<BTreeMap<StimulusId, TuningCurveParametrization>> {
        let mut groups: BTreeMap<StimulusId, (Vec<ArrayView1<f64>>, Vec<f64>)> = BTreeMap::new();
        for (value, stimulus) in self.values.iter().zip(self.stimuli_ids.iter()) {
            let x = stimulus.parameter_as_f64(self.parameter_index)?;
            let key = stimulus.with_parameter(self.parameter_index, "x")?;
            let (levels, x_axis) = groups.entry(key).or_default();
            levels.push(value.view());
            x_axis.push(x);
        }

        let mut output = BTreeMap::new();
        for (key, (levels, x_axis)) in groups {
            let levels = stack(Axis(0), &levels).map_err(|e| {
                MozaikError::BadParameters(format!(
                    "Responses of {} do not cover the same neurons: {}",
                    key, e
                ))
            })?;
            output.insert(key, TuningCurveParametrization { levels, x_axis });
        }
        debug!(
            target: "mozaik-analysis",
            "{} regrouped into {} parametrizations",
            self.header.identifier,
            output.len()
        );
        Ok(output)
    }
}

impl AnalysisDataStructure for TuningCurve {
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
        ParameterSet::new().with("y_axis_name", self.y_axis_name.as_str())
    }
}

/// A tuning curve over a periodic quantity, e.g. orientation with period π.
///
/// Every value of the tuning parameter lies in `<0, period)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclicTuningCurve {
    curve: TuningCurve,
    period: f64,
}

impl CyclicTuningCurve {
    pub fn new(
        period: f64,
        values: Vec<Array1<f64>>,
        stimuli_ids: Vec<StimulusId>,
        parameter_index: usize,
        y_axis_name: &str,
        y_axis_units: Units,
        params: AdsParams,
    ) -> MozaikResult<Self> {
        if !(period > 0.0) {
            return Err(MozaikError::BadParameters(format!("period must be positive, got {}", period)));
        }
        let curve = TuningCurve::with_identifier(
            "CyclicTuningCurve",
            values,
            stimuli_ids,
            parameter_index,
            y_axis_name,
            y_axis_units,
            params,
        )?;
        for stimulus in curve.stimuli_ids.iter() {
            let value = stimulus.parameter_as_f64(parameter_index)?;
            if !(0.0..period).contains(&value) {
                return Err(MozaikError::OutOfPeriod {
                    kind: "CyclicTuningCurve",
                    period,
                    value,
                });
            }
        }
        Ok(CyclicTuningCurve { curve, period })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn curve(&self) -> &TuningCurve {
        &self.curve
    }

    pub fn to_dictionary_of_tc_parametrization(
        &self,
    ) -> MozaikResult<BTreeMap<StimulusId, TuningCurveParametrization>> {
        self.curve.to_dictionary_of_tc_parametrization()
    }
}

impl AnalysisDataStructure for CyclicTuningCurve {
    fn header(&self) -> &AdsHeader {
        &self.curve.header
    }

    fn header_mut(&mut self) -> &mut AdsHeader {
        &mut self.curve.header
    }

    fn sheet_name(&self) -> Option<&str> {
        self.curve.sheet_name()
    }

    fn extra_parameters(&self) -> ParameterSet {
        self.curve.extra_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::PI;

    fn grating(orientation: f64, contrast: f64) -> StimulusId {
        StimulusId::from_values("Grating", &[orientation, contrast])
    }

    #[test]
    fn test_grouping_by_remaining_parameters() {
        let curve = TuningCurve::new(
            vec![array![1.0, 2.0], array![3.0, 4.0], array![5.0, 6.0]],
            vec![grating(0.0, 50.0), grating(0.5, 50.0), grating(0.0, 100.0)],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::new("OrientationTuning").with_sheet("V1"),
        )
        .unwrap();

        let groups = curve.to_dictionary_of_tc_parametrization().unwrap();
        assert_eq!(groups.len(), 2);

        let low = &groups[&"Grating[x, 50]".parse::<StimulusId>().unwrap()];
        assert_eq!(low.x_axis, vec![0.0, 0.5]);
        assert_eq!(low.levels, array![[1.0, 2.0], [3.0, 4.0]]);

        let high = &groups[&"Grating[x, 100]".parse::<StimulusId>().unwrap()];
        assert_eq!(high.x_axis, vec![0.0]);
        assert_eq!(high.levels, array![[5.0, 6.0]]);
    }

    #[test]
    fn test_rows_keep_supplied_order() {
        let curve = TuningCurve::new(
            vec![array![9.0], array![1.0]],
            vec![grating(1.0, 50.0), grating(0.25, 50.0)],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::default(),
        )
        .unwrap();
        let groups = curve.to_dictionary_of_tc_parametrization().unwrap();
        let only = groups.values().next().unwrap();
        assert_eq!(only.x_axis, vec![1.0, 0.25]);
        assert_eq!(only.levels, array![[9.0], [1.0]]);
    }

    #[test]
    fn test_ragged_responses_rejected() {
        let curve = TuningCurve::new(
            vec![array![1.0, 2.0], array![3.0]],
            vec![grating(0.0, 50.0), grating(0.5, 50.0)],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::default(),
        )
        .unwrap();
        assert!(curve.to_dictionary_of_tc_parametrization().is_err());
    }

    #[test]
    fn test_non_numeric_tuning_parameter_rejected() {
        let curve = TuningCurve::new(
            vec![array![1.0]],
            vec![StimulusId::new("Grating", vec!["vertical".into(), "50".into()])],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::default(),
        )
        .unwrap();
        assert!(curve.to_dictionary_of_tc_parametrization().is_err());
    }

    #[test]
    fn test_construction_checks_lengths_and_index() {
        assert!(matches!(
            TuningCurve::new(vec![array![1.0]], vec![], 0, "r", Units::hertz(), AdsParams::default()),
            Err(MozaikError::LengthMismatch { .. })
        ));
        assert!(TuningCurve::new(vec![array![1.0]], vec![grating(0.0, 1.0)], 2, "r", Units::hertz(), AdsParams::default())
            .is_err());
    }

    #[test]
    fn test_cyclic_curve_checks_period() {
        let ok = CyclicTuningCurve::new(
            PI,
            vec![array![1.0], array![2.0]],
            vec![grating(0.0, 100.0), grating(PI / 2.0, 100.0)],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::new("OrientationTuning"),
        )
        .unwrap();
        assert_eq!(ok.identifier(), "CyclicTuningCurve");
        assert_eq!(ok.period(), PI);

        let err = CyclicTuningCurve::new(
            PI,
            vec![array![1.0]],
            vec![grating(PI, 100.0)],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MozaikError::OutOfPeriod { .. }));
        assert!(err.to_string().contains("does not belong to <0,"));

        assert!(CyclicTuningCurve::new(
            PI,
            vec![array![1.0]],
            vec![grating(-0.1, 100.0)],
            0,
            "firing rate",
            Units::hertz(),
            AdsParams::default(),
        )
        .is_err());
    }
}
