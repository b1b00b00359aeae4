// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use mozaik_structures::{MozaikError, MozaikResult, ParameterSet, Units};

use crate::{AdsHeader, AdsParams, AnalysisDataStructure};

/// A single value per neuron, e.g. preferred orientation or mean firing rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerNeuronValue {
    header: AdsHeader,
    sheet_name: Option<String>,
    #[serde(with = "mozaik_structures::samples::array1")]
    values: Array1<f64>,
    value_name: String,
    value_units: Units,
    /// `None` for non-periodic values
    period: Option<f64>,
}

impl PerNeuronValue {
    pub fn new(
        values: Array1<f64>,
        value_name: &str,
        value_units: Units,
        period: Option<f64>,
        params: AdsParams,
    ) -> MozaikResult<Self> {
        if let Some(period) = period {
            if !(period > 0.0) {
                return Err(MozaikError::BadParameters(format!("period must be positive, got {}", period)));
            }
            if let Some(value) = values.iter().copied().find(|v| !(0.0..period).contains(v)) {
                return Err(MozaikError::OutOfPeriod {
                    kind: "PerNeuronValue",
                    period,
                    value,
                });
            }
        }
        let (header, sheet_name) = params.into_header("PerNeuronValue");
        Ok(PerNeuronValue {
            header,
            sheet_name,
            values,
            value_name: value_name.to_string(),
            value_units,
            period,
        })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn value_units(&self) -> &Units {
        &self.value_units
    }

    pub fn period(&self) -> Option<f64> {
        self.period
    }

    pub fn is_periodic(&self) -> bool {
        self.period.is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AnalysisDataStructure for PerNeuronValue {
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
        ParameterSet::new().with("value_name", self.value_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::PI;

    #[test]
    fn test_orientation_preference() {
        let pnv = PerNeuronValue::new(
            array![0.1, 1.2, 3.0],
            "orientation preference",
            Units::radian(),
            Some(PI),
            AdsParams::new("GaussianTuningCurveFit").with_sheet("V1_Exc_L4"),
        )
        .unwrap();
        assert_eq!(pnv.identifier(), "PerNeuronValue");
        assert_eq!(pnv.sheet_name(), Some("V1_Exc_L4"));
        assert!(pnv.is_periodic());
        assert_eq!(pnv.parameters().get_str("value_name").unwrap(), "orientation preference");
    }

    #[test]
    fn test_periodic_values_outside_period_rejected() {
        let err = PerNeuronValue::new(array![0.1, 4.0], "orientation preference", Units::radian(), Some(PI), AdsParams::default())
            .unwrap_err();
        assert!(matches!(err, MozaikError::OutOfPeriod { value, .. } if value == 4.0));
    }

    #[test]
    fn test_non_periodic_values_unrestricted() {
        let pnv = PerNeuronValue::new(array![-5.0, 400.0], "firing rate", Units::hertz(), None, AdsParams::default()).unwrap();
        assert_eq!(pnv.len(), 2);
        assert!(!pnv.is_periodic());
    }
}
