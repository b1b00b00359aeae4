//! Tests for collecting, querying and persisting analysis results

use std::f64::consts::PI;

use mozaik_analysis::*;
use mozaik_structures::{AnalogSignal, StimulusId, Units};
use ndarray::{array, Array1};

fn orientation_tuning(sheet: &str) -> CyclicTuningCurve {
    let orientations = [0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0];
    let mut values = Vec::new();
    let mut ids = Vec::new();
    for contrast in [30.0, 100.0] {
        for (i, orientation) in orientations.iter().enumerate() {
            values.push(Array1::from_elem(3, contrast * (i + 1) as f64));
            ids.push(StimulusId::from_values("DriftingSinusoidalGrating", &[*orientation, 0.8, 2.0, contrast]));
        }
    }
    CyclicTuningCurve::new(
        PI,
        values,
        ids,
        0,
        "firing rate",
        Units::hertz(),
        AdsParams::new("GratingResponses").with_sheet(sheet).with_tags(["orientation"]),
    )
    .unwrap()
}

fn populated() -> AnalysisResults {
    let mut results = AnalysisResults::new();
    results.push(orientation_tuning("V1_Exc_L4"));
    results.push(orientation_tuning("V1_Inh_L4"));
    results.push(
        PerNeuronValue::new(
            array![0.1, 0.2, 3.0],
            "orientation preference",
            Units::radian(),
            Some(PI),
            AdsParams::new("GaussianTuningCurveFit").with_sheet("V1_Exc_L4").with_tags(["orientation"]),
        )
        .unwrap(),
    );
    let signal = AnalogSignal::new(array![5.0, 6.0], Units::nanosiemens(), 0.1, Units::millisecond(), 0.0).unwrap();
    results.push(
        ConductanceSignalList::new(
            vec![signal.clone()],
            vec![signal],
            vec![12],
            AdsParams::new("Recording").with_sheet("V1_Exc_L4"),
        )
        .unwrap(),
    );
    results
}

#[test]
fn test_query_by_identifier_sheet_and_tags() {
    let results = populated();
    assert_eq!(results.len(), 4);

    let curves = results.query(&AdsQuery::new().identifier("CyclicTuningCurve"));
    assert_eq!(curves.len(), 2);

    let exc_orientation = results.query(&AdsQuery::new().sheet_name("V1_Exc_L4").tag("orientation"));
    assert_eq!(exc_orientation.len(), 2);
    assert!(exc_orientation[1].as_per_neuron_value().is_some());

    let conductances = results.query(&AdsQuery::new().parameter("y_axis_name", "conductance"));
    assert_eq!(conductances.len(), 1);
    assert_eq!(conductances[0].as_conductance_signal_list().unwrap().indexes(), &[12]);
}

#[test]
fn test_regrouping_curves_from_results() {
    let results = populated();
    let found = results.query(&AdsQuery::new().identifier("CyclicTuningCurve").sheet_name("V1_Inh_L4"));
    let curve = found[0].as_tuning_curve().unwrap();
    let groups = curve.to_dictionary_of_tc_parametrization().unwrap();
    assert_eq!(groups.len(), 2);

    let key: StimulusId = "DriftingSinusoidalGrating[x, 0.8, 2, 100]".parse().unwrap();
    let full_contrast = &groups[&key];
    assert_eq!(full_contrast.levels.dim(), (4, 3));
    assert_eq!(full_contrast.x_axis[1], PI / 4.0);
    assert_eq!(full_contrast.levels[[3, 0]], 400.0);
}

#[test]
fn test_tagging_after_creation() {
    let mut results = populated();
    let tagged = results.tag(&AdsQuery::new().sheet_name("V1_Exc_L4"), "layer4");
    assert_eq!(tagged, 3);
    assert_eq!(results.query(&AdsQuery::new().tag("layer4")).len(), 3);
    // tagging twice does not duplicate
    results.tag(&AdsQuery::new().sheet_name("V1_Exc_L4"), "layer4");
    assert!(results.iter().all(|r| r.tags().iter().filter(|t| *t == "layer4").count() <= 1));
}

#[test]
fn test_json_persistence_preserves_results() {
    let results = populated();
    let json = results.to_json().unwrap();
    assert!(json.contains("\"kind\":\"CyclicTuningCurve\""));
    let restored = AnalysisResults::from_json(&json).unwrap();
    assert_eq!(restored.len(), results.len());
    for (before, after) in results.iter().zip(restored.iter()) {
        assert_eq!(before.identifier(), after.identifier());
        assert_eq!(before.sheet_name(), after.sheet_name());
        assert_eq!(before.tags(), after.tags());
    }
    let pnv = restored.query(&AdsQuery::new().identifier("PerNeuronValue"));
    assert_eq!(pnv[0].as_per_neuron_value().unwrap().values().len(), 3);
    assert!(AnalysisResults::from_json("{not json").is_err());
}

#[test]
fn test_json_persistence_keeps_undefined_values() {
    let mut results = AnalysisResults::new();
    results.push(
        PerNeuronValue::new(
            array![1.0, f64::NAN],
            "preferred spatial frequency",
            Units::new("cpd"),
            None,
            AdsParams::new("TuningCurveFit").with_sheet("V1_Exc_L4"),
        )
        .unwrap(),
    );
    let json = results.to_json().unwrap();
    let restored = AnalysisResults::from_json(&json).unwrap();
    let values = restored.iter().next().unwrap().as_per_neuron_value().unwrap().values();
    assert_eq!(values[0], 1.0);
    assert!(values[1].is_nan());
}
