//! Tests for building and sampling connectors between sheets

use std::sync::Arc;

use mozaik_framework::*;
use mozaik_structures::{MozaikError, ParameterSet};
use ndarray::{array, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn grid(name: &str, side: usize, spacing: f64) -> Arc<SheetGeometry> {
    let mut positions = Array2::zeros((2, side * side));
    for i in 0..side * side {
        positions[[0, i]] = (i % side) as f64 * spacing;
        positions[[1, i]] = (i / side) as f64 * spacing;
    }
    Arc::new(SheetGeometry::new(name, positions).unwrap())
}

fn uniform(probability: f64) -> ParameterSet {
    ParameterSet::new()
        .with("connection_probability", probability)
        .with("weights", 0.05)
        .with("delay", 1.5)
}

#[test]
fn test_connector_registers_with_network() {
    let mut network = ConnectorRegistry::new();
    let lgn = grid("LGN_On", 2, 1.0);
    let v1 = grid("V1_Exc_L4", 2, 1.0);
    let connector = VisualSystemConnector::<UniformProbabilisticArborization>::new(
        &mut network,
        "LGN_On_to_V1",
        lgn,
        v1,
        uniform(0.5),
    )
    .unwrap();

    assert_eq!(network.len(), 1);
    let record = network.get("LGN_On_to_V1").unwrap();
    assert_eq!(record.kernel, "UniformProbabilisticArborization");
    assert_eq!(record.source, "LGN_On");
    assert_eq!(record.target, "V1_Exc_L4");
    assert_eq!(record.parameters, *connector.parameters());
}

#[test]
fn test_invalid_parameters_do_not_register() {
    let mut network = ConnectorRegistry::new();
    let sheet = grid("V1", 2, 1.0);
    let err = VisualSystemConnector::<UniformProbabilisticArborization>::new(
        &mut network,
        "recurrent",
        sheet.clone(),
        sheet,
        ParameterSet::new().with("connection_probability", 0.5).with("weights", 0.05),
    )
    .unwrap_err();
    assert!(matches!(err, MozaikError::InvalidParameterKeys { .. }));
    assert!(network.is_empty());
}

#[test]
fn test_recurrent_connections_skip_self() {
    let mut network = ConnectorRegistry::new();
    let sheet = grid("V1", 3, 1.0);
    let mut connector =
        VisualSystemConnector::<UniformProbabilisticArborization>::new(&mut network, "recurrent", sheet.clone(), sheet, uniform(1.0))
            .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let connections = connector.connect(&mut rng);
    assert_eq!(connections.len(), 9 * 8);
    assert!(connections.iter().all(|c| c.source != c.target));
    assert!(connections.iter().all(|c| c.delay == 1.5 && c.weight == 0.05));
}

#[test]
fn test_distinct_sheets_sharing_a_name_keep_diagonal() {
    let mut network = ConnectorRegistry::new();
    let mut connector = VisualSystemConnector::<UniformProbabilisticArborization>::new(
        &mut network,
        "copy",
        grid("V1", 2, 1.0),
        grid("V1", 2, 1.0),
        uniform(1.0),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let connections = connector.connect(&mut rng);
    assert_eq!(connections.len(), 4 * 4);
    assert!(connections.iter().any(|c| c.source == c.target));
}

#[test]
fn test_uniform_probability_is_respected() {
    let mut network = ConnectorRegistry::new();
    let mut connector = VisualSystemConnector::<UniformProbabilisticArborization>::new(
        &mut network,
        "feedforward",
        grid("LGN", 20, 1.0),
        grid("V1", 20, 1.0),
        uniform(0.3),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let count = connector.connect(&mut rng).len();
    // 160000 pairs; the expected count is 48000
    assert!((46000..50000).contains(&count), "got {}", count);

    let mut none = VisualSystemConnector::<UniformProbabilisticArborization>::new(
        &mut network,
        "silent",
        grid("LGN", 3, 1.0),
        grid("V1", 3, 1.0),
        uniform(0.0),
    )
    .unwrap();
    assert!(none.connect(&mut rng).is_empty());
}

#[test]
fn test_exponential_kernel_sees_cortical_distance() {
    let source = Arc::new(SheetGeometry::new("Retina", array![[0.0], [0.0]]).unwrap());
    let target = Arc::new(
        SheetGeometry::new("V1", array![[0.0, 1.0], [0.0, 0.0]])
            .unwrap()
            .with_magnification_factor(1000.0)
            .unwrap(),
    );
    let parameters = ParameterSet::new()
        .with("weights", 0.002)
        .with("map_location", "maps/or_map")
        .with("propagation_constant", 0.003)
        .with("arborization_constant", 100.0)
        // makes the probability at distance zero exceed one
        .with("arborization_scaler", 1000.0);
    let mut network = ConnectorRegistry::new();
    let mut connector =
        VisualSystemConnector::<ExponentialProbabilisticArborization>::new(&mut network, "retinotopic", source, target, parameters)
            .unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let connections = connector.connect(&mut rng).to_vec();
    // the second target neuron is 1000 μm away: ten arborization constants
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].target, 0);
    assert_eq!(connections[0].delay, 0.1);
}

#[test]
fn test_describe() {
    let mut network = ConnectorRegistry::new();
    let mut connector = VisualSystemConnector::<UniformProbabilisticArborization>::new(
        &mut network,
        "feedforward",
        grid("LGN_On", 2, 1.0),
        grid("V1_Exc_L4", 2, 1.0),
        uniform(1.0),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    connector.connect(&mut rng);

    let context = connector.describe_context();
    assert_eq!(context["name"], "UniformProbabilisticArborization");
    assert_eq!(context["source"]["name"], "LGN_On");
    assert_eq!(context["target"]["name"], "V1_Exc_L4");
    assert_eq!(context["projections"][0]["size"], 16);

    let text = connector.describe("$name connects ${source_name} to $target_name ($unknown)");
    assert_eq!(text, "UniformProbabilisticArborization connects LGN_On to V1_Exc_L4 ($unknown)");
}
