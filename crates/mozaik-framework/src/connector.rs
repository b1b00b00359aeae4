// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use mozaik_structures::{MozaikResult, ParameterSet};

use crate::template::safe_substitute;
use crate::{ArborizationKernel, ParametrizedObject, SheetGeometry};

//region Network

/// What a network keeps about each connector registered with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorRecord {
    pub name: String,
    pub kernel: &'static str,
    pub source: String,
    pub target: String,
    pub parameters: ParameterSet,
}

/// The model a connector is part of.
pub trait Network {
    fn register_connector(&mut self, connector: ConnectorRecord);
}

/// Network that only remembers its connectors.
#[derive(Debug, Clone, Default)]
pub struct ConnectorRegistry {
    connectors: Vec<ConnectorRecord>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connectors(&self) -> &[ConnectorRecord] {
        &self.connectors
    }

    pub fn get(&self, name: &str) -> Option<&ConnectorRecord> {
        self.connectors.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

impl Network for ConnectorRegistry {
    fn register_connector(&mut self, connector: ConnectorRecord) {
        debug!(target: "mozaik-framework", "Registering connector {}", connector.name);
        self.connectors.push(connector);
    }
}

//endregion

//region Connector

/// One sampled synapse; `source` and `target` index into their sheets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    /// ms
    pub delay: f64,
}

/// The connections produced by one call to [`VisualSystemConnector::connect`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub label: String,
    pub connections: Vec<Connection>,
}

impl Projection {
    pub fn describe(&self) -> Value {
        json!({
            "label": self.label,
            "size": self.connections.len(),
        })
    }
}

/// Connects two sheets of a visual system through the kernel `K`.
#[derive(Debug)]
pub struct VisualSystemConnector<K: ArborizationKernel> {
    name: String,
    source: Arc<SheetGeometry>,
    target: Arc<SheetGeometry>,
    parameters: ParametrizedObject<K>,
    kernel: K,
    projections: Vec<Projection>,
}

impl<K: ArborizationKernel> VisualSystemConnector<K> {
    /// Validates `parameters` for `K` and registers the connector with `network`.
    pub fn new<N: Network + ?Sized>(
        network: &mut N,
        name: &str,
        source: Arc<SheetGeometry>,
        target: Arc<SheetGeometry>,
        parameters: ParameterSet,
    ) -> MozaikResult<Self> {
        info!(
            target: "mozaik-framework",
            "Creating {} between {} and {}",
            K::NAME,
            source.name(),
            target.name()
        );
        let parameters = ParametrizedObject::<K>::new(parameters)?;
        let kernel = K::from_parameters(&parameters)?;
        network.register_connector(ConnectorRecord {
            name: name.to_string(),
            kernel: K::NAME,
            source: source.name().to_string(),
            target: target.name().to_string(),
            parameters: parameters.parameters().clone(),
        });
        Ok(VisualSystemConnector {
            name: name.to_string(),
            source,
            target,
            parameters,
            kernel,
            projections: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &SheetGeometry {
        &self.source
    }

    pub fn target(&self) -> &SheetGeometry {
        &self.target
    }

    pub fn parameters(&self) -> &ParameterSet {
        self.parameters.parameters()
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    /// Samples a projection from the source to the target sheet and returns its connections.
    ///
    /// Each pair of neurons connects independently with the kernel's probability at
    /// their distance, converted to cortical distance by the target sheet. A neuron is
    /// never connected to itself when both ends are the same sheet.
    pub fn connect<R: Rng>(&mut self, rng: &mut R) -> &[Connection] {
        let same_sheet = Arc::ptr_eq(&self.source, &self.target);
        let mut connections = Vec::new();
        for s in 0..self.source.len() {
            let from = self.source.position(s);
            for t in 0..self.target.len() {
                if same_sheet && s == t {
                    continue;
                }
                let to = self.target.position(t);
                let distance = self.target.dvf_to_dcs(((from[0] - to[0]).powi(2) + (from[1] - to[1]).powi(2)).sqrt());
                let probability = self.kernel.connection_probability(distance);
                if rng.gen::<f64>() < probability {
                    connections.push(Connection {
                        source: s,
                        target: t,
                        weight: self.kernel.weight(),
                        delay: self.kernel.delay(distance),
                    });
                }
            }
        }

        debug!(
            target: "mozaik-framework",
            "{} sampled {} connections between {} and {}",
            self.name,
            connections.len(),
            self.source.name(),
            self.target.name()
        );
        self.projections.push(Projection {
            label: format!("{}_{}", self.name, self.projections.len()),
            connections,
        });
        let index = self.projections.len() - 1;
        &self.projections[index].connections
    }

    /// Structured description of the connector.
    pub fn describe_context(&self) -> Value {
        json!({
            "name": K::NAME,
            "source": { "name": self.source.name() },
            "target": { "name": self.target.name() },
            "projections": self.projections.iter().map(Projection::describe).collect::<Vec<_>>(),
        })
    }

    /// Renders `template` against the description.
    ///
    /// Top-level fields are available as `$name`, `$source`, `$target` and
    /// `$projections`; sheet fields also as `$source_name` and `$target_name`. Objects
    /// and lists render as JSON.
    pub fn describe(&self, template: &str) -> String {
        let context = self.describe_context();
        let mut flat = BTreeMap::new();
        if let Value::Object(fields) = &context {
            for (key, value) in fields.iter() {
                if let Value::Object(nested) = value {
                    for (inner, inner_value) in nested.iter() {
                        flat.insert(format!("{}_{}", key, inner), render_value(inner_value));
                    }
                }
                flat.insert(key.clone(), render_value(value));
            }
        }
        safe_substitute(template, &flat)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//endregion
