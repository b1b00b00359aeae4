// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Components of a modelled visual system.
//!
//! Every component is a [`Parametrized`] object: it declares the parameter tree it needs
//! and refuses to be built from anything else. Connectors join two sheets through an
//! [`ArborizationKernel`] and register themselves with the [`Network`] they belong to.

pub mod arborization;
mod connector;
mod parametrized;
mod sheet;
pub mod template;

pub use arborization::{
    ArborizationKernel, ExponentialProbabilisticArborization, UniformProbabilisticArborization,
};
pub use connector::{Connection, ConnectorRecord, ConnectorRegistry, Network, Projection, VisualSystemConnector};
pub use parametrized::{Parametrized, ParametrizedObject};
pub use sheet::SheetGeometry;
