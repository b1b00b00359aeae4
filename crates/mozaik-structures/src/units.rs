// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Physical units of a quantity, identified by their symbol.
///
/// Units are only compared, never converted; two quantities are compatible exactly when
/// their symbols are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Units(String);

impl Units {
    pub fn new(symbol: &str) -> Self {
        Units(symbol.trim().to_string())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }

    pub fn millivolt() -> Self {
        Units::new("mV")
    }

    pub fn nanosiemens() -> Self {
        Units::new("nS")
    }

    pub fn millisecond() -> Self {
        Units::new("ms")
    }

    pub fn hertz() -> Self {
        Units::new("Hz")
    }

    pub fn candela_per_square_meter() -> Self {
        Units::new("cd/m2")
    }

    pub fn degree() -> Self {
        Units::new("deg")
    }

    pub fn radian() -> Self {
        Units::new("rad")
    }

    pub fn dimensionless() -> Self {
        Units::new("dimensionless")
    }
}

impl Default for Units {
    fn default() -> Self {
        Units::dimensionless()
    }
}

impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Units {
    fn from(symbol: &str) -> Self {
        Units::new(symbol)
    }
}
