// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Textual identification of a stimulus presentation.
//!
//! A stimulus id is the stimulus name followed by its parameter values in declaration
//! order, e.g. `DriftingSinusoidalGrating[0.785, 0.8, 2, 100]`. Slots are kept as text so
//! that a slot can be replaced by a placeholder such as `x`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{MozaikError, MozaikResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StimulusId {
    pub name: String,
    pub parameters: Vec<String>,
}

impl StimulusId {
    pub fn new(name: &str, parameters: Vec<String>) -> Self {
        StimulusId {
            name: name.to_string(),
            parameters,
        }
    }

    /// Builds an id from numeric parameter values.
    pub fn from_values(name: &str, values: &[f64]) -> Self {
        StimulusId::new(name, values.iter().map(|v| v.to_string()).collect())
    }

    pub fn parameter(&self, index: usize) -> MozaikResult<&str> {
        self.parameters.get(index).map(String::as_str).ok_or_else(|| {
            MozaikError::BadParameters(format!(
                "Stimulus {} has {} parameters, index {} requested",
                self.name,
                self.parameters.len(),
                index
            ))
        })
    }

    pub fn parameter_as_f64(&self, index: usize) -> MozaikResult<f64> {
        let raw = self.parameter(index)?;
        raw.parse::<f64>().map_err(|_| {
            MozaikError::BadParameters(format!(
                "Parameter {} of stimulus {} is not numeric: '{}'",
                index, self.name, raw
            ))
        })
    }

    /// Returns a copy with the slot at `index` replaced by `value`.
    pub fn with_parameter(&self, index: usize, value: &str) -> MozaikResult<StimulusId> {
        self.parameter(index)?;
        let mut copy = self.clone();
        copy.parameters[index] = value.to_string();
        Ok(copy)
    }
}

impl Display for StimulusId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.parameters.join(", "))
    }
}

impl FromStr for StimulusId {
    type Err = MozaikError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_stimulus_id(s)
    }
}

/// Parses the display form `Name[p0, p1, ...]` back into a [`StimulusId`].
pub fn parse_stimulus_id(text: &str) -> MozaikResult<StimulusId> {
    let invalid = || MozaikError::InvalidStimulusId(text.to_string());
    let trimmed = text.trim();
    let open = trimmed.find('[').ok_or_else(invalid)?;
    let body = trimmed[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
    let name = trimmed[..open].trim();
    if name.is_empty() || body.contains('[') || body.contains(']') {
        return Err(invalid());
    }

    let parameters = if body.trim().is_empty() {
        Vec::new()
    } else {
        body.split(',')
            .map(|p| {
                let p = p.trim();
                if p.is_empty() {
                    Err(invalid())
                } else {
                    Ok(p.to_string())
                }
            })
            .collect::<MozaikResult<Vec<String>>>()?
    };

    Ok(StimulusId::new(name, parameters))
}
