// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Serde adapters for arrays of samples that may hold `NaN` or infinities.
//!
//! JSON has no representation for non-finite numbers, so they are written as the strings
//! `"NaN"`, `"inf"` and `"-inf"`. Use with `#[serde(with = "...")]` on the field.

use ndarray::Array1;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Sample {
    Finite(f64),
    NonFinite(String),
}

impl From<f64> for Sample {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Sample::Finite(v)
        } else if v.is_nan() {
            Sample::NonFinite("NaN".into())
        } else if v > 0.0 {
            Sample::NonFinite("inf".into())
        } else {
            Sample::NonFinite("-inf".into())
        }
    }
}

impl Sample {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Sample::Finite(v) => Ok(v),
            Sample::NonFinite(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::custom(format!("invalid sample '{}'", other))),
            },
        }
    }
}

struct Samples<'a>(&'a Array1<f64>);

impl Serialize for Samples<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for v in self.0.iter() {
            seq.serialize_element(&Sample::from(*v))?;
        }
        seq.end()
    }
}

fn decode<E: serde::de::Error>(raw: Vec<Sample>) -> Result<Array1<f64>, E> {
    raw.into_iter()
        .map(Sample::into_f64)
        .collect::<Result<Vec<f64>, E>>()
        .map(Array1::from)
}

/// A single `Array1<f64>` field
pub mod array1 {
    use super::*;

    pub fn serialize<S: Serializer>(values: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        Samples(values).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Array1<f64>, D::Error> {
        decode(Vec::<Sample>::deserialize(deserializer)?)
    }
}

/// A `Vec<Array1<f64>>` field
pub mod vec_array1 {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[Array1<f64>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(Samples))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Array1<f64>>, D::Error> {
        Vec::<Vec<Sample>>::deserialize(deserializer)?
            .into_iter()
            .map(|raw| decode::<D::Error>(raw))
            .collect()
    }
}
