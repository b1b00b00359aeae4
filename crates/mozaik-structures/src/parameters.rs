// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Hierarchical parameter sets and the declared-vs-supplied validation walk.
//!
//! Every parametrized Mozaik object declares a [`RequiredParameters`] tree. Before the
//! object is built, the supplied [`ParameterSet`] is walked against that tree with
//! [`check_parameters`]: at every level the key sets must be identical, nested
//! requirements must be matched by nested sets, and leaves must carry a value of the
//! declared [`ParameterKind`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{MozaikError, MozaikResult};

//region Values

/// A single parameter value. Deserializes untagged, so JSON and TOML documents map
/// straight onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParameterValue>),
    Set(ParameterSet),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Bool,
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::Str(_) => ParameterKind::Str,
            ParameterValue::List(_) => ParameterKind::List,
            ParameterValue::Set(_) => ParameterKind::Set,
        }
    }

    /// Numeric view of the value. Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Float(v) => Some(*v),
            ParameterValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&ParameterSet> {
        match self {
            ParameterValue::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Str(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Str(value)
    }
}

impl From<ParameterSet> for ParameterValue {
    fn from(value: ParameterSet) -> Self {
        ParameterValue::Set(value)
    }
}

impl From<(f64, f64)> for ParameterValue {
    fn from(value: (f64, f64)) -> Self {
        ParameterValue::List(vec![ParameterValue::Float(value.0), ParameterValue::Float(value.1)])
    }
}

//endregion

//region Parameter Set

/// An ordered tree of named parameter values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: BTreeMap<String, ParameterValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParameterValue>) -> Option<ParameterValue> {
        self.entries.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a value through nested sets using a dotted path such as `"sheet.params.tau"`.
    pub fn get_path(&self, path: &str) -> Option<&ParameterValue> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.entries.get(first)?;
        for part in parts {
            current = current.as_set()?.entries.get(part)?;
        }
        Some(current)
    }

    /// Shallow merge: every top-level entry of `other` replaces the entry of `self`.
    pub fn update(&mut self, other: &ParameterSet) {
        for (key, value) in other.entries.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Flattens nested sets into dotted keys.
    pub fn flatten(&self) -> BTreeMap<String, ParameterValue> {
        let mut output = BTreeMap::new();
        flatten_into(self, "", &mut output);
        output
    }

    pub fn get_f64(&self, path: &str) -> MozaikResult<f64> {
        self.get_path(path)
            .and_then(ParameterValue::as_f64)
            .ok_or_else(|| missing_or_mistyped(path, "number"))
    }

    pub fn get_str(&self, path: &str) -> MozaikResult<&str> {
        self.get_path(path)
            .and_then(ParameterValue::as_str)
            .ok_or_else(|| missing_or_mistyped(path, "string"))
    }

    pub fn get_set(&self, path: &str) -> MozaikResult<&ParameterSet> {
        self.get_path(path)
            .and_then(ParameterValue::as_set)
            .ok_or_else(|| missing_or_mistyped(path, "parameter set"))
    }
}

fn flatten_into(set: &ParameterSet, prefix: &str, output: &mut BTreeMap<String, ParameterValue>) {
    for (key, value) in set.entries.iter() {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            ParameterValue::Set(nested) => flatten_into(nested, &full_key, output),
            other => {
                output.insert(full_key, other.clone());
            }
        }
    }
}

fn missing_or_mistyped(path: &str, expected: &str) -> MozaikError {
    MozaikError::BadParameters(format!("Parameter '{}' is missing or is not a {}", path, expected))
}

impl Display for ParameterSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", text)
    }
}

impl FromIterator<(String, ParameterValue)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (String, ParameterValue)>>(iter: T) -> Self {
        ParameterSet {
            entries: iter.into_iter().collect(),
        }
    }
}

//endregion

//region Declared Parameters

/// The kind a declared leaf parameter must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Bool,
    Int,
    Float,
    Str,
    List,
    Set,
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParameterKind::Bool => "bool",
            ParameterKind::Int => "int",
            ParameterKind::Float => "float",
            ParameterKind::Str => "str",
            ParameterKind::List => "list",
            ParameterKind::Set => "ParameterSet",
        };
        write!(f, "{}", name)
    }
}

/// A node of a declared parameter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpec {
    Leaf(ParameterKind),
    Nested(RequiredParameters),
}

/// The parameter tree an object declares it needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredParameters {
    entries: BTreeMap<String, ParameterSpec>,
}

impl RequiredParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, kind: ParameterKind) -> Self {
        self.entries.insert(key.to_string(), ParameterSpec::Leaf(kind));
        self
    }

    pub fn with_section(mut self, key: &str, section: RequiredParameters) -> Self {
        self.entries.insert(key.to_string(), ParameterSpec::Nested(section));
        self
    }

    /// Layers `child` over `self`; keys declared by `child` replace the parent's.
    pub fn merged(&self, child: &RequiredParameters) -> RequiredParameters {
        let mut entries = self.entries.clone();
        for (key, spec) in child.entries.iter() {
            entries.insert(key.clone(), spec.clone());
        }
        RequiredParameters { entries }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn get(&self, key: &str) -> Option<&ParameterSpec> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for RequiredParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (key, spec)) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match spec {
                ParameterSpec::Leaf(kind) => write!(f, "\"{}\": {}", key, kind)?,
                ParameterSpec::Nested(nested) => write!(f, "\"{}\": {}", key, nested)?,
            }
        }
        write!(f, "}}")
    }
}

//endregion

//region Validation

/// Validates `supplied` against the declared tree `required` on behalf of `owner`.
///
/// Fails with [`MozaikError::InvalidParameterKeys`] when the key sets of any level differ
/// and with [`MozaikError::ParameterTypeMismatch`] when a value has the wrong kind. The
/// check is strict: an integer does not satisfy a float requirement.
pub fn check_parameters(owner: &str, required: &RequiredParameters, supplied: &ParameterSet) -> MozaikResult<()> {
    let result = walk(owner, required, supplied, "");
    if let Err(err) = &result {
        tracing::debug!(target: "mozaik-structures", "Invalid parameters for {}: {}", owner, err);
    }
    result
}

fn walk(owner: &str, required: &RequiredParameters, supplied: &ParameterSet, section: &str) -> MozaikResult<()> {
    let required_keys: BTreeSet<&String> = required.entries.keys().collect();
    let supplied_keys: BTreeSet<&String> = supplied.entries.keys().collect();
    if required_keys != supplied_keys {
        return Err(MozaikError::InvalidParameterKeys {
            owner: owner.to_string(),
            section: section.to_string(),
            required: required_keys.into_iter().cloned().collect(),
            supplied: supplied_keys.into_iter().cloned().collect(),
        });
    }

    for (key, spec) in required.entries.iter() {
        let path = if section.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", section, key)
        };
        let value = supplied
            .entries
            .get(key)
            .ok_or_else(|| MozaikError::InternalError(format!("key '{}' vanished during validation", path)))?;

        match spec {
            ParameterSpec::Nested(nested) => match value {
                ParameterValue::Set(nested_supplied) => walk(owner, nested, nested_supplied, &path)?,
                other => {
                    return Err(MozaikError::ParameterTypeMismatch {
                        owner: owner.to_string(),
                        key: path,
                        expected: ParameterKind::Set.to_string(),
                        found: other.kind().to_string(),
                    })
                }
            },
            ParameterSpec::Leaf(kind) => {
                if value.kind() != *kind {
                    return Err(MozaikError::ParameterTypeMismatch {
                        owner: owner.to_string(),
                        key: path,
                        expected: kind.to_string(),
                        found: value.kind().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

//endregion

#[cfg(test)]
mod tests {
    use super::*;

    fn connector_requirements() -> RequiredParameters {
        RequiredParameters::new()
            .with("weights", ParameterKind::Float)
            .with("target_synapses", ParameterKind::Str)
            .with_section(
                "short_term_plasticity",
                RequiredParameters::new()
                    .with("U", ParameterKind::Float)
                    .with("tau_rec", ParameterKind::Float),
            )
    }

    fn connector_parameters() -> ParameterSet {
        ParameterSet::new()
            .with("weights", 0.5)
            .with("target_synapses", "excitatory")
            .with(
                "short_term_plasticity",
                ParameterSet::new().with("U", 0.75).with("tau_rec", 30.0),
            )
    }

    #[test]
    fn test_matching_tree_passes() {
        assert!(check_parameters("Connector", &connector_requirements(), &connector_parameters()).is_ok());
    }

    #[test]
    fn test_missing_key_reports_both_key_sets() {
        let mut supplied = connector_parameters();
        supplied.entries.remove("weights");
        let err = check_parameters("Connector", &connector_requirements(), &supplied).unwrap_err();
        match err {
            MozaikError::InvalidParameterKeys { owner, section, required, supplied } => {
                assert_eq!(owner, "Connector");
                assert_eq!(section, "");
                assert!(required.contains(&"weights".to_string()));
                assert!(!supplied.contains(&"weights".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_extra_nested_key_names_section() {
        let mut supplied = connector_parameters();
        supplied.insert(
            "short_term_plasticity",
            ParameterSet::new().with("U", 0.75).with("tau_rec", 30.0).with("tau_fac", 0.0),
        );
        let err = check_parameters("Connector", &connector_requirements(), &supplied).unwrap_err();
        assert!(matches!(
            err,
            MozaikError::InvalidParameterKeys { ref section, .. } if section == "short_term_plasticity"
        ));
    }

    #[test]
    fn test_int_does_not_satisfy_float() {
        let supplied = connector_parameters().with("weights", 1_i64);
        let err = check_parameters("Connector", &connector_requirements(), &supplied).unwrap_err();
        assert!(matches!(
            err,
            MozaikError::ParameterTypeMismatch { ref key, ref expected, ref found, .. }
                if key == "weights" && expected == "float" && found == "int"
        ));
    }

    #[test]
    fn test_leaf_where_section_expected() {
        let supplied = connector_parameters().with("short_term_plasticity", "none");
        let err = check_parameters("Connector", &connector_requirements(), &supplied).unwrap_err();
        assert!(matches!(
            err,
            MozaikError::ParameterTypeMismatch { ref expected, .. } if expected == "ParameterSet"
        ));
    }

    #[test]
    fn test_merged_child_overrides_parent() {
        let parent = RequiredParameters::new()
            .with("weights", ParameterKind::Float)
            .with("delay", ParameterKind::Float);
        let child = RequiredParameters::new()
            .with("delay", ParameterKind::Str)
            .with("connection_probability", ParameterKind::Float);
        let merged = parent.merged(&child);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("delay"), Some(&ParameterSpec::Leaf(ParameterKind::Str)));
    }

    #[test]
    fn test_dotted_path_and_flatten() {
        let params = connector_parameters();
        assert_eq!(params.get_f64("short_term_plasticity.U").unwrap(), 0.75);
        assert!(params.get_f64("short_term_plasticity.missing").is_err());
        let flat = params.flatten();
        assert_eq!(flat.len(), 4);
        assert!(flat.contains_key("short_term_plasticity.tau_rec"));
    }

    #[test]
    fn test_json_document_deserializes() {
        let params: ParameterSet =
            serde_json::from_str(r#"{"weights": 0.5, "n": 3, "name": "V1", "nested": {"on": true}}"#).unwrap();
        assert_eq!(params.get("weights"), Some(&ParameterValue::Float(0.5)));
        assert_eq!(params.get("n"), Some(&ParameterValue::Int(3)));
        assert_eq!(params.get_path("nested.on"), Some(&ParameterValue::Bool(true)));
    }
}
