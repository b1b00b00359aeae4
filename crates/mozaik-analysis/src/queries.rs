// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Filters over collections of analysis data structures.

use mozaik_structures::{ParameterSet, ParameterValue};

use crate::AnalysisDataStructure;

/// Selects analysis data structures by their identifying parameters and tags.
///
/// Every criterion that is set must hold; a structure matches the tag criterion when it
/// carries all of the requested tags.
///
/// ```
/// use mozaik_analysis::AdsQuery;
///
/// let query = AdsQuery::new()
///     .identifier("PerNeuronValue")
///     .sheet_name("V1_Exc_L4")
///     .tag("orientation");
/// assert!(query.has_criteria());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdsQuery {
    identifier: Option<String>,
    analysis_algorithm: Option<String>,
    sheet_name: Option<String>,
    tags: Vec<String>,
    parameters: ParameterSet,
}

impl AdsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    pub fn analysis_algorithm(mut self, analysis_algorithm: &str) -> Self {
        self.analysis_algorithm = Some(analysis_algorithm.to_string());
        self
    }

    pub fn sheet_name(mut self, sheet_name: &str) -> Self {
        self.sheet_name = Some(sheet_name.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Requires the identifying parameter `key` (e.g. `value_name`) to equal `value`.
    pub fn parameter(mut self, key: &str, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    pub fn has_criteria(&self) -> bool {
        self.identifier.is_some()
            || self.analysis_algorithm.is_some()
            || self.sheet_name.is_some()
            || !self.tags.is_empty()
            || !self.parameters.is_empty()
    }

    pub fn matches<T: AnalysisDataStructure + ?Sized>(&self, ads: &T) -> bool {
        if let Some(identifier) = &self.identifier {
            if ads.identifier() != identifier {
                return false;
            }
        }
        if let Some(algorithm) = &self.analysis_algorithm {
            if ads.analysis_algorithm() != algorithm {
                return false;
            }
        }
        if let Some(sheet_name) = &self.sheet_name {
            if ads.sheet_name() != Some(sheet_name.as_str()) {
                return false;
            }
        }
        if !ads.has_all_tags(&self.tags) {
            return false;
        }
        if !self.parameters.is_empty() {
            let own = ads.parameters();
            return self.parameters.iter().all(|(key, value)| own.get(key) == Some(value));
        }
        true
    }

    /// Matching structures in their original order.
    pub fn filter<'a, T: AnalysisDataStructure>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}
