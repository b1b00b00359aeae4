// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use mozaik_structures::{ParameterSet, ParameterValue};

/// Identifying parameters shared by every analysis data structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdsHeader {
    pub identifier: String,
    pub analysis_algorithm: String,
    pub tags: Vec<String>,
}

/// Optional identifying parameters accepted by every ADS constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdsParams {
    pub analysis_algorithm: String,
    pub tags: Vec<String>,
    pub sheet_name: Option<String>,
}

impl AdsParams {
    pub fn new(analysis_algorithm: &str) -> Self {
        AdsParams {
            analysis_algorithm: analysis_algorithm.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sheet(mut self, sheet_name: &str) -> Self {
        self.sheet_name = Some(sheet_name.to_string());
        self
    }

    pub(crate) fn into_header(self, identifier: &str) -> (AdsHeader, Option<String>) {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        (
            AdsHeader {
                identifier: identifier.to_string(),
                analysis_algorithm: self.analysis_algorithm,
                tags,
            },
            self.sheet_name,
        )
    }
}

/// Common interface of all analysis data structures.
pub trait AnalysisDataStructure {
    fn header(&self) -> &AdsHeader;

    fn header_mut(&mut self) -> &mut AdsHeader;

    /// Sheet the data were recorded in, for structures that belong to one.
    fn sheet_name(&self) -> Option<&str> {
        None
    }

    /// Identifying parameters specific to the structure (axis and value names).
    fn extra_parameters(&self) -> ParameterSet {
        ParameterSet::new()
    }

    fn identifier(&self) -> &str {
        &self.header().identifier
    }

    fn analysis_algorithm(&self) -> &str {
        &self.header().analysis_algorithm
    }

    fn tags(&self) -> &[String] {
        &self.header().tags
    }

    fn add_tag(&mut self, tag: &str) {
        let tags = &mut self.header_mut().tags;
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|tag| self.tags().contains(tag))
    }

    /// All identifying parameters as one set; this is what parameter filter queries match on.
    fn parameters(&self) -> ParameterSet {
        let header = self.header();
        let mut parameters = ParameterSet::new()
            .with("identifier", header.identifier.as_str())
            .with("analysis_algorithm", header.analysis_algorithm.as_str())
            .with(
                "tags",
                ParameterValue::List(header.tags.iter().map(|t| ParameterValue::from(t.as_str())).collect()),
            );
        if let Some(sheet_name) = self.sheet_name() {
            parameters.insert("sheet_name", sheet_name);
        }
        parameters.update(&self.extra_parameters());
        parameters
    }
}
