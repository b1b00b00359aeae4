// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! # Mozaik
//!
//! Visual stimuli and analysis data structures for simulated visual systems.
//!
//! ## Feature Flags
//!
//! - **`stimuli`** (default): lazy frame streams, the stimulus player, gratings, PNG export
//! - **`analysis`** (default): tuning curves, per-neuron values, signal lists and queries
//! - **`framework`** (default): parametrized components, arborization kernels, connectors
//! - **`file-logging`**: run folders with rolling JSON log files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mozaik::prelude::*;
//!
//! let config = mozaik::config::load_config(None, None).expect("Failed to load config");
//! let parameters = mozaik::stimulus_parameters(&config).expect("Invalid stimulus defaults");
//! let grating = DriftingSinusoidalGrating::new(parameters, GratingSettings::default()).unwrap();
//! let mut player = StimulusPlayer::new(grating).unwrap();
//! while player.is_visible() && player.frame_index() < 10 {
//!     player.update().unwrap();
//! }
//! ```

// Re-export foundation
pub use mozaik_config as config;
pub use mozaik_observability as observability;
pub use mozaik_structures as structures;

#[cfg(feature = "stimuli")]
pub use mozaik_stimuli as stimuli;

#[cfg(feature = "analysis")]
pub use mozaik_analysis as analysis;

#[cfg(feature = "framework")]
pub use mozaik_framework as framework;

use mozaik_config::MozaikConfig;
use mozaik_observability::LoggingConfig;

/// Console logging settings from the `[logging]` section.
pub fn logging_config(config: &MozaikConfig) -> LoggingConfig {
    LoggingConfig::from_level_and_format(&config.logging.level, &config.logging.format)
}

/// Stimulus parameters from the `[stimulus]` section.
#[cfg(feature = "stimuli")]
pub fn stimulus_parameters(config: &MozaikConfig) -> structures::MozaikResult<stimuli::StimulusParameters> {
    let s = &config.stimulus;
    stimuli::StimulusParameters::new(s.frame_duration, s.size_in_degrees, s.location, s.max_luminance)
}

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::structures::{
        check_parameters, MozaikError, MozaikResult, ParameterKind, ParameterSet, ParameterValue,
        RequiredParameters, StimulusId, Units,
    };

    #[cfg(feature = "stimuli")]
    pub use crate::stimuli::{
        DriftingSinusoidalGrating, Frame, GratingSettings, StimulusParameters, StimulusPlayer,
        UniformLuminance, VisualStimulus, TRANSPARENT,
    };

    #[cfg(feature = "analysis")]
    pub use crate::analysis::{
        AdsParams, AdsQuery, AnalysisDataStructure, AnalysisResults, CyclicTuningCurve, PerNeuronValue,
        TuningCurve,
    };

    #[cfg(feature = "framework")]
    pub use crate::framework::{
        ArborizationKernel, ConnectorRegistry, Network, Parametrized, SheetGeometry, VisualSystemConnector,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_bridges() {
        let config = MozaikConfig::default();
        let logging = logging_config(&config);
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, observability::LogFormat::Text);

        #[cfg(feature = "stimuli")]
        {
            let parameters = stimulus_parameters(&config).unwrap();
            assert_eq!(parameters.max_luminance, config.stimulus.max_luminance);
            assert_eq!(parameters.size_in_degrees, (10.0, 10.0));
        }
    }

    #[cfg(feature = "stimuli")]
    #[test]
    fn test_invalid_stimulus_section_rejected() {
        let mut config = MozaikConfig::default();
        config.stimulus.frame_duration = 0.0;
        assert!(stimulus_parameters(&config).is_err());
    }
}
