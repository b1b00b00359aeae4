// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! # mozaik-stimuli
//!
//! Visual stimuli rendered frame by frame for feeding into simulated visual systems.
//!
//! A [`VisualStimulus`] describes *what* is shown and hands out a fresh lazy
//! [`FrameStream`] on every call to [`VisualStimulus::frames`]. A [`StimulusPlayer`]
//! walks that stream one frame at a time, validates every frame against the luminance
//! range of the stimulus and keeps track of visibility once the stream runs dry.

mod export;
mod frame;
pub mod grating;
mod player;
mod stimulus;
pub mod uniform;
mod visual_object;

pub use export::write_frames_as_png;
pub use frame::{Frame, FrameStream};
pub use grating::{DriftingSinusoidalGrating, GratingSettings};
pub use player::StimulusPlayer;
pub use stimulus::{StimulusParameters, VisualStimulus};
pub use uniform::UniformLuminance;
pub use visual_object::{VisualObject, TRANSPARENT};
