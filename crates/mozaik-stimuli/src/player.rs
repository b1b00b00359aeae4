// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

//! Presentation state of a stimulus: the current frame, visibility, and the stream the
//! next frames come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::{debug, info};
use mozaik_structures::{MozaikError, MozaikResult};

use crate::export::write_frames_as_png;
use crate::{Frame, FrameStream, VisualObject, VisualStimulus};

/// Plays a [`VisualStimulus`] frame by frame.
///
/// Construction pulls the first frame. Every [`StimulusPlayer::update`] pulls the next one
/// and validates it against the luminance range of the stimulus. When the stream is
/// exhausted the player turns invisible and keeps showing the last frame.
pub struct StimulusPlayer<S: VisualStimulus> {
    stimulus: S,
    object: VisualObject,
    frames: FrameStream,
    current: Option<Frame>,
    frame_index: usize,
    zoom_cache: HashMap<u32, Array2<f64>>,
}

impl<S: VisualStimulus> StimulusPlayer<S> {
    pub fn new(stimulus: S) -> MozaikResult<Self> {
        let parameters = *stimulus.parameters();
        info!(
            target: "mozaik-stimuli",
            "Presenting {} at {:?} ({:?} deg, max luminance {})",
            stimulus.stimulus_id(),
            parameters.location,
            parameters.size_in_degrees,
            parameters.max_luminance
        );
        let frames = stimulus.frames();
        let mut player = StimulusPlayer {
            object: VisualObject::new(parameters.location, parameters.size_in_degrees),
            stimulus,
            frames,
            current: None,
            frame_index: 0,
            zoom_cache: HashMap::new(),
        };
        player.update()?;
        Ok(player)
    }

    /// Advances to the next frame of the sequence.
    pub fn update(&mut self) -> MozaikResult<()> {
        self.zoom_cache.clear();
        match self.frames.next() {
            None => {
                if self.object.visible {
                    debug!(
                        target: "mozaik-stimuli",
                        "{} exhausted after {} frames",
                        self.stimulus.name(),
                        self.frame_index
                    );
                }
                self.object.visible = false;
            }
            Some(frame) => {
                frame.validate_luminance(self.stimulus.parameters().max_luminance)?;
                self.current = Some(frame);
                self.frame_index += 1;
            }
        }
        Ok(())
    }

    /// Restarts the sequence at its first frame.
    pub fn reset(&mut self) -> MozaikResult<()> {
        debug!(target: "mozaik-stimuli", "Resetting {}", self.stimulus.name());
        self.object.visible = true;
        self.frames = self.stimulus.frames();
        self.current = None;
        self.frame_index = 0;
        self.update()
    }

    /// Advances and returns the new current image; used when assembling movies.
    pub fn next_frame(&mut self) -> MozaikResult<Option<&Array2<f64>>> {
        self.update()?;
        Ok(self.current_image())
    }

    pub fn current_image(&self) -> Option<&Array2<f64>> {
        self.current.as_ref().map(|f| &f.img)
    }

    pub fn current_variables(&self) -> Option<&[f64]> {
        self.current.as_ref().map(|f| f.variables.as_slice())
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    /// Number of frames pulled from the current stream.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_visible(&self) -> bool {
        self.object.visible
    }

    pub fn visual_object(&self) -> &VisualObject {
        &self.object
    }

    pub fn stimulus(&self) -> &S {
        &self.stimulus
    }

    /// Nearest-neighbour enlargement of the current image, cached until the next update.
    pub fn zoomed(&mut self, factor: u32) -> MozaikResult<&Array2<f64>> {
        if factor == 0 {
            return Err(MozaikError::BadParameters("Zoom factor must be at least 1".into()));
        }
        if !self.zoom_cache.contains_key(&factor) {
            let image = self
                .current_image()
                .ok_or_else(|| MozaikError::BadParameters("Stimulus has no frame to zoom".into()))?;
            let zoomed = zoom(image, factor as usize);
            self.zoom_cache.insert(factor, zoomed);
        }
        self.zoom_cache
            .get(&factor)
            .ok_or_else(|| MozaikError::InternalError("zoom cache entry missing".into()))
    }

    /// Writes up to `max_frames` frames of a fresh stream to PNG files.
    ///
    /// Without `path` a temporary directory is created and kept. Returns the paths of the
    /// individual frames in order.
    pub fn export(&self, path: Option<&Path>, max_frames: usize) -> MozaikResult<Vec<PathBuf>> {
        let directory = match path {
            Some(p) => {
                std::fs::create_dir_all(p)?;
                p.to_path_buf()
            }
            None => tempfile::Builder::new()
                .prefix(&format!("{}_", self.stimulus.name()))
                .tempdir()?
                .keep(),
        };
        let written = write_frames_as_png(
            self.stimulus.frames().take(max_frames),
            &directory,
            self.stimulus.name(),
            self.stimulus.parameters().max_luminance,
        )?;
        info!(
            target: "mozaik-stimuli",
            "Exported {} frames of {} to {}",
            written.len(),
            self.stimulus.name(),
            directory.display()
        );
        Ok(written)
    }
}

fn zoom(image: &Array2<f64>, factor: usize) -> Array2<f64> {
    let (rows, cols) = image.dim();
    Array2::from_shape_fn((rows * factor, cols * factor), |(r, c)| image[[r / factor, c / factor]])
}
