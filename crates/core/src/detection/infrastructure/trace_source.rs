use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::face_source::FaceSource;
use crate::shared::frame::Frame;
use crate::shared::observation::FaceObservation;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to read trace from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid trace JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Replays pre-recorded face observations, indexed by frame number.
///
/// The trace format is a JSON array of per-frame observation arrays.
/// Frames beyond the end of the trace yield no faces, so a session over a
/// longer feed simply sees the face disappear.
#[derive(Debug)]
pub struct TraceFaceSource {
    frames: Vec<Vec<FaceObservation>>,
}

impl TraceFaceSource {
    pub fn new(frames: Vec<Vec<FaceObservation>>) -> Self {
        Self { frames }
    }

    pub fn from_json(text: &str) -> Result<Self, TraceError> {
        let frames = serde_json::from_str(text)?;
        Ok(Self { frames })
    }

    pub fn from_file(path: &Path) -> Result<Self, TraceError> {
        let text = fs::read_to_string(path).map_err(|source| TraceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FaceSource for TraceFaceSource {
    fn observe(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>> {
        Ok(self.frames.get(frame.index()).cloned().unwrap_or_default())
    }
}
