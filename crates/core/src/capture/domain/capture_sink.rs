use std::path::PathBuf;

use crate::sequencer::pose_zone::PoseZone;

/// A photo persisted for one zone.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoArtifact {
    pub zone: PoseZone,
    pub path: PathBuf,
}

/// Takes and persists a photo for a zone. Runs on the capture worker
/// thread, so errors must cross the thread boundary.
pub trait CaptureSink: Send {
    fn capture(
        &mut self,
        zone: PoseZone,
    ) -> Result<PhotoArtifact, Box<dyn std::error::Error + Send + Sync>>;
}
