use crate::shared::frame::Frame;
use crate::shared::observation::FaceObservation;

/// Produces face observations for a frame.
///
/// Implementations wrap an actual detector model or replay recorded
/// detections. Observations are ordered by prominence: the first entry is
/// the face the capture flow acts on.
pub trait FaceSource: Send {
    fn observe(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>>;
}
