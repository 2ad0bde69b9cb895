use crate::capture::domain::capture_sink::PhotoArtifact;

/// Receives the full photo set exactly once, when all five zones are done.
///
/// Stands in for whatever consumes a finished session: an upload step, a
/// verification backend, a local gallery.
pub trait CompletionSink: Send {
    fn session_complete(&mut self, photos: &[PhotoArtifact]);
}

/// Logs the completed set and does nothing else.
pub struct LoggingCompletionSink;

impl CompletionSink for LoggingCompletionSink {
    fn session_complete(&mut self, photos: &[PhotoArtifact]) {
        log::info!("capture session complete with {} photos", photos.len());
        for photo in photos {
            log::info!("  {}: {}", photo.zone, photo.path.display());
        }
    }
}
