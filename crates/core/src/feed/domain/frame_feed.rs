use crate::shared::frame::Frame;

/// Static properties of a frame feed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
}

/// Ordered supply of frames for a capture session. Implementations wrap a
/// camera stream, a video file, or synthetic frames for testing.
pub trait FrameFeed: Send {
    fn metadata(&self) -> FeedMetadata;

    /// Frames in presentation order, with monotonically increasing indices.
    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;
}
