use crate::feed::domain::frame_feed::{FeedMetadata, FrameFeed};
use crate::shared::frame::Frame;

/// Generates flat mid-gray RGB frames. The pixel content is irrelevant when
/// detections come from a recorded trace; only indices and dimensions matter.
pub struct SyntheticFeed {
    metadata: FeedMetadata,
}

impl SyntheticFeed {
    pub fn new(width: u32, height: u32, fps: f64, total_frames: usize) -> Self {
        Self {
            metadata: FeedMetadata {
                width,
                height,
                fps,
                total_frames,
            },
        }
    }
}

impl FrameFeed for SyntheticFeed {
    fn metadata(&self) -> FeedMetadata {
        self.metadata
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let FeedMetadata {
            width,
            height,
            total_frames,
            ..
        } = self.metadata;
        let pixels = width as usize * height as usize * 3;
        Box::new((0..total_frames).map(move |index| {
            Ok(Frame::new(vec![128u8; pixels], width, height, 3, index))
        }))
    }
}
