use std::path::PathBuf;

use image::{ImageBuffer, Rgb};

use crate::capture::domain::capture_sink::{CaptureSink, PhotoArtifact};
use crate::sequencer::pose_zone::PoseZone;

/// Writes one placeholder PNG per zone into an output directory.
///
/// A deployment with a real camera would grab the live frame here; this
/// sink exercises the same file lifecycle without one.
pub struct PngCaptureSink {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl PngCaptureSink {
    pub fn new(output_dir: PathBuf, width: u32, height: u32) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            width,
            height,
        })
    }
}

impl CaptureSink for PngCaptureSink {
    fn capture(
        &mut self,
        zone: PoseZone,
    ) -> Result<PhotoArtifact, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.output_dir.join(format!("face_{zone}.png"));
        let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(self.width, self.height, Rgb([128u8, 128, 128]));
        image.save(&path)?;
        Ok(PhotoArtifact { zone, path })
    }
}
