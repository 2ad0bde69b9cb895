pub mod guided_sequencer;
pub mod pose_zone;
pub mod progress;
pub mod qualification;
pub mod thresholds;
