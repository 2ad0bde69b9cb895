/// Run pose evaluation every Nth camera frame.
///
/// Sampling detections at ~10/second against a 30 fps camera bounds
/// detection work without making the flow feel unresponsive.
pub const DEFAULT_SAMPLE_INTERVAL: usize = 3;

/// Bounded-channel capacity between session threads.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Guidance shown until a centered pose has been seen.
pub const GUIDANCE_CENTER_FACE: &str = "Position your face within the frame";

/// Guidance shown once the center pose is established.
pub const GUIDANCE_COMPLETE_CIRCLE: &str = "Move your head slowly to complete the circle";
