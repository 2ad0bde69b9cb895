//! Guided five-pose face capture.
//!
//! Consumes a stream of per-frame face-pose observations and turns it into
//! at most five capture events (center, left, right, upper, bottom). The
//! camera pipeline, the face-detection model, and the transport of the
//! captured artifacts are external collaborators behind trait seams.

pub mod capture;
pub mod detection;
pub mod feed;
pub mod sequencer;
pub mod session;
pub mod shared;
