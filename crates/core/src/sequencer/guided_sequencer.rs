use std::path::PathBuf;

use crate::sequencer::pose_zone::PoseZone;
use crate::sequencer::progress::{CaptureProgress, SessionPhase};
use crate::sequencer::qualification::qualify;
use crate::sequencer::thresholds::ZoneThresholds;
use crate::shared::constants::{GUIDANCE_CENTER_FACE, GUIDANCE_COMPLETE_CIRCLE};
use crate::shared::observation::FaceObservation;

/// A capture the sequencer wants performed for one zone, carrying the
/// observation that qualified it.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureRequest {
    pub zone: PoseZone,
    pub observation: FaceObservation,
}

/// What the caller should do after feeding one frame's observations.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDecision {
    /// Captures to perform. Usually empty or one entry; overlapping zone
    /// ranges can yield several in a single frame.
    pub requests: Vec<CaptureRequest>,
    /// Instruction to show the user.
    pub guidance: &'static str,
    pub phase: SessionPhase,
}

/// Drives the five-pose capture flow: classifies each frame's lead face,
/// fires at most one capture per zone per session, and gates the peripheral
/// zones on the center pose having been seen.
pub struct GuidedCaptureSequencer {
    thresholds: ZoneThresholds,
    progress: CaptureProgress,
}

impl GuidedCaptureSequencer {
    pub fn new(thresholds: ZoneThresholds) -> Self {
        Self {
            thresholds,
            progress: CaptureProgress::new(),
        }
    }

    /// Feed one frame's face observations. Only the first face is
    /// considered; detectors report the most prominent face first.
    pub fn evaluate(&mut self, faces: &[FaceObservation]) -> FrameDecision {
        let Some(face) = faces.first() else {
            self.progress.clear_posed();
            return self.decision(Vec::new());
        };

        let qualification = qualify(face, &self.thresholds);
        self.progress.set_posed(&qualification.zones);

        // Establish center before the trigger loop so a frame that
        // qualifies for center and a peripheral at once fires both.
        if qualification.zones.contains(&PoseZone::Center) {
            self.progress.establish_center();
        }

        let mut requests = Vec::new();
        for zone in qualification.zones {
            if self.progress.can_trigger(zone) {
                self.progress.mark_triggered(zone, *face);
                requests.push(CaptureRequest {
                    zone,
                    observation: *face,
                });
            }
        }

        self.decision(requests)
    }

    /// Report the outcome of a previously requested capture. Success pins
    /// the photo path to the zone; failure re-arms the zone for retry.
    pub fn apply_capture_result<E: std::fmt::Display>(
        &mut self,
        zone: PoseZone,
        result: Result<PathBuf, E>,
    ) {
        match result {
            Ok(path) => self.progress.record_photo(zone, path),
            Err(err) => {
                log::warn!("capture for {zone} zone failed, re-arming: {err}");
                self.progress.clear_capture(zone);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn progress(&self) -> &CaptureProgress {
        &self.progress
    }

    /// Discard all capture state and start the flow over.
    pub fn reset(&mut self) {
        self.progress.reset();
    }

    fn decision(&self, requests: Vec<CaptureRequest>) -> FrameDecision {
        let guidance = if self.progress.center_established() {
            GUIDANCE_COMPLETE_CIRCLE
        } else {
            GUIDANCE_CENTER_FACE
        };
        FrameDecision {
            requests,
            guidance,
            phase: self.progress.phase(),
        }
    }
}
