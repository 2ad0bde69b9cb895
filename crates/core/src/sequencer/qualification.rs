use crate::sequencer::pose_zone::PoseZone;
use crate::sequencer::thresholds::ZoneThresholds;
use crate::shared::observation::FaceObservation;

/// Result of classifying one observation against the threshold table.
///
/// Derived, never stored: a pure function of the observation and the
/// configured thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneQualification {
    /// Whether the face center fell inside the proximity window.
    pub centered: bool,
    /// Zones whose angle ranges the observation satisfies, in evaluation
    /// priority order. Empty when `centered` is false. The ranges overlap,
    /// so one observation can satisfy more than one zone.
    pub zones: Vec<PoseZone>,
}

impl ZoneQualification {
    fn outside_window() -> Self {
        Self {
            centered: false,
            zones: Vec::new(),
        }
    }
}

/// Classify a face observation. Faces outside the proximity window qualify
/// for nothing, regardless of angles.
pub fn qualify(observation: &FaceObservation, thresholds: &ZoneThresholds) -> ZoneQualification {
    let (cx, cy) = observation.bounds.center();
    if !thresholds.proximity.admits(cx, cy) {
        return ZoneQualification::outside_window();
    }

    let zones = PoseZone::ALL
        .into_iter()
        .filter(|zone| satisfies(*zone, observation, thresholds))
        .collect();

    ZoneQualification {
        centered: true,
        zones,
    }
}

fn satisfies(zone: PoseZone, obs: &FaceObservation, t: &ZoneThresholds) -> bool {
    match zone {
        PoseZone::Center => {
            t.center_roll.contains(obs.roll)
                && t.center_pitch.contains(obs.pitch)
                && t.center_yaw.contains(obs.yaw)
        }
        PoseZone::Left => t.left_yaw.contains(obs.yaw) && t.left_pitch.contains(obs.pitch),
        PoseZone::Right => t.right_yaw.contains(obs.yaw) && t.right_pitch.contains(obs.pitch),
        PoseZone::Upper => {
            t.upper_pitch.contains(obs.pitch)
                && t.upper_yaw.contains(obs.yaw)
                && t.upper_roll.contains(obs.roll)
        }
        PoseZone::Bottom => {
            t.bottom_pitch.contains(obs.pitch)
                && t.bottom_yaw.contains(obs.yaw)
                && t.bottom_roll.contains(obs.roll)
        }
    }
}
