use std::path::PathBuf;

use crate::sequencer::pose_zone::PoseZone;
use crate::shared::observation::FaceObservation;

/// Capture lifecycle of a single zone.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ZoneStatus {
    #[default]
    NotCaptured,
    /// Capture requested, photo not yet back from the sink. Counts as
    /// captured for re-trigger purposes so the zone cannot fire again
    /// while its capture is in flight.
    Triggered,
    Done(PathBuf),
}

/// Coarse session phase derived from zone statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    CenterEstablished,
    /// 1-4 of the peripheral zones captured.
    PartiallyComplete(u8),
    Complete,
}

/// Per-session capture state. Created at session start, mutated only by the
/// sequencer, reset when the session restarts.
#[derive(Clone, Debug, Default)]
pub struct CaptureProgress {
    statuses: [ZoneStatus; PoseZone::COUNT],
    snapshots: [Option<FaceObservation>; PoseZone::COUNT],
    /// Transient "currently posed" markers, cleared on face loss.
    posed: [bool; PoseZone::COUNT],
    center_established: bool,
}

impl CaptureProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, zone: PoseZone) -> &ZoneStatus {
        &self.statuses[zone.index()]
    }

    /// The observation that triggered the zone's capture, if any.
    pub fn snapshot(&self, zone: PoseZone) -> Option<&FaceObservation> {
        self.snapshots[zone.index()].as_ref()
    }

    pub fn center_established(&self) -> bool {
        self.center_established
    }

    pub fn establish_center(&mut self) {
        self.center_established = true;
    }

    /// Whether a capture may fire for this zone now: the zone must be
    /// uncaptured, and peripherals additionally require an established
    /// center pose.
    pub fn can_trigger(&self, zone: PoseZone) -> bool {
        let gated = zone == PoseZone::Center || self.center_established;
        gated && self.statuses[zone.index()] == ZoneStatus::NotCaptured
    }

    pub fn mark_triggered(&mut self, zone: PoseZone, snapshot: FaceObservation) {
        self.statuses[zone.index()] = ZoneStatus::Triggered;
        self.snapshots[zone.index()] = Some(snapshot);
    }

    pub fn record_photo(&mut self, zone: PoseZone, path: PathBuf) {
        self.statuses[zone.index()] = ZoneStatus::Done(path);
    }

    /// A failed capture returns the zone to uncaptured so a later
    /// qualifying frame retries it. The center flag is not cleared: the
    /// user has already demonstrated the pose.
    pub fn clear_capture(&mut self, zone: PoseZone) {
        self.statuses[zone.index()] = ZoneStatus::NotCaptured;
        self.snapshots[zone.index()] = None;
    }

    pub fn set_posed(&mut self, zones: &[PoseZone]) {
        self.posed = [false; PoseZone::COUNT];
        for zone in zones {
            self.posed[zone.index()] = true;
        }
    }

    /// Face lost: forget which zones are currently posed, never what has
    /// been captured.
    pub fn clear_posed(&mut self) {
        self.posed = [false; PoseZone::COUNT];
    }

    pub fn is_posed(&self, zone: PoseZone) -> bool {
        self.posed[zone.index()]
    }

    /// Zones with a photo on disk.
    pub fn done_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| matches!(s, ZoneStatus::Done(_)))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.done_count() == PoseZone::COUNT
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_complete() {
            return SessionPhase::Complete;
        }
        if !self.center_established {
            return SessionPhase::Idle;
        }
        let peripherals = PoseZone::ALL
            .into_iter()
            .filter(|z| *z != PoseZone::Center)
            .filter(|z| self.statuses[z.index()] != ZoneStatus::NotCaptured)
            .count() as u8;
        if peripherals == 0 {
            SessionPhase::CenterEstablished
        } else {
            SessionPhase::PartiallyComplete(peripherals)
        }
    }

    /// Captured photo paths in zone priority order.
    pub fn photo_paths(&self) -> Vec<(PoseZone, PathBuf)> {
        PoseZone::ALL
            .into_iter()
            .filter_map(|zone| match &self.statuses[zone.index()] {
                ZoneStatus::Done(path) => Some((zone, path.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::observation::BoundingBox;

    fn obs() -> FaceObservation {
        FaceObservation::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_peripherals_gated_on_center() {
        let mut p = CaptureProgress::new();
        assert!(p.can_trigger(PoseZone::Center));
        assert!(!p.can_trigger(PoseZone::Left));
        assert!(!p.can_trigger(PoseZone::Bottom));

        p.establish_center();
        assert!(p.can_trigger(PoseZone::Left));
        assert!(p.can_trigger(PoseZone::Bottom));
    }

    #[test]
    fn test_triggered_zone_cannot_retrigger() {
        let mut p = CaptureProgress::new();
        p.establish_center();
        p.mark_triggered(PoseZone::Left, obs());
        assert!(!p.can_trigger(PoseZone::Left));

        p.record_photo(PoseZone::Left, PathBuf::from("/tmp/left.png"));
        assert!(!p.can_trigger(PoseZone::Left));
    }

    #[test]
    fn test_failed_capture_rearms_zone_but_keeps_center_flag() {
        let mut p = CaptureProgress::new();
        p.establish_center();
        p.mark_triggered(PoseZone::Center, obs());
        p.clear_capture(PoseZone::Center);

        assert!(p.can_trigger(PoseZone::Center));
        assert!(p.center_established());
        assert!(p.snapshot(PoseZone::Center).is_none());
    }

    #[test]
    fn test_posed_markers_cleared_independently_of_captures() {
        let mut p = CaptureProgress::new();
        p.establish_center();
        p.mark_triggered(PoseZone::Left, obs());
        p.set_posed(&[PoseZone::Left]);
        assert!(p.is_posed(PoseZone::Left));

        p.clear_posed();
        assert!(!p.is_posed(PoseZone::Left));
        assert_eq!(*p.status(PoseZone::Left), ZoneStatus::Triggered);
    }

    #[test]
    fn test_phase_progression() {
        let mut p = CaptureProgress::new();
        assert_eq!(p.phase(), SessionPhase::Idle);

        p.establish_center();
        p.mark_triggered(PoseZone::Center, obs());
        assert_eq!(p.phase(), SessionPhase::CenterEstablished);

        p.mark_triggered(PoseZone::Left, obs());
        assert_eq!(p.phase(), SessionPhase::PartiallyComplete(1));

        p.mark_triggered(PoseZone::Right, obs());
        p.mark_triggered(PoseZone::Upper, obs());
        p.mark_triggered(PoseZone::Bottom, obs());
        assert_eq!(p.phase(), SessionPhase::PartiallyComplete(4));

        for zone in PoseZone::ALL {
            p.record_photo(zone, PathBuf::from(format!("/tmp/{zone}.png")));
        }
        assert_eq!(p.phase(), SessionPhase::Complete);
        assert!(p.is_complete());
    }

    #[test]
    fn test_triggered_does_not_count_as_done() {
        let mut p = CaptureProgress::new();
        p.establish_center();
        for zone in PoseZone::ALL {
            p.mark_triggered(zone, obs());
        }
        assert_eq!(p.done_count(), 0);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_photo_paths_in_priority_order() {
        let mut p = CaptureProgress::new();
        p.establish_center();
        p.record_photo(PoseZone::Bottom, PathBuf::from("/tmp/bottom.png"));
        p.record_photo(PoseZone::Center, PathBuf::from("/tmp/center.png"));

        let paths = p.photo_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].0, PoseZone::Center);
        assert_eq!(paths[1].0, PoseZone::Bottom);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut p = CaptureProgress::new();
        p.establish_center();
        p.mark_triggered(PoseZone::Center, obs());
        p.record_photo(PoseZone::Center, PathBuf::from("/tmp/center.png"));

        p.reset();
        assert_eq!(p.phase(), SessionPhase::Idle);
        assert!(!p.center_established());
        assert_eq!(*p.status(PoseZone::Center), ZoneStatus::NotCaptured);
    }
}
