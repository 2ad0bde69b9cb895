use serde::{Deserialize, Serialize};

/// Face bounding box in screen units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One detected face's attributes for a single frame.
///
/// Angles are signed degrees as reported by the detector: yaw is rotation
/// around the vertical axis (positive = turned left from the camera's point
/// of view), pitch around the horizontal axis (positive = looking up), roll
/// the in-plane tilt. Immutable; discarded after evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounds: BoundingBox,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl FaceObservation {
    pub fn new(bounds: BoundingBox, yaw: f64, pitch: f64, roll: f64) -> Self {
        Self {
            bounds,
            yaw,
            pitch,
            roll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounding_box_center() {
        let b = BoundingBox::new(100.0, 200.0, 50.0, 80.0);
        let (cx, cy) = b.center();
        assert_relative_eq!(cx, 125.0);
        assert_relative_eq!(cy, 240.0);
    }

    #[test]
    fn test_bounding_box_center_degenerate() {
        let b = BoundingBox::new(10.0, 20.0, 0.0, 0.0);
        assert_eq!(b.center(), (10.0, 20.0));
    }

    #[test]
    fn test_observation_json_round_trip() {
        let obs = FaceObservation::new(BoundingBox::new(1.0, 2.0, 3.0, 4.0), 10.5, -2.0, 0.0);
        let json = serde_json::to_string(&obs).unwrap();
        let back: FaceObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
    }
}
