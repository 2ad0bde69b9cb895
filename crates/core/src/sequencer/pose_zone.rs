use serde::{Deserialize, Serialize};

/// One of the five head orientations the user must present for capture.
///
/// Fixed set, never extended at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseZone {
    Center,
    Left,
    Right,
    Upper,
    Bottom,
}

impl PoseZone {
    /// All zones in evaluation priority order.
    pub const ALL: [PoseZone; 5] = [
        PoseZone::Center,
        PoseZone::Left,
        PoseZone::Right,
        PoseZone::Upper,
        PoseZone::Bottom,
    ];

    pub const COUNT: usize = 5;

    /// Stable position in [`PoseZone::ALL`], used for array-backed state.
    pub fn index(self) -> usize {
        match self {
            PoseZone::Center => 0,
            PoseZone::Left => 1,
            PoseZone::Right => 2,
            PoseZone::Upper => 3,
            PoseZone::Bottom => 4,
        }
    }
}

impl std::fmt::Display for PoseZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoseZone::Center => write!(f, "center"),
            PoseZone::Left => write!(f, "left"),
            PoseZone::Right => write!(f, "right"),
            PoseZone::Upper => write!(f, "upper"),
            PoseZone::Bottom => write!(f, "bottom"),
        }
    }
}
