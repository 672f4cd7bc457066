use serde::{Serialize, Deserialize};

/// One labeled slice of the wheel
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Segment {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Segments in wheel order, starting at twelve o'clock and going clockwise.
/// The index into this table is the stable identity of an outcome.
pub const SEGMENTS: [Segment; 6] = [
    Segment { label: "500%", color: "#1E1622", icon: "/crown.webp" },
    Segment { label: "100 FS", color: "#CE1C1B", icon: "/three-sevens.webp" },
    Segment { label: "Try again", color: "#6501CD", icon: "/crown.webp" },
    Segment { label: "10 CAP", color: "#02503B", icon: "/wad.webp" },
    Segment { label: "200%", color: "#AA0808", icon: "/diamond.webp" },
    Segment { label: "50 FS", color: "#012E21", icon: "/three-sevens.webp" },
];

pub const REWARD_SEGMENT: usize = 0;
pub const TRY_AGAIN_SEGMENT: usize = 2;

/// Spins a visitor gets in total
pub const MAX_SPINS: u32 = 2;

/// Where the wheel has to stop for a given attempt and how many full turns it makes first
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledOutcome {
    pub segment: usize,
    pub full_rotations: u32,
}

impl ScheduledOutcome {
    pub fn is_reward(&self) -> bool {
        self.segment == REWARD_SEGMENT
    }

    pub fn label(&self) -> &'static str {
        SEGMENTS[self.segment].label
    }
}

/// Maps a 1-based attempt number to its scripted outcome.
///
/// The first attempt always lands on "Try again", the second on the reward.
/// Nothing is scheduled past `MAX_SPINS`.
pub fn schedule_outcome(attempt: u32) -> Option<ScheduledOutcome> {
    match attempt {
        1 => Some(ScheduledOutcome { segment: TRY_AGAIN_SEGMENT, full_rotations: 4 }),
        2 => Some(ScheduledOutcome { segment: REWARD_SEGMENT, full_rotations: 8 }),
        _ => None,
    }
}

/// Angle math for turning a segment index into a wheel rotation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub segment_count: usize,
    /// Cosmetic correction for faces whose artwork is not aligned to twelve o'clock
    pub offset_deg: f64,
}

impl WheelGeometry {
    pub fn new(offset_deg: f64) -> Self {
        Self {
            segment_count: SEGMENTS.len(),
            offset_deg,
        }
    }

    pub fn segment_deg(&self) -> f64 {
        360.0 / self.segment_count as f64
    }

    /// Rotation that puts the middle of `index` under the pointer
    pub fn rest_angle(&self, index: usize) -> f64 {
        let seg = self.segment_deg();
        360.0 - (index as f64 * seg + seg / 2.0) + self.offset_deg
    }

    pub fn final_angle(&self, outcome: &ScheduledOutcome) -> f64 {
        outcome.full_rotations as f64 * 360.0 + self.rest_angle(outcome.segment)
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Radius of the bulb ring, in percent of the wheel container, for a viewport width.
pub fn bulb_radius_percent(viewport_width: f64) -> f64 {
    if viewport_width < 768.0 {
        46.0
    } else if viewport_width < 1280.0 {
        44.8
    } else {
        43.7
    }
}

/// `(left%, top%)` of each decorative bulb, first one at twelve o'clock.
pub fn bulb_positions(count: u32, viewport_width: f64) -> Vec<(f64, f64)> {
    let radius = bulb_radius_percent(viewport_width);
    let start = -90.0_f64;

    (0..count)
        .map(|i| {
            let angle = start + (360.0 / count as f64) * i as f64;
            let radian = angle.to_radians();
            (50.0 + radius * radian.cos(), 50.0 + radius * radian.sin())
        })
        .collect()
}

// Constants for frontend animation
pub const SPIN_DURATION_MS: u32 = 7000;
pub const SPIN_EASING: &str = "cubic-bezier(0.17,0.67,0.12,0.99)";
pub const IMAGE_FACE_OFFSET_DEG: f64 = 30.0;
pub const BULB_COUNT: u32 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_is_try_again() {
        let outcome = schedule_outcome(1).unwrap();
        assert_eq!(outcome.segment, TRY_AGAIN_SEGMENT);
        assert_eq!(outcome.full_rotations, 4);
        assert_eq!(outcome.label(), "Try again");
        assert!(!outcome.is_reward());
    }

    #[test]
    fn test_second_attempt_is_reward() {
        let outcome = schedule_outcome(2).unwrap();
        assert_eq!(outcome.segment, REWARD_SEGMENT);
        assert_eq!(outcome.full_rotations, 8);
        assert_eq!(outcome.label(), "500%");
        assert!(outcome.is_reward());
    }

    #[test]
    fn test_nothing_scheduled_outside_limit() {
        assert_eq!(schedule_outcome(0), None);
        assert_eq!(schedule_outcome(3), None);
        assert_eq!(schedule_outcome(u32::MAX), None);
    }

    #[test]
    fn test_schedule_is_deterministic() {
        for _ in 0..10 {
            assert_eq!(schedule_outcome(1), schedule_outcome(1));
            assert_eq!(schedule_outcome(2), schedule_outcome(2));
        }
    }

    #[test]
    fn test_rest_angles() {
        let canvas = WheelGeometry::default();
        assert_eq!(canvas.segment_deg(), 60.0);
        assert_eq!(canvas.rest_angle(0), 330.0);
        assert_eq!(canvas.rest_angle(2), 210.0);

        let image = WheelGeometry::new(IMAGE_FACE_OFFSET_DEG);
        assert_eq!(image.rest_angle(0), 360.0);
        assert_eq!(image.rest_angle(2), 240.0);
    }

    #[test]
    fn test_final_angle_adds_full_turns() {
        let geometry = WheelGeometry::new(IMAGE_FACE_OFFSET_DEG);
        let first = schedule_outcome(1).unwrap();
        let second = schedule_outcome(2).unwrap();
        assert_eq!(geometry.final_angle(&first), 4.0 * 360.0 + 240.0);
        assert_eq!(geometry.final_angle(&second), 8.0 * 360.0 + 360.0);
    }

    #[test]
    fn test_bulb_ring() {
        assert_eq!(bulb_radius_percent(500.0), 46.0);
        assert_eq!(bulb_radius_percent(1024.0), 44.8);
        assert_eq!(bulb_radius_percent(1920.0), 43.7);

        let bulbs = bulb_positions(BULB_COUNT, 500.0);
        assert_eq!(bulbs.len(), 20);
        let (left, top) = bulbs[0];
        assert!((left - 50.0).abs() < 1e-9);
        assert!((top - 4.0).abs() < 1e-9);
    }
}
