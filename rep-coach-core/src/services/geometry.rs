/// Geometry helpers over pose keypoints
///
/// Pure functions; nothing here holds state.

use crate::models::exercise_rule::BodyPoint;
use crate::models::keypoint::{Keypoint, PoseFrame};

/// Angle at `vertex` between the rays towards `a` and `c`, in degrees within [0, 180]
///
/// Degenerate input (a ray of zero length, or non-finite coordinates) yields 0.
pub fn joint_angle(a: &Keypoint, vertex: &Keypoint, c: &Keypoint) -> f32 {
    let (ba_x, ba_y) = (a.x - vertex.x, a.y - vertex.y);
    let (bc_x, bc_y) = (c.x - vertex.x, c.y - vertex.y);

    if (ba_x == 0.0 && ba_y == 0.0) || (bc_x == 0.0 && bc_y == 0.0) {
        return 0.0;
    }

    let radians = bc_y.atan2(bc_x) - ba_y.atan2(ba_x);
    let mut degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }

    if degrees.is_finite() {
        degrees.clamp(0.0, 180.0)
    } else {
        0.0
    }
}

/// Resolve a body point against a frame; midpoints need both landmarks present
pub fn resolve_point(frame: &PoseFrame, point: BodyPoint) -> Option<Keypoint> {
    match point {
        BodyPoint::Joint(lm) => frame.keypoint(lm).copied(),
        BodyPoint::Midpoint(a, b) => {
            let a = frame.keypoint(a)?;
            let b = frame.keypoint(b)?;
            Some(a.midpoint(b))
        }
    }
}

/// Signed vertical offset of `subject` below `reference` (image y grows downwards)
pub fn vertical_drop(subject: &Keypoint, reference: &Keypoint) -> f32 {
    subject.y - reference.y
}
