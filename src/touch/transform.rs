use super::types::TouchPoint;

/// Similarity transform (rotation, uniform scale, translation) between two
/// pairs of corresponding points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Radians, counter-clockwise in a y-up frame.
    pub rotate: f64,
    pub scale: f64,
    pub translate: [f64; 2],
    pub matrix: [[f64; 3]; 3],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        rotate: 0.0,
        scale: 1.0,
        translate: [0.0, 0.0],
        matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn apply(&self, point: TouchPoint) -> TouchPoint {
        let m = &self.matrix;
        TouchPoint {
            x: m[0][0] * point.x + m[0][1] * point.y + m[0][2],
            y: m[1][0] * point.x + m[1][1] * point.y + m[1][2],
        }
    }
}

/// Recovers the transform mapping `start_a → now_a` and `start_b → now_b`.
///
/// Returns `None` when the start points coincide (the scale is undefined) or
/// when any coordinate is not finite.
pub fn estimate(
    start_a: TouchPoint,
    start_b: TouchPoint,
    now_a: TouchPoint,
    now_b: TouchPoint,
) -> Option<Transform> {
    let (x1, y1, x2, y2) = (start_a.x, start_a.y, start_b.x, start_b.y);
    let (x3, y3, x4, y4) = (now_a.x, now_a.y, now_b.x, now_b.y);

    if ![x1, y1, x2, y2, x3, y3, x4, y4]
        .iter()
        .all(|value| value.is_finite())
    {
        return None;
    }

    let base_sq = (y2 - y1).powi(2) + (x2 - x1).powi(2);
    if base_sq <= f64::EPSILON {
        return None;
    }

    let rotate = (y4 - y3).atan2(x4 - x3) - (y2 - y1).atan2(x2 - x1);
    let scale = (((y4 - y3).powi(2) + (x4 - x3).powi(2)) / base_sq).sqrt();
    let (sin, cos) = rotate.sin_cos();

    let translate_x = x3 - scale * x1 * cos + scale * y1 * sin;
    let translate_y = y3 - scale * y1 * cos - scale * x1 * sin;

    Some(Transform {
        rotate,
        scale,
        translate: [translate_x, translate_y],
        matrix: [
            [scale * cos, -scale * sin, translate_x],
            [scale * sin, scale * cos, translate_y],
            [0.0, 0.0, 1.0],
        ],
    })
}
