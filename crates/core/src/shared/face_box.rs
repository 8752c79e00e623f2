use serde::Serialize;

/// Axis-aligned face bounding box in pixel coordinates.
///
/// Edges are inclusive: the box covers columns `x..=right()` and rows
/// `y..=bottom()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Intersection with a `frame_width` × `frame_height` image, or `None`
    /// when the box lies entirely outside it.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<FaceBox> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_width as i32);
        let y2 = (self.y + self.height).min(frame_height as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(FaceBox::new(x1, y1, x2 - x1, y2 - y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_inclusive_edges() {
        let b = FaceBox::new(10, 20, 30, 40);
        assert_eq!(b.right(), 39);
        assert_eq!(b.bottom(), 59);
    }

    #[test]
    fn test_center() {
        let b = FaceBox::new(10, 20, 30, 40);
        assert_eq!(b.center(), (25.0, 40.0));
    }

    // ── clamp_to ─────────────────────────────────────────────────────

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let b = FaceBox::new(10, 10, 20, 20);
        assert_eq!(b.clamp_to(100, 100), Some(b));
    }

    #[rstest]
    #[case::left_edge(FaceBox::new(-5, 10, 20, 20), FaceBox::new(0, 10, 15, 20))]
    #[case::bottom_right(FaceBox::new(90, 90, 20, 20), FaceBox::new(90, 90, 10, 10))]
    fn test_clamp_crossing_edges(#[case] input: FaceBox, #[case] expected: FaceBox) {
        assert_eq!(input.clamp_to(100, 100), Some(expected));
    }

    #[test]
    fn test_clamp_outside_is_none() {
        let b = FaceBox::new(200, 200, 10, 10);
        assert_eq!(b.clamp_to(100, 100), None);
    }
}
