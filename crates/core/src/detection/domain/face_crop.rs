use crate::shared::face_box::FaceBox;

/// Default fraction of the face size added around the box before cropping.
pub const DEFAULT_MARGIN: f64 = 0.2;

/// Square image region handed to a landmark regressor.
///
/// Centred on the face box, side `max(w, h) * (1 + margin)`. Coordinates are
/// in image pixels and may extend past the image borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCrop {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

impl FaceCrop {
    pub fn around(bbox: &FaceBox, margin: f64) -> Self {
        let (cx, cy) = bbox.center();
        let side = bbox.width.max(bbox.height).max(1) as f64 * (1.0 + margin.max(0.0));
        Self {
            x: cx - side / 2.0,
            y: cy - side / 2.0,
            side,
        }
    }

    /// Image coordinates of a point given in normalised crop units ([0, 1]).
    pub fn to_image(&self, u: f64, v: f64) -> (f64, f64) {
        (self.x + u * self.side, self.y + v * self.side)
    }

    /// Image coordinates sampled for output pixel `(col, row)` of a
    /// `size` × `size` resampling, at pixel centres.
    pub fn sample_point(&self, col: usize, row: usize, size: usize) -> (f64, f64) {
        let scale = self.side / size as f64;
        (
            self.x + (col as f64 + 0.5) * scale - 0.5,
            self.y + (row as f64 + 0.5) * scale - 0.5,
        )
    }
}
