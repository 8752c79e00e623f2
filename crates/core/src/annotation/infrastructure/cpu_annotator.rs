use image::{ImageBuffer, Rgb};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::annotation::domain::annotation_style::AnnotationStyle;
use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::landmark_detector::AlignedFace;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Draws face boxes and landmark discs directly into an RGB frame.
///
/// Shapes crossing the frame border are clipped.
pub struct CpuAnnotator {
    style: AnnotationStyle,
}

impl CpuAnnotator {
    pub fn new(style: AnnotationStyle) -> Self {
        Self { style }
    }
}

impl Default for CpuAnnotator {
    fn default() -> Self {
        Self::new(AnnotationStyle::default())
    }
}

impl FrameAnnotator for CpuAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        faces: &[AlignedFace],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!(
                "Annotation expects an RGB frame, got {} channels",
                frame.channels()
            )
            .into());
        }
        self.style.validate()?;
        let radius = i32::try_from(self.style.landmark_radius)?;
        let thickness = i32::try_from(self.style.box_thickness)?;

        let (width, height) = (frame.width(), frame.height());
        let mut canvas: ImageBuffer<Rgb<u8>, &mut [u8]> =
            ImageBuffer::from_raw(width, height, frame.data_mut())
                .ok_or("Frame buffer does not match its dimensions")?;

        for aligned in faces {
            let bbox = &aligned.face.bbox;
            if bbox.clamp_to(width, height).is_some() {
                self.draw_box(&mut canvas, bbox, thickness);
            }
            for &point in aligned.landmarks.points() {
                match disc_center(point, radius, width, height) {
                    Some(center) => draw_filled_circle_mut(
                        &mut canvas,
                        center,
                        radius,
                        Rgb(self.style.landmark_color),
                    ),
                    None => log::debug!("Skipping landmark {point:?} outside the frame"),
                }
            }
        }
        Ok(())
    }
}

impl CpuAnnotator {
    fn draw_box(&self, canvas: &mut ImageBuffer<Rgb<u8>, &mut [u8]>, bbox: &FaceBox, thickness: i32) {
        let color = Rgb(self.style.box_color);
        for inset in 0..thickness {
            let w = bbox.width - 2 * inset;
            let h = bbox.height - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at(bbox.x + inset, bbox.y + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(canvas, rect, color);
        }
    }
}

/// Integer disc centre for a landmark, or `None` when no part of the disc
/// can touch the frame (including non-finite coordinates).
fn disc_center((x, y): (f64, f64), radius: i32, width: u32, height: u32) -> Option<(i32, i32)> {
    let r = radius as f64;
    let inside = |v: f64, extent: u32| v.is_finite() && v > -r - 1.0 && v < extent as f64 + r;
    (inside(x, width) && inside(y, height)).then(|| (x as i32, y as i32))
}
