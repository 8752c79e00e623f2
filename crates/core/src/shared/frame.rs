/// BT.601 luma weights in 1/1000 units.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;

/// A decoded image: contiguous bytes in row-major order.
///
/// Colour frames are RGB (3 channels); detection engines consume
/// grayscale frames (1 channel). Format conversion happens at I/O
/// boundaries only.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Single-channel copy using BT.601 luma, rounded to nearest.
    ///
    /// A frame that is already grayscale is cloned as is.
    pub fn to_grayscale(&self) -> Frame {
        if self.channels == 1 {
            return self.clone();
        }
        let step = self.channels as usize;
        let gray = self
            .data
            .chunks_exact(step)
            .map(|px| {
                let sum = px[0] as u32 * LUMA_R + px[1] as u32 * LUMA_G + px[2] as u32 * LUMA_B;
                ((sum + 500) / 1000) as u8
            })
            .collect();
        Frame::new(gray, self.width, self.height, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.data(), &data[..]);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_data_mut_allows_modification() {
        let data = vec![0u8; 6]; // 2x1x3
        let mut frame = Frame::new(data, 2, 1, 3);
        frame.data_mut()[0] = 255;
        assert_eq!(frame.data()[0], 255);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3);
    }

    #[rstest]
    #[case::white([255, 255, 255], 255)]
    #[case::black([0, 0, 0], 0)]
    #[case::pure_red([255, 0, 0], 76)]
    #[case::pure_green([0, 255, 0], 150)]
    #[case::pure_blue([0, 0, 255], 29)]
    fn test_to_grayscale_uses_bt601_weights(#[case] rgb: [u8; 3], #[case] expected: u8) {
        let frame = Frame::new(rgb.to_vec(), 1, 1, 3);
        let gray = frame.to_grayscale();
        assert_eq!(gray.data(), &[expected]);
    }

    #[test]
    fn test_to_grayscale_keeps_dimensions() {
        let frame = Frame::new(vec![10u8; 5 * 4 * 3], 5, 4, 3);
        let gray = frame.to_grayscale();
        assert_eq!(gray.width(), 5);
        assert_eq!(gray.height(), 4);
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.data().len(), 20);
    }

    #[test]
    fn test_to_grayscale_on_gray_is_identity() {
        let frame = Frame::new(vec![1, 2, 3, 4], 2, 2, 1);
        assert_eq!(frame.to_grayscale().data(), frame.data());
    }

    #[test]
    fn test_is_empty_for_zero_dimension() {
        assert!(Frame::new(Vec::new(), 0, 10, 3).is_empty());
    }
}
