/// Row-major RGBA float color attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl ColorBuffer {
    /// Creates a `width` x `height` buffer filled with `clear`.
    pub fn new(width: u32, height: u32, clear: [f32; 4]) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![clear; len],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, origin top-left. `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Number of pixels whose color differs from `clear`.
    pub fn covered_pixels(&self, clear: [f32; 4]) -> usize {
        self.pixels.iter().filter(|&&p| p != clear).count()
    }

    pub(super) fn pixels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.pixels
    }
}
