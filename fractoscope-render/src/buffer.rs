/// An RGB pixel buffer representing a rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order, row 0 on top.
    pub pixels: Vec<u8>,
}

pub const BYTES_PER_PIXEL: usize = 3;

impl RenderBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Byte length of one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// The RGB triple at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}
