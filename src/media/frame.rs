// Raw frame and sample buffers exchanged with the media backend

/// Gray used for thumbnails that could not be extracted
pub const PLACEHOLDER_RGBA: [u8; 4] = [160, 160, 164, 255];

/// An RGBA8 picture with its presentation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp (milliseconds)
    pub pts_ms: u64,
    /// Row-major RGBA, `width * height * 4` bytes
    pub rgba: Vec<u8>,
}

impl VideoFrame {
    /// A frame filled with one color
    pub fn solid(width: u32, height: u32, pts_ms: u64, color: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            pts_ms,
            rgba: color.repeat(pixels),
        }
    }

    /// Fully transparent frame, the starting canvas for compositing
    pub fn transparent(width: u32, height: u32, pts_ms: u64) -> Self {
        Self::solid(width, height, pts_ms, [0, 0, 0, 0])
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.rgba.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Whether the buffer length matches the dimensions
    pub fn is_well_formed(&self) -> bool {
        self.rgba.len() == self.width as usize * self.height as usize * 4
    }
}

/// Interleaved float samples with their presentation time
#[derive(Debug, Clone, PartialEq)]
pub struct AudioChunk {
    /// Presentation timestamp (milliseconds)
    pub pts_ms: u64,
    pub pcm: Vec<f32>,
}

impl AudioChunk {
    pub fn new(pts_ms: u64, pcm: Vec<f32>) -> Self {
        Self { pts_ms, pcm }
    }

    /// Frames in the chunk for the given channel count
    pub fn frames(&self, channels: u16) -> usize {
        if channels == 0 {
            0
        } else {
            self.pcm.len() / channels as usize
        }
    }
}

/// Square RGBA preview image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl Thumbnail {
    pub fn placeholder(size: u32) -> Self {
        let frame = VideoFrame::solid(size, size, 0, PLACEHOLDER_RGBA);
        Self {
            size,
            rgba: frame.rgba,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.rgba
            .chunks_exact(4)
            .all(|pixel| pixel == PLACEHOLDER_RGBA.as_slice())
    }
}
