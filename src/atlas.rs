//! Sprite atlas decoding
//!
//! An atlas is one uncompressed truecolor bitmap holding equally sized frames
//! laid out left to right. Rows are stored bottom-up, three bytes per pixel in
//! blue, green, red order. Decoding flips the rows and slices the image into
//! frames ready for the firmware blitter.

use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::error::DecodeError;

/// Size of the bitmap file header in front of the pixel data
pub const BMP_HEADER_SIZE: usize = 54;
/// Byte offset of the little-endian image width in the header
const BMP_WIDTH_OFFSET: usize = 18;
/// Byte offset of the little-endian image height in the header
const BMP_HEIGHT_OFFSET: usize = 22;
/// Bytes per source pixel (blue, green, red)
const SOURCE_BYTES_PER_PIXEL: usize = 3;

/// Value written to the reserved channel of every decoded pixel
pub const RESERVED_SENTINEL: u8 = 0;

/// One blit pixel, laid out as the firmware graphics protocol expects
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl Pixel {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: RESERVED_SENTINEL,
        }
    }
}

/// A single decoded sprite, rows top-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl PixelFrame {
    /// Pixel at `(x, y)`, `y = 0` being the top row
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Raw bytes for a buffer-to-video blit
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Width and height read from a bitmap header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub width: u32,
    pub height: u32,
}

impl BmpHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < BMP_HEADER_SIZE {
            return Err(DecodeError::HeaderTooShort {
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width: read_u32_le(bytes, BMP_WIDTH_OFFSET),
            height: read_u32_le(bytes, BMP_HEIGHT_OFFSET),
        })
    }
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}

/// Ordered frames sliced from one atlas image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteAtlas {
    pub frame_width: u32,
    pub frame_height: u32,
    frames: Vec<PixelFrame>,
}

impl SpriteAtlas {
    /// Slice a bottom-up BGR pixel buffer into frames.
    ///
    /// Frame count is `source_width / frame_width`; leftover columns on the
    /// right edge are dropped.
    pub fn decode(
        raw: &[u8],
        source_width: u32,
        source_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, DecodeError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(DecodeError::ZeroFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }

        let stride = source_width as usize * SOURCE_BYTES_PER_PIXEL;
        let expected = stride.saturating_mul(source_height as usize);
        if raw.len() < expected {
            return Err(DecodeError::Undersized {
                expected,
                actual: raw.len(),
            });
        }
        if frame_height > source_height {
            return Err(DecodeError::FrameTallerThanSource {
                frame_height,
                source_height,
            });
        }

        let frame_count = source_width / frame_width;
        let remainder = source_width % frame_width;
        if remainder != 0 {
            log::warn!(
                "Atlas width {} is not a multiple of {}; dropping {} columns",
                source_width,
                frame_width,
                remainder
            );
        }

        let frames = (0..frame_count)
            .map(|index| {
                let mut pixels = Vec::with_capacity((frame_width * frame_height) as usize);
                for y in 0..frame_height {
                    let row = (frame_height - 1 - y) as usize;
                    for x in 0..frame_width {
                        let column = (x + index * frame_width) as usize;
                        let at = row * stride + column * SOURCE_BYTES_PER_PIXEL;
                        pixels.push(Pixel::rgb(raw[at + 2], raw[at + 1], raw[at]));
                    }
                }
                PixelFrame {
                    width: frame_width,
                    height: frame_height,
                    pixels,
                }
            })
            .collect();

        log::debug!(
            "Decoded {} frames of {}x{} from {}x{} atlas",
            frame_count,
            frame_width,
            frame_height,
            source_width,
            source_height
        );

        Ok(Self {
            frame_width,
            frame_height,
            frames,
        })
    }

    /// Decode a whole bitmap file image (header followed by pixel rows)
    pub fn from_bmp(bytes: &[u8], frame_width: u32, frame_height: u32) -> Result<Self, DecodeError> {
        let header = BmpHeader::parse(bytes)?;
        Self::decode(
            &bytes[BMP_HEADER_SIZE..],
            header.width,
            header.height,
            frame_width,
            frame_height,
        )
    }

    pub fn frame(&self, index: usize) -> Option<&PixelFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[PixelFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Read and decode an atlas file
pub fn load_atlas(
    path: impl AsRef<Path>,
    frame_width: u32,
    frame_height: u32,
) -> Result<SpriteAtlas, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let atlas = SpriteAtlas::from_bmp(&bytes, frame_width, frame_height)?;
    log::info!("Loaded atlas {} ({} frames)", path.display(), atlas.len());
    Ok(atlas)
}

/// Edge of one glyph in the digit font
pub const DIGIT_SIZE: u32 = 36;

/// Every sprite sheet the game draws from
#[derive(Debug, Clone)]
pub struct SpriteSheets {
    pub player: SpriteAtlas,
    pub tiles: SpriteAtlas,
    pub coin: SpriteAtlas,
    pub castle: SpriteAtlas,
    pub digits: SpriteAtlas,
    pub cursor: SpriteAtlas,
}

impl SpriteSheets {
    /// Load all sheets from an `images` directory; the first failure aborts.
    ///
    /// Every sheet except the digit font is sliced into `tile_size` squares.
    pub fn load_dir(dir: impl AsRef<Path>, tile_size: u32) -> Result<Self, DecodeError> {
        let dir = dir.as_ref();
        let tile = tile_size;
        Ok(Self {
            player: load_atlas(dir.join("player.bmp"), tile, tile)?,
            tiles: load_atlas(dir.join("tiles.bmp"), tile, tile)?,
            coin: load_atlas(dir.join("coin.bmp"), tile, tile)?,
            castle: load_atlas(dir.join("castle.bmp"), tile, tile)?,
            digits: load_atlas(dir.join("digits.bmp"), DIGIT_SIZE, DIGIT_SIZE)?,
            cursor: load_atlas(dir.join("cursor.bmp"), tile, tile)?,
        })
    }
}
