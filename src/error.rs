//! Load and decode errors
//!
//! Collision edge cases are never errors; only resource loading can fail.

use std::fmt;
use std::io;

/// Failure to turn a bitmap into a sprite atlas
#[derive(Debug)]
pub enum DecodeError {
    /// Pixel buffer shorter than `width * height * 3`
    Undersized { expected: usize, actual: usize },
    /// Requested frame has a zero dimension
    ZeroFrameSize { width: u32, height: u32 },
    /// Frame rows would be read from beyond the source image
    FrameTallerThanSource { frame_height: u32, source_height: u32 },
    /// File shorter than the bitmap header
    HeaderTooShort { actual: usize },
    /// Atlas file could not be opened or read
    Io { path: String, source: io::Error },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undersized { expected, actual } => write!(
                f,
                "atlas pixel buffer too small: expected {expected} bytes, got {actual}"
            ),
            Self::ZeroFrameSize { width, height } => {
                write!(f, "atlas frame size must be non-zero, got {width}x{height}")
            }
            Self::FrameTallerThanSource {
                frame_height,
                source_height,
            } => write!(
                f,
                "atlas frame height {frame_height} exceeds source height {source_height}"
            ),
            Self::HeaderTooShort { actual } => {
                write!(f, "bitmap header truncated: got {actual} bytes")
            }
            Self::Io { path, source } => write!(f, "could not read atlas {path}: {source}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to load a level; fatal to the session
#[derive(Debug)]
pub enum LevelLoadError {
    /// Level file could not be opened or read
    Io { path: String, source: io::Error },
    /// Fewer bytes than the three-word header
    HeaderTooShort { actual: usize },
    /// Tile grid shorter than `width * height`
    Truncated { expected: usize, actual: usize },
    /// Width or height of zero
    EmptyGrid { width: u32, height: u32 },
    /// More object tiles than the declared object count
    TooManyObjects { capacity: usize },
    /// Grid dimensions times the tile size overflow the pixel space
    TooLarge { width: u32, height: u32 },
    /// Settings the level cannot be built with
    InvalidSettings(SettingsError),
}

impl fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "could not read level {path}: {source}"),
            Self::HeaderTooShort { actual } => {
                write!(f, "level header truncated: got {actual} bytes, need 12")
            }
            Self::Truncated { expected, actual } => write!(
                f,
                "level tile grid truncated: expected {expected} tiles, got {actual}"
            ),
            Self::EmptyGrid { width, height } => {
                write!(f, "level grid is empty: {width}x{height}")
            }
            Self::TooManyObjects { capacity } => write!(
                f,
                "level holds more objects than its declared count of {capacity}"
            ),
            Self::TooLarge { width, height } => {
                write!(f, "level of {width}x{height} tiles exceeds the pixel range")
            }
            Self::InvalidSettings(e) => write!(f, "cannot build level: {e}"),
        }
    }
}

impl std::error::Error for LevelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidSettings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SettingsError> for LevelLoadError {
    fn from(e: SettingsError) -> Self {
        Self::InvalidSettings(e)
    }
}

/// A settings value outside its usable range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Field must be greater than zero
    NonPositive { field: &'static str, value: i32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "setting {field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}
