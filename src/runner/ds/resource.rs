//! Resource-backed values: images, icons and filesystem references.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::runner::ds::error::ResourceError;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const ICO_HEADER_LEN: usize = 6;
const ICO_ENTRY_LEN: usize = 16;

fn read_resource(path: &Path) -> Result<Vec<u8>, ResourceError> {
    fs::read(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

fn le_i32(bytes: &[u8], at: usize) -> Option<i32> {
    let b = bytes.get(at..at + 4)?;
    Some(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Gif,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.starts_with(JPEG_SIGNATURE) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"BM") {
            Some(ImageFormat::Bmp)
        } else {
            None
        }
    }

    /// Pixel dimensions from the file header, where the format keeps them at
    /// a fixed offset.
    fn dimensions(self, bytes: &[u8]) -> Option<(u32, u32)> {
        match self {
            // IHDR is always the first chunk.
            ImageFormat::Png => Some((be_u32(bytes, 16)?, be_u32(bytes, 20)?)),
            ImageFormat::Gif => Some((le_u16(bytes, 6)? as u32, le_u16(bytes, 8)? as u32)),
            // Negative height marks a top-down bitmap.
            ImageFormat::Bmp => Some((
                le_i32(bytes, 18)?.unsigned_abs(),
                le_i32(bytes, 22)?.unsigned_abs(),
            )),
            ImageFormat::Jpeg => None,
        }
    }
}

/// Image data loaded from a resource file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    path: PathBuf,
    format: ImageFormat,
    dimensions: Option<(u32, u32)>,
    bytes: Arc<[u8]>,
}

impl ImageData {
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let bytes = read_resource(path)?;
        let format = ImageFormat::sniff(&bytes).ok_or_else(|| ResourceError::UnrecognizedImage {
            path: path.to_path_buf(),
        })?;
        Ok(ImageData {
            path: path.to_path_buf(),
            format,
            dimensions: format.dimensions(&bytes),
            bytes: bytes.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Width and height in pixels, when the header carries them.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// One image in an icon file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconEntry {
    pub width: u32,
    pub height: u32,
    pub bit_count: u16,
}

/// Icon data loaded from an `.ico` resource file.
#[derive(Debug, Clone, PartialEq)]
pub struct IconData {
    path: PathBuf,
    entries: Vec<IconEntry>,
    bytes: Arc<[u8]>,
}

impl IconData {
    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let bytes = read_resource(path)?;
        let invalid = |reason| ResourceError::InvalidIcon {
            path: path.to_path_buf(),
            reason,
        };

        if bytes.len() < ICO_HEADER_LEN {
            return Err(invalid("header is truncated"));
        }
        if le_u16(&bytes, 0) != Some(0) || le_u16(&bytes, 2) != Some(1) {
            return Err(invalid("header does not identify an icon"));
        }
        let count = le_u16(&bytes, 4).unwrap_or(0) as usize;
        if count == 0 {
            return Err(invalid("icon contains no images"));
        }

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let at = ICO_HEADER_LEN + i * ICO_ENTRY_LEN;
            let entry = bytes
                .get(at..at + ICO_ENTRY_LEN)
                .ok_or_else(|| invalid("image directory is truncated"))?;
            // A stored size of zero means 256 pixels.
            let size = |b: u8| if b == 0 { 256 } else { b as u32 };
            entries.push(IconEntry {
                width: size(entry[0]),
                height: size(entry[1]),
                bit_count: u16::from_le_bytes([entry[6], entry[7]]),
            });
        }

        Ok(IconData {
            path: path.to_path_buf(),
            entries,
            bytes: bytes.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[IconEntry] {
        &self.entries
    }

    /// The largest image in the icon.
    pub fn largest(&self) -> Option<&IconEntry> {
        self.entries.iter().max_by_key(|e| (e.width * e.height, e.bit_count))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A file location. The file is not required to exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef(PathBuf);

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRef(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn exists(&self) -> bool {
        self.0.is_file()
    }
}

impl Display for FileRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A directory location. The directory is not required to exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryRef(PathBuf);

impl DirectoryRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DirectoryRef(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn exists(&self) -> bool {
        self.0.is_dir()
    }
}

impl Display for DirectoryRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
