//! Slideshow image formats.
//!
//! Detection works two ways: by file extension (cheap, used to build
//! catalogs) and by magic bytes (used by the filesystem probe, so a file
//! that exists but is not an image never reaches the slideshow).

use std::path::Path;

/// Image MIME type constants.
pub mod mime {
    pub const JPEG: &str = "image/jpeg";
    pub const PNG: &str = "image/png";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
}

/// Minimum header length needed to sniff every supported format.
pub const SNIFF_LEN: usize = 12;

/// Image formats the slideshow can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Guess format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Guess format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Detect format from the leading bytes of a file.
    ///
    /// ```text
    /// JPEG  FF D8 FF
    /// PNG   89 50 4E 47 0D 0A 1A 0A
    /// GIF   "GIF87a" | "GIF89a"
    /// WEBP  "RIFF" <u32 size> "WEBP"
    /// ```
    pub fn sniff(header: &[u8]) -> Option<Self> {
        match header {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    /// MIME type for HTTP/presentation use.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => mime::JPEG,
            Self::Png => mime::PNG,
            Self::Gif => mime::GIF,
            Self::Webp => mime::WEBP,
        }
    }

    /// Rank of an extension inside the builtin catalog (lower comes first).
    ///
    /// `jpg` and `jpeg` share a format but not a rank.
    pub fn extension_rank(ext: &str) -> Option<u8> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" => Some(0),
            "jpeg" => Some(1),
            "png" => Some(2),
            "gif" => Some(3),
            "webp" => Some(4),
            _ => None,
        }
    }
}
