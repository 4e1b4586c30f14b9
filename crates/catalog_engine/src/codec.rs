//! Encoded-transfer codec for poster images.
//!
//! A selected image file becomes a self-describing data URL
//! (`data:<mime>;base64,<payload>`) that can be displayed directly and sent
//! verbatim in a create/update payload. The media type is detected from the
//! file's magic bytes, not its extension.

use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use catalog_core::PosterImage;
use catalog_logging::catalog_debug;

/// Largest image accepted for encoding (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const SUPPORTED_IMAGE_MIMES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

const BASE64_MARKER: &str = ";base64";

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("could not read image source {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image source is empty")]
    Empty,
    #[error("image is too large ({actual} bytes, max {max})")]
    TooLarge { max: u64, actual: u64 },
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("malformed encoded image: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Encodes raw image bytes into a data URL.
pub fn encode_bytes(bytes: &[u8]) -> Result<PosterImage, ReadError> {
    if bytes.is_empty() {
        return Err(ReadError::Empty);
    }
    let actual = bytes.len() as u64;
    if actual > MAX_IMAGE_BYTES {
        return Err(ReadError::TooLarge {
            max: MAX_IMAGE_BYTES,
            actual,
        });
    }
    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .filter(|mime| SUPPORTED_IMAGE_MIMES.contains(mime))
        .ok_or(ReadError::UnsupportedFormat)?;

    Ok(PosterImage::new(format!(
        "data:{mime}{BASE64_MARKER},{}",
        BASE64.encode(bytes)
    )))
}

/// Reads an image file once and encodes it. The file is not kept open.
pub async fn encode_file(path: &Path) -> Result<PosterImage, ReadError> {
    let io_error = |source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(ReadError::TooLarge {
            max: MAX_IMAGE_BYTES,
            actual: metadata.len(),
        });
    }
    let bytes = tokio::fs::read(path).await.map_err(io_error)?;
    catalog_debug!("Encoding {} bytes from {:?}", bytes.len(), path);
    encode_bytes(&bytes)
}

/// Recovers media type and bytes from an encoded image.
///
/// Remote references are not data URLs and yield `ReadError::Malformed`;
/// those are displayed by reference instead.
pub fn decode_image(image: &PosterImage) -> Result<DecodedImage, ReadError> {
    let rest = image
        .as_str()
        .strip_prefix(PosterImage::DATA_URL_PREFIX)
        .ok_or_else(|| ReadError::Malformed("not a data url".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ReadError::Malformed("missing payload separator".to_string()))?;
    let media_type = header
        .strip_suffix(BASE64_MARKER)
        .ok_or_else(|| ReadError::Malformed("payload is not base64".to_string()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|err| ReadError::Malformed(err.to_string()))?;
    Ok(DecodedImage {
        media_type: media_type.to_string(),
        bytes,
    })
}
