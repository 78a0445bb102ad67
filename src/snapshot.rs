//! The transportable sketch payload.
//!
//! A snapshot is either empty ("no sketch provided") or a PNG data URL. This
//! is the only value that crosses into the submission form, and the backend
//! decodes it with exactly the rules in [`decode_data_url`].

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::consts::{IMAGE_DATA_URL_PREFIX, PNG_DATA_URL_PREFIX};

/// Error returned by [`decode_data_url`].
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The payload does not start with `data:image/`.
    #[error("payload is not an image data URL")]
    NotAnImage,
    /// No comma separates the header from the data.
    #[error("image data URL has no payload")]
    MissingPayload,
    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encoded surface contents, tagged with the clear epoch it was taken in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SketchSnapshot {
    payload: String,
    epoch: u64,
}

impl SketchSnapshot {
    /// The "no sketch provided" value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-encoded data URL.
    #[must_use]
    pub fn from_data_url(payload: String, epoch: u64) -> Self {
        Self { payload, epoch }
    }

    /// Encode raw PNG bytes as a data URL.
    #[must_use]
    pub fn from_png_bytes(png: &[u8], epoch: u64) -> Self {
        Self::from_data_url(png_data_url(png), epoch)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.payload
    }

    /// Clear epoch of the engine at the time the snapshot was taken.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Decode the PNG bytes. Empty snapshots decode to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the payload is not a decodable image data URL.
    pub fn png_bytes(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        if self.is_empty() {
            return Ok(None);
        }
        decode_data_url(&self.payload).map(Some)
    }
}

/// Format PNG bytes as `data:image/png;base64,...`.
#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// Decode an image data URL the way the generation backend does: require the
/// `data:image/` prefix, split at the first comma, base64-decode the rest.
///
/// # Errors
///
/// Returns [`SnapshotError`] describing the first rule the input breaks.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, SnapshotError> {
    if !data_url.starts_with(IMAGE_DATA_URL_PREFIX) {
        return Err(SnapshotError::NotAnImage);
    }
    let Some((_, encoded)) = data_url.split_once(',') else {
        return Err(SnapshotError::MissingPayload);
    };
    STANDARD.decode(encoded).map_err(SnapshotError::from)
}
