//! Image classification interface.
//!
//! Face-shape and skin-tone detection is an upstream display concern and
//! lives outside this crate. The trait fixes the contract: image bytes in,
//! labels out, with `"Unknown"` as the sentinel for anything a backend
//! cannot determine. [`DisabledClassifier`] is the only built-in backend.

use serde::Serialize;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Labels derived from a profile photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceAnalysis {
    pub face_shape: String,
    pub skin_tone: String,
}

impl FaceAnalysis {
    /// The all-sentinel result.
    pub fn unknown() -> Self {
        Self {
            face_shape: UNKNOWN_LABEL.to_string(),
            skin_tone: UNKNOWN_LABEL.to_string(),
        }
    }
}

/// Black-box classifier over raw image bytes. Implementations must never
/// fail; undeterminable inputs map to the `"Unknown"` sentinel.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> FaceAnalysis;
}

/// No-op backend: every input classifies as unknown.
pub struct DisabledClassifier;

impl ImageClassifier for DisabledClassifier {
    fn classify(&self, _image: &[u8]) -> FaceAnalysis {
        FaceAnalysis::unknown()
    }
}
