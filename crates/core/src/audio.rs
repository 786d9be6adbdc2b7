//! Synthesized audio types

use std::sync::Arc;

/// One synthesized utterance, ready for playback
///
/// Clips are cheap to clone (shared bytes) so the gateway can hand the same
/// cached clip to the playback sink repeatedly.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Encoded audio bytes as returned by the synthesis collaborator
    pub bytes: Arc<Vec<u8>>,
    /// Media type of the payload, e.g. "audio/mpeg"
    pub media_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            media_type: media_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_shares_bytes_on_clone() {
        let clip = AudioClip::new(vec![1, 2, 3], "audio/mpeg");
        let copy = clip.clone();
        assert!(Arc::ptr_eq(&clip.bytes, &copy.bytes));
        assert_eq!(copy.len(), 3);
    }
}
