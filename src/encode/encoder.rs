//! Video encoder detection and selection
//!
//! Queries GStreamer for available encoders and prioritizes hardware-
//! accelerated ones over software fallbacks.

use anyhow::{Context, Result};
use gstreamer as gst;

/// Codec type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    H264,
    H265,
    VP9,
}

impl Codec {
    pub fn name(&self) -> &'static str {
        match self {
            Codec::H264 => "H.264",
            Codec::H265 => "H.265",
            Codec::VP9 => "VP9",
        }
    }
}

/// Information about an available encoder
#[derive(Debug, Clone)]
pub struct EncoderInfo {
    /// Human-readable name (e.g., "VA-API H.264")
    pub name: String,
    /// GStreamer element name (e.g., "vaapih264enc")
    pub gst_element: String,
    /// Codec type
    pub codec: Codec,
    /// Whether this is hardware-accelerated
    pub hardware: bool,
    /// Priority (lower = better, hardware encoders have lower priority)
    pub priority: u8,
}

impl EncoderInfo {
    /// Display name with hardware/software indicator
    pub fn display_name(&self) -> String {
        let hw = if self.hardware {
            " (Hardware)"
        } else {
            " (Software)"
        };
        format!("{}{}", self.name, hw)
    }
}

/// Candidate encoder elements, in priority order
const CANDIDATES: &[(&str, &str, Codec, bool, u8)] = &[
    // VA-API (Intel/AMD)
    ("VA-API H.264", "vaapih264enc", Codec::H264, true, 10),
    ("VA-API H.265", "vaapih265enc", Codec::H265, true, 11),
    ("VA-API VP9", "vaapivp9enc", Codec::VP9, true, 12),
    // NVENC (NVIDIA)
    ("NVENC H.264", "nvh264enc", Codec::H264, true, 20),
    ("NVENC H.265", "nvh265enc", Codec::H265, true, 21),
    // Software fallbacks
    ("x264 H.264", "x264enc", Codec::H264, false, 100),
    ("VP9", "vp9enc", Codec::VP9, false, 101),
];

/// Detect available video encoders, best first
pub fn detect_encoders() -> Result<Vec<EncoderInfo>> {
    gst::init().context("Failed to initialize GStreamer")?;

    let mut encoders: Vec<EncoderInfo> = CANDIDATES
        .iter()
        .filter(|(_, element, _, _, _)| encoder_available(element))
        .map(|&(name, element, codec, hardware, priority)| EncoderInfo {
            name: name.to_string(),
            gst_element: element.to_string(),
            codec,
            hardware,
            priority,
        })
        .collect();
    encoders.sort_by_key(|e| e.priority);
    Ok(encoders)
}

/// Check if a GStreamer encoder element is available
fn encoder_available(element_name: &str) -> bool {
    gst::ElementFactory::find(element_name).is_some()
}

/// Get the best available encoder (first hardware encoder, or first software if none)
pub fn best_encoder() -> Result<EncoderInfo> {
    detect_encoders()?
        .into_iter()
        .next()
        .context("No video encoders available. Install GStreamer encoder plugins.")
}

/// Find an encoder by its GStreamer element name
pub fn find_encoder(element: &str) -> Result<EncoderInfo> {
    let encoders = detect_encoders()?;
    encoders
        .iter()
        .find(|e| e.gst_element == element)
        .cloned()
        .with_context(|| {
            format!(
                "Encoder '{}' not available. Available encoders: {:?}",
                element,
                encoders.iter().map(|e| &e.gst_element).collect::<Vec<_>>()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_name() {
        assert_eq!(Codec::H264.name(), "H.264");
        assert_eq!(Codec::H265.name(), "H.265");
        assert_eq!(Codec::VP9.name(), "VP9");
    }

    #[test]
    fn test_candidates_sorted_hardware_first() {
        for pair in CANDIDATES.windows(2) {
            assert!(pair[0].4 <= pair[1].4);
        }
        assert!(CANDIDATES.iter().all(|c| c.3 == (c.4 < 100)));
    }

    #[test]
    fn test_encoder_info_display_name() {
        let sw = EncoderInfo {
            name: "x264 H.264".to_string(),
            gst_element: "x264enc".to_string(),
            codec: Codec::H264,
            hardware: false,
            priority: 100,
        };
        assert_eq!(sw.display_name(), "x264 H.264 (Software)");
    }

    #[test]
    fn test_detect_encoders_returns_sorted_list() {
        // Succeeds even when no encoder plugins are installed
        let Ok(encoders) = detect_encoders() else {
            return;
        };
        for pair in encoders.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
    }

    #[test]
    fn test_find_encoder_unknown_is_error() {
        if detect_encoders().is_ok() {
            assert!(find_encoder("no-such-encoder").is_err());
        }
    }
}
