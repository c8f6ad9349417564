use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "kor".to_string()
}

fn default_scale() -> u32 {
    3
}

fn default_min_region_px() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code; one language at a time.
    #[serde(default = "default_language")]
    pub language: String,
    /// Explicit tessdata directory; `None` means the engine's default search.
    pub tessdata_path: Option<String>,
    /// Integer upscale factor applied before recognition.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Drags smaller than this on either axis are discarded as clicks.
    #[serde(default = "default_min_region_px")]
    pub min_region_px: u32,
    /// Dump each preprocessed image to a PNG for inspection.
    #[serde(default)]
    pub debug_dump: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tessdata_path: None,
            scale: default_scale(),
            min_region_px: default_min_region_px(),
            debug_dump: false,
        }
    }
}
