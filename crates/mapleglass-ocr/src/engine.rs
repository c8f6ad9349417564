//! Adapter around the Tesseract engine. The strict single-line
//! segmentation is accurate on game fonts when it works at all, so it runs
//! first behind a confidence gate; the looser raw-line and sparse-text
//! modes are noisier fallbacks for stylized text the strict mode rejects.

use anyhow::{Context, Result};
use image::RgbaImage;
use leptess::{LepTess, Variable};

/// Confidence below this distrusts the single-line strategy's output.
const CONFIDENCE_GATE: f32 = 0.6;

/// Character set allowed in numeric mode: digits plus the gauge decoration.
const NUMERIC_WHITELIST: &str = "0123456789()[]%.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizeMode {
    /// Free text (item names).
    Text,
    /// Regions known a priori to contain only a numeric gauge.
    Numeric,
}

/// Page-segmentation strategies in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SingleLine,
    RawLine,
    SparseText,
}

impl Strategy {
    fn psm(self) -> &'static str {
        match self {
            Strategy::SingleLine => "7",
            Strategy::RawLine => "13",
            Strategy::SparseText => "11",
        }
    }
}

/// Text plus the confidence and strategy that produced it.
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    pub text: String,
    pub confidence: f32,
    pub strategy: Strategy,
}

pub struct OcrEngine {
    inner: LepTess,
}

impl OcrEngine {
    /// Creates an engine for `language` (e.g. "kor"). Fails when the
    /// traineddata for the language cannot be found; callers are expected
    /// to degrade to "no recognition" rather than abort.
    pub fn new(language: &str, datapath: Option<&str>) -> Result<Self> {
        let inner = LepTess::new(datapath, language)
            .with_context(|| format!("failed to initialize Tesseract for language '{language}'"))?;
        Ok(Self { inner })
    }

    /// Runs the three-tier recognition. `None` means no strategy produced
    /// usable text; this is an expected outcome, not an error.
    pub fn recognize(&mut self, image: &RgbaImage, mode: RecognizeMode) -> Option<String> {
        let png = encode_png(image)
            .map_err(|e| tracing::warn!("could not encode image for recognition: {e}"))
            .ok()?;

        if mode == RecognizeMode::Numeric {
            self.set_whitelist(NUMERIC_WHITELIST);
        }
        let result = self.recognize_tiers(&png);
        if mode == RecognizeMode::Numeric {
            // Restriction must not leak into the next text call.
            self.set_whitelist("");
        }

        result.map(|r| r.text)
    }

    fn recognize_tiers(&mut self, png: &[u8]) -> Option<RecognitionResult> {
        if let Some(result) = self.attempt(png, Strategy::SingleLine) {
            tracing::debug!(
                text = %result.text,
                confidence = result.confidence,
                "single-line strategy"
            );
            if !result.text.is_empty() && result.confidence > CONFIDENCE_GATE {
                return Some(result);
            }
        }

        if let Some(result) = self.attempt(png, Strategy::RawLine) {
            tracing::debug!(text = %result.text, "raw-line strategy");
            if !result.text.is_empty() {
                return Some(result);
            }
        }

        let result = self.attempt(png, Strategy::SparseText)?;
        tracing::debug!(text = %result.text, "sparse-text strategy");
        if result.text.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    fn attempt(&mut self, png: &[u8], strategy: Strategy) -> Option<RecognitionResult> {
        if let Err(e) = self
            .inner
            .set_variable(Variable::TesseditPagesegMode, strategy.psm())
        {
            tracing::warn!("could not set segmentation mode {strategy:?}: {e}");
            return None;
        }
        if let Err(e) = self.inner.set_image_from_mem(png) {
            tracing::warn!("could not load image into recognizer: {e}");
            return None;
        }
        self.inner.set_source_resolution(300);

        let text = match self.inner.get_utf8_text() {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!("recognition failed in {strategy:?}: {e}");
                return None;
            }
        };
        let confidence = self.inner.mean_text_conf() as f32 / 100.0;

        Some(RecognitionResult {
            text,
            confidence,
            strategy,
        })
    }

    fn set_whitelist(&mut self, chars: &str) {
        if let Err(e) = self.inner.set_variable(Variable::TesseditCharWhitelist, chars) {
            tracing::warn!("could not update character whitelist: {e}");
        }
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .context("failed to encode PNG")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_map_to_expected_modes() {
        assert_eq!(Strategy::SingleLine.psm(), "7");
        assert_eq!(Strategy::RawLine.psm(), "13");
        assert_eq!(Strategy::SparseText.psm(), "11");
    }

    #[test]
    fn numeric_whitelist_covers_gauge_decoration() {
        for c in ['(', ')', '[', ']', '%', '.', '0', '9'] {
            assert!(NUMERIC_WHITELIST.contains(c));
        }
        assert!(!NUMERIC_WHITELIST.contains('a'));
    }
}
