//! The synchronous capture-to-text pipeline: rebuild the crop as an image,
//! preprocess, recognize, clean and typo-correct. Runs on a blocking worker
//! so the poll loop never stalls on the recognizer.

use std::sync::Mutex;

use image::RgbaImage;
use mapleglass_core::{preprocess, text, typo};
use mapleglass_ocr::{OcrEngine, RecognizeMode};
use mapleglass_types::{CaptureMode, CroppedRegion};

/// Runs recognition over one committed region. `None` covers every
/// "no usable text" outcome: engine unavailable, all strategies blank, or
/// nothing left after cleanup.
pub fn recognize_region(
    engine: &Mutex<Option<OcrEngine>>,
    crop: &CroppedRegion,
    mode: CaptureMode,
    scale: u32,
    debug_dump: bool,
) -> Option<String> {
    let raw = RgbaImage::from_raw(crop.width, crop.height, crop.data.clone())?;
    let processed = preprocess::preprocess(&raw, scale);

    if debug_dump {
        dump_processed(&processed);
    }

    let recognize_mode = if mode.is_exp() {
        RecognizeMode::Numeric
    } else {
        RecognizeMode::Text
    };

    let Ok(mut guard) = engine.lock() else {
        tracing::warn!("recognizer lock poisoned, treating as unavailable");
        return None;
    };
    let engine = guard.as_mut()?;

    let recognized = engine.recognize(&processed, recognize_mode)?;
    let cleaned = text::clean_recognized(&recognized);
    if cleaned.is_empty() {
        return None;
    }
    Some(typo::correct(&cleaned))
}

fn dump_processed(processed: &RgbaImage) {
    let path = std::env::temp_dir().join("mapleglass_processed.png");
    if let Err(e) = processed.save(&path) {
        tracing::warn!("could not dump preprocessed image to {}: {e}", path.display());
    } else {
        tracing::debug!("preprocessed image dumped to {}", path.display());
    }
}
