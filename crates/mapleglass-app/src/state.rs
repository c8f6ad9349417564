use std::sync::{Arc, Mutex};

use mapleglass_config::Config;
use mapleglass_core::exp::ExpSession;
use mapleglass_ocr::OcrEngine;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// `None` when the recognizer could not be initialized (e.g. missing
    /// traineddata); every capture then reads as "no text" instead of
    /// failing.
    pub engine: Arc<Mutex<Option<OcrEngine>>>,
    pub exp: Arc<Mutex<Option<ExpSession>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let engine =
            match OcrEngine::new(&config.ocr.language, config.ocr.tessdata_path.as_deref()) {
                Ok(engine) => Some(engine),
                Err(e) => {
                    tracing::error!(
                        "recognizer unavailable, captures will return no text: {e:#}"
                    );
                    None
                }
            };

        Self {
            config: Arc::new(RwLock::new(config)),
            engine: Arc::new(Mutex::new(engine)),
            exp: Arc::new(Mutex::new(None)),
        }
    }
}
