mod capture;
mod engine;
mod input;
mod window;

pub use capture::{FrozenFrame, primary_screen_size};
pub use engine::{OcrEngine, RecognitionResult, RecognizeMode, Strategy};
pub use input::{InputSampler, InputSnapshot, KeyBindings};
pub use window::{NullWindow, OverlayWindow, WindowBounds, find_target_window};
#[cfg(windows)]
pub use window::Win32Window;
