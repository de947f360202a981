//! Bridges from service seams into the desktop WebView.

mod scripts;
mod webview;

pub use scripts::{encode_pcm16_base64, focus_element, typeset_math};
pub use webview::{WebAudioOutput, WebParticles};
