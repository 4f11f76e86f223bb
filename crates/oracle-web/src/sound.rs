//! Shake Sound Cue

use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

const SHAKE_SOUND_URL: &str = "https://assets.mixkit.co/active_storage/sfx/1435/1435-preview.mp3";
const SHAKE_VOLUME: f64 = 0.3;

/// Preloaded shake sound; silent when audio is unavailable
pub struct ShakeSound(Option<HtmlAudioElement>);

impl ShakeSound {
    pub fn load() -> Self {
        let audio = HtmlAudioElement::new_with_src(SHAKE_SOUND_URL).ok();
        if let Some(audio) = &audio {
            audio.set_volume(SHAKE_VOLUME);
        }
        Self(audio)
    }

    /// Restart from the beginning; autoplay refusals are ignored
    pub fn play(&self) {
        if let Some(audio) = &self.0 {
            audio.set_current_time(0.0);
            if let Ok(playback) = audio.play() {
                // swallow the rejection instead of surfacing it on the console
                spawn_local(async move {
                    let _ = JsFuture::from(playback).await;
                });
            }
        }
    }
}
